// ============================================================================
// TOAST VIEW - Transient notifications
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, document, get_element_by_id, ElementBuilder};
use crate::models::Notification;
use crate::state::AppState;
use crate::utils::TOAST_CONTAINER_ID;

pub fn render_toast_container() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?.id(TOAST_CONTAINER_ID)?.class("toast-container").build())
}

fn container() -> Result<Element, JsValue> {
    if let Some(existing) = get_element_by_id(TOAST_CONTAINER_ID) {
        return Ok(existing);
    }
    let created = render_toast_container()?;
    let body = document()
        .and_then(|doc| doc.body())
        .ok_or_else(|| JsValue::from_str("No body"))?;
    body.append_child(&created)?;
    Ok(created)
}

fn toast(notification: &Notification) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class(&format!("toast toast-{}", notification.kind.css_suffix()))
        .child(ElementBuilder::new("span")?.class("toast-icon").text(notification.kind.icon()).build())?
        .child(ElementBuilder::new("span")?.class("toast-message").text(&notification.message).build())?
        .build())
}

/// Shows every queued notification; each one removes itself after the
/// configured duration
pub fn show_pending_toasts(state: &AppState) -> Result<(), JsValue> {
    let pending = state.take_notifications();
    if pending.is_empty() {
        return Ok(());
    }
    let container = container()?;
    for notification in &pending {
        let element = toast(notification)?;
        append_child(&container, &element)?;
        Timeout::new(CONFIG.toast_duration_ms, move || element.remove()).forget();
    }
    Ok(())
}
