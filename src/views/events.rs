// ============================================================================
// EVENTS VIEW - Event list and cards
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id, on_click, query_selector_all, ElementBuilder};
use crate::models::Event;
use crate::state::{AppState, Loadable, PendingAction};
use crate::utils::datetime::{format_date, format_date_time};
use crate::utils::EVENTS_LIST_ID;
use crate::views::{empty_state, error_card, loading, set_button_busy, ViewContext};

const REGISTER_LABEL: &str = "Register Now";
const LOGIN_TO_REGISTER_LABEL: &str = "Login to Register";

pub fn render_events_tab() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("card")
        .child(ElementBuilder::new("h2")?.text("📅 Upcoming Events").build())?
        .child(ElementBuilder::new("div")?.id(EVENTS_LIST_ID)?.class("events-grid").build())?
        .build())
}

fn detail_item(icon: &str, text: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("detail-item")
        .child(ElementBuilder::new("span")?.class("detail-icon").text(icon).build())?
        .child(ElementBuilder::new("span")?.text(text).build())?
        .build())
}

fn event_card(ctx: &ViewContext, event: &Event) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?
        .class("event-header")
        .child(ElementBuilder::new("h3")?.class("event-title").text(&event.title).build())?
        .child(ElementBuilder::new("div")?.class("event-date").text(&format_date(&event.date)).build())?
        .build();

    let mut details = vec![
        detail_item("📅", &format_date_time(&event.date))?,
        detail_item("📍", event.location_or_default())?,
    ];
    if let Some(max) = event.max_attendees {
        details.push(detail_item("👥", &format!("Max: {}", max))?);
    }

    let button = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "button")?
        .attr("data-event-id", &event.id.to_string())?
        .build();
    apply_register_button(&ctx.state, &button, event.id)?;

    let event_id = event.id;
    let handler_ctx = ctx.clone();
    on_click(&button, move |_| {
        let ctx = handler_ctx.clone();
        spawn_local(async move {
            let _ = ctx.events().register_for_event(event_id).await;
        });
    })?;

    Ok(ElementBuilder::new("div")?
        .class("event-card fade-in")
        .child(header)?
        .child(
            ElementBuilder::new("div")?
                .class("event-description")
                .text(event.description_or_default())
                .build(),
        )?
        .child(ElementBuilder::new("div")?.class("event-details").children(details)?.build())?
        .child(button)?
        .build())
}

fn apply_register_button(state: &AppState, button: &Element, event_id: i64) -> Result<(), JsValue> {
    if !state.session.is_authenticated() {
        button.set_attribute("disabled", "")?;
        button.set_text_content(Some(LOGIN_TO_REGISTER_LABEL));
        return Ok(());
    }
    set_button_busy(
        button,
        state.is_pending(PendingAction::RegisterForEvent(event_id)),
        REGISTER_LABEL,
        "Registering...",
    )
}

/// Re-renders `#events-list` from the events state
pub fn update_events(ctx: &ViewContext) -> Result<(), JsValue> {
    let Some(container) = get_element_by_id(EVENTS_LIST_ID) else {
        return Ok(());
    };
    clear_children(&container);

    match &*ctx.state.events.borrow() {
        Loadable::Idle => {}
        Loadable::Loading => append_child(&container, &loading("Loading events...")?)?,
        Loadable::Failed(message) => {
            let (card, retry) = error_card("Error Loading Events", message)?;
            let retry_ctx = ctx.clone();
            on_click(&retry, move |_| {
                let ctx = retry_ctx.clone();
                spawn_local(async move { ctx.events().load_events().await });
            })?;
            append_child(&container, &card)?;
        }
        Loadable::Loaded(events) if events.is_empty() => append_child(
            &container,
            &empty_state("📅", "No Events Available", "Check back later for upcoming events.")?,
        )?,
        Loadable::Loaded(events) => {
            for event in events {
                append_child(&container, &event_card(ctx, event)?)?;
            }
        }
    }
    Ok(())
}

/// Busy/enabled state of every register button
pub fn update_register_buttons(state: &AppState) -> Result<(), JsValue> {
    for button in query_selector_all("[data-event-id]")? {
        let Some(event_id) = button.get_attribute("data-event-id").and_then(|id| id.parse().ok()) else {
            continue;
        };
        apply_register_button(state, &button, event_id)?;
    }
    Ok(())
}
