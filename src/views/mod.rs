// ============================================================================
// VIEWS - DOM renderers (no business logic)
// ============================================================================
// Each view builds its static markup once and exposes `update_*` functions
// that re-project one piece of AppState onto the existing elements.
// ============================================================================

pub mod app;
pub mod auth;
pub mod events;
pub mod registrations;
pub mod admin;
pub mod scanner;
pub mod toast;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::state::AppState;
use crate::viewmodels::{
    EventsViewModel, NavigationViewModel, RegistrationsViewModel, ScannerViewModel, Services, SessionViewModel,
};

pub use app::render_app;

/// State plus services, cloned into every event handler
#[derive(Clone)]
pub struct ViewContext {
    pub state: AppState,
    pub services: Services,
}

impl ViewContext {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    pub fn session(&self) -> SessionViewModel {
        SessionViewModel::new(self.state.clone(), self.services.clone())
    }

    pub fn navigation(&self) -> NavigationViewModel {
        NavigationViewModel::new(self.state.clone(), self.services.clone())
    }

    pub fn events(&self) -> EventsViewModel {
        EventsViewModel::new(self.state.clone(), self.services.clone())
    }

    pub fn registrations(&self) -> RegistrationsViewModel {
        RegistrationsViewModel::new(self.state.clone(), self.services.clone())
    }

    pub fn scanner(&self) -> ScannerViewModel {
        ScannerViewModel::new(self.state.clone(), self.services.clone())
    }
}

/// Spinner with a caption
pub fn loading(message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("loading")
        .child(ElementBuilder::new("div")?.class("loading-spinner").build())?
        .child(ElementBuilder::new("p")?.text(message).build())?
        .build())
}

/// Empty-list placeholder
pub fn empty_state(icon: &str, title: &str, message: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("empty-state")
        .child(ElementBuilder::new("div")?.class("empty-state-icon").text(icon).build())?
        .child(ElementBuilder::new("h3")?.text(title).build())?
        .child(ElementBuilder::new("p")?.text(message).build())?
        .build())
}

/// Error card; the retry button is wired by the caller
pub fn error_card(title: &str, message: &str) -> Result<(Element, Element), JsValue> {
    let retry = ElementBuilder::new("button")?
        .class("btn btn-primary")
        .attr("type", "button")?
        .text("Retry")
        .build();
    let card = ElementBuilder::new("div")?
        .class("error-state")
        .child(ElementBuilder::new("h3")?.text(title).build())?
        .child(ElementBuilder::new("p")?.text(message).build())?
        .child(retry.clone())?
        .build();
    Ok((card, retry))
}

/// Disables a button and swaps its label while `busy`
pub fn set_button_busy(button: &Element, busy: bool, idle_label: &str, busy_label: &str) -> Result<(), JsValue> {
    if busy {
        button.set_attribute("disabled", "")?;
        button.set_text_content(Some(busy_label));
    } else {
        button.remove_attribute("disabled")?;
        button.set_text_content(Some(idle_label));
    }
    Ok(())
}
