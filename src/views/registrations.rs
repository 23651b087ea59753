// ============================================================================
// REGISTRATIONS VIEW - "My registrations" and the admin overview
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id, labelled_line, on_click, ElementBuilder};
use crate::models::Registration;
use crate::state::Loadable;
use crate::utils::datetime::format_date_time;
use crate::utils::{ALL_REGISTRATIONS_LIST_ID, MY_REGISTRATIONS_LIST_ID};
use crate::views::{empty_state, error_card, loading, ViewContext};

/// Which list is rendered; the admin list shows who registered and the raw QR data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationList {
    Mine,
    All,
}

impl RegistrationList {
    fn container_id(self) -> &'static str {
        match self {
            RegistrationList::Mine => MY_REGISTRATIONS_LIST_ID,
            RegistrationList::All => ALL_REGISTRATIONS_LIST_ID,
        }
    }

    fn loading_message(self) -> &'static str {
        match self {
            RegistrationList::Mine => "Loading your registrations...",
            RegistrationList::All => "Loading all registrations...",
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            RegistrationList::Mine => "You have not registered for any events yet.",
            RegistrationList::All => "No one has registered for events yet.",
        }
    }
}

pub fn render_my_registrations_tab() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("card")
        .child(ElementBuilder::new("h2")?.text("🎟️ My Registrations").build())?
        .child(ElementBuilder::new("div")?.id(MY_REGISTRATIONS_LIST_ID)?.class("registrations-list").build())?
        .build())
}

/// Body of the admin "all registrations" section
pub fn render_all_registrations() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("card")
        .child(ElementBuilder::new("h3")?.text("📋 All Registrations").build())?
        .child(ElementBuilder::new("div")?.id(ALL_REGISTRATIONS_LIST_ID)?.class("registrations-list").build())?
        .build())
}

fn qr_section(registration: &Registration, list: RegistrationList) -> Result<Option<Element>, JsValue> {
    let Some(src) = registration.qr_image_src() else {
        return Ok(None);
    };
    let mut section = ElementBuilder::new("div")?
        .class("qr-code-section")
        .child(ElementBuilder::new("p")?.child(ElementBuilder::new("strong")?.text("QR Code:").build())?.build())?
        .child(
            ElementBuilder::new("img")?
                .class("qr-code-image")
                .attr("src", &src)?
                .attr("alt", "QR Code")?
                .build(),
        )?;
    if list == RegistrationList::All {
        section = section.child(
            ElementBuilder::new("p")?
                .class("qr-data")
                .text(&format!("QR Data: {}", registration.qr_code_data))
                .build(),
        )?;
    }
    Ok(Some(section.build()))
}

fn registration_card(registration: &Registration, list: RegistrationList) -> Result<Element, JsValue> {
    let status_class = if registration.is_verified { "status-verified" } else { "status-pending" };
    let header = ElementBuilder::new("div")?
        .class("registration-header")
        .child(ElementBuilder::new("h4")?.text(&registration.event_title()).build())?
        .child(
            ElementBuilder::new("span")?
                .class(&format!("status-badge {}", status_class))
                .text(registration.status_label())
                .build(),
        )?
        .build();

    let mut details = Vec::new();
    if list == RegistrationList::All {
        if let Some(user) = &registration.user {
            details.push(labelled_line("User:", &format!("{} ({})", user.full_name, user.email))?);
        }
    }
    details.push(labelled_line("Registered:", &format_date_time(&registration.registration_date))?);
    if let Some(verified) = &registration.verification_date {
        details.push(labelled_line("Verified:", &format_date_time(verified))?);
    }

    let mut card = ElementBuilder::new("div")?
        .class("registration-card fade-in")
        .child(header)?
        .child(ElementBuilder::new("div")?.class("registration-details").children(details)?.build())?;
    if let Some(qr) = qr_section(registration, list)? {
        card = card.child(qr)?;
    }
    Ok(card.build())
}

pub fn update_registrations(ctx: &ViewContext, list: RegistrationList) -> Result<(), JsValue> {
    let Some(container) = get_element_by_id(list.container_id()) else {
        return Ok(());
    };
    clear_children(&container);

    let source = match list {
        RegistrationList::Mine => &ctx.state.my_registrations,
        RegistrationList::All => &ctx.state.all_registrations,
    };
    let data = source.borrow();

    match &*data {
        Loadable::Idle => {}
        Loadable::Loading => append_child(&container, &loading(list.loading_message())?)?,
        Loadable::Failed(message) => {
            let (card, retry) = error_card("Error Loading Registrations", message)?;
            let retry_ctx = ctx.clone();
            on_click(&retry, move |_| {
                let ctx = retry_ctx.clone();
                spawn_local(async move {
                    match list {
                        RegistrationList::Mine => ctx.registrations().load_mine().await,
                        RegistrationList::All => ctx.registrations().load_all().await,
                    }
                });
            })?;
            append_child(&container, &card)?;
        }
        Loadable::Loaded(items) if items.is_empty() => append_child(
            &container,
            &empty_state("🎟️", "No Registrations Found", list.empty_message())?,
        )?,
        Loadable::Loaded(items) => {
            for registration in items {
                append_child(&container, &registration_card(registration, list)?)?;
            }
        }
    }
    Ok(())
}
