// ============================================================================
// ADMIN VIEW - Section navigation, create-event form and result panel
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, clear_children, get_element_by_id, input_value, labelled_line, on_click, on_submit, query_selector_all,
    reset_form, set_class, ElementBuilder,
};
use crate::models::EventDraft;
use crate::state::{AdminSection, AppState, CreateEventOutcome, PendingAction, Section};
use crate::utils::datetime::format_date_time;
use crate::utils::{ADMIN_PANEL_ID, CREATE_EVENT_FORM_ID, CREATE_EVENT_RESULT_ID};
use crate::views::registrations::render_all_registrations;
use crate::views::scanner::render_scanner;
use crate::views::{set_button_busy, ViewContext};

const CREATE_EVENT_SUBMIT_ID: &str = "create-event-submit";

fn section_nav(ctx: &ViewContext) -> Result<Element, JsValue> {
    let mut buttons = Vec::new();
    for section in AdminSection::ALL {
        let button = ElementBuilder::new("button")?
            .class("admin-nav-btn")
            .attr("type", "button")?
            .attr("data-section", section.name())?
            .text(section.label())
            .build();
        let ctx = ctx.clone();
        let section = *section;
        on_click(&button, move |_| {
            let ctx = ctx.clone();
            spawn_local(async move { ctx.navigation().show_admin_section(section).await });
        })?;
        buttons.push(button);
    }
    Ok(ElementBuilder::new("div")?.class("admin-nav").children(buttons)?.build())
}

fn form_group(label: &str, control: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.text(label).build())?
        .child(control)?
        .build())
}

fn input(id: &str, input_type: &str, required: bool) -> Result<Element, JsValue> {
    let builder = ElementBuilder::new("input")?
        .id(id)?
        .class("form-control")
        .attr("type", input_type)?;
    let builder = if required { builder.attr("required", "")? } else { builder };
    Ok(builder.build())
}

fn read_draft() -> EventDraft {
    EventDraft {
        title: input_value("eventTitle"),
        description: input_value("eventDescription"),
        date: input_value("eventDate"),
        location: input_value("eventLocation"),
        max_attendees: input_value("eventMaxAttendees"),
    }
}

fn create_event_form(ctx: &ViewContext) -> Result<Element, JsValue> {
    let description = ElementBuilder::new("textarea")?
        .id("eventDescription")?
        .class("form-control")
        .attr("rows", "3")?
        .build();
    let max_attendees = ElementBuilder::new("input")?
        .id("eventMaxAttendees")?
        .class("form-control")
        .attr("type", "number")?
        .attr("min", "1")?
        .build();

    let submit = ElementBuilder::new("button")?
        .id(CREATE_EVENT_SUBMIT_ID)?
        .class("btn btn-primary")
        .attr("type", "submit")?
        .text("Create Event")
        .build();
    let clear = ElementBuilder::new("button")?
        .class("btn btn-secondary")
        .attr("type", "button")?
        .text("Clear Form")
        .build();
    let clear_ctx = ctx.clone();
    on_click(&clear, move |_| {
        reset_form(CREATE_EVENT_FORM_ID);
        clear_ctx.events().clear_event_form();
    })?;

    let form = ElementBuilder::new("form")?
        .id(CREATE_EVENT_FORM_ID)?
        .child(form_group("Title *", input("eventTitle", "text", true)?)?)?
        .child(form_group("Description", description)?)?
        .child(form_group("Date & Time *", input("eventDate", "datetime-local", true)?)?)?
        .child(form_group("Location", input("eventLocation", "text", false)?)?)?
        .child(form_group("Max Attendees", max_attendees)?)?
        .child(ElementBuilder::new("div")?.class("form-actions").child(submit)?.child(clear)?.build())?
        .build();

    let submit_ctx = ctx.clone();
    on_submit(&form, move || {
        let draft = read_draft();
        let ctx = submit_ctx.clone();
        spawn_local(async move {
            if ctx.events().create_event(draft).await.is_ok() {
                reset_form(CREATE_EVENT_FORM_ID);
            }
        });
    })?;

    Ok(ElementBuilder::new("div")?
        .class("card")
        .child(ElementBuilder::new("h3")?.text("➕ Create New Event").build())?
        .child(form)?
        .child(ElementBuilder::new("div")?.id(CREATE_EVENT_RESULT_ID)?.class("create-event-result").build())?
        .build())
}

fn section_container(section: AdminSection, body: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .id(&section.dom_id())?
        .class("admin-section hidden")
        .child(body)?
        .build())
}

pub fn render_admin_panel(ctx: &ViewContext) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .id(ADMIN_PANEL_ID)?
        .class("admin-panel")
        .child(ElementBuilder::new("h2")?.text("🛠️ Admin Panel").build())?
        .child(section_nav(ctx)?)?
        .child(section_container(AdminSection::QrScanner, render_scanner(ctx)?)?)?
        .child(section_container(AdminSection::AllRegistrations, render_all_registrations()?)?)?
        .child(section_container(AdminSection::CreateEvent, create_event_form(ctx)?)?)?
        .build())
}

/// Visible admin section and the active nav button
pub fn update_admin_sections(state: &AppState) -> Result<(), JsValue> {
    let sections = state.admin_sections.borrow();
    for (section, visible) in sections.projection() {
        if let Some(element) = get_element_by_id(&section.dom_id()) {
            set_class(&element, "hidden", !visible)?;
        }
    }
    for button in query_selector_all(".admin-nav-btn")? {
        let active = button
            .get_attribute("data-section")
            .and_then(|name| AdminSection::parse(&name))
            .map_or(false, |s| sections.is_visible(s));
        set_class(&button, "active", active)?;
    }
    Ok(())
}

fn result_panel(outcome: &CreateEventOutcome) -> Result<Element, JsValue> {
    match outcome {
        CreateEventOutcome::Created(event) => {
            let location = event.location.as_deref().filter(|l| !l.is_empty()).unwrap_or("Not specified");
            let max = event
                .max_attendees
                .map_or_else(|| "Not specified".to_string(), |n| n.to_string());
            Ok(ElementBuilder::new("div")?
                .class("result-card result-success")
                .child(ElementBuilder::new("h4")?.text(outcome.heading()).build())?
                .child(labelled_line("Title:", &event.title)?)?
                .child(labelled_line("Date:", &format_date_time(&event.date))?)?
                .child(labelled_line("Location:", location)?)?
                .child(labelled_line("Max Attendees:", &max)?)?
                .build())
        }
        CreateEventOutcome::Failed(_) | CreateEventOutcome::NetworkError => Ok(ElementBuilder::new("div")?
            .class("result-card result-error")
            .child(ElementBuilder::new("h4")?.text(outcome.heading()).build())?
            .child(ElementBuilder::new("p")?.text(outcome.failure_detail().unwrap_or_default()).build())?
            .build()),
    }
}

pub fn update_create_event_result(state: &AppState) -> Result<(), JsValue> {
    let Some(panel) = get_element_by_id(CREATE_EVENT_RESULT_ID) else {
        return Ok(());
    };
    clear_children(&panel);
    match &*state.created_event.borrow() {
        Some(outcome) => append_child(&panel, &result_panel(outcome)?),
        None => Ok(()),
    }
}

pub fn update_create_event_button(state: &AppState) -> Result<(), JsValue> {
    match get_element_by_id(CREATE_EVENT_SUBMIT_ID) {
        Some(button) => set_button_busy(
            &button,
            state.is_pending(PendingAction::CreateEvent),
            "Create Event",
            "Creating Event...",
        ),
        None => Ok(()),
    }
}
