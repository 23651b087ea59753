// ============================================================================
// APP VIEW - Shell: header, navigation tabs and tab sections
// ============================================================================
// Rendered once at startup. Everything that changes afterwards goes
// through the `update_*` functions driven by dom::incremental.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, clear_children, get_element_by_id, on_click, query_selector_all, reset_form, set_class,
    ElementBuilder,
};
use crate::models::Role;
use crate::state::{AppState, Section, Tab};
use crate::utils::{CREATE_EVENT_FORM_ID, USER_INFO_ID};
use crate::views::admin::render_admin_panel;
use crate::views::auth::{render_auth, reset_auth_forms};
use crate::views::events::render_events_tab;
use crate::views::registrations::render_my_registrations_tab;
use crate::views::toast::render_toast_container;
use crate::views::ViewContext;

const LOGOUT_BUTTON_ID: &str = "logout-btn";

fn header(ctx: &ViewContext) -> Result<Element, JsValue> {
    let logout = ElementBuilder::new("button")?
        .id(LOGOUT_BUTTON_ID)?
        .class("btn btn-secondary btn-small hidden")
        .attr("type", "button")?
        .text("Logout")
        .build();
    let logout_ctx = ctx.clone();
    on_click(&logout, move |_| {
        let ctx = logout_ctx.clone();
        spawn_local(async move { ctx.session().logout().await });
    })?;

    Ok(ElementBuilder::new("header")?
        .class("app-header")
        .child(ElementBuilder::new("h1")?.text("🎫 Event Check-in").build())?
        .child(
            ElementBuilder::new("div")?
                .class("header-actions")
                .child(ElementBuilder::new("span")?.id(USER_INFO_ID)?.class("user-info").build())?
                .child(logout)?
                .build(),
        )?
        .build())
}

fn nav(ctx: &ViewContext) -> Result<Element, JsValue> {
    let mut buttons = Vec::new();
    for tab in Tab::ALL {
        let tab = *tab;
        let button = ElementBuilder::new("button")?
            .class("nav-tab")
            .attr("type", "button")?
            .attr("data-tab", tab.name())?
            .text(tab.label())
            .build();
        let ctx = ctx.clone();
        on_click(&button, move |_| {
            let ctx = ctx.clone();
            spawn_local(async move { ctx.navigation().show_tab(tab).await });
        })?;
        buttons.push(button);
    }
    Ok(ElementBuilder::new("nav")?.class("nav-tabs").children(buttons)?.build())
}

fn tab_section(tab: Tab, body: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .id(&tab.dom_id())?
        .class("tab-content hidden")
        .child(body)?
        .build())
}

/// Builds the whole shell into `root`
pub fn render_app(ctx: &ViewContext, root: &Element) -> Result<(), JsValue> {
    clear_children(root);

    let main = ElementBuilder::new("main")?
        .class("app-main")
        .child(tab_section(Tab::Auth, render_auth(ctx)?)?)?
        .child(tab_section(Tab::Events, render_events_tab()?)?)?
        .child(tab_section(Tab::MyRegistrations, render_my_registrations_tab()?)?)?
        .child(tab_section(Tab::Admin, render_admin_panel(ctx)?)?)?
        .build();

    append_child(root, &header(ctx)?)?;
    append_child(root, &nav(ctx)?)?;
    append_child(root, &main)?;
    append_child(root, &render_toast_container()?)?;
    log::info!("🎨 [VIEW] Shell rendered");
    Ok(())
}

/// Visible tab, active nav button and which nav buttons the role may see
pub fn update_navigation(state: &AppState) -> Result<(), JsValue> {
    let role = state.session.role();
    let tabs = state.tabs.borrow();
    for (tab, visible) in tabs.projection() {
        if let Some(section) = get_element_by_id(&tab.dom_id()) {
            set_class(&section, "hidden", !visible)?;
        }
    }
    for button in query_selector_all(".nav-tab")? {
        let Some(tab) = button.get_attribute("data-tab").and_then(|name| Tab::parse(&name)) else {
            continue;
        };
        set_class(&button, "hidden", !tab.visible_for(role))?;
        set_class(&button, "active", tabs.is_visible(tab))?;
    }
    Ok(())
}

fn user_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "🛡️ Admin",
        Role::User => "👤 Signed in",
        Role::Unauthenticated => "",
    }
}

pub fn update_session(state: &AppState) -> Result<(), JsValue> {
    let role = state.session.role();
    if let Some(info) = get_element_by_id(USER_INFO_ID) {
        info.set_text_content(Some(user_label(role)));
    }
    if let Some(logout) = get_element_by_id(LOGOUT_BUTTON_ID) {
        set_class(&logout, "hidden", !role.is_authenticated())?;
    }
    if !role.is_authenticated() {
        reset_auth_forms();
        reset_form(CREATE_EVENT_FORM_ID);
    }
    update_navigation(state)
}
