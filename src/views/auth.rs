// ============================================================================
// AUTH VIEW - Login, account registration and admin login forms
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{get_element_by_id, input_value, on_click, on_submit, reset_form, set_class, ElementBuilder};
use crate::models::{Credentials, NewUser};
use crate::state::{AppState, AuthForm, PendingAction, Section};
use crate::views::{set_button_busy, ViewContext};

const LOGIN_SUBMIT_ID: &str = "login-submit";
const REGISTER_SUBMIT_ID: &str = "register-submit";
const ADMIN_LOGIN_SUBMIT_ID: &str = "admin-login-submit";

const FORM_IDS: [&str; 3] = ["loginForm", "registerForm", "adminLoginForm"];

fn field(id: &str, label: &str, input_type: &str, placeholder: &str) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(id)?
        .class("form-control")
        .attr("type", input_type)?
        .attr("placeholder", placeholder)?
        .attr("required", "")?
        .build();
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(input)?
        .build())
}

fn submit_button(id: &str, label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .id(id)?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .text(label)
        .build())
}

fn switch_link(ctx: &ViewContext, text: &str, target: AuthForm) -> Result<Element, JsValue> {
    let link = ElementBuilder::new("button")?
        .class("btn-link")
        .attr("type", "button")?
        .text(text)
        .build();
    let ctx = ctx.clone();
    on_click(&link, move |_| ctx.session().show_auth_form(target))?;
    Ok(link)
}

fn card(form: AuthForm, title: &str, body: Element, links: Vec<Element>) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .id(&form.dom_id())?
        .class("card auth-card")
        .child(ElementBuilder::new("h2")?.text(title).build())?
        .child(body)?
        .children(links)?
        .build())
}

fn login_card(ctx: &ViewContext) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("loginForm")?
        .child(field("loginEmail", "Email", "email", "you@example.com")?)?
        .child(field("loginPassword", "Password", "password", "Your password")?)?
        .child(submit_button(LOGIN_SUBMIT_ID, "Login to Account")?)?
        .build();

    let handler_ctx = ctx.clone();
    on_submit(&form, move || {
        let credentials = Credentials::new(input_value("loginEmail"), input_value("loginPassword"));
        let ctx = handler_ctx.clone();
        spawn_local(async move {
            if ctx.session().login(credentials).await.is_ok() {
                reset_form("loginForm");
            }
        });
    })?;

    card(
        AuthForm::Login,
        "🔐 Login",
        form,
        vec![
            switch_link(ctx, "Don't have an account? Register", AuthForm::Register)?,
            switch_link(ctx, "Admin login", AuthForm::AdminLogin)?,
        ],
    )
}

fn register_card(ctx: &ViewContext) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("registerForm")?
        .child(field("registerName", "Full name", "text", "Jane Doe")?)?
        .child(field("registerEmail", "Email", "email", "you@example.com")?)?
        .child(field("registerPassword", "Password", "password", "Choose a password")?)?
        .child(submit_button(REGISTER_SUBMIT_ID, "Create Account")?)?
        .build();

    let handler_ctx = ctx.clone();
    on_submit(&form, move || {
        let new_user = NewUser {
            email: input_value("registerEmail").trim().to_string(),
            full_name: input_value("registerName").trim().to_string(),
            password: input_value("registerPassword"),
        };
        let ctx = handler_ctx.clone();
        spawn_local(async move {
            if ctx.session().register_account(new_user).await.is_ok() {
                reset_form("registerForm");
            }
        });
    })?;

    card(
        AuthForm::Register,
        "📝 Create Account",
        form,
        vec![switch_link(ctx, "Already registered? Login", AuthForm::Login)?],
    )
}

fn admin_login_card(ctx: &ViewContext) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("form")?
        .id("adminLoginForm")?
        .child(field("adminEmail", "Admin email", "email", "admin@example.com")?)?
        .child(field("adminPassword", "Password", "password", "Admin password")?)?
        .child(submit_button(ADMIN_LOGIN_SUBMIT_ID, "Login as Admin")?)?
        .build();

    let handler_ctx = ctx.clone();
    on_submit(&form, move || {
        let credentials = Credentials::new(input_value("adminEmail"), input_value("adminPassword"));
        let ctx = handler_ctx.clone();
        spawn_local(async move {
            if ctx.session().admin_login(credentials).await.is_ok() {
                reset_form("adminLoginForm");
            }
        });
    })?;

    card(
        AuthForm::AdminLogin,
        "🛡️ Admin Login",
        form,
        vec![switch_link(ctx, "Back to user login", AuthForm::Login)?],
    )
}

pub fn render_auth(ctx: &ViewContext) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("auth-container")
        .child(login_card(ctx)?)?
        .child(register_card(ctx)?)?
        .child(admin_login_card(ctx)?)?
        .build())
}

/// Shows the active sub-form only
pub fn update_auth_forms(state: &AppState) -> Result<(), JsValue> {
    for (form, visible) in state.auth_forms.borrow().projection() {
        if let Some(element) = get_element_by_id(&form.dom_id()) {
            set_class(&element, "hidden", !visible)?;
        }
    }
    Ok(())
}

pub fn update_auth_buttons(state: &AppState) -> Result<(), JsValue> {
    let buttons = [
        (LOGIN_SUBMIT_ID, PendingAction::Login, "Login to Account", "Logging in..."),
        (REGISTER_SUBMIT_ID, PendingAction::CreateAccount, "Create Account", "Creating account..."),
        (ADMIN_LOGIN_SUBMIT_ID, PendingAction::AdminLogin, "Login as Admin", "Logging in..."),
    ];
    for (id, action, idle, busy) in buttons {
        if let Some(button) = get_element_by_id(id) {
            set_button_busy(&button, state.is_pending(action), idle, busy)?;
        }
    }
    Ok(())
}

pub fn reset_auth_forms() {
    for id in FORM_IDS {
        reset_form(id);
    }
}
