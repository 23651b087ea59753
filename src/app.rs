// ============================================================================
// APP - Owns the state, renders the shell and wires state changes to the DOM
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{apply_all, apply_update, get_element_by_id};
use crate::state::AppState;
use crate::utils::APP_ROOT_ID;
use crate::viewmodels::Services;
use crate::views::{render_app, ViewContext};

pub struct App {
    ctx: ViewContext,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let ctx = ViewContext::new(AppState::new(), Services::browser());

        // Updates are applied on the next tick so handlers never re-enter
        // a state borrow held by the caller.
        let subscriber_ctx = ctx.clone();
        ctx.state.subscribe_to_changes(move |update| {
            let ctx = subscriber_ctx.clone();
            Timeout::new(0, move || {
                if let Err(e) = apply_update(&ctx, update) {
                    log::error!("❌ [UPDATE] {:?} failed: {:?}", update, e);
                }
            })
            .forget();
        });

        Ok(Self { ctx, root })
    }

    pub fn render(&self) -> Result<(), JsValue> {
        render_app(&self.ctx, &self.root)?;
        apply_all(&self.ctx)
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }
}
