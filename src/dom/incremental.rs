// ============================================================================
// INCREMENTAL DOM UPDATES - Re-project one slice of AppState onto the shell
// ============================================================================
// The shell is built once by views::render_app; each IncrementalUpdate
// touches only the elements that depend on the changed state.
// ============================================================================

use wasm_bindgen::prelude::*;

use crate::state::IncrementalUpdate;
use crate::views::admin::{update_admin_sections, update_create_event_button, update_create_event_result};
use crate::views::app::{update_navigation, update_session};
use crate::views::auth::{update_auth_buttons, update_auth_forms};
use crate::views::events::{update_events, update_register_buttons};
use crate::views::registrations::{update_registrations, RegistrationList};
use crate::views::scanner::{flash_frame, update_scanner};
use crate::views::toast::show_pending_toasts;
use crate::views::ViewContext;

pub fn apply_update(ctx: &ViewContext, update: IncrementalUpdate) -> Result<(), JsValue> {
    log::debug!("🔄 [UPDATE] {:?}", update);
    match update {
        IncrementalUpdate::Session => {
            update_session(&ctx.state)?;
            update_auth_forms(&ctx.state)?;
            update_admin_sections(&ctx.state)?;
            update_register_buttons(&ctx.state)?;
            update_registrations(ctx, RegistrationList::Mine)?;
            update_registrations(ctx, RegistrationList::All)?;
            update_create_event_result(&ctx.state)?;
            update_scanner(ctx)
        }
        IncrementalUpdate::Navigation => {
            update_navigation(&ctx.state)?;
            update_admin_sections(&ctx.state)?;
            update_auth_forms(&ctx.state)
        }
        IncrementalUpdate::Events => update_events(ctx),
        IncrementalUpdate::MyRegistrations => update_registrations(ctx, RegistrationList::Mine),
        IncrementalUpdate::AllRegistrations => update_registrations(ctx, RegistrationList::All),
        IncrementalUpdate::Scanner => update_scanner(ctx),
        IncrementalUpdate::ScannerFlash => flash_frame(),
        IncrementalUpdate::CreateEvent => update_create_event_result(&ctx.state),
        IncrementalUpdate::Pending => {
            update_auth_buttons(&ctx.state)?;
            update_register_buttons(&ctx.state)?;
            update_create_event_button(&ctx.state)
        }
        IncrementalUpdate::Notifications => show_pending_toasts(&ctx.state),
    }
}

/// Every updater once; used right after the shell is rendered
pub fn apply_all(ctx: &ViewContext) -> Result<(), JsValue> {
    for update in [
        IncrementalUpdate::Session,
        IncrementalUpdate::Navigation,
        IncrementalUpdate::Events,
        IncrementalUpdate::Scanner,
        IncrementalUpdate::Pending,
    ] {
        apply_update(ctx, update)?;
    }
    Ok(())
}
