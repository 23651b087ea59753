// ============================================================================
// EVENT CHECK-IN PWA - FRONTEND MVVM (PURE RUST)
// ============================================================================
// - Views: functions that render DOM (no logic)
// - ViewModels: UI logic over an explicit AppState
// - Services: API communication and token persistence only
// - Capture: camera stream and QR decoding behind traits
// - Models: structures shared with the backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod capture;
pub mod viewmodels;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;
#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use wasm_logger::Config;

    use crate::app::App;
    use crate::config::CONFIG;

    thread_local! {
        static APP: RefCell<Option<App>> = RefCell::new(None);
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if CONFIG.enable_logging {
            wasm_logger::init(Config::new(CONFIG.log_level()));
        }
        log::info!("🚀 Event Check-in - {} ({})", CONFIG.backend_url, CONFIG.environment);

        let app = App::new()?;
        app.render()?;
        let ctx = app.context().clone();

        APP.with(|cell| {
            *cell.borrow_mut() = Some(app);
        });

        spawn_local(async move {
            let role = ctx.session().restore().await;
            log::info!("🔐 [MAIN] Starting as {:?}", role);
        });
        Ok(())
    }
}
