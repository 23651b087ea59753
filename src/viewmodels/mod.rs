pub mod navigation_viewmodel;
pub mod session_viewmodel;
pub mod events_viewmodel;
pub mod registrations_viewmodel;
pub mod scanner_viewmodel;

use std::rc::Rc;

use crate::capture::{Camera, QrDecoder};
use crate::services::{EventApi, TokenStore};

pub use navigation_viewmodel::NavigationViewModel;
pub use session_viewmodel::SessionViewModel;
pub use events_viewmodel::EventsViewModel;
pub use registrations_viewmodel::RegistrationsViewModel;
pub use scanner_viewmodel::{FrameStep, ScannerViewModel};

/// External collaborators shared by every viewmodel
#[derive(Clone)]
pub struct Services {
    pub api: Rc<dyn EventApi>,
    pub tokens: Rc<dyn TokenStore>,
    pub camera: Rc<dyn Camera>,
    pub decoder: Rc<dyn QrDecoder>,
}

#[cfg(target_arch = "wasm32")]
impl Services {
    /// Browser implementations: gloo-net, localStorage, getUserMedia, jsQR
    pub fn browser() -> Self {
        use crate::capture::web::{JsQrDecoder, WebCamera};
        use crate::services::{ApiClient, LocalTokenStore};

        Self {
            api: Rc::new(ApiClient::new()),
            tokens: Rc::new(LocalTokenStore),
            camera: Rc::new(WebCamera),
            decoder: Rc::new(JsQrDecoder),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::rc::Rc;

    use super::Services;
    use crate::state::AppState;
    use crate::testing::{FakeApi, FakeCamera, FakeDecoder, MemoryTokenStore};

    pub struct Harness {
        pub state: AppState,
        pub api: Rc<FakeApi>,
        pub tokens: Rc<MemoryTokenStore>,
        pub camera: Rc<FakeCamera>,
    }

    impl Harness {
        pub fn new(api: FakeApi) -> Self {
            Self::with(api, MemoryTokenStore::default(), FakeCamera::default())
        }

        pub fn with(api: FakeApi, tokens: MemoryTokenStore, camera: FakeCamera) -> Self {
            Self {
                state: AppState::new(),
                api: Rc::new(api),
                tokens: Rc::new(tokens),
                camera: Rc::new(camera),
            }
        }

        pub fn services(&self) -> Services {
            Services {
                api: self.api.clone(),
                tokens: self.tokens.clone(),
                camera: self.camera.clone(),
                decoder: Rc::new(FakeDecoder),
            }
        }

        pub fn toasts(&self) -> Vec<String> {
            self.state.take_notifications().into_iter().map(|n| n.message).collect()
        }
    }
}
