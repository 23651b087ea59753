// Camera capture: platform-independent traits plus the browser implementation

pub mod traits;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use traits::{Camera, CameraConstraints, CameraStream, Frame, QrDecoder};
