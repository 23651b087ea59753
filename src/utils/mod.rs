// Shared utilities

pub mod constants;
pub mod datetime;

#[cfg(target_arch = "wasm32")]
pub mod qr_ffi;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use constants::*;
