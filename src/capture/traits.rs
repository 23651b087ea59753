use async_trait::async_trait;

use crate::config::{ScannerConfig, CONFIG};
use crate::error::CameraError;

/// An open camera stream. Dropping it does not release the device;
/// `stop_tracks` must be called.
pub trait CameraStream {
    fn stop_tracks(&self);
}

/// Hints passed to the camera request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConstraints {
    pub facing_mode: &'static str,
    pub ideal_width: u32,
    pub ideal_height: u32,
}

impl CameraConstraints {
    /// Rear-facing camera at the configured resolution
    pub fn rear_facing(config: &ScannerConfig) -> Self {
        Self {
            facing_mode: "environment",
            ideal_width: config.ideal_width,
            ideal_height: config.ideal_height,
        }
    }
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self::rear_facing(&CONFIG.scanner_config)
    }
}

/// Camera access
#[async_trait(?Send)]
pub trait Camera {
    async fn open(&self, constraints: &CameraConstraints) -> Result<Box<dyn CameraStream>, CameraError>;
}

/// One RGBA video frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

/// Image-to-text QR decoder
pub trait QrDecoder {
    fn decode(&self, frame: &Frame<'_>) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constraints_ask_for_the_rear_camera() {
        let constraints = CameraConstraints::rear_facing(&ScannerConfig::default());
        assert_eq!(constraints.facing_mode, "environment");
        assert_eq!((constraints.ideal_width, constraints.ideal_height), (1280, 720));
    }
}
