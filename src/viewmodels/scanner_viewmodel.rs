// ============================================================================
// SCANNER VIEWMODEL - Capture loop control and QR verification
// ============================================================================
// The browser drives `process_frame` once per animation frame with the
// activation returned by `start`; everything here is platform independent.
// ============================================================================

use crate::capture::{CameraConstraints, Frame};
use crate::error::ApiError;
use crate::models::Notification;
use crate::state::{Activation, AppState, IncrementalUpdate, StartOutcome, VerificationOutcome};
use crate::viewmodels::{RegistrationsViewModel, Services};

/// What the frame scheduler does next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameStep {
    /// Schedule another frame
    Continue,
    /// Payload found; the loop must not reschedule
    Detected(String),
    /// Activation is over
    Stop,
}

#[derive(Clone)]
pub struct ScannerViewModel {
    state: AppState,
    services: Services,
}

impl ScannerViewModel {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    /// Opens the camera. Any stream already open is stopped first.
    pub async fn start(&self) -> StartOutcome {
        let activation = self.state.scanner.borrow_mut().begin_start();
        self.state.notify_subscribers(IncrementalUpdate::Scanner);
        log::info!("📷 [SCANNER] Requesting camera");

        let opened = self.services.camera.open(&CameraConstraints::default()).await;
        let outcome = self.state.scanner.borrow_mut().complete_start(activation, opened);

        match &outcome {
            StartOutcome::Started(_) => {
                log::info!("🟢 [SCANNER] Scanning");
                self.state.notify(Notification::success("QR Scanner started successfully"));
            }
            StartOutcome::Failed(e) => {
                log::error!("❌ [SCANNER] Camera unavailable: {}", e);
                self.state.notify(Notification::error(e.user_message()));
            }
            StartOutcome::Cancelled => {
                log::info!("🟡 [SCANNER] Start cancelled, late stream released");
            }
        }
        self.state.notify_subscribers(IncrementalUpdate::Scanner);
        outcome
    }

    /// Explicit stop from the UI
    pub fn stop(&self) {
        self.release();
        self.state.notify(Notification::info("QR Scanner stopped"));
    }

    /// Releases the camera without user feedback
    pub fn release(&self) {
        if self.state.scanner.borrow_mut().stop() {
            log::info!("🛑 [SCANNER] Camera released");
        }
        self.state.notify_subscribers(IncrementalUpdate::Scanner);
    }

    /// One step of the per-frame cycle. `frame` is `None` while the video
    /// has no complete frame yet.
    pub fn process_frame(&self, activation: Activation, frame: Option<Frame<'_>>) -> FrameStep {
        if !self.state.scanner.borrow().is_scanning(activation) {
            return FrameStep::Stop;
        }
        let Some(frame) = frame else {
            return FrameStep::Continue;
        };
        let Some(payload) = self.services.decoder.decode(&frame) else {
            return FrameStep::Continue;
        };

        if !self.state.scanner.borrow_mut().on_decoded(activation) {
            return FrameStep::Stop;
        }
        log::info!("🔎 [SCANNER] QR code detected");
        self.state.notify_subscribers(IncrementalUpdate::ScannerFlash);
        self.state.notify_subscribers(IncrementalUpdate::Scanner);
        FrameStep::Detected(payload)
    }

    /// Sends a decoded payload; the loop stays stopped whatever the answer
    pub async fn submit_verification(&self, activation: Activation, payload: String) -> VerificationOutcome {
        let result = match self.state.session.token() {
            Some(token) => self.services.api.verify_qr(&token, &payload).await,
            None => Err(ApiError::MissingToken),
        };

        let outcome = match result {
            Ok(receipt) => {
                log::info!("✅ [SCANNER] Verified {} for {}", receipt.user_name, receipt.event_title);
                VerificationOutcome::Verified(receipt)
            }
            Err(ApiError::Network(e)) => {
                log::error!("❌ [SCANNER] Verification request failed: {}", e);
                VerificationOutcome::NetworkError
            }
            Err(e) => {
                log::warn!("⚠️ [SCANNER] Verification refused: {}", e);
                VerificationOutcome::Rejected(e.user_message())
            }
        };

        let applied = self.state.scanner.borrow_mut().set_result(activation, outcome.clone());
        if applied {
            self.state.notify_subscribers(IncrementalUpdate::Scanner);
        }
        if matches!(outcome, VerificationOutcome::Verified(_)) {
            RegistrationsViewModel::new(self.state.clone(), self.services.clone())
                .load_all()
                .await;
        }
        outcome
    }

    pub fn initialize(&self) {
        self.state.scanner.borrow_mut().initialize();
        self.state.notify_subscribers(IncrementalUpdate::Scanner);
    }

    pub fn clear_result(&self) {
        self.state.scanner.borrow_mut().clear_result();
        self.state.notify_subscribers(IncrementalUpdate::Scanner);
    }

    /// "Scan another" / "Try again"
    pub async fn scan_another(&self) -> StartOutcome {
        self.start().await
    }
}
