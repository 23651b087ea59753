// ============================================================================
// SCANNER STATE - Capture loop state machine
// ============================================================================
// inactive -> active-scanning -> code-found. Every start/stop bumps the
// generation; work tagged with an older `Activation` is discarded.
// ============================================================================

use crate::capture::CameraStream;
use crate::error::CameraError;
use crate::models::VerificationReceipt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerPhase {
    Inactive,
    Scanning,
    CodeFound,
}

/// Text of the scanner status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerStatus {
    Ready,
    Active,
    Stopped,
}

impl ScannerStatus {
    pub fn text(self) -> &'static str {
        match self {
            ScannerStatus::Ready => "🟡 Scanner Ready - Click \"Start Scanner\" to begin",
            ScannerStatus::Active => "🟢 Scanner Active - Point camera at QR code",
            ScannerStatus::Stopped => "🟡 Scanner Stopped - Click \"Start Scanner\" to begin",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScannerStatus::Active => "scanner-status scanner-active",
            _ => "scanner-status scanner-inactive",
        }
    }
}

/// Identifies one start of the capture loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation(u64);

/// Result panel under the scanner
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    Verifying,
    Verified(VerificationReceipt),
    Rejected(String),
    NetworkError,
}

#[derive(Debug, PartialEq)]
pub enum StartOutcome {
    Started(Activation),
    Failed(CameraError),
    /// A stop arrived while the camera request was pending
    Cancelled,
}

pub struct CaptureLoop {
    phase: ScannerPhase,
    status: ScannerStatus,
    stream: Option<Box<dyn CameraStream>>,
    generation: u64,
    pending_start: Option<u64>,
    result: Option<VerificationOutcome>,
}

impl Default for CaptureLoop {
    fn default() -> Self {
        Self {
            phase: ScannerPhase::Inactive,
            status: ScannerStatus::Ready,
            stream: None,
            generation: 0,
            pending_start: None,
            result: None,
        }
    }
}

impl CaptureLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ScannerPhase {
        self.phase
    }

    pub fn status(&self) -> ScannerStatus {
        self.status
    }

    pub fn result(&self) -> Option<&VerificationOutcome> {
        self.result.as_ref()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.is_some()
    }

    pub fn is_starting(&self) -> bool {
        self.pending_start.is_some()
    }

    /// Releases any open stream and opens a new activation
    pub fn begin_start(&mut self) -> Activation {
        self.release_stream();
        self.phase = ScannerPhase::Inactive;
        self.result = None;
        self.generation += 1;
        self.pending_start = Some(self.generation);
        Activation(self.generation)
    }

    /// Applies the camera answer for `activation`
    pub fn complete_start(
        &mut self,
        activation: Activation,
        opened: Result<Box<dyn CameraStream>, CameraError>,
    ) -> StartOutcome {
        if self.pending_start != Some(activation.0) {
            if let Ok(stream) = opened {
                stream.stop_tracks();
            }
            return StartOutcome::Cancelled;
        }
        self.pending_start = None;

        match opened {
            Ok(stream) => {
                self.stream = Some(stream);
                self.phase = ScannerPhase::Scanning;
                self.status = ScannerStatus::Active;
                StartOutcome::Started(activation)
            }
            Err(e) => {
                self.phase = ScannerPhase::Inactive;
                if self.status == ScannerStatus::Active {
                    self.status = ScannerStatus::Stopped;
                }
                StartOutcome::Failed(e)
            }
        }
    }

    pub fn is_scanning(&self, activation: Activation) -> bool {
        self.phase == ScannerPhase::Scanning && self.generation == activation.0
    }

    /// Moves to code-found. Returns false when the activation is no longer
    /// scanning, so a payload is only ever accepted once.
    pub fn on_decoded(&mut self, activation: Activation) -> bool {
        if !self.is_scanning(activation) {
            return false;
        }
        self.phase = ScannerPhase::CodeFound;
        self.result = Some(VerificationOutcome::Verifying);
        true
    }

    /// Stores a verification answer unless the loop was stopped or
    /// restarted in the meantime
    pub fn set_result(&mut self, activation: Activation, outcome: VerificationOutcome) -> bool {
        if self.generation != activation.0 {
            return false;
        }
        self.result = Some(outcome);
        true
    }

    /// Releases the camera and cancels any pending start. Returns whether
    /// anything was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.stream.is_some() || self.pending_start.is_some();
        self.release_stream();
        self.pending_start = None;
        self.generation += 1;
        self.phase = ScannerPhase::Inactive;
        self.status = ScannerStatus::Stopped;
        self.result = None;
        was_running
    }

    /// Ready status and an empty result panel; a running scan is left alone
    pub fn initialize(&mut self) {
        if self.phase == ScannerPhase::Scanning || self.pending_start.is_some() {
            return;
        }
        self.status = ScannerStatus::Ready;
        self.result = None;
    }

    pub fn clear_result(&mut self) {
        self.result = None;
    }

    fn release_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop_tracks();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCamera;

    #[test]
    fn failed_start_never_reaches_scanning() {
        let mut capture = CaptureLoop::new();
        let activation = capture.begin_start();
        let outcome = capture.complete_start(activation, Err(CameraError::PermissionDenied));
        assert_eq!(outcome, StartOutcome::Failed(CameraError::PermissionDenied));
        assert_eq!(capture.phase(), ScannerPhase::Inactive);
        assert!(!capture.is_scanning(activation));
        assert_eq!(capture.status(), ScannerStatus::Ready);
    }

    #[test]
    fn failed_restart_leaves_the_active_status_behind() {
        let camera = FakeCamera::default();
        let mut capture = CaptureLoop::new();
        let first = capture.begin_start();
        capture.complete_start(first, Ok(camera.stream()));
        assert_eq!(capture.status(), ScannerStatus::Active);

        let second = capture.begin_start();
        capture.complete_start(second, Err(CameraError::NoDevice));
        assert_eq!(capture.status(), ScannerStatus::Stopped);
        assert!(!capture.has_stream());
    }

    #[test]
    fn stop_during_camera_request_releases_the_late_stream() {
        let camera = FakeCamera::default();
        let mut capture = CaptureLoop::new();
        let activation = capture.begin_start();
        assert!(capture.stop());

        let outcome = capture.complete_start(activation, Ok(camera.stream()));
        assert_eq!(outcome, StartOutcome::Cancelled);
        assert_eq!(camera.released(), 1);
        assert_eq!(capture.phase(), ScannerPhase::Inactive);
        assert!(!capture.has_stream());
    }

    #[test]
    fn restarting_stops_the_previous_stream_first() {
        let camera = FakeCamera::default();
        let mut capture = CaptureLoop::new();
        let first = capture.begin_start();
        capture.complete_start(first, Ok(camera.stream()));
        assert_eq!(camera.released(), 0);

        let second = capture.begin_start();
        assert_eq!(camera.released(), 1);
        assert!(!capture.is_scanning(first));
        assert_eq!(capture.complete_start(second, Ok(camera.stream())), StartOutcome::Started(second));
    }

    #[test]
    fn a_payload_is_accepted_once_per_activation() {
        let camera = FakeCamera::default();
        let mut capture = CaptureLoop::new();
        let activation = capture.begin_start();
        capture.complete_start(activation, Ok(camera.stream()));

        assert!(capture.on_decoded(activation));
        assert!(!capture.on_decoded(activation));
        assert_eq!(capture.phase(), ScannerPhase::CodeFound);
        assert_eq!(capture.result(), Some(&VerificationOutcome::Verifying));
    }

    #[test]
    fn results_for_stopped_activations_are_dropped() {
        let camera = FakeCamera::default();
        let mut capture = CaptureLoop::new();
        let activation = capture.begin_start();
        capture.complete_start(activation, Ok(camera.stream()));
        capture.on_decoded(activation);
        capture.stop();

        assert!(!capture.set_result(activation, VerificationOutcome::NetworkError));
        assert_eq!(capture.result(), None);
        assert_eq!(capture.status(), ScannerStatus::Stopped);
    }

    #[test]
    fn initialize_resets_an_idle_scanner_only() {
        let camera = FakeCamera::default();
        let mut capture = CaptureLoop::new();
        capture.stop();
        capture.initialize();
        assert_eq!(capture.status(), ScannerStatus::Ready);

        let activation = capture.begin_start();
        capture.complete_start(activation, Ok(camera.stream()));
        capture.initialize();
        assert_eq!(capture.status(), ScannerStatus::Active);
        assert!(capture.is_scanning(activation));
    }
}
