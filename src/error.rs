//! Error types for the check-in front-end.
//!
//! Core code (models, services, viewmodels) returns these typed errors and
//! propagates them with `?`. The DOM layer keeps the `Result<_, JsValue>`
//! convention and only turns errors into toast text at the edge.

use thiserror::Error;

/// Failure of a backend call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-success HTTP status; `detail` is the server-supplied message
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// The request never completed
    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not authenticated")]
    MissingToken,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Text shown in the notification for this failure
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { detail, .. } => detail.clone(),
            ApiError::Network(_) => "Network error. Please try again.".to_string(),
            ApiError::Parse(_) => "Unexpected response from server".to_string(),
            ApiError::MissingToken => "Please login first".to_string(),
        }
    }
}

/// Form input rejected before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please fill in required fields (Title and Date)")]
    MissingEventFields,

    #[error("Invalid event date")]
    InvalidDate,

    #[error("Event date must be in the future")]
    DateNotInFuture,

    #[error("Max attendees must be a positive number")]
    InvalidMaxAttendees,
}

/// Why the camera could not be opened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera permission denied. Please allow camera access.")]
    PermissionDenied,

    #[error("No camera found on this device.")]
    NoDevice,

    #[error("Camera not supported in this browser.")]
    Unsupported,

    #[error("{0}")]
    Other(String),
}

impl CameraError {
    /// Classifies a `getUserMedia` rejection by its DOMException name
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => CameraError::PermissionDenied,
            "NotFoundError" => CameraError::NoDevice,
            "NotSupportedError" => CameraError::Unsupported,
            _ => CameraError::Other(message.to_string()),
        }
    }

    pub fn user_message(&self) -> String {
        format!("Error accessing camera: {}", self)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Local storage unavailable")]
    Unavailable,

    #[error("Storage write failed: {0}")]
    Write(String),
}

/// Error returned by viewmodel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Admin privileges required")]
    AdminRequired,

    #[error("Please login to register for events")]
    NotLoggedIn,
}
