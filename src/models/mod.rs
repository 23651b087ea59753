pub mod auth;
pub mod event;
pub mod registration;
pub mod notification;

pub use auth::{Credentials, NewUser, Role, TokenClaims, TokenResponse, User};
pub use event::{Event, EventDraft, NewEvent};
pub use registration::{NewRegistration, QrVerification, Registration, VerificationReceipt};
pub use notification::{Notification, NotificationKind};
