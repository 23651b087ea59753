use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{Event, User};
use crate::utils::datetime;

/// Registration of a user for an event.
///
/// `POST /registrations` answers without the nested `event`/`user`; the list
/// endpoints include them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    #[serde(with = "datetime::flexible")]
    pub registration_date: NaiveDateTime,
    pub qr_code_data: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, with = "datetime::flexible_option")]
    pub verification_date: Option<NaiveDateTime>,
    /// Base64 PNG of the QR code
    #[serde(default)]
    pub qr_code_image: Option<String>,
    #[serde(default)]
    pub event: Option<Event>,
    #[serde(default)]
    pub user: Option<User>,
}

impl Registration {
    pub fn event_title(&self) -> String {
        self.event
            .as_ref()
            .map(|e| e.title.clone())
            .unwrap_or_else(|| format!("Event #{}", self.event_id))
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_verified { "✓ Verified" } else { "⏳ Pending" }
    }

    pub fn qr_image_src(&self) -> Option<String> {
        self.qr_code_image
            .as_deref()
            .filter(|img| !img.is_empty())
            .map(|img| format!("data:image/png;base64,{}", img))
    }
}

/// Body of `POST /registrations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub event_id: i64,
}

/// Body of `POST /admin/verify-qr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrVerification {
    pub qr_code_data: String,
}

/// Successful answer of `POST /admin/verify-qr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReceipt {
    #[serde(default)]
    pub message: Option<String>,
    pub user_name: String,
    pub event_title: String,
    #[serde(default, with = "datetime::flexible_option")]
    pub verified_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_with_details_deserializes() {
        let reg: Registration = serde_json::from_value(serde_json::json!({
            "id": 7,
            "event_id": 1,
            "user_id": 3,
            "registration_date": "2026-10-10T09:15:00",
            "qr_code_data": "a1b2c3",
            "is_verified": false,
            "verification_date": null,
            "user": {
                "id": 3, "email": "ana@example.com", "full_name": "Ana",
                "is_admin": false, "created_at": "2026-10-01T08:00:00"
            },
            "event": { "id": 1, "title": "Tech Conference", "date": "2026-11-15T09:00:00" }
        }))
        .unwrap();

        assert_eq!(reg.event_title(), "Tech Conference");
        assert_eq!(reg.status_label(), "⏳ Pending");
        assert_eq!(reg.user.as_ref().map(|u| u.full_name.as_str()), Some("Ana"));
        assert_eq!(reg.qr_image_src(), None);
    }

    #[test]
    fn bare_registration_falls_back_to_event_id() {
        let reg: Registration = serde_json::from_value(serde_json::json!({
            "id": 8, "event_id": 4, "user_id": 3,
            "registration_date": "2026-10-10T09:15:00",
            "qr_code_data": "zz", "is_verified": true,
            "verification_date": "2026-10-11T10:00:00",
            "qr_code_image": "iVBORw0KGgo="
        }))
        .unwrap();

        assert_eq!(reg.event_title(), "Event #4");
        assert_eq!(reg.status_label(), "✓ Verified");
        assert_eq!(reg.qr_image_src().as_deref(), Some("data:image/png;base64,iVBORw0KGgo="));
    }
}
