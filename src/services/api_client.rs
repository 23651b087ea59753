// ============================================================================
// API CLIENT - HTTP ONLY (stateless)
// ============================================================================
// No business logic: builds requests, sends them and maps the outcome to
// typed results. The `EventApi` trait is the seam viewmodels depend on.
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ApiError;
use crate::models::{
    Credentials, Event, NewEvent, NewUser, Registration, TokenResponse, User, VerificationReceipt,
};

pub const TOKEN_PATH: &str = "/token";
pub const REGISTER_PATH: &str = "/register";
pub const MY_REGISTRATIONS_PATH: &str = "/my-registrations";
pub const ALL_REGISTRATIONS_PATH: &str = "/admin/registrations";
pub const EVENTS_PATH: &str = "/events";
pub const REGISTRATIONS_PATH: &str = "/registrations";
pub const VERIFY_QR_PATH: &str = "/admin/verify-qr";

/// Backend calls used by the viewmodels
#[async_trait(?Send)]
pub trait EventApi {
    /// `POST /token` with a form-encoded body
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError>;

    async fn register_user(&self, user: &NewUser) -> Result<User, ApiError>;

    /// Also used as the token liveness probe
    async fn my_registrations(&self, token: &str) -> Result<Vec<Registration>, ApiError>;

    /// Also used as the admin-privilege probe for opaque tokens
    async fn all_registrations(&self, token: &str) -> Result<Vec<Registration>, ApiError>;

    async fn list_events(&self) -> Result<Vec<Event>, ApiError>;

    async fn create_event(&self, token: &str, event: &NewEvent) -> Result<Event, ApiError>;

    async fn register_for_event(&self, token: &str, event_id: i64) -> Result<Registration, ApiError>;

    async fn verify_qr(&self, token: &str, payload: &str) -> Result<VerificationReceipt, ApiError>;
}

pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// OAuth2 password-flow body: the email travels as `username`
pub fn login_form_body(credentials: &Credentials) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("username", &credentials.email)
        .append_pair("password", &credentials.password)
        .finish()
}

/// A request that could not be built never reached the network
pub fn request_build_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::Parse(e.to_string())
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Builds the error for a non-2xx response.
///
/// `detail` is either a plain string or a list of `{ msg }` validation
/// entries; anything else falls back to the status text.
pub fn error_from_response(status: u16, status_text: &str, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| match b.detail {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()).map(str::to_string))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        })
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| {
            if status_text.is_empty() {
                format!("Request failed (HTTP {})", status)
            } else {
                status_text.to_string()
            }
        });

    ApiError::Rejected { status, detail }
}

#[cfg(target_arch = "wasm32")]
pub use web::ApiClient;

#[cfg(target_arch = "wasm32")]
mod web {
    use async_trait::async_trait;
    use gloo_net::http::{Request, Response};
    use serde::de::DeserializeOwned;

    use super::*;
    use crate::config::CONFIG;
    use crate::models::{NewRegistration, QrVerification};

    /// gloo-net implementation of [`EventApi`]
    #[derive(Clone)]
    pub struct ApiClient {
        base_url: String,
    }

    impl ApiClient {
        pub fn new() -> Self {
            Self { base_url: CONFIG.backend_url.clone() }
        }

        fn url(&self, path: &str) -> String {
            endpoint(&self.base_url, path)
        }

        async fn authorized_get<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
            let response = Request::get(&self.url(path))
                .header("Authorization", &bearer_header(token))
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(response).await
        }
    }

    impl Default for ApiClient {
        fn default() -> Self {
            Self::new()
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            let status = response.status();
            let status_text = response.status_text();
            let body = response.text().await.unwrap_or_default();
            let err = error_from_response(status, &status_text, &body);
            log::warn!("⚠️ [API] {} {}: {}", status, response.url(), err);
            return Err(err);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    #[async_trait(?Send)]
    impl EventApi for ApiClient {
        async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
            log::info!("🔐 [API] Requesting token for {}", credentials.email);
            let response = Request::post(&self.url(TOKEN_PATH))
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(login_form_body(credentials))
                .map_err(request_build_error)?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(response).await
        }

        async fn register_user(&self, user: &NewUser) -> Result<User, ApiError> {
            log::info!("📝 [API] Creating account for {}", user.email);
            let response = Request::post(&self.url(REGISTER_PATH))
                .json(user)
                .map_err(request_build_error)?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(response).await
        }

        async fn my_registrations(&self, token: &str) -> Result<Vec<Registration>, ApiError> {
            self.authorized_get(MY_REGISTRATIONS_PATH, token).await
        }

        async fn all_registrations(&self, token: &str) -> Result<Vec<Registration>, ApiError> {
            self.authorized_get(ALL_REGISTRATIONS_PATH, token).await
        }

        async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
            let response = Request::get(&self.url(EVENTS_PATH))
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(response).await
        }

        async fn create_event(&self, token: &str, event: &NewEvent) -> Result<Event, ApiError> {
            log::info!("📅 [API] Creating event '{}'", event.title);
            let response = Request::post(&self.url(EVENTS_PATH))
                .header("Authorization", &bearer_header(token))
                .json(event)
                .map_err(request_build_error)?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(response).await
        }

        async fn register_for_event(&self, token: &str, event_id: i64) -> Result<Registration, ApiError> {
            let response = Request::post(&self.url(REGISTRATIONS_PATH))
                .header("Authorization", &bearer_header(token))
                .json(&NewRegistration { event_id })
                .map_err(request_build_error)?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(response).await
        }

        async fn verify_qr(&self, token: &str, payload: &str) -> Result<VerificationReceipt, ApiError> {
            log::info!("🔎 [API] Verifying QR payload");
            let response = Request::post(&self.url(VERIFY_QR_PATH))
                .header("Authorization", &bearer_header(token))
                .json(&QrVerification { qr_code_data: payload.to_string() })
                .map_err(request_build_error)?
                .send()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json(response).await
        }
    }
}
