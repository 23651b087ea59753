use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::utils::datetime;

/// Access level of the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Unauthenticated,
    User,
    Admin,
}

impl Role {
    pub fn is_authenticated(self) -> bool {
        self != Role::Unauthenticated
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// Login form input (email goes in the OAuth2 `username` field)
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Body of `POST /register`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(with = "datetime::flexible")]
    pub created_at: NaiveDateTime,
}

/// Payload segment of the backend's JWT access token
#[derive(Clone, PartialEq, Eq, Deserialize, Debug, Default)]
pub struct TokenClaims {
    pub is_admin: Option<bool>,
}

impl TokenClaims {
    /// Reads the claims of a JWT without verifying it. Returns `None` for
    /// opaque tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut parts = token.split('.');
        let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() {
            return None;
        }
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Role declared by the token itself, if any
    pub fn role(&self) -> Option<Role> {
        self.is_admin.map(|admin| if admin { Role::Admin } else { Role::User })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn admin_claim_is_read_from_jwt_payload() {
        let token = jwt(r#"{"sub":"admin@example.com","is_admin":true,"exp":1999999999}"#);
        let claims = TokenClaims::from_token(&token).unwrap();
        assert_eq!(claims.role(), Some(Role::Admin));

        let user = jwt(r#"{"sub":"ana@example.com","is_admin":false}"#);
        assert_eq!(TokenClaims::from_token(&user).and_then(|c| c.role()), Some(Role::User));
    }

    #[test]
    fn opaque_tokens_carry_no_role() {
        assert_eq!(TokenClaims::from_token("opaque-token"), None);
        assert_eq!(TokenClaims::from_token("a.b"), None);
        let no_claim = jwt(r#"{"sub":"x"}"#);
        assert_eq!(TokenClaims::from_token(&no_claim).and_then(|c| c.role()), None);
    }

    #[test]
    fn credentials_require_both_fields() {
        assert_eq!(Credentials::new("  ", "pw").validate(), Err(ValidationError::MissingFields));
        assert_eq!(Credentials::new("a@b.c", "").validate(), Err(ValidationError::MissingFields));
        assert!(Credentials::new(" a@b.c ", "pw").validate().is_ok());
        assert_eq!(Credentials::new(" a@b.c ", "pw").email, "a@b.c");
    }
}
