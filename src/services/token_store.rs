// ============================================================================
// TOKEN STORE - Bearer token persistence
// ============================================================================

use crate::error::StorageError;

/// Where the access token survives page reloads
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// localStorage-backed store (key `authToken`)
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct LocalTokenStore;

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        crate::utils::storage::load_raw(crate::utils::TOKEN_STORAGE_KEY).filter(|t| !t.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        crate::utils::storage::save_raw(crate::utils::TOKEN_STORAGE_KEY, token)
    }

    fn clear(&self) -> Result<(), StorageError> {
        crate::utils::storage::remove(crate::utils::TOKEN_STORAGE_KEY)
    }
}
