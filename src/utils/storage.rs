use web_sys::{window, Storage};

use crate::error::StorageError;

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Reads a raw string value; missing storage reads as absent
pub fn load_raw(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

pub fn save_raw(key: &str, value: &str) -> Result<(), StorageError> {
    let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
    storage
        .set_item(key, value)
        .map_err(|e| StorageError::Write(format!("{:?}", e)))
}

pub fn remove(key: &str) -> Result<(), StorageError> {
    let storage = get_local_storage().ok_or(StorageError::Unavailable)?;
    storage
        .remove_item(key)
        .map_err(|e| StorageError::Write(format!("{:?}", e)))
}
