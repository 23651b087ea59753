/// localStorage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "authToken";

// DOM ids shared by views and the incremental updater
pub const APP_ROOT_ID: &str = "app";
pub const ADMIN_PANEL_ID: &str = "admin-panel";
pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const QR_VIDEO_ID: &str = "qr-video";
pub const SCANNER_FRAME_ID: &str = "scanner-frame";
pub const SCANNER_STATUS_ID: &str = "scanner-status";
pub const VERIFICATION_RESULT_ID: &str = "verification-result";
pub const EVENTS_LIST_ID: &str = "events-list";
pub const MY_REGISTRATIONS_LIST_ID: &str = "my-registrations-list";
pub const ALL_REGISTRATIONS_LIST_ID: &str = "all-registrations-list";
pub const CREATE_EVENT_RESULT_ID: &str = "create-event-result";
pub const CREATE_EVENT_FORM_ID: &str = "create-event-form";
pub const USER_INFO_ID: &str = "user-info";

/// Border colour flashed on the scanner frame when a code is read
pub const SCANNER_FLASH_COLOR: &str = "#4cc9f0";
