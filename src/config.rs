use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub toast_duration_ms: u32,
    pub scanner_config: ScannerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            toast_duration_ms: 5000,
            scanner_config: ScannerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub flash_ms: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            ideal_width: 1280,
            ideal_height: 720,
            flash_ms: 500,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(normalize_base_url)
                .unwrap_or(defaults.backend_url),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            toast_duration_ms: option_env!("TOAST_DURATION_MS")
                .unwrap_or("5000").parse().unwrap_or(5000),
            scanner_config: ScannerConfig {
                ideal_width: option_env!("CAMERA_IDEAL_WIDTH")
                    .unwrap_or("1280").parse().unwrap_or(1280),
                ideal_height: option_env!("CAMERA_IDEAL_HEIGHT")
                    .unwrap_or("720").parse().unwrap_or(720),
                flash_ms: option_env!("SCANNER_FLASH_MS")
                    .unwrap_or("500").parse().unwrap_or(500),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Effective level handed to wasm-logger
    pub fn log_level(&self) -> log::Level {
        if !self.enable_logging {
            log::Level::Error
        } else if self.is_production() {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}

/// Strips trailing slashes so endpoint paths can be appended verbatim.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_strips_trailing_slashes() {
        assert_eq!(normalize_base_url("http://localhost:8000/"), "http://localhost:8000");
        assert_eq!(normalize_base_url(" https://api.example.com// "), "https://api.example.com");
    }

    #[test]
    fn logging_disabled_only_reports_errors() {
        let config = AppConfig { enable_logging: false, ..AppConfig::default() };
        assert_eq!(config.log_level(), log::Level::Error);

        let prod = AppConfig { environment: "production".into(), ..AppConfig::default() };
        assert_eq!(prod.log_level(), log::Level::Info);
    }
}
