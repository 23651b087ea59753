use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Load .env into compile-time env vars (read back with option_env! in config.rs)
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Real environment wins over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    for key in [
        "BACKEND_URL",
        "ENVIRONMENT",
        "ENABLE_LOGGING",
        "TOAST_DURATION_MS",
        "SCANNER_FLASH_MS",
        "CAMERA_IDEAL_WIDTH",
        "CAMERA_IDEAL_HEIGHT",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
