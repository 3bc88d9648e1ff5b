mod config;

pub use config::{Config, DisplayConfig, NotificationsConfig, TimerConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the configuration directory, creating it if needed.
///
/// `POMOTICK_CONFIG_DIR` overrides the location outright. Otherwise it is
/// `~/.config/pomotick[-dev]/`, with `POMOTICK_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("POMOTICK_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOTICK_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomotick-dev")
            } else {
                base_dir.join("pomotick")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
