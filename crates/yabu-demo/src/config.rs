//! Application configuration for the demo.

use std::path::{Path, PathBuf};

use yabu_core::GestureConfig;

/// Default WebSocket port for the IPC bridge.
const DEFAULT_WS_PORT: u16 = 9400;

/// Runtime configuration for the Yabu demo application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// WebSocket port for core <-> UI IPC.
    pub ws_port: u16,
    /// Swipe, double-tap, and shake thresholds.
    pub gestures: GestureConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ws_port: DEFAULT_WS_PORT,
            gestures: GestureConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read `YABU_WS_PORT` and `YABU_GESTURES` (path to a JSON `GestureConfig`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let ws_port = std::env::var("YABU_WS_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_WS_PORT);

        let gestures = match std::env::var_os("YABU_GESTURES") {
            Some(path) => load_gestures(Path::new(&path))?,
            None => GestureConfig::default(),
        };

        Ok(Self { ws_port, gestures })
    }
}

fn load_gestures(path: &Path) -> Result<GestureConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("gesture thresholds loaded from {}", path.display());
    Ok(config)
}

/// Errors that can occur while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid gesture config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_gestures_from_file() {
        let path = std::env::temp_dir().join(format!("yabu-gestures-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"shake_threshold": 20.0, "shake_cooldown": 1500}"#).unwrap();
        let config = load_gestures(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.shake_threshold, 20.0);
        assert_eq!(config.shake_cooldown.as_millis(), 1500);
        assert_eq!(config.swipe_threshold, 50.0);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_gestures(Path::new("/nonexistent/yabu.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/yabu.json"));
    }
}
