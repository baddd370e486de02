use std::{fs, path::Path};

use serde::Deserialize;

use crate::core::error::CheckError;

pub const DEFAULT_CONFIG_PATH: &str = "config/securecheck.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub analysis_delay_ms: u64,
    pub default_locale: String,
    pub share_base_url: String,
    pub db_path: String,
    pub telemetry_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        default_config()
    }
}

pub fn load_config(path: Option<&str>) -> Result<AppConfig, CheckError> {
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    let path = path.map(Path::new).unwrap_or(default_path);

    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(default_config());
    }

    let content = fs::read_to_string(path).map_err(|e| CheckError::Config(e.to_string()))?;
    let cfg: AppConfig =
        toml::from_str(&content).map_err(|e| CheckError::Config(e.to_string()))?;
    if cfg.share_base_url.trim().is_empty() {
        return Err(CheckError::Config("share_base_url must not be empty".into()));
    }
    Ok(cfg)
}

pub fn default_config() -> AppConfig {
    AppConfig {
        analysis_delay_ms: 2_000,
        default_locale: "en".to_string(),
        share_base_url: "https://securecheck.app".to_string(),
        db_path: "data/securecheck.db".to_string(),
        telemetry_enabled: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_config(Some("does/not/exist.toml")).unwrap();
        assert_eq!(cfg, default_config());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("securecheck.toml");
        fs::write(&path, "analysis_delay_ms = 0\ndefault_locale = \"es\"\n").unwrap();
        let cfg = load_config(path.to_str()).unwrap();
        assert_eq!(cfg.analysis_delay_ms, 0);
        assert_eq!(cfg.default_locale, "es");
        assert_eq!(cfg.share_base_url, "https://securecheck.app");
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "analysis_delay_ms = \"soon\"").unwrap();
        let err = load_config(path.to_str()).unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }
}
