use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::flags::Cli;
use crate::config::{load_config, AppConfig};
use crate::core::i18n::Locale;
use crate::core::types::OutputFormat;

/// Config file values with command-line overrides applied.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub app: AppConfig,
    pub locale: Locale,
    pub db_path: PathBuf,
    pub telemetry: bool,
    pub user_agent: String,
}

pub fn resolve_config(cli: &Cli) -> Result<RunConfig> {
    let app = load_config(cli.config.as_deref())?;
    Ok(apply_overrides(app, cli))
}

pub fn apply_overrides(app: AppConfig, cli: &Cli) -> RunConfig {
    let locale = Locale::detect(cli.lang.as_deref().unwrap_or(&app.default_locale));
    let db_path = cli
        .db_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(&app.db_path));
    let telemetry = app.telemetry_enabled && !cli.no_telemetry;
    RunConfig {
        locale,
        db_path,
        telemetry,
        user_agent: cli.user_agent.clone(),
        app,
    }
}

pub fn format_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    }
}

pub fn ensure_output_dir(path: &Path) -> Result<()> {
    if path.exists() && path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

pub fn resolve_output_file(output: &Path, format: OutputFormat, default_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", default_name, format_extension(format)))
    } else {
        output.to_path_buf()
    }
}
