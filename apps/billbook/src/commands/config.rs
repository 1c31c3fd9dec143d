//! Settings: show the effective config, write a new one.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::CliResult;
use crate::state::AppConfig;

/// Values `config init` writes. Unset fields keep what the file had.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub base_url: Option<String>,
    pub email: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub api_token: Option<String>,
}

/// Prints the effective settings (file plus environment) as TOML.
/// The API token is masked.
pub fn show(config: &AppConfig, config_path: Option<&Path>, out: &mut impl Write) -> CliResult<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .or_else(AppConfig::default_config_path);
    match path {
        Some(path) if path.exists() => writeln!(out, "# {}", path.display())?,
        Some(path) => writeln!(out, "# {} (not created yet, showing defaults)", path.display())?,
        None => writeln!(out, "# no config directory available")?,
    }

    let mut shown = config.clone();
    if shown.backend.api_token.is_some() {
        shown.backend.api_token = Some("********".to_string());
    }
    write!(out, "{}", toml::to_string_pretty(&shown)?)?;

    if let Err(e) = config.validate() {
        writeln!(out, "\n# warning: {}", e)?;
    }
    Ok(())
}

/// Updates the config file with `options`, validates, and saves it.
pub fn init(config_path: Option<&Path>, options: InitOptions, out: &mut impl Write) -> CliResult<()> {
    let mut config = AppConfig::load_file(config_path)?;

    if let Some(url) = options.base_url {
        config.backend.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(email) = options.email {
        config.user.email = email.trim().to_string();
    }
    if let Some(secs) = options.timeout_secs {
        config.backend.timeout_secs = secs;
    }
    if let Some(dir) = options.export_dir {
        config.export.output_dir = Some(dir);
    }
    if let Some(token) = options.api_token {
        config.backend.api_token = Some(token).filter(|t| !t.trim().is_empty());
    }

    config.validate()?;
    let path = config.save(config_path)?;
    writeln!(out, "Settings saved to {}", path.display())?;
    Ok(())
}
