//! Configuration lifecycle: load file config, merge CLI overrides.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use ocw_core::OcwConfig;

use crate::cli::FetchArgs;

const CONFIG_DIR_NAME: &str = "ocw-downloader";
const CONFIG_FILE_NAME: &str = "config.json";

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/ocw-downloader/config.json`
/// 2. `$HOME/.config/ocw-downloader/config.json`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    config_path_from(env_var_non_empty_os("XDG_CONFIG_HOME"), env_var_non_empty_os("HOME"))
}

fn config_path_from(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home {
        return Some(
            PathBuf::from(xdg_config_home)
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        );
    }
    Some(
        PathBuf::from(home?)
            .join(".config")
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file (explicit path, else default path if present, else
/// built-in defaults) and applies CLI overrides.
pub fn resolve_config(args: &FetchArgs) -> Result<OcwConfig> {
    let config = if let Some(path) = &args.config {
        OcwConfig::load(path).with_context(|| format!("loading config {}", path.display()))?
    } else {
        match resolve_default_config_path() {
            Some(path) if path.exists() => OcwConfig::load(&path)
                .with_context(|| format!("loading config {}", path.display()))?,
            _ => OcwConfig::default(),
        }
    };
    apply_cli_overrides(config, args)
}

/// Applies CLI values on top of `config`; CLI always wins.
pub fn apply_cli_overrides(mut config: OcwConfig, args: &FetchArgs) -> Result<OcwConfig> {
    if !args.courses.is_empty() {
        config.courses.clone_from(&args.courses);
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir.clone_from(output_dir);
    }
    if let Some(base_url) = &args.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(secs) = args.page_timeout {
        config.page_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = args.file_timeout {
        config.file_timeout = Duration::from_secs(secs);
    }
    if args.ignore_case_suffix {
        config.pdf_suffix_ignore_case = true;
    }
    if !args.sections.is_empty() {
        config.retain_sections(&args.sections)?;
    }
    config.validate()?;
    Ok(config)
}
