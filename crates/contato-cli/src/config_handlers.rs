//! Handler functions for `contato config` subcommands.

use std::path::Path;

use crate::cli::ConfigAction;
use crate::config::ContatoConfig;
use crate::error::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand against the effective configuration.
pub fn handle_config_command(config: &ContatoConfig, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            print!("{}", cmd_config_show(config)?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            println!("{}", cmd_config_get(config, key)?);
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            cmd_config_init(file, *force)?;
            println!("Config file created at {}", file.display());
            Ok(())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Render the effective configuration as TOML.
pub fn cmd_config_show(config: &ContatoConfig) -> Result<String> {
    config.to_toml_string()
}

/// Look up one value by dotted key.
pub fn cmd_config_get(config: &ContatoConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write a default configuration file.
pub fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = ContatoConfig::default().to_toml_string()?;
    std::fs::write(path, toml_str).map_err(|e| Error::io_with_path(e, path))?;
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
