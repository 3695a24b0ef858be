//! Handler functions for `masthead config {path,get,set,init,export}`.

use std::path::{Path, PathBuf};

use masthead_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::MastheadConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Takes the raw `--config` path rather than a loaded config: `path` and
/// `init` must work before any config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = MastheadConfig::resolve_config_path(config_path).ok_or_else(|| {
                Error::config("Could not determine config directory for this platform")
            })?;
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist; run `masthead config init` to create it)");
            }
            Ok(())
        }
        ConfigAction::Get { key } => {
            println!("{}", config_get(config_path, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let path = config_set(config_path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = config_init(file.as_deref(), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = MastheadConfig::load(config_path)?;
            for line in config_export(&config, docker_env)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

// ============================================================================
// Command implementations
// ============================================================================

/// Value at a dotted key of the loaded configuration.
pub fn config_get(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = MastheadConfig::load(config_path)?;
    let root = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    lookup(&root, key)
        .map(display_value)
        .ok_or_else(|| Error::not_found(format!("Config key '{key}'")))
}

/// Write `value` at a dotted key of the config file. Returns the file path.
pub fn config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<PathBuf> {
    let path = MastheadConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "No config file at {}; run `masthead config init` first",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut root: toml::Value = toml::from_str(&text)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    insert(&mut root, key, infer_value(value))?;

    // Reject edits that would leave the file unloadable.
    let updated: MastheadConfig = root
        .clone()
        .try_into()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    updated.image.constraints()?;
    updated.image.resolver()?;

    write_toml(&path, &root)?;
    Ok(path)
}

/// Write a default config file. Returns the file path.
pub fn config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => MastheadConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let text = MastheadConfig::default().to_toml_string()?;
    std::fs::write(&path, text).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Environment variable lines for `config`.
pub fn config_export(config: &MastheadConfig, docker_env: bool) -> Result<Vec<String>> {
    let prefix = if docker_env { "--env " } else { "" };
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| format!("{prefix}{key}={value}"))
        .collect())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

fn lookup<'a>(root: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(root, |node, part| node.as_table()?.get(part))
}

fn insert(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut node = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = node
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("'{part}' is not inside a table")))?;
        node = table
            .entry(part)
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    node.as_table_mut()
        .ok_or_else(|| Error::config(format!("Cannot set '{key}' on a non-table value")))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// bool, then integer, then float, then string.
fn infer_value(s: &str) -> toml::Value {
    if let Ok(b) = s.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = s.parse::<i64>() {
        toml::Value::Integer(i)
    } else if let Ok(f) = s.parse::<f64>() {
        toml::Value::Float(f)
    } else {
        toml::Value::String(s.to_string())
    }
}

fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
        other => other.to_string(),
    }
}

fn write_toml(path: &Path, root: &toml::Value) -> Result<()> {
    let text = toml::to_string_pretty(root).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(path, text).map_err(|e| Error::io_with_path(e, path))
}

// ============================================================================
// Tests
// ============================================================================
