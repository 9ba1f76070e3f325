use std::fs;
use std::path::{Path, PathBuf};

use crate::io::storage::atomic_write;
use crate::model::config::AppConfig;

pub const CONFIG_FILE: &str = "config.toml";

/// Written by `tl init`. Every key is present with its default value.
pub const CONFIG_TEMPLATE: &str = r##"# tasklist configuration

[store]
# Quiet period (ms) after the last change before the list is written
debounce_ms = 500
# Write a pending save when the TUI exits
flush_on_exit = false

[widget]
# Mirror the list into widget.json for home-screen widgets
enabled = true

[ui]
show_key_hints = true

[ui.colors]
# background = "#0C001B"
# text = "#A09FA6"
# highlight = "#FB4196"
"##;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Syntax(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Load the effective config. A missing file means all defaults.
pub fn read_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    Ok(toml::from_str(&text)?)
}

/// Read config.toml as an editable document. A missing file yields an empty one.
pub fn read_config_doc(data_dir: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    let path = config_path(data_dir);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(text.parse()?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(toml_edit::DocumentMut::new()),
        Err(source) => Err(ConfigError::Read { path, source }),
    }
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(data_dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let path = config_path(data_dir);
    fs::create_dir_all(data_dir).map_err(|source| ConfigError::Write {
        path: path.clone(),
        source,
    })?;
    atomic_write(&path, doc.to_string().as_bytes())
        .map_err(|source| ConfigError::Write { path, source })
}

/// Set `section.key` (or `ui.colors.<slot>`) to `raw`.
///
/// The value's TOML type follows the existing setting: booleans and integers
/// are parsed, everything else is stored as a string. The resulting document
/// must still deserialize into an [`AppConfig`].
pub fn set_config_value(
    doc: &mut toml_edit::DocumentMut,
    dotted_key: &str,
    raw: &str,
) -> Result<(), ConfigError> {
    let parts: Vec<&str> = dotted_key.split('.').collect();
    let value = match parts.as_slice() {
        ["store", "debounce_ms"] => toml_edit::value(parse_int(dotted_key, raw)?),
        ["store", "flush_on_exit"] | ["widget", "enabled"] | ["ui", "show_key_hints"] => {
            toml_edit::value(parse_bool(dotted_key, raw)?)
        }
        ["ui", "colors", slot] if !slot.is_empty() => toml_edit::value(raw),
        _ => return Err(ConfigError::UnknownKey(dotted_key.to_string())),
    };

    let (leaf, tables) = match parts.split_last() {
        Some(split) => split,
        None => return Err(ConfigError::UnknownKey(dotted_key.to_string())),
    };
    let mut table = doc.as_table_mut();
    for name in tables {
        if !table.contains_key(name) {
            let mut new_table = toml_edit::Table::new();
            new_table.set_implicit(false);
            table.insert(name, toml_edit::Item::Table(new_table));
        }
        table = match table[*name].as_table_mut() {
            Some(t) => t,
            None => {
                return Err(ConfigError::InvalidValue {
                    key: dotted_key.to_string(),
                    reason: format!("`{}` is not a table", name),
                });
            }
        };
    }
    table[*leaf] = value;

    toml::from_str::<AppConfig>(&doc.to_string())?;
    Ok(())
}

fn parse_int(key: &str, raw: &str) -> Result<i64, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected a non-negative integer, got {:?}", raw),
        }),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected true or false, got {:?}", raw),
        }),
    }
}
