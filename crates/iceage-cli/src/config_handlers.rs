//! `iceage config` subcommands.
//!
//! The handlers are generic over [`ConfigManager`] and dispatched with
//! [`IceageConfig`]. Dotted keys such as `catalog.root` address nested TOML
//! tables.

use std::path::PathBuf;

use iceage_core::{ConfigManager, Error, IceageConfig, Result};

use crate::cli::ConfigAction;

// ============================================================================
// Dispatch
// ============================================================================

/// Run a config subcommand against [`IceageConfig`].
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path::<IceageConfig>(config_path),
        ConfigAction::Get { key } => cmd_config_get::<IceageConfig>(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set::<IceageConfig>(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init::<IceageConfig>(file.as_deref(), force),
        ConfigAction::Export { docker_env } => {
            let config = IceageConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Print the config file path that would be used.
pub fn cmd_config_path<C: ConfigManager>(config_path: Option<&str>) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!(
            "(file does not exist; run `{} config init` to create it)",
            C::project_name()
        );
    }
    Ok(())
}

/// Print one value of the resolved configuration.
pub fn cmd_config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<()> {
    println!("{}", config_value::<C>(config_path, key)?);
    Ok(())
}

/// Formatted value at `key` in the resolved configuration.
pub fn config_value<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(|v| format_toml_value(key, v))
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write one value into an existing config file.
pub fn cmd_config_set<C: ConfigManager>(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    let defaults = toml::Value::try_from(C::default()).map_err(|e| Error::config(e.to_string()))?;
    let parsed = parse_value(value, get_nested_value(&doc, key).or_else(|| get_nested_value(&defaults, key)));
    set_nested_value(&mut doc, key, parsed)?;

    // Reject edits that would no longer load
    let text = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<C>(&text).map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    std::fs::write(&path, text).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Write the default configuration to a file.
pub fn cmd_config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path().ok_or_else(|| Error::config("Could not determine config directory"))?,
    };
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let text = C::default().to_toml_string()?;
    std::fs::write(&path, text).map_err(|e| Error::io_with_path(e, &path))?;
    println!("Config file created at {}", path.display());
    Ok(())
}

/// Print the configuration as `KEY=value` lines.
pub fn cmd_config_export<C: ConfigManager>(config: &C, docker_env: bool) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        if docker_env {
            println!("--env {key}={value}");
        } else {
            println!("{key}={value}");
        }
    }
    Ok(())
}

// ============================================================================
// Dotted-key helpers
// ============================================================================

/// Value at a dotted key path.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let Some(last) = parts.pop().filter(|p| !p.is_empty()) else {
        return Err(Error::config("Empty key path"));
    };

    let mut current = root;
    for part in parts {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot navigate into non-table value at '{part}'")))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }
    current
        .as_table_mut()
        .ok_or_else(|| Error::config(format!("Cannot set '{last}' on a non-table value")))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse command-line text for a key, following the type of the value it
/// replaces.
///
/// Dates such as `defaults.early_date = 20170515` stay strings, lists such
/// as `defaults.melt_rate_sites` are written `KOG,SEK`, and `map.center`
/// takes floats. Without a current value the text is tried as a bool, an
/// integer and a float before falling back to a string.
pub fn parse_value(text: &str, current: Option<&toml::Value>) -> toml::Value {
    let text = text.trim();
    match current {
        Some(toml::Value::Array(items)) => toml::Value::Array(
            text.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| parse_scalar(item, items.first()))
                .collect(),
        ),
        _ => parse_scalar(text, current),
    }
}

fn parse_scalar(text: &str, current: Option<&toml::Value>) -> toml::Value {
    match current {
        Some(toml::Value::String(_)) => return toml::Value::String(text.to_string()),
        Some(toml::Value::Float(_)) => {
            if let Ok(f) = text.parse::<f64>() {
                return toml::Value::Float(f);
            }
        }
        _ => {}
    }
    match text {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => text
            .parse::<i64>()
            .map(toml::Value::Integer)
            .or_else(|_| text.parse::<f64>().map(toml::Value::Float))
            .unwrap_or_else(|_| toml::Value::String(text.to_string())),
    }
}

/// Render the value at `key` the way `config set` reads it back: scalars
/// bare and plain lists comma-separated. Tables, and lists of tables such
/// as `gallery`, print as TOML.
pub fn format_toml_value(key: &str, value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) if !items.iter().any(toml::Value::is_table) => items
            .iter()
            .map(|item| format_toml_value(key, item))
            .collect::<Vec<_>>()
            .join(","),
        toml::Value::Array(_) => {
            let name = key.rsplit('.').next().unwrap_or(key);
            let mut wrapper = toml::map::Map::new();
            wrapper.insert(name.to_string(), value.clone());
            toml::to_string_pretty(&wrapper).unwrap_or_else(|_| format!("{value:?}"))
        }
        toml::Value::Table(_) => toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}")),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_default(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, IceageConfig::default().to_toml_string().unwrap()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_config_value_nested() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        assert_eq!(config_value::<IceageConfig>(Some(&path), "defaults.spatial_site").unwrap(), "NOG");
        assert_eq!(config_value::<IceageConfig>(Some(&path), "map.zoom").unwrap(), "4");
    }

    #[test]
    fn test_config_get_missing_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        let err = cmd_config_get::<IceageConfig>(Some(&path), "server.nonexistent").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_config_set_then_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        cmd_config_set::<IceageConfig>(Some(&path), "catalog.root", "/srv/catalog-data").unwrap();
        cmd_config_set::<IceageConfig>(Some(&path), "server.port", "8080").unwrap();

        let config = IceageConfig::from_file(std::path::Path::new(&path)).unwrap();
        assert_eq!(config.catalog.root, PathBuf::from("/srv/catalog-data"));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_set_rejects_wrong_type() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        let err = cmd_config_set::<IceageConfig>(Some(&path), "server.port", "eighty").unwrap_err();
        assert!(err.to_string().contains("Invalid value"));
        // File untouched
        let config = IceageConfig::from_file(std::path::Path::new(&path)).unwrap();
        assert_eq!(config.server.port, 8501);
    }

    #[test]
    fn test_config_set_missing_file() {
        let err = cmd_config_set::<IceageConfig>(Some("/nonexistent/iceage.toml"), "server.port", "1").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_config_init_creates_and_protects() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("iceage").join("config.toml");
        let file = path.to_str().unwrap();

        cmd_config_init::<IceageConfig>(Some(file), false).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[server]"));
        assert!(content.contains("[catalog]"));

        let err = cmd_config_init::<IceageConfig>(Some(file), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(cmd_config_init::<IceageConfig>(Some(file), true).is_ok());
    }

    #[test]
    fn test_config_export() {
        assert!(cmd_config_export(&IceageConfig::default(), true).is_ok());
    }

    #[test]
    fn test_nested_value_helpers() {
        let mut val = toml::Value::Table(toml::map::Map::new());
        set_nested_value(&mut val, "server.port", toml::Value::Integer(3000)).unwrap();
        assert_eq!(get_nested_value(&val, "server.port"), Some(&toml::Value::Integer(3000)));
        assert!(get_nested_value(&val, "server.host").is_none());
        assert!(set_nested_value(&mut val, "server.port.inner", toml::Value::Integer(1)).is_err());
        assert!(set_nested_value(&mut val, "", toml::Value::Integer(1)).is_err());
    }

    #[test]
    fn test_parse_value_without_current() {
        assert_eq!(parse_value("true", None), toml::Value::Boolean(true));
        assert_eq!(parse_value("8501", None), toml::Value::Integer(8501));
        assert_eq!(parse_value("72.5", None), toml::Value::Float(72.5));
        assert_eq!(
            parse_value("CartoDB positron", None),
            toml::Value::String("CartoDB positron".into())
        );
    }

    #[test]
    fn test_parse_value_follows_current_type() {
        let date = toml::Value::String("20170515".into());
        assert_eq!(parse_value("20180101", Some(&date)), toml::Value::String("20180101".into()));

        let sites = toml::Value::Array(vec![toml::Value::String("KOG".into())]);
        assert_eq!(
            parse_value("SEK, HEL,", Some(&sites)),
            toml::Value::Array(vec![toml::Value::String("SEK".into()), toml::Value::String("HEL".into())])
        );

        let center = toml::Value::Array(vec![toml::Value::Float(72.0), toml::Value::Float(-40.0)]);
        assert_eq!(
            parse_value("70,-45", Some(&center)),
            toml::Value::Array(vec![toml::Value::Float(70.0), toml::Value::Float(-45.0)])
        );
    }

    #[test]
    fn test_config_set_keeps_dates_and_lists_typed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_default(&dir);
        cmd_config_set::<IceageConfig>(Some(&path), "defaults.early_date", "20180101").unwrap();
        cmd_config_set::<IceageConfig>(Some(&path), "defaults.melt_rate_sites", "KOG,SEK").unwrap();
        cmd_config_set::<IceageConfig>(Some(&path), "map.center", "70,-45").unwrap();

        let config = IceageConfig::from_file(std::path::Path::new(&path)).unwrap();
        assert_eq!(config.defaults.early_date, "20180101");
        assert_eq!(config.defaults.melt_rate_sites, vec!["KOG", "SEK"]);
        assert_eq!(config.map.center, (70.0, -45.0));
        assert_eq!(
            config_value::<IceageConfig>(Some(&path), "defaults.melt_rate_sites").unwrap(),
            "KOG,SEK"
        );
    }

    #[test]
    fn test_format_toml_value() {
        assert_eq!(format_toml_value("defaults.spatial_site", &toml::Value::String("NOG".into())), "NOG");
        assert_eq!(format_toml_value("map.zoom", &toml::Value::Integer(4)), "4");

        let mut image = toml::map::Map::new();
        image.insert("file".into(), toml::Value::String("NSF.png".into()));
        let gallery = toml::Value::Array(vec![toml::Value::Table(image)]);
        let text = format_toml_value("gallery", &gallery);
        assert!(text.contains("[[gallery]]"));
        assert!(text.contains("file = \"NSF.png\""));
    }
}
