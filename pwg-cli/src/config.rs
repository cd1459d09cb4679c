use std::env::VarError;
use std::path::{Path, PathBuf};

use json::JsonValue;
use log::{info, warn};
use pwg_lib::generator::PasswordOptions;

use crate::error::CliError;

fn default_config() -> JsonValue {
    options_to_config(&PasswordOptions::default())
}

pub fn options_to_config(options: &PasswordOptions) -> JsonValue {
    let mut config = JsonValue::new_object();
    config["length"] = options.length.into();
    config["special"] = options.special_count.into();

    config
}

fn get_config_dir() -> Result<PathBuf, VarError> {
    #[cfg(unix)]
    let app_data = std::env::var("HOME")? + "/.config";

    #[cfg(windows)]
    let app_data = std::env::var("APPDATA")?;

    let mut path = PathBuf::from(app_data);
    path.push("pwg");

    Ok(path)
}

pub fn get_config_file() -> Result<PathBuf, VarError> {
    let mut config_dir = get_config_dir()?;
    config_dir.push("config.json");

    Ok(config_dir)
}

/// Reads the config at `file`, or the defaults when there is no location.
pub fn get_config(file: Option<&Path>) -> JsonValue {
    match file {
        Some(file) => read_config(file),
        None => default_config(),
    }
}

pub fn read_config(file: &Path) -> JsonValue {
    if !file.exists() {
        info!("no config at \"{}\", using defaults", file.display());
        return default_config();
    }

    info!("reading from file \"{}\"", file.display());

    let contents = match std::fs::read_to_string(file) {
        Ok(contents) => contents,
        Err(error) => {
            warn!("failed to read config: {}", error);
            return default_config();
        }
    };

    match json::parse(contents.as_str()) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!("failed to parse config: {}", error);
            default_config()
        }
    }
}

/// Picks each value from the command line first, then the config, then the
/// built in default.
pub fn resolve_options(
    config: &JsonValue,
    length: Option<usize>,
    special_count: Option<usize>,
) -> PasswordOptions {
    let defaults = PasswordOptions::default();

    PasswordOptions::new(
        length
            .or_else(|| config_value(config, "length"))
            .unwrap_or(defaults.length),
        special_count
            .or_else(|| config_value(config, "special"))
            .unwrap_or(defaults.special_count),
    )
}

fn config_value(config: &JsonValue, key: &str) -> Option<usize> {
    let value = &config[key];
    if value.is_null() {
        return None;
    }

    let result = value.as_usize();
    if result.is_none() {
        warn!("ignoring config value \"{}\": {}", key, value.dump());
    }

    result
}

pub fn write_config_to(file: &Path, options: &PasswordOptions) -> Result<(), CliError> {
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    info!("writing to file \"{}\"", file.display());
    std::fs::write(file, options_to_config(options).pretty(4))?;

    Ok(())
}
