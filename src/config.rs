use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};
use crate::locale::TableLocale;
use crate::options::RenderOptions;

const CONFIG_PATH_ENV_VAR: &str = "CALH_CONFIG_FILE";

pub fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calh").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calh.toml"));
    }

    locations
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub calendar: RenderOptions,
    pub locale: Option<TableLocale>,
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Config> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::new(
                ErrorKind::IOError(err),
                &format!("Could not read '{}'", path.display()),
            )
        })?;

        let config = Config::from_toml(&content).map_err(|err| {
            let msg = format!(
                "{} (in '{}')",
                err.message.as_deref().unwrap_or_default(),
                path.display()
            );
            err.with_msg(&msg)
        })?;

        log::info!("Loaded configuration from '{}'", path.display());
        Ok(config)
    }
}

/// Loads `path` if given, else the first existing default location, else
/// the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => Config::load(&location),
        None => {
            log::debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}
