use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

const CONFIG_PATH_ENV_VAR: &str = "DAYSHEET_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("daysheet").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".daysheet.toml"));
    }

    locations
}

/// Loads `path` if given, otherwise the first config file found in the
/// default locations. Falls back to defaults if there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => Config::from_file(&location),
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    pub today_char: char,
    pub selected_char: char,
    pub bullet_char: char,
}

impl Default for ThemeSpec {
    fn default() -> Self {
        ThemeSpec {
            today_char: '*',
            selected_char: '>',
            bullet_char: '•',
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    #[serde(rename = "tick_rate")]
    tick_rate_ms: u64,
    pub theme: ThemeSpec,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            locale: "en_US".to_owned(),
            tick_rate_ms: 500,
            theme: ThemeSpec::default(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        log::info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl std::str::FromStr for Config {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
