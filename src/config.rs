use std::{env, fs::File};

use log::warn;
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = "CONFIG_DIR";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ConfigError;

#[derive(Serialize, Deserialize, Debug)]
pub enum Environment {
    Local,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    pub environment: Environment,
    /// Path to the plugin manifest.
    pub manifest: String,
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u32,
}

fn default_notice_duration_ms() -> u32 {
    3000
}

impl Config {
    pub fn read(s: String) -> Result<Self, ConfigError> {
        let file = File::open(s).map_or(Err(ConfigError), Ok);
        let config: Self = serde_json::from_reader(file?).map_or(Err(ConfigError), Ok)?;
        if config.notice_duration_ms == 0 {
            warn!("`notice_duration_ms` must be positive");
            return Err(ConfigError);
        }
        Ok(config)
    }

    #[must_use]
    pub fn path() -> String {
        env::var(CONFIG_DIR).map_or_else(
            |_| {
                env::current_dir()
                    .expect("Could not get `CONFIG_DIR` or current directory.")
                    .join(String::from("config.json"))
                    .to_str()
                    .expect("Could not get `CONFIG_DIR` to current directory.")
                    .into()
            },
            |path| path,
        )
    }
}
