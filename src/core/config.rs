use std::{
    net::SocketAddr,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::YomireiError,
    dictionary::DictType,
    persistence::{
        get_data_file_path,
        load_json,
    },
};

pub const CONFIG_FILE: &str = "config.json";

/// Runtime settings. Every field is optional in the JSON file; absent ones fall
/// back to [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sentences_path: PathBuf,
    pub navigation_path: PathBuf,
    pub static_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub dictionary_type: DictType,
    /// A ready `system.dic`. When unset the dictionary is provisioned into the
    /// application data directory.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sentences_path: PathBuf::from("static/sentence.csv"),
            navigation_path: PathBuf::from("static/navigation.csv"),
            static_dir: PathBuf::from("static"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            dictionary_type: DictType::default(),
            dictionary_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the configuration file. An explicit path must exist and parse; the
    /// implicit one in the data directory is optional and a broken one only
    /// produces a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, YomireiError> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(YomireiError::Custom(format!(
                        "Config file {} does not exist",
                        path.display()
                    )));
                }
                load_json(path)
            }
            None => {
                let path = get_data_file_path(CONFIG_FILE);
                match load_json::<AppConfig>(&path) {
                    Ok(config) => Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
                        Ok(AppConfig::default())
                    }
                }
            }
        }
    }
}
