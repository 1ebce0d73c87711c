use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::Deserialize;

use crate::core::YomireiError;

const APP_NAME: &str = "yomirei";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_data_file_path(filename: &str) -> PathBuf {
    get_app_data_dir().join(filename)
}

/// Reads a JSON document, returning `T::default()` when the file is absent.
pub fn load_json<T: for<'de> Deserialize<'de> + Default>(
    file_path: &Path,
) -> Result<T, YomireiError> {
    if !file_path.exists() {
        return Ok(T::default());
    }

    let json = fs::read_to_string(file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::info!("Data loaded from: {}", file_path.display());
    Ok(data)
}
