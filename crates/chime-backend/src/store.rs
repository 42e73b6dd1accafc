use std::path::PathBuf;

use chime_settings::SettingsTree;
use directories::ProjectDirs;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or persisting the settings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to determine the user's configuration directories. This
    /// usually occurs when required environment variables are missing (e.g.,
    /// `$HOME` on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the settings file.
    #[error("failed to read settings: {0}")]
    IoError(#[from] std::io::Error),
    /// The settings file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize settings: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the settings to TOML (e.g., when saving changes).
    #[error("failed to serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

fn settings_path() -> Result<PathBuf, StoreError> {
    match ProjectDirs::from("dev", "chime", "chime") {
        Some(dirs) => Ok(dirs.config_dir().join("settings.toml")),
        None => Err(StoreError::DirectoriesNotFound),
    }
}

/// Loads the settings tree from disk. A missing file is a first run: an
/// empty tree is written out and returned.
pub async fn load_settings() -> Result<SettingsTree, StoreError> {
    let path = settings_path()?;

    log::info!("Loading notification settings from {path:?}");
    if path.exists() {
        let contents = read_to_string(&path).await?;
        let settings: SettingsTree = toml::from_str(&contents)?;
        return Ok(settings);
    }

    let settings = SettingsTree::new();
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&settings)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(settings)
}

/// Saves the settings tree to disk. This function serializes the provided
/// tree to pretty-printed TOML and writes it to `settings.toml` in the
/// user's configuration directory, overwriting any existing file.
pub async fn save_settings(settings: &SettingsTree) -> Result<(), StoreError> {
    let path = settings_path()?;
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .await?;

    let contents = toml::to_string_pretty(settings)?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}
