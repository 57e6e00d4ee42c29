use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config_file::{APP_FOLDER, CONFIG_FILENAME, ConfigError};

/// Config written on first run
pub const SAMPLE_CONFIG: &str = include_str!("../sample.yml");

/// Make sure `<config_home>/march/config.yml` exists, seeding it from the bundled sample.
///
/// Returns the path of the config file.
///
/// # Errors
///
/// Returns `ConfigError::ConfigDirectoryMissing` if `config_home` itself does not exist,
/// `ConfigError::ConfigFolderCreationFailed` if the `march` folder cannot be created, or
/// `ConfigError::ConfigFileCreationFailed` if the sample cannot be written.
pub fn ensure_config(config_home: &Path) -> Result<PathBuf, ConfigError> {
    if !config_home.is_dir() {
        return Err(ConfigError::ConfigDirectoryMissing(
            config_home.to_path_buf(),
        ));
    }

    let folder = config_home.join(APP_FOLDER);
    if !folder.exists() {
        std::fs::create_dir(&folder).map_err(|source| {
            ConfigError::ConfigFolderCreationFailed {
                path: folder.clone(),
                source,
            }
        })?;
        info!("Created config folder {}", folder.display());
    }

    let config_file = folder.join(CONFIG_FILENAME);
    if config_file.exists() {
        debug!("Using existing config file {}", config_file.display());
    } else {
        std::fs::write(&config_file, SAMPLE_CONFIG).map_err(|source| {
            ConfigError::ConfigFileCreationFailed {
                path: config_file.clone(),
                source,
            }
        })?;
        info!("Created config file {} from sample", config_file.display());
    }

    Ok(config_file)
}
