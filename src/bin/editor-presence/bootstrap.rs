use chrono::prelude::*;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use editor_presence::config::{parse as config_parse, PresenceConfig};
use editor_presence::constants::template::DEFAULT_CONFIG_FILE;
use editor_presence::debug;
use editor_presence::error::*;

use crate::directories::ProjectDirs;

static DEFAULT_CONF_HEADER: &str = "# File automatically generated on ${date}\n\
                                    # Remove any key to fall back to its default value\n\n";

#[derive(Debug)]
pub struct BootStrap {
    config_file: PathBuf,
    config: PresenceConfig,
}

impl BootStrap {
    /// Locates the configuration file and parses it, creating a default one
    /// when missing.
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::new()?;
        let config_file = dirs.config_dir().join(DEFAULT_CONFIG_FILE);
        let config = parse_presence_config(&config_file)?;

        Ok(BootStrap {
            config_file,
            config,
        })
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn get_config(&self) -> &PresenceConfig {
        &self.config
    }
}

/// Creates the default configuration file
/// # Arguments
/// * `config_file` - The path to the configuration file
///
/// # Returns
/// A `Result` containing the configuration data as a `String`
///
/// # Errors
/// * `ConfigError` - If the configuration file has no parent directory
/// * `IoError` - If an I/O error occurs while creating the configuration file
fn create_default_config(config_file: &Path) -> Result<String> {
    let parent_dir = config_file
        .parent()
        .ok_or_else(|| {
            Error::ConfigError(format!(
                "no parent directory for {}",
                config_file.to_string_lossy()
            ))
        })?;
    std::fs::create_dir_all(parent_dir)?;
    let current_date: DateTime<Local> = Local::now();
    let mut config_data = DEFAULT_CONF_HEADER.replacen("${date}", &current_date.to_string(), 1);
    config_data.push_str(&PresenceConfig::default().to_toml()?);

    File::create(config_file)?.write_all(config_data.as_bytes())?;
    debug!("Default configuration created in {}", config_file.display());
    Ok(config_data)
}

/// Processes the configuration file retrieving the associated `PresenceConfig` structure
///
/// If the file does not exist, it creates a default configuration file.
///
/// # Errors
///
/// This function returns an error if the configuration file cannot be read or parsed.
pub fn parse_presence_config(config_file: &Path) -> Result<PresenceConfig> {
    let toml_data = match config_parse(config_file) {
        Ok(data) => data,
        Err(Error::Io(e)) if e.kind() == ::std::io::ErrorKind::NotFound => {
            create_default_config(config_file)?
        }
        Err(Error::Io(e)) => {
            return Err(Error::ConfigReadError {
                file: String::from(DEFAULT_CONFIG_FILE),
                cause: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    PresenceConfig::from_toml(&toml_data, DEFAULT_CONFIG_FILE)
}
