use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::constants::template;
use crate::error::*;

/// The full set of user settings driving the presence generation.
///
/// Every key has a default. User files only need to carry the keys they
/// change: they are merged over the defaults before deserialization, so a
/// partial `[status.details]` table keeps the remaining defaults of that
/// section.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct PresenceConfig {
    pub status: Status,
    pub file_size: FileSizeConfig,
    pub ignore: Ignore,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Status {
    pub show_elapsed_time: bool,
    pub reset_elapsed_time_per_file: bool,
    pub details: TextSection,
    pub state: TextSection,
    pub problems: Problems,
    pub image: Images,
    pub button: Buttons,
}

/// A text field of the payload (details or state)
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TextSection {
    pub enabled: bool,
    pub idle_enabled: bool,
    pub text: ModeTemplates<String>,
}

/// One template per presence mode
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModeTemplates<T> {
    pub idle: T,
    pub editing: T,
    pub viewing: T,
    pub debugging: T,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Problems {
    pub enabled: bool,
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Images {
    pub large: ImageSection,
    pub small: ImageSection,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ImageSection {
    pub enabled: bool,
    pub idle_enabled: bool,
    #[serde(flatten)]
    pub templates: ModeTemplates<ImageTemplate>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ImageTemplate {
    pub key: String,
    pub text: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Buttons {
    pub active: ButtonTemplate,
    pub idle: ButtonTemplate,
    pub inactive: ButtonTemplate,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ButtonTemplate {
    pub enabled: bool,
    pub label: String,
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileSizeStandard {
    Iec,
    Jedec,
    Si,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FileSizeConfig {
    pub enabled: bool,
    pub human_readable: bool,
    pub standard: FileSizeStandard,
    pub round: u8,
    pub spacer: String,
}

/// Text shown for excluded workspaces, either global or keyed by folder name
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IgnoreText {
    Text(String),
    PerWorkspace(BTreeMap<String, String>),
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Ignore {
    pub workspaces: Vec<String>,
    pub workspaces_text: Option<IgnoreText>,
    pub repositories: Vec<String>,
    pub organizations: Vec<String>,
    pub git_hosts: Vec<String>,
}

impl<T> ModeTemplates<T> {
    fn uniform(value: T) -> Self
    where
        T: Clone,
    {
        ModeTemplates {
            idle: value.clone(),
            editing: value.clone(),
            viewing: value.clone(),
            debugging: value,
        }
    }
}

fn image(key: &str, text: &str) -> ImageTemplate {
    ImageTemplate {
        key: key.to_string(),
        text: text.to_string(),
    }
}

fn button(enabled: bool, label: &str, url: &str) -> ButtonTemplate {
    ButtonTemplate {
        enabled,
        label: label.to_string(),
        url: url.to_string(),
    }
}

impl Default for Status {
    fn default() -> Status {
        Status {
            show_elapsed_time: true,
            reset_elapsed_time_per_file: false,
            details: TextSection {
                enabled: true,
                idle_enabled: true,
                text: ModeTemplates {
                    idle: template::DETAILS_IDLE.to_string(),
                    editing: template::DETAILS_EDITING.to_string(),
                    viewing: template::DETAILS_VIEWING.to_string(),
                    debugging: template::DETAILS_DEBUGGING.to_string(),
                },
            },
            state: TextSection {
                enabled: true,
                idle_enabled: true,
                text: ModeTemplates {
                    idle: template::STATE_IDLE.to_string(),
                    editing: template::STATE_EDITING.to_string(),
                    viewing: template::STATE_VIEWING.to_string(),
                    debugging: template::STATE_DEBUGGING.to_string(),
                },
            },
            problems: Problems {
                enabled: true,
                text: template::PROBLEMS_TEXT.to_string(),
            },
            image: Images {
                large: ImageSection {
                    enabled: true,
                    idle_enabled: true,
                    templates: ModeTemplates {
                        idle: image(
                            template::LARGE_IMAGE_IDLE_KEY,
                            template::LARGE_IMAGE_IDLE_TEXT,
                        ),
                        editing: image(
                            template::LARGE_IMAGE_EDITING_KEY,
                            template::LARGE_IMAGE_EDITING_TEXT,
                        ),
                        viewing: image(
                            template::LARGE_IMAGE_VIEWING_KEY,
                            template::LARGE_IMAGE_VIEWING_TEXT,
                        ),
                        debugging: image(
                            template::LARGE_IMAGE_DEBUGGING_KEY,
                            template::LARGE_IMAGE_DEBUGGING_TEXT,
                        ),
                    },
                },
                small: ImageSection {
                    enabled: true,
                    idle_enabled: true,
                    templates: ModeTemplates::uniform(image(
                        template::SMALL_IMAGE_KEY,
                        template::SMALL_IMAGE_TEXT,
                    )),
                },
            },
            button: Buttons {
                active: button(
                    true,
                    template::BUTTON_ACTIVE_LABEL,
                    template::BUTTON_ACTIVE_URL,
                ),
                idle: button(
                    false,
                    template::BUTTON_IDLE_LABEL,
                    template::BUTTON_IDLE_URL,
                ),
                inactive: button(
                    false,
                    template::BUTTON_INACTIVE_LABEL,
                    template::BUTTON_INACTIVE_URL,
                ),
            },
        }
    }
}

impl Default for FileSizeConfig {
    fn default() -> FileSizeConfig {
        FileSizeConfig {
            enabled: true,
            human_readable: true,
            standard: FileSizeStandard::Iec,
            round: 2,
            spacer: " ".to_string(),
        }
    }
}

impl PresenceConfig {
    /// Parses a TOML document merging it over the default configuration.
    ///
    /// # Arguments
    /// * `toml_data` - The TOML contents.
    /// * `file` - Name of the source, used in error messages.
    ///
    /// # Returns
    /// The effective configuration.
    pub fn from_toml(toml_data: &str, file: &str) -> Result<Self> {
        let parse_error = |cause: String| Error::SerdeTomlError {
            location: ConfigType::MAIN,
            file: file.to_string(),
            cause,
        };

        let user: Table = toml::from_str(toml_data).map_err(|e| parse_error(e.to_string()))?;
        let mut merged = Self::default().to_value()?;
        merge(&mut merged, Value::Table(user));
        merged.try_into().map_err(|e| parse_error(e.to_string()))
    }

    /// Reads and parses the configuration file at the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let file_name = path.to_string_lossy().to_string();
        let toml_data = parse(path).map_err(|e| Error::ConfigReadError {
            file: file_name.clone(),
            cause: e.to_string(),
        })?;
        Self::from_toml(&toml_data, &file_name)
    }

    /// Overrides a single setting using its dotted key path (e.g. `status.details.enabled`).
    ///
    /// The raw value is converted to the type of the setting it replaces. New keys are
    /// only accepted inside existing tables (e.g. `ignore.workspaces_text.<folder>`).
    ///
    /// # Examples
    /// ```
    /// use editor_presence::config::PresenceConfig;
    ///
    /// let mut config = PresenceConfig::default();
    /// config.set("status.details.enabled", "false").unwrap();
    /// assert!(!config.status.details.enabled);
    /// ```
    pub fn set(&mut self, key: &str, raw: &str) -> Result<()> {
        let key_error = |cause: &str| Error::ConfigKeyError {
            key: key.to_string(),
            cause: cause.to_string(),
        };

        let mut root = self.to_value()?;
        let path: Vec<&str> = key.split('.').filter(|s| !s.is_empty()).collect();

        // workspaces_text is optional and switches between a string and a table
        if let ["ignore", "workspaces_text", folder @ ..] = path.as_slice() {
            let ignore = root
                .get_mut("ignore")
                .and_then(Value::as_table_mut)
                .ok_or_else(|| key_error("unknown key"))?;
            if folder.is_empty() {
                ignore.insert(
                    "workspaces_text".to_string(),
                    Value::String(raw.to_string()),
                );
            } else {
                let entry = ignore
                    .entry("workspaces_text")
                    .or_insert(Value::Table(Table::new()));
                if !entry.is_table() {
                    *entry = Value::Table(Table::new());
                }
                if let Value::Table(texts) = entry {
                    texts.insert(folder.join("."), Value::String(raw.to_string()));
                }
            }
            return self.replace_with(root, key);
        }

        let (last, parents) = path.split_last().ok_or_else(|| key_error("empty key"))?;

        let mut current = &mut root;
        for segment in parents {
            current = current
                .as_table_mut()
                .and_then(|table| table.get_mut(*segment))
                .ok_or_else(|| key_error("unknown key"))?;
        }

        let table = current
            .as_table_mut()
            .ok_or_else(|| key_error("parent is not a table"))?;
        let value = match table.get(*last) {
            Some(existing) => coerce(existing, raw).ok_or_else(|| key_error("type mismatch"))?,
            None => return Err(key_error("unknown key")),
        };
        table.insert(last.to_string(), value);
        self.replace_with(root, key)
    }

    /// Serializes the configuration as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError(e.to_string()))
    }

    fn to_value(&self) -> Result<Value> {
        Value::try_from(self).map_err(|e| Error::ConfigError(e.to_string()))
    }

    fn replace_with(&mut self, root: Value, key: &str) -> Result<()> {
        *self = root.try_into().map_err(|e: toml::de::Error| Error::ConfigKeyError {
            key: key.to_string(),
            cause: e.to_string(),
        })?;
        Ok(())
    }
}

/// Deep-merges `overlay` into `base`. Tables merge key by key, anything else replaces.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Converts a raw override into the TOML type of the value it replaces
fn coerce(existing: &Value, raw: &str) -> Option<Value> {
    match existing {
        Value::String(_) => Some(Value::String(raw.to_string())),
        Value::Boolean(_) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" => Some(Value::Boolean(true)),
            "false" | "0" => Some(Value::Boolean(false)),
            _ => None,
        },
        Value::Integer(_) => raw.trim().parse::<i64>().ok().map(Value::Integer),
        Value::Float(_) => raw.trim().parse::<f64>().ok().map(Value::Float),
        Value::Array(_) => {
            let items = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect();
            Some(Value::Array(items))
        }
        _ => None,
    }
}

pub fn parse(file_path: &Path) -> Result<String> {
    let mut config_content = String::new();
    File::open(file_path)?.read_to_string(&mut config_content)?;
    Ok(config_content)
}
