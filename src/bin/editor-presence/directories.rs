use std::env;
use std::path::PathBuf;

use editor_presence::error::*;

/// Wrapper for 'dirs' that treats MacOS more like Linux, by following the XDG specification.
/// `EDITOR_PRESENCE_CONFIG_DIR` is checked first, then the `XDG_CONFIG_HOME`
/// environment variable on MacOS. The fallback directory is
/// `<platform config dir>/editor-presence`.
pub struct ProjectDirs {
    config_dir: PathBuf,
}

impl ProjectDirs {
    pub fn new() -> Result<ProjectDirs> {
        let config_dir = match env::var_os("EDITOR_PRESENCE_CONFIG_DIR") {
            Some(dir) => expand(&dir.to_string_lossy())?,
            None => {
                #[cfg(target_os = "macos")]
                let config_dir_op = env::var_os("XDG_CONFIG_HOME")
                    .map(PathBuf::from)
                    .filter(|p| p.is_absolute())
                    .or_else(|| dirs_next::home_dir().map(|d| d.join(".config")));

                #[cfg(not(target_os = "macos"))]
                let config_dir_op = dirs_next::config_dir();

                config_dir_op
                    .map(|d| d.join("editor-presence"))
                    .ok_or_else(|| Error::ConfigError("Could not get home directory".to_string()))?
            }
        };

        Ok(ProjectDirs { config_dir })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }
}

fn expand(dir: &str) -> Result<PathBuf> {
    shellexpand::full(dir)
        .map(|dir| PathBuf::from(dir.as_ref()))
        .map_err(|e| Error::InterpolationError {
            location: ConfigType::MAIN,
            cause: e.to_string(),
        })
}
