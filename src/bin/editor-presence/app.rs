use std::fs;
use std::io::{IsTerminal, Read};

use crate::{bootstrap::BootStrap, clap_app};
use clap::ArgMatches;
use editor_presence::{
    builder::{ActivityFlags, PresenceBuilder},
    config::PresenceConfig,
    diagnostics::ResourceDiagnostics,
    error::*,
    file_size::FsFileSize,
    presence::Presence,
    session::PresenceSession,
    state::EditorState,
};

const STDIN: &str = "-";

pub struct App {
    pub matches: ArgMatches,
}

impl App {
    pub fn new() -> Result<Self> {
        #[cfg(windows)]
        let _ = nu_ansi_term::enable_ansi_support();

        let interactive_output = std::io::stdout().is_terminal();

        Ok(App {
            matches: Self::matches(interactive_output)?,
        })
    }

    pub fn matches(interactive_output: bool) -> Result<ArgMatches> {
        Ok(clap_app::build_app(interactive_output).get_matches())
    }

    /// Applies the `--set key=value` overrides on top of the loaded configuration
    ///
    /// # Returns
    /// A `Result` containing the effective configuration.
    fn build_config(&self, base: &PresenceConfig) -> Result<PresenceConfig> {
        let mut config = base.clone();

        if let Some(values) = self.matches.get_many::<String>("set") {
            for v in values {
                match v.split_once('=') {
                    Some((key, value)) => config.set(key, value)?,
                    None => {
                        return Err(Error::ArgsProcessingError(format!(
                            "Invalid set parameter supplied \"{}\" (Must be in key=value format)",
                            v
                        )));
                    }
                }
            }
        }

        Ok(config)
    }

    /// Start the application, bootstraps the configuration and forwards the request
    /// to the selected subcommand.
    ///
    /// # Returns
    /// A `Result` indicating whether the command completed successfully.
    pub fn start(&self) -> Result<bool> {
        let bootstrap = BootStrap::new()?;
        let config = self.build_config(bootstrap.get_config())?;

        match self.matches.subcommand() {
            Some(("render", args)) => render(config, args),
            Some(("config", args)) => match args.subcommand() {
                Some(("show", _)) => {
                    print!("{}", config.to_toml()?);
                    Ok(true)
                }
                Some(("path", _)) => {
                    println!("{}", bootstrap.config_file().display());
                    Ok(true)
                }
                Some(("edit", _)) => match edit::edit_file(bootstrap.config_file()) {
                    Ok(_) => Ok(true),
                    Err(e) => Err(Error::ConfigReadError {
                        file: bootstrap.config_file().to_string_lossy().into_owned(),
                        cause: e.to_string(),
                    }),
                },
                _ => Ok(false),
            },
            _ => Ok(false),
        }
    }
}

/// Reads the whole content of a file, or the standard input for `-`
fn read_input(source: &str) -> Result<String> {
    if source == STDIN {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        fs::read_to_string(source).map_err(|e| Error::SnapshotError {
            location: ConfigType::STATE,
            file: source.to_string(),
            cause: e.to_string(),
        })
    }
}

fn read_diagnostics(source: &str) -> Result<Vec<ResourceDiagnostics>> {
    serde_json::from_str(&read_input(source)?).map_err(|e| Error::SnapshotError {
        location: ConfigType::STATE,
        file: source.to_string(),
        cause: e.to_string(),
    })
}

/// Builds the payload for the snapshot given in the render arguments and prints it as JSON
fn render(config: PresenceConfig, args: &ArgMatches) -> Result<bool> {
    let state_source = args
        .get_one::<String>("state")
        .ok_or_else(|| Error::ArgsProcessingError("Missing editor snapshot".to_string()))?;
    let state = EditorState::from_json(&read_input(state_source)?, state_source)?;

    let previous = match args.get_one::<String>("previous") {
        Some(source) => Presence::from_json(&read_input(source)?, source)?,
        None => Presence::default(),
    };
    let diagnostics = match args.get_one::<String>("diagnostics") {
        Some(source) => Some(read_diagnostics(source)?),
        None => None,
    };

    let flags = ActivityFlags {
        viewing: args.get_flag("viewing"),
        idling: args.get_flag("idling"),
    };

    let session = PresenceSession::resume(PresenceBuilder::new(config, FsFileSize), previous);
    let presence = smol::block_on(async {
        if let Some(diagnostics) = &diagnostics {
            session.on_diagnostics_changed(diagnostics).await;
        }
        session.update(&state, flags).await
    });

    println!("{}", presence.to_json(args.get_flag("pretty"))?);
    Ok(true)
}
