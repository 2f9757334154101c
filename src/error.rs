use std::io::Write;
use strum_macros::Display;
use thiserror::Error;

#[derive(Debug, Display)]
pub enum ConfigType {
    #[strum(serialize = "Main config")]
    MAIN,
    #[strum(serialize = "Editor state")]
    STATE,
    #[strum(serialize = "Presence")]
    PRESENCE,
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("error processing args. Cause : {0}")]
    ArgsProcessingError(String),
    #[error("invalid configuration. Cause : {0}")]
    ConfigError(String),
    #[error("unable to read configuration file {file:?}. Cause : {cause}")]
    ConfigReadError { file: String, cause: String },
    #[error("invalid configuration key \"{key}\". Cause : {cause}")]
    ConfigKeyError { key: String, cause: String },
    #[error("unable to parse {location} file {file:?}. Cause : {cause}")]
    SerdeTomlError {
        location: ConfigType,
        file: String,
        cause: String,
    },
    #[error("unable to parse {location} data {file:?}. Cause : {cause}")]
    SnapshotError {
        location: ConfigType,
        file: String,
        cause: String,
    },
    #[error("JSON parsing error: {0}")]
    JsonError(String),
    #[error(transparent)]
    Io(#[from] ::std::io::Error),
    #[error("unable to interpolate variable. Cause : {cause}")]
    InterpolationError { location: ConfigType, cause: String },
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::JsonError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub fn default_error_handler(error: &Error, output: &mut dyn Write) {
    use nu_ansi_term::Color::Red;

    match error {
        Error::Io(io_error) if io_error.kind() == ::std::io::ErrorKind::BrokenPipe => {
            ::std::process::exit(0);
        }
        Error::ConfigError(_)
        | Error::ConfigReadError { .. }
        | Error::ConfigKeyError { .. }
        | Error::SerdeTomlError { .. }
        | Error::InterpolationError { .. } => {
            writeln!(output, "{}: {}", Red.paint("[config error]"), error).ok();
        }
        Error::SnapshotError { .. } | Error::JsonError(_) => {
            writeln!(output, "{}: {}", Red.paint("[state error]"), error).ok();
        }
        _ => {
            writeln!(output, "{}: {}", Red.paint("[presence error]"), error).ok();
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_prefixed() {
        let mut out = Vec::new();
        let error = Error::ConfigKeyError {
            key: "status.nope".to_string(),
            cause: "unknown key".to_string(),
        };
        default_error_handler(&error, &mut out);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[config error]"));
        assert!(printed.contains("status.nope"));
    }

    #[test]
    fn test_config_error_message() {
        let error = Error::ConfigError("Could not get home directory".to_string());
        assert_eq!(
            error.to_string(),
            "invalid configuration. Cause : Could not get home directory"
        );

        let mut out = Vec::new();
        default_error_handler(&error, &mut out);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[config error]"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let error: Error = parse.unwrap_err().into();
        assert!(matches!(error, Error::JsonError(_)));
    }
}
