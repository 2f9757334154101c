use std::env;

use once_cell::sync::Lazy;

pub static DEBUG_ENABLED: Lazy<bool> = Lazy::new(|| {
    env::var("EDITOR_PRESENCE_DEBUG")
        .map_or(false, |log_level| log_level.eq("true") || log_level.eq("1"))
});

/// Logs a debug message with optional formatted arguments to stderr.
///
/// Output goes to stderr so that payloads printed on stdout stay parseable.
///
/// # Examples
///
/// ```
/// use editor_presence::debug;
///
/// debug!("Presence refreshed");
/// debug!("Mode {} for {}", "Editing", "main.rs");
/// ```
#[macro_export]
macro_rules! debug {
    ($fmt:expr) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!("{}", $fmt)));
        }
    };
    ($fmt:expr, $($arg:tt)*) => {
        if *$crate::log::DEBUG_ENABLED {
            eprintln!("{}", nu_ansi_term::Color::Yellow.paint(format!($fmt, $($arg)*)));
        }
    };
}
