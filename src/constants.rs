//! Module for shared constants used across the codebase

/// Empty string used when stripping markers from text.
pub const EMPTY: &str = "";

/// Sentinel used for any value that is unavailable or excluded.
/// Presence services reject fields shorter than two characters, so
/// two zero-width spaces are used instead of a plain empty string.
pub const FAKE_EMPTY: &str = "\u{200b}\u{200b}";

/// Placeholder tokens recognized inside templates
pub mod tokens {
    pub const APP_NAME: &str = "{app_name}";
    pub const APP_ID: &str = "{app_id}";

    pub const GIT_REPO: &str = "{git_repo}";
    pub const GIT_BRANCH: &str = "{git_branch}";
    pub const GIT_URL: &str = "{git_url}";

    pub const FILE_NAME: &str = "{file_name}";
    pub const FILE_EXTENSION: &str = "{file_extension}";
    /// Misspelled key kept for templates written against older releases.
    pub const FILE_EXTENSION_LEGACY: &str = "{file_extenstion}";
    pub const FILE_SIZE: &str = "{file_size}";
    pub const FOLDER_AND_FILE: &str = "{folder_and_file}";
    pub const FULL_DIRECTORY_NAME: &str = "{full_directory_name}";
    pub const WORKSPACE: &str = "{workspace}";
    pub const WORKSPACE_FOLDER: &str = "{workspace_folder}";
    pub const WORKSPACE_AND_FOLDER: &str = "{workspace_and_folder}";
    pub const LANG_LOWER: &str = "{lang}";
    pub const LANG_TITLE: &str = "{Lang}";
    pub const LANG_UPPER: &str = "{LANG}";
    pub const PROBLEMS_COUNT: &str = "{problems_count}";
    pub const LINE_COUNT: &str = "{line_count}";
    pub const CURRENT_LINE: &str = "{current_line}";
    pub const CURRENT_COLUMN: &str = "{current_column}";

    pub const PROBLEMS: &str = "{problems}";
    pub const WORKSPACE_EXCLUDED_TEXT: &str = "{workspace_excluded_text}";
}

/// Application identifiers resolved by `{app_id}`
pub mod app {
    pub const VSCODE: &str = "vscode";
    pub const VSCODE_INSIDERS: &str = "vscode-insiders";
    pub const VSCODIUM: &str = "vscodium";
    pub const VSCODIUM_INSIDERS: &str = "vscodium-insiders";
}

pub mod template {
    pub const DETAILS_IDLE: &str = "Idling";
    pub const DETAILS_EDITING: &str = "In {file_name} {problems}";
    pub const DETAILS_VIEWING: &str = "Viewing {file_name}";
    pub const DETAILS_DEBUGGING: &str = "Debugging {file_name}";

    pub const STATE_IDLE: &str = "{app_name}";
    pub const STATE_EDITING: &str = "Workspace: {workspace}";
    pub const STATE_VIEWING: &str = "Workspace: {workspace}";
    pub const STATE_DEBUGGING: &str = "Debugging: {workspace}";

    pub const PROBLEMS_TEXT: &str = "- {problems_count} problems found";

    pub const LARGE_IMAGE_IDLE_KEY: &str = "idle-{app_id}";
    pub const LARGE_IMAGE_IDLE_TEXT: &str = "Idling";
    pub const LARGE_IMAGE_EDITING_KEY: &str = "{lang}";
    pub const LARGE_IMAGE_EDITING_TEXT: &str = "Editing a {LANG} file";
    pub const LARGE_IMAGE_VIEWING_KEY: &str = "{lang}";
    pub const LARGE_IMAGE_VIEWING_TEXT: &str = "Viewing a {LANG} file";
    pub const LARGE_IMAGE_DEBUGGING_KEY: &str = "debugging";
    pub const LARGE_IMAGE_DEBUGGING_TEXT: &str = "Debugging using {app_name}";

    pub const SMALL_IMAGE_KEY: &str = "{app_id}";
    pub const SMALL_IMAGE_TEXT: &str = "{app_name}";

    pub const BUTTON_ACTIVE_LABEL: &str = "View Repository";
    pub const BUTTON_ACTIVE_URL: &str = "{git_url}";
    pub const BUTTON_IDLE_LABEL: &str = "View Repository";
    pub const BUTTON_IDLE_URL: &str = "{git_url}";
    pub const BUTTON_INACTIVE_LABEL: &str = "Inactive";
    pub const BUTTON_INACTIVE_URL: &str = "https://github.com";

    /// Used when a workspace is excluded but no ignore text was configured
    pub const WORKSPACE_EXCLUDED_TEXT: &str = "No workspace ignore text provided.";

    /// Language name used when nothing better is known
    pub const DEFAULT_LANGUAGE: &str = "text";

    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "presence.toml";
}
