use std::path::MAIN_SEPARATOR_STR;

use super::Replacements;
use crate::config::PresenceConfig;
use crate::constants::{tokens, EMPTY, FAKE_EMPTY};
use crate::file_size::{lookup_file_size, FileSizeProvider};
use crate::language::{resolve_lang_name, to_lower, to_title, to_upper};
use crate::state::EditorState;

const WORKSPACE_SUFFIX: &str = "(Workspace)";

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_else(|| FAKE_EMPTY.to_string())
}

/// Builds the file and workspace placeholder table.
///
/// The file size is the only value needing I/O. Every unavailable or
/// excluded value resolves to the sentinel.
///
/// # Arguments
/// * `state` - Current editor snapshot.
/// * `excluded` - Whether the current workspace is excluded.
/// * `problems` - Last known problem count.
/// * `config` - Presence settings (problems flag and file size options).
/// * `sizes` - File size provider.
pub async fn file_info_replacements<F: FileSizeProvider>(
    state: &EditorState,
    excluded: bool,
    problems: usize,
    config: &PresenceConfig,
    sizes: &F,
) -> Replacements {
    let document = state.document();
    let selection = state.selection();

    let workspace_folder_name = (!excluded)
        .then(|| state.workspace_folder.as_ref().map(|f| f.name.clone()))
        .flatten();
    let workspace_name = if excluded {
        FAKE_EMPTY.to_string()
    } else {
        state
            .workspace
            .as_ref()
            .map(|name| name.replacen(WORKSPACE_SUFFIX, EMPTY, 1).trim_end().to_string())
            .unwrap_or_else(|| or_empty(workspace_folder_name.clone()))
    };
    let workspace_and_folder = if excluded {
        FAKE_EMPTY.to_string()
    } else {
        match &workspace_folder_name {
            Some(folder) => format!("{} - {}", workspace_name, folder),
            None => workspace_name.clone(),
        }
    };

    let full_directory_name = match (document, &state.workspace) {
        (Some(document), Some(_)) if !excluded => {
            let root = state.workspace_folder.as_ref().map(|f| f.path.as_path());
            format!(
                "{}{}{}",
                workspace_name,
                MAIN_SEPARATOR_STR,
                document.relative_directories(root).join(MAIN_SEPARATOR_STR)
            )
        }
        _ => FAKE_EMPTY.to_string(),
    };

    let language = resolve_lang_name(document);
    let file_size = if excluded {
        None
    } else {
        lookup_file_size(sizes, &config.file_size, state).await
    };
    let extension = or_empty(document.and_then(|d| d.file_extension()));

    [
        (tokens::FILE_NAME, or_empty(document.and_then(|d| d.file_name()))),
        (tokens::FILE_EXTENSION, extension.clone()),
        (tokens::FILE_EXTENSION_LEGACY, extension),
        (tokens::FILE_SIZE, or_empty(file_size)),
        (
            tokens::FOLDER_AND_FILE,
            or_empty(document.and_then(|d| d.folder_and_file())),
        ),
        (tokens::FULL_DIRECTORY_NAME, full_directory_name),
        (tokens::WORKSPACE, workspace_name),
        (tokens::WORKSPACE_FOLDER, or_empty(workspace_folder_name)),
        (tokens::WORKSPACE_AND_FOLDER, workspace_and_folder),
        (tokens::LANG_LOWER, to_lower(&language)),
        (tokens::LANG_TITLE, to_title(&language)),
        (tokens::LANG_UPPER, to_upper(&language)),
        (
            tokens::PROBLEMS_COUNT,
            if config.status.problems.enabled {
                problems.to_string()
            } else {
                FAKE_EMPTY.to_string()
            },
        ),
        (
            tokens::LINE_COUNT,
            or_empty(document.map(|d| d.line_count.to_string())),
        ),
        (
            tokens::CURRENT_LINE,
            or_empty(selection.map(|s| (s.line + 1).to_string())),
        ),
        (
            tokens::CURRENT_COLUMN,
            or_empty(selection.map(|s| (s.character + 1).to_string())),
        ),
    ]
    .into_iter()
    .collect()
}

/// Resolves every file and workspace placeholder in the text
pub async fn replace_file_info<F: FileSizeProvider>(
    text: &str,
    excluded: bool,
    state: &EditorState,
    problems: usize,
    config: &PresenceConfig,
    sizes: &F,
) -> String {
    file_info_replacements(state, excluded, problems, config, sizes)
        .await
        .apply(text)
}
