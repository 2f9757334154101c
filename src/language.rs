//! Resolution of the language name shown by the `{lang}` placeholders.
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::constants::template::DEFAULT_LANGUAGE;
use crate::state::Document;

/// File name patterns checked before the language id
static KNOWN_FILES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"^cargo\.(toml|lock)$", "cargo"),
        (r"^dockerfile$|\.dockerfile$", "docker"),
        (r"^docker-compose.*\.ya?ml$", "docker"),
        (r"^\.git(ignore|attributes|modules)$", "git"),
        (r"^package(-lock)?\.json$", "npm"),
        (r"^tsconfig.*\.json$", "tsconfig"),
        (r"^makefile$", "makefile"),
        (r"^readme(\.md)?$", "readme"),
        (r"^license(\.(md|txt))?$", "license"),
        (r"\.env(\..*)?$", "env"),
        (r"\.rs$", "rust"),
        (r"\.toml$", "toml"),
        (r"\.ya?ml$", "yaml"),
        (r"\.md$", "markdown"),
    ]
    .iter()
    .filter_map(|(pattern, image)| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok()
            .map(|regex| (regex, *image))
    })
    .collect()
});

/// Editor language ids mapped to their image names
static KNOWN_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("c", "c"),
        ("cpp", "cpp"),
        ("csharp", "csharp"),
        ("css", "css"),
        ("dart", "dart"),
        ("go", "go"),
        ("html", "html"),
        ("java", "java"),
        ("javascript", "javascript"),
        ("javascriptreact", "react"),
        ("json", "json"),
        ("jsonc", "json"),
        ("kotlin", "kotlin"),
        ("lua", "lua"),
        ("markdown", "markdown"),
        ("php", "php"),
        ("plaintext", "text"),
        ("python", "python"),
        ("ruby", "ruby"),
        ("rust", "rust"),
        ("scss", "scss"),
        ("shellscript", "shell"),
        ("sql", "sql"),
        ("swift", "swift"),
        ("toml", "toml"),
        ("typescript", "typescript"),
        ("typescriptreact", "reactts"),
        ("vue", "vue"),
        ("xml", "xml"),
        ("yaml", "yaml"),
        ("zig", "zig"),
    ])
});

/// Resolves the language image name of a document.
///
/// Known file names win over the language id; anything unknown (or no document)
/// resolves to "text".
pub fn resolve_lang_name(document: Option<&Document>) -> String {
    let document = match document {
        Some(document) => document,
        None => return DEFAULT_LANGUAGE.to_string(),
    };

    if let Some(file_name) = document.file_name() {
        if let Some((_, image)) = KNOWN_FILES.iter().find(|(regex, _)| regex.is_match(&file_name)) {
            return image.to_string();
        }
    }

    KNOWN_LANGUAGES
        .get(document.language_id.as_str())
        .map_or(DEFAULT_LANGUAGE, |image| *image)
        .to_string()
}

pub fn to_lower(text: &str) -> String {
    text.to_lowercase()
}

pub fn to_upper(text: &str) -> String {
    text.to_uppercase()
}

/// Lowercases the text and capitalizes its first character.
///
/// # Examples
/// ```
/// use editor_presence::language::to_title;
///
/// assert_eq!(to_title("RUST"), "Rust");
/// assert_eq!(to_title("reactts"), "Reactts");
/// assert_eq!(to_title(""), "");
/// ```
pub fn to_title(text: &str) -> String {
    let lower = to_lower(text);
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
