use super::Replacements;
use crate::constants::{app, tokens};

/// Identifier of the running application, from its display name
pub fn app_id(app_name: &str) -> &'static str {
    let is_insider = app_name.contains("Insiders");
    let is_codium = app_name.starts_with("VSCodium") || app_name.starts_with("codium");

    match (is_insider, is_codium) {
        (true, true) => app::VSCODIUM_INSIDERS,
        (true, false) => app::VSCODE_INSIDERS,
        (false, true) => app::VSCODIUM,
        (false, false) => app::VSCODE,
    }
}

pub fn app_replacements(app_name: &str) -> Replacements {
    [
        (tokens::APP_NAME, app_name.to_string()),
        (tokens::APP_ID, app_id(app_name).to_string()),
    ]
    .into_iter()
    .collect()
}

/// Resolves `{app_name}` and `{app_id}`.
///
/// # Examples
/// ```
/// use editor_presence::placeholders::replace_app_info;
///
/// assert_eq!(
///     replace_app_info("{app_name} ({app_id})", "VSCodium - Insiders"),
///     "VSCodium - Insiders (vscodium-insiders)"
/// );
/// ```
pub fn replace_app_info(text: &str, app_name: &str) -> String {
    app_replacements(app_name).apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_ids() {
        assert_eq!(app_id("Visual Studio Code"), "vscode");
        assert_eq!(app_id("Visual Studio Code - Insiders"), "vscode-insiders");
        assert_eq!(app_id("VSCodium"), "vscodium");
        assert_eq!(app_id("codium"), "vscodium");
        assert_eq!(app_id("VSCodium - Insiders"), "vscodium-insiders");
    }

    #[test]
    fn test_app_name_verbatim() {
        for name in ["Visual Studio Code", "VSCodium", "Cursor", ""] {
            assert_eq!(replace_app_info("{app_name}", name), name);
        }
    }

    #[test]
    fn test_no_tokens_is_identity() {
        assert_eq!(replace_app_info("Idling", "VSCodium"), "Idling");
    }
}
