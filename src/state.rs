//! Snapshot of the editor, workspace and git information consumed by the builder.
//!
//! The host keeps these values up to date from its own event callbacks and hands a
//! snapshot to each build. All types deserialize from JSON with every field optional.
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

use serde::{Deserialize, Serialize};

use crate::error::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EditorState {
    /// Display name of the running application (e.g. "Visual Studio Code - Insiders")
    pub app_name: String,
    pub editor: Option<ActiveEditor>,
    /// Whether a debug session is currently active
    pub debugging: bool,
    /// Workspace display name as reported by the host
    pub workspace: Option<String>,
    pub workspace_folder: Option<WorkspaceFolder>,
    pub git: GitState,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ActiveEditor {
    pub document: Document,
    #[serde(default)]
    pub selection: Option<Position>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    #[serde(default)]
    pub language_id: String,
    #[serde(default)]
    pub line_count: usize,
    /// Byte length of the unsaved buffer, set only for dirty documents
    #[serde(default)]
    pub unsaved_size: Option<u64>,
}

/// Zero-based cursor position
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WorkspaceFolder {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GitState {
    /// Repository name tracked even when no remote is configured
    pub repository_name: Option<String>,
    pub remote: Option<GitRemote>,
    pub branch: Option<String>,
}

/// An already parsed git remote
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GitRemote {
    /// Host of the remote (e.g. "github.com")
    pub source: String,
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub organization: Option<String>,
    /// Whether the remote URL ended with `.git`
    #[serde(default)]
    pub git_suffix: bool,
}

impl EditorState {
    /// Parses a snapshot from its JSON representation.
    ///
    /// # Arguments
    /// * `json` - The JSON contents.
    /// * `source` - Name of the source, used in error messages.
    pub fn from_json(json: &str, source: &str) -> Result<Self> {
        let snapshot_error = |cause: String| Error::SnapshotError {
            location: ConfigType::STATE,
            file: source.to_string(),
            cause,
        };

        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| snapshot_error(e.to_string()))?;
        if !value.is_object() {
            return Err(snapshot_error("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| snapshot_error(e.to_string()))
    }

    pub fn document(&self) -> Option<&Document> {
        self.editor.as_ref().map(|editor| &editor.document)
    }

    pub fn selection(&self) -> Option<&Position> {
        self.editor.as_ref().and_then(|editor| editor.selection.as_ref())
    }
}

impl Document {
    pub fn file_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
    }

    /// The extension including its leading dot (e.g. ".rs")
    pub fn file_extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
    }

    /// The parent folder name joined with the file name (e.g. "src/main.rs")
    pub fn folder_and_file(&self) -> Option<String> {
        let file_name = self.file_name()?;
        match self.path.parent().and_then(Path::file_name) {
            Some(folder) => Some(format!(
                "{}{}{}",
                folder.to_string_lossy(),
                MAIN_SEPARATOR_STR,
                file_name
            )),
            None => Some(file_name),
        }
    }

    /// Directories between the workspace root and the file. Files outside the
    /// workspace keep their full directory chain.
    pub fn relative_directories(&self, workspace_root: Option<&Path>) -> Vec<String> {
        let relative = workspace_root
            .and_then(|root| self.path.strip_prefix(root).ok())
            .unwrap_or(&self.path);

        let mut parts: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                std::path::Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                _ => None,
            })
            .collect();
        parts.pop();
        parts
    }
}

impl GitRemote {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Renders the remote as an https URL, keeping the `.git` suffix when the
    /// original remote had one.
    ///
    /// # Examples
    /// ```
    /// use editor_presence::state::GitRemote;
    ///
    /// let remote = GitRemote {
    ///     source: "github.com".to_string(),
    ///     owner: "octo".to_string(),
    ///     name: "hello".to_string(),
    ///     organization: None,
    ///     git_suffix: true,
    /// };
    /// assert_eq!(remote.to_https(), "https://github.com/octo/hello.git");
    /// ```
    pub fn to_https(&self) -> String {
        format!(
            "https://{}/{}{}",
            self.source,
            self.full_name(),
            if self.git_suffix { ".git" } else { "" }
        )
    }

    /// The https URL without a trailing `.git`, used to match repository ignore rules
    pub fn repository_url(&self) -> String {
        let url = self.to_https();
        url.strip_suffix(".git").map(str::to_string).unwrap_or(url)
    }

    pub fn organization_or_owner(&self) -> &str {
        self.organization.as_deref().unwrap_or(&self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(path: &str) -> Document {
        Document {
            path: PathBuf::from(path),
            language_id: "rust".to_string(),
            line_count: 10,
            unsaved_size: None,
        }
    }

    #[test]
    fn test_document_names() {
        let doc = document("/home/me/project/src/main.rs");
        assert_eq!(doc.file_name().as_deref(), Some("main.rs"));
        assert_eq!(doc.file_extension().as_deref(), Some(".rs"));
        assert_eq!(
            doc.folder_and_file(),
            Some(format!("src{}main.rs", MAIN_SEPARATOR_STR))
        );

        let no_ext = document("/home/me/project/Makefile");
        assert_eq!(no_ext.file_extension(), None);
    }

    #[test]
    fn test_relative_directories() {
        let doc = document("/home/me/project/src/bin/main.rs");
        assert_eq!(
            doc.relative_directories(Some(Path::new("/home/me/project"))),
            vec!["src".to_string(), "bin".to_string()]
        );

        let root_file = document("/home/me/project/Cargo.toml");
        assert!(root_file
            .relative_directories(Some(Path::new("/home/me/project")))
            .is_empty());

        let outside = document("/tmp/notes/todo.md");
        assert_eq!(
            outside.relative_directories(Some(Path::new("/home/me/project"))),
            vec!["tmp".to_string(), "notes".to_string()]
        );
    }

    #[test]
    fn test_remote_urls() {
        let remote = GitRemote {
            source: "gitlab.com".to_string(),
            owner: "team".to_string(),
            name: "service".to_string(),
            organization: Some("acme".to_string()),
            git_suffix: true,
        };
        assert_eq!(remote.to_https(), "https://gitlab.com/team/service.git");
        assert_eq!(remote.repository_url(), "https://gitlab.com/team/service");
        assert_eq!(remote.organization_or_owner(), "acme");
    }

    #[test]
    fn test_from_json_minimal() {
        let state = EditorState::from_json(
            r#"{
                "app_name": "Visual Studio Code",
                "editor": {
                    "document": { "path": "/p/src/lib.rs", "language_id": "rust", "line_count": 42 },
                    "selection": { "line": 3, "character": 7 }
                }
            }"#,
            "state.json",
        )
        .unwrap();

        assert_eq!(state.app_name, "Visual Studio Code");
        assert_eq!(state.document().map(|d| d.line_count), Some(42));
        assert_eq!(state.selection().map(|s| s.character), Some(7));
        assert!(!state.debugging);
        assert!(state.git.remote.is_none());
    }

    #[test]
    fn test_from_json_error_names_source() {
        match EditorState::from_json("{ not json", "broken.json") {
            Err(Error::SnapshotError { file, .. }) => assert_eq!(file, "broken.json"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            EditorState::from_json("[]", "array.json"),
            Err(Error::SnapshotError { .. })
        ));
    }
}
