//! Matching of the user ignore lists against the current repository and workspace.
use glob::{MatchOptions, Pattern};
use regex::Regex;

use crate::config::{Ignore, IgnoreText};
use crate::constants::{template, FAKE_EMPTY};
use crate::debug;
use crate::state::EditorState;

/// Prefix marking an ignore entry as a regular expression
pub const REGEX_PREFIX: &str = "regex:";

const GLOB_CHARS: [char; 3] = ['*', '?', '['];
const SEPARATORS: [char; 2] = ['/', '\\'];

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug)]
enum Matcher {
    Regex(Regex),
    Glob(Pattern),
    Exact(String),
}

impl Matcher {
    /// Entries prefixed with `regex:` are regular expressions, entries holding
    /// `*`, `?` or `[` are glob patterns and anything else is an exact value.
    fn compile(entry: &str) -> Option<Self> {
        if let Some(expression) = entry.strip_prefix(REGEX_PREFIX) {
            return match Regex::new(expression) {
                Ok(regex) => Some(Matcher::Regex(regex)),
                Err(e) => {
                    debug!("Skipping invalid ignore expression {}: {}", entry, e);
                    None
                }
            };
        }
        if entry.contains(GLOB_CHARS) {
            if let Ok(pattern) = Pattern::new(entry) {
                return Some(Matcher::Glob(pattern));
            }
        }

        let exact = entry.trim_end_matches(SEPARATORS);
        let exact = if exact.is_empty() { entry } else { exact };
        Some(Matcher::Exact(exact.to_string()))
    }

    fn is_match(&self, candidate: &str) -> bool {
        match self {
            Matcher::Regex(regex) => regex.is_match(candidate),
            Matcher::Glob(pattern) => pattern.matches_with(candidate, GLOB_OPTIONS),
            // Equal, or a parent directory of the candidate
            Matcher::Exact(value) => match candidate.strip_prefix(value.as_str()) {
                Some(rest) => rest.is_empty() || rest.starts_with(SEPARATORS),
                None => false,
            },
        }
    }
}

/// A compiled ignore list
#[derive(Debug, Default)]
pub struct ExclusionList {
    matchers: Vec<Matcher>,
}

impl ExclusionList {
    pub fn new<S: AsRef<str>>(entries: &[S]) -> Self {
        let mut matchers = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry: &str = entry.as_ref();
            if entry.is_empty() {
                continue;
            }
            if let Some(matcher) = Matcher::compile(entry) {
                matchers.push(matcher);
            }
        }
        Self { matchers }
    }

    /// Like `new` but expanding `~` and environment variables in each entry first.
    /// Used for filesystem paths.
    pub fn with_expansion<S: AsRef<str>>(entries: &[S]) -> Self {
        let expanded: Vec<String> = entries
            .iter()
            .map(|entry| {
                let entry = entry.as_ref();
                shellexpand::full(entry)
                    .map(|value| value.to_string())
                    .unwrap_or_else(|_| shellexpand::tilde(entry).to_string())
            })
            .collect();
        Self::new(&expanded)
    }

    /// Checks whether the candidate is excluded. A missing candidate never is.
    ///
    /// # Examples
    /// ```
    /// use editor_presence::exclusion::ExclusionList;
    ///
    /// let list = ExclusionList::new(&["github.com", "*.gitlab.host", "regex:^bitbucket\\."]);
    /// assert!(list.is_match(Some("github.com")));
    /// assert!(!list.is_match(Some("githubXcom.evil")));
    /// assert!(list.is_match(Some("my.gitlab.host")));
    /// assert!(list.is_match(Some("bitbucket.org")));
    /// assert!(!list.is_match(None));
    /// ```
    pub fn is_match(&self, candidate: Option<&str>) -> bool {
        match candidate {
            Some(candidate) => self.matchers.iter().any(|m| m.is_match(candidate)),
            None => false,
        }
    }
}

/// Exclusion flags computed for one build
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Exclusions {
    pub repository: bool,
    pub organization: bool,
    pub git_host: bool,
    pub workspace: bool,
}

impl Exclusions {
    pub fn resolve(ignore: &Ignore, state: &EditorState) -> Self {
        let remote = state.git.remote.as_ref();
        let repository_url = remote.map(|r| r.repository_url());

        let exclusions = Exclusions {
            repository: ExclusionList::new(&ignore.repositories)
                .is_match(repository_url.as_deref()),
            organization: ExclusionList::new(&ignore.organizations)
                .is_match(remote.map(|r| r.organization_or_owner())),
            git_host: ExclusionList::new(&ignore.git_hosts)
                .is_match(remote.map(|r| r.source.as_str())),
            workspace: ExclusionList::with_expansion(&ignore.workspaces).is_match(
                state
                    .workspace_folder
                    .as_ref()
                    .map(|folder| folder.path.to_string_lossy())
                    .as_deref(),
            ),
        };

        debug!("Exclusions resolved: {:?}", exclusions);
        exclusions
    }

    /// Any git-related exclusion hides every git-derived value
    pub fn git_excluded(&self) -> bool {
        self.repository || self.organization || self.git_host
    }
}

/// Resolves the text configured for an excluded workspace.
///
/// Non-excluded workspaces get the sentinel value.
pub fn workspace_excluded_text(ignore: &Ignore, state: &EditorState, excluded: bool) -> String {
    if !excluded {
        return FAKE_EMPTY.to_string();
    }

    let text = match &ignore.workspaces_text {
        Some(IgnoreText::Text(text)) => Some(text.clone()),
        Some(IgnoreText::PerWorkspace(texts)) => state
            .workspace_folder
            .as_ref()
            .and_then(|folder| texts.get(&folder.name))
            .cloned(),
        None => None,
    };

    text.unwrap_or_else(|| template::WORKSPACE_EXCLUDED_TEXT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GitRemote, WorkspaceFolder};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn state_with_remote() -> EditorState {
        EditorState {
            workspace_folder: Some(WorkspaceFolder {
                name: "client".to_string(),
                path: PathBuf::from("/work/client"),
            }),
            git: crate::state::GitState {
                repository_name: Some("service".to_string()),
                remote: Some(GitRemote {
                    source: "github.com".to_string(),
                    owner: "octo".to_string(),
                    name: "service".to_string(),
                    organization: None,
                    git_suffix: true,
                }),
                branch: Some("main".to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_list_never_matches() {
        let list = ExclusionList::new::<String>(&[]);
        assert!(!list.is_match(Some("anything")));

        let blanks = ExclusionList::new(&[""]);
        assert!(!blanks.is_match(Some("anything")));
    }

    #[test]
    fn test_glob_entries() {
        let list = ExclusionList::with_expansion(&["/home/me/*/secret"]);
        assert!(list.is_match(Some("/home/me/clients/secret")));
        assert!(!list.is_match(Some("/home/me/clients/public")));
        // A single star stays inside one path segment
        assert!(!list.is_match(Some("/home/me/a/b/secret")));

        let recursive = ExclusionList::new(&["/work/**"]);
        assert!(recursive.is_match(Some("/work/client/src")));
        assert!(!recursive.is_match(Some("/home/client")));

        let hosts = ExclusionList::new(&["git?ab.com"]);
        assert!(hosts.is_match(Some("gitlab.com")));
        assert!(!hosts.is_match(Some("github.com")));
    }

    #[test]
    fn test_plain_entries_match_whole_values() {
        let paths = ExclusionList::new(&["/work/client"]);
        assert!(paths.is_match(Some("/work/client")));
        assert!(paths.is_match(Some("/work/client/nested")));
        assert!(!paths.is_match(Some("/work/client-archive")));
        assert!(!paths.is_match(Some("/old/work/client")));

        let trailing = ExclusionList::new(&["/work/client/"]);
        assert!(trailing.is_match(Some("/work/client")));

        // Dots are not wildcards
        let hosts = ExclusionList::new(&["github.com"]);
        assert!(hosts.is_match(Some("github.com")));
        assert!(!hosts.is_match(Some("githubXcom.evil")));
        assert!(!hosts.is_match(Some("github.com.evil")));
    }

    #[test]
    fn test_regex_entries_need_prefix() {
        let list = ExclusionList::new(&["regex:^(acme|octo)-.*$"]);
        assert!(list.is_match(Some("acme-labs")));
        assert!(list.is_match(Some("octo-org")));
        assert!(!list.is_match(Some("other")));

        // An invalid expression is skipped instead of matching literally
        let invalid = ExclusionList::new(&["regex:(unclosed"]);
        assert!(!invalid.is_match(Some("regex:(unclosed")));
        assert!(!invalid.is_match(Some("(unclosed")));
    }

    #[test]
    fn test_repository_matches_url_without_git_suffix() {
        let ignore = Ignore {
            repositories: vec!["https://github.com/octo/service".to_string()],
            ..Default::default()
        };
        let exclusions = Exclusions::resolve(&ignore, &state_with_remote());
        assert!(exclusions.repository);
        assert!(exclusions.git_excluded());
        assert!(!exclusions.workspace);
    }

    #[test]
    fn test_organization_falls_back_to_owner() {
        let ignore = Ignore {
            organizations: vec!["octo".to_string()],
            ..Default::default()
        };
        assert!(Exclusions::resolve(&ignore, &state_with_remote()).organization);

        let mut state = state_with_remote();
        if let Some(remote) = state.git.remote.as_mut() {
            remote.organization = Some("acme".to_string());
        }
        assert!(!Exclusions::resolve(&ignore, &state).organization);
    }

    #[test]
    fn test_absent_values_are_never_excluded() {
        let ignore = Ignore {
            workspaces: vec!["*".to_string()],
            repositories: vec!["regex:.*".to_string()],
            organizations: vec!["*".to_string()],
            git_hosts: vec!["*".to_string()],
            ..Default::default()
        };
        let exclusions = Exclusions::resolve(&ignore, &EditorState::default());
        assert_eq!(exclusions, Exclusions::default());
        assert!(!exclusions.git_excluded());
    }

    #[test]
    fn test_workspace_excluded_by_path() {
        let ignore = Ignore {
            workspaces: vec!["/work/client".to_string()],
            git_hosts: vec!["gitlab.com".to_string()],
            ..Default::default()
        };
        let exclusions = Exclusions::resolve(&ignore, &state_with_remote());
        assert!(exclusions.workspace);
        assert!(!exclusions.git_excluded());
    }

    #[test]
    fn test_workspace_entries_expand_variables() {
        std::env::set_var("EDITOR_PRESENCE_TEST_WORK", "/work");
        let list = ExclusionList::with_expansion(&["$EDITOR_PRESENCE_TEST_WORK/client"]);
        assert!(list.is_match(Some("/work/client")));
        std::env::remove_var("EDITOR_PRESENCE_TEST_WORK");
    }

    #[test]
    fn test_workspace_excluded_text() {
        let state = state_with_remote();
        let mut ignore = Ignore::default();

        assert_eq!(workspace_excluded_text(&ignore, &state, false), FAKE_EMPTY);
        assert_eq!(
            workspace_excluded_text(&ignore, &state, true),
            template::WORKSPACE_EXCLUDED_TEXT
        );

        ignore.workspaces_text = Some(IgnoreText::Text("Private".to_string()));
        assert_eq!(workspace_excluded_text(&ignore, &state, true), "Private");

        let mut texts = BTreeMap::new();
        texts.insert("client".to_string(), "NDA".to_string());
        ignore.workspaces_text = Some(IgnoreText::PerWorkspace(texts.clone()));
        assert_eq!(workspace_excluded_text(&ignore, &state, true), "NDA");

        texts.clear();
        texts.insert("other".to_string(), "Other".to_string());
        ignore.workspaces_text = Some(IgnoreText::PerWorkspace(texts));
        assert_eq!(
            workspace_excluded_text(&ignore, &state, true),
            template::WORKSPACE_EXCLUDED_TEXT
        );
    }
}
