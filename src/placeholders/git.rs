use super::Replacements;
use crate::constants::{tokens, FAKE_EMPTY};
use crate::state::GitState;

/// Builds the git placeholder table.
///
/// When excluded every value is the sentinel. `{git_url}` keeps any `.git`
/// suffix of the remote, unlike the URL used for repository ignore rules.
pub fn git_replacements(git: &GitState, excluded: bool) -> Replacements {
    let (repo, branch, url) = if excluded {
        (None, None, None)
    } else {
        let repo = match &git.remote {
            Some(remote) => Some(remote.name.clone()),
            None => git.repository_name.clone(),
        };
        (
            repo,
            git.branch.clone(),
            git.remote.as_ref().map(|remote| remote.to_https()),
        )
    };

    [
        (tokens::GIT_REPO, repo),
        (tokens::GIT_BRANCH, branch),
        (tokens::GIT_URL, url),
    ]
    .into_iter()
    .map(|(token, value)| (token, value.unwrap_or_else(|| FAKE_EMPTY.to_string())))
    .collect()
}

/// Resolves `{git_repo}`, `{git_branch}` and `{git_url}`
pub fn replace_git_info(text: &str, git: &GitState, excluded: bool) -> String {
    git_replacements(git, excluded).apply(text)
}
