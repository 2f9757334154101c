//! Placeholder substitution for the presence templates.
//!
//! Each family of placeholders (application, git, file) builds a `Replacements`
//! table that is then applied to template strings. Only the first occurrence of
//! each token is replaced, in insertion order.
mod app;
mod file;
mod git;

pub use app::{app_id, app_replacements, replace_app_info};
pub use file::{file_info_replacements, replace_file_info};
pub use git::{git_replacements, replace_git_info};

/// Ordered table of placeholder tokens and their resolved values
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Replacements {
    entries: Vec<(&'static str, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Replacements {
            entries: Vec::new(),
        }
    }

    /// Inserts a token, replacing the value of an existing one in place
    ///
    /// # Arguments
    /// * `token` - The placeholder token, braces included (e.g. `{file_name}`).
    /// * `value` - The value the token resolves to.
    pub fn insert<V: Into<String>>(&mut self, token: &'static str, value: V) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == token) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((token, value)),
        }
    }

    /// Replaces the first occurrence of every token in the text.
    ///
    /// # Examples
    /// ```
    /// use editor_presence::placeholders::Replacements;
    ///
    /// let mut replacements = Replacements::new();
    /// replacements.insert("{name}", "main.rs");
    /// assert_eq!(replacements.apply("{name} and {name}"), "main.rs and {name}");
    /// ```
    pub fn apply(&self, text: &str) -> String {
        self.entries
            .iter()
            .fold(text.to_string(), |acc, (token, value)| {
                acc.replacen(token, value, 1)
            })
    }
}

impl<V: Into<String>> FromIterator<(&'static str, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (&'static str, V)>>(iter: I) -> Self {
        let mut replacements = Replacements::new();
        for (token, value) in iter {
            replacements.insert(token, value);
        }
        replacements
    }
}
