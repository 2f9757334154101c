//! Problem counting over the editor diagnostics.
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Display)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
}

/// All diagnostics currently reported for a single resource
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ResourceDiagnostics {
    pub resource: String,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Severity {
    pub fn is_problem(&self) -> bool {
        matches!(self, Severity::Error | Severity::Warning)
    }
}

/// Counts warnings and errors across every resource.
///
/// # Examples
/// ```
/// use editor_presence::diagnostics::{count_problems, Diagnostic, ResourceDiagnostics, Severity};
///
/// let diagnostics = vec![ResourceDiagnostics {
///     resource: "src/lib.rs".to_string(),
///     diagnostics: vec![
///         Diagnostic { severity: Severity::Error, message: String::new() },
///         Diagnostic { severity: Severity::Hint, message: String::new() },
///     ],
/// }];
/// assert_eq!(count_problems(&diagnostics), 1);
/// ```
pub fn count_problems(diagnostics: &[ResourceDiagnostics]) -> usize {
    diagnostics
        .iter()
        .flat_map(|resource| resource.diagnostics.iter())
        .filter(|diagnostic| diagnostic.severity.is_problem())
        .count()
}

/// Last known problem count. Only a full recount changes it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProblemCounter {
    count: usize,
}

impl ProblemCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored count with a full recount of the given diagnostics
    pub fn recount(&mut self, diagnostics: &[ResourceDiagnostics]) -> usize {
        self.count = count_problems(diagnostics);
        self.count
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
