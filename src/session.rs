use smol::lock::Mutex;

use crate::builder::{ActivityFlags, PresenceBuilder};
use crate::config::PresenceConfig;
use crate::debug;
use crate::diagnostics::{ProblemCounter, ResourceDiagnostics};
use crate::file_size::FileSizeProvider;
use crate::presence::Presence;
use crate::state::EditorState;

#[derive(Debug, Default)]
struct SessionState {
    last: Presence,
    problems: ProblemCounter,
}

/// Keeps the state shared between successive presence builds.
///
/// Every update holds the session lock for the whole build so overlapping
/// host callbacks are applied one after the other.
pub struct PresenceSession<F> {
    builder: PresenceBuilder<F>,
    state: Mutex<SessionState>,
}

impl<F: FileSizeProvider> PresenceSession<F> {
    pub fn new(builder: PresenceBuilder<F>) -> Self {
        Self {
            builder,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Starts from a payload produced earlier (e.g. restored by the host)
    pub fn resume(builder: PresenceBuilder<F>, last: Presence) -> Self {
        Self {
            builder,
            state: Mutex::new(SessionState {
                last,
                problems: ProblemCounter::new(),
            }),
        }
    }

    pub fn config(&self) -> &PresenceConfig {
        self.builder.config()
    }

    /// Recounts the problems from the full diagnostics set
    pub async fn on_diagnostics_changed(&self, diagnostics: &[ResourceDiagnostics]) -> usize {
        let mut state = self.state.lock().await;
        let count = state.problems.recount(diagnostics);
        debug!("Problems recounted: {}", count);
        count
    }

    /// Builds the next payload and remembers it as the last one
    pub async fn update(&self, editor: &EditorState, flags: ActivityFlags) -> Presence {
        let mut state = self.state.lock().await;
        let next = self
            .builder
            .build(&state.last, editor, flags, state.problems.count())
            .await;
        state.last = next.clone();
        next
    }

    /// Forgets the last payload so the elapsed time starts over
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.last = Presence::default();
    }

    pub async fn last(&self) -> Presence {
        self.state.lock().await.last.clone()
    }

    pub async fn problems(&self) -> usize {
        self.state.lock().await.problems.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, Severity};
    use crate::state::{ActiveEditor, Document};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;

    struct NoSize;

    impl FileSizeProvider for NoSize {
        async fn file_size(&self, _document: &Document) -> Option<u64> {
            None
        }
    }

    fn session() -> PresenceSession<NoSize> {
        let now = Arc::new(AtomicI64::new(100));
        let builder = PresenceBuilder::new(PresenceConfig::default(), NoSize)
            .with_clock(Box::new(move || now.fetch_add(1, Ordering::SeqCst)));
        PresenceSession::new(builder)
    }

    fn editor() -> EditorState {
        EditorState {
            app_name: "VSCodium".to_string(),
            editor: Some(ActiveEditor {
                document: Document {
                    path: PathBuf::from("/tmp/notes.md"),
                    language_id: "markdown".to_string(),
                    line_count: 3,
                    unsaved_size: None,
                },
                selection: None,
            }),
            ..Default::default()
        }
    }

    fn diagnostics(severities: &[Severity]) -> Vec<ResourceDiagnostics> {
        vec![ResourceDiagnostics {
            resource: "/tmp/notes.md".to_string(),
            diagnostics: severities
                .iter()
                .map(|severity| Diagnostic {
                    severity: *severity,
                    message: String::new(),
                })
                .collect(),
        }]
    }

    #[test]
    fn test_problem_count_feeds_the_build() {
        smol::block_on(async {
            let session = session();
            let count = session
                .on_diagnostics_changed(&diagnostics(&[
                    Severity::Warning,
                    Severity::Warning,
                    Severity::Error,
                    Severity::Hint,
                ]))
                .await;
            assert_eq!(count, 3);
            assert_eq!(session.problems().await, 3);

            let presence = session.update(&editor(), ActivityFlags::default()).await;
            assert_eq!(
                presence.details.as_deref(),
                Some("In notes.md - 3 problems found")
            );
        });
    }

    #[test]
    fn test_elapsed_time_survives_updates_until_reset() {
        smol::block_on(async {
            let session = session();
            let first = session.update(&editor(), ActivityFlags::default()).await;
            let second = session.update(&editor(), ActivityFlags::default()).await;
            assert_eq!(first.start_timestamp, Some(100));
            assert_eq!(second.start_timestamp, Some(100));
            assert_eq!(session.last().await, second);

            session.reset().await;
            assert_eq!(session.last().await, Presence::default());
            let third = session.update(&editor(), ActivityFlags::default()).await;
            assert_eq!(third.start_timestamp, Some(101));
        });
    }

    #[test]
    fn test_resume_keeps_previous_timestamp() {
        let builder = PresenceBuilder::new(PresenceConfig::default(), NoSize)
            .with_clock(Box::new(|| 999));
        let session = PresenceSession::resume(
            builder,
            Presence {
                start_timestamp: Some(7),
                ..Default::default()
            },
        );
        let presence = smol::block_on(session.update(&editor(), ActivityFlags::default()));
        assert_eq!(presence.start_timestamp, Some(7));
    }
}
