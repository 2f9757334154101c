//! Assembly of the presence payload from the editor snapshot and the settings.
use chrono::Utc;
use strum_macros::Display;

use crate::config::{ImageSection, ModeTemplates, PresenceConfig, TextSection};
use crate::constants::tokens;
use crate::debug;
use crate::exclusion::{workspace_excluded_text, Exclusions};
use crate::file_size::FileSizeProvider;
use crate::placeholders::{app_replacements, file_info_replacements, git_replacements, Replacements};
use crate::presence::{Button, Presence};
use crate::state::EditorState;

/// What the user is currently doing, derived on every build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Mode {
    Idling,
    Debugging,
    Viewing,
    Editing,
}

/// Flags supplied by the host event that triggered the build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityFlags {
    pub viewing: bool,
    pub idling: bool,
}

impl Mode {
    /// Idling wins when flagged or without an active editor, then
    /// Debugging > Viewing > Editing.
    pub fn detect(flags: ActivityFlags, state: &EditorState) -> Mode {
        if flags.idling || state.editor.is_none() {
            Mode::Idling
        } else if state.debugging {
            Mode::Debugging
        } else if flags.viewing {
            Mode::Viewing
        } else {
            Mode::Editing
        }
    }
}

impl<T> ModeTemplates<T> {
    pub fn for_mode(&self, mode: Mode) -> &T {
        match mode {
            Mode::Idling => &self.idle,
            Mode::Debugging => &self.debugging,
            Mode::Viewing => &self.viewing,
            Mode::Editing => &self.editing,
        }
    }
}

/// Picks the template of a field honoring its enabled and idle flags
fn select<T>(enabled: bool, idle_enabled: bool, templates: &ModeTemplates<T>, mode: Mode) -> Option<&T> {
    if !enabled || (mode == Mode::Idling && !idle_enabled) {
        None
    } else {
        Some(templates.for_mode(mode))
    }
}

impl TextSection {
    pub fn template(&self, mode: Mode) -> Option<&str> {
        select(self.enabled, self.idle_enabled, &self.text, mode).map(String::as_str)
    }
}

/// Resolves templates in two stages: the standard placeholders first, then the
/// `{problems}` and `{workspace_excluded_text}` markers.
struct Resolver {
    standard: [Replacements; 3],
    markers: Replacements,
}

impl Resolver {
    fn standard(&self, text: &str) -> String {
        self.standard
            .iter()
            .fold(text.to_string(), |acc, replacements| replacements.apply(&acc))
    }

    fn resolve(&self, text: &str) -> String {
        self.markers.apply(&self.standard(text))
    }
}

pub struct PresenceBuilder<F> {
    config: PresenceConfig,
    sizes: F,
    clock: Box<dyn Fn() -> i64 + Send + Sync>,
}

impl<F: FileSizeProvider> PresenceBuilder<F> {
    /// Creates a builder using the system clock
    pub fn new(config: PresenceConfig, sizes: F) -> Self {
        Self {
            config,
            sizes,
            clock: Box::new(|| Utc::now().timestamp_millis()),
        }
    }

    /// Replaces the clock providing the current time in milliseconds
    pub fn with_clock(mut self, clock: Box<dyn Fn() -> i64 + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    /// Builds the next payload.
    ///
    /// The previous payload is only read to carry the elapsed time over.
    ///
    /// # Arguments
    /// * `previous` - The payload produced by the last build (or a default one).
    /// * `state` - Current editor snapshot.
    /// * `flags` - Viewing and idling flags of the triggering event.
    /// * `problems` - Last known problem count.
    ///
    /// # Returns
    /// A new payload with every recognized placeholder resolved.
    pub async fn build(
        &self,
        previous: &Presence,
        state: &EditorState,
        flags: ActivityFlags,
        problems: usize,
    ) -> Presence {
        let status = &self.config.status;
        let mode = Mode::detect(flags, state);
        let exclusions = Exclusions::resolve(&self.config.ignore, state);
        let git_excluded = exclusions.git_excluded();

        debug!(
            "Building presence in {} mode (git excluded: {}, workspace excluded: {})",
            mode, git_excluded, exclusions.workspace
        );

        let resolver = self.resolver(state, &exclusions, problems).await;

        let text = |section: &TextSection| section.template(mode).map(|t| resolver.resolve(t));
        let image = |section: &ImageSection| {
            select(section.enabled, section.idle_enabled, &section.templates, mode)
                .map(|image| (resolver.resolve(&image.key), resolver.resolve(&image.text)))
                .unzip()
        };

        let (large_image_key, large_image_text) = image(&status.image.large);
        let (small_image_key, small_image_text) = image(&status.image.small);

        let button = if mode == Mode::Idling {
            Some(&status.button.idle)
        } else if !git_excluded && state.git.remote.is_some() {
            Some(&status.button.active)
        } else if git_excluded {
            Some(&status.button.inactive)
        } else {
            None
        };
        let buttons = button.filter(|button| button.enabled).map(|button| {
            vec![Button {
                label: resolver.resolve(&button.label),
                url: resolver.resolve(&button.url),
            }]
        });

        Presence {
            start_timestamp: self.start_timestamp(previous),
            details: text(&status.details),
            state: text(&status.state),
            large_image_key,
            large_image_text,
            small_image_key,
            small_image_text,
            buttons,
        }
    }

    fn start_timestamp(&self, previous: &Presence) -> Option<i64> {
        let status = &self.config.status;
        let timestamp = if !status.show_elapsed_time {
            None
        } else if status.reset_elapsed_time_per_file {
            Some((self.clock)())
        } else {
            Some(previous.start_timestamp.unwrap_or_else(|| (self.clock)()))
        };
        debug!(
            "Start timestamp {:?} (previous: {:?})",
            timestamp, previous.start_timestamp
        );
        timestamp
    }

    async fn resolver(&self, state: &EditorState, exclusions: &Exclusions, problems: usize) -> Resolver {
        let standard = [
            app_replacements(&state.app_name),
            git_replacements(&state.git, exclusions.git_excluded()),
            file_info_replacements(state, exclusions.workspace, problems, &self.config, &self.sizes)
                .await,
        ];
        let mut resolver = Resolver {
            standard,
            markers: Replacements::new(),
        };

        let problems_text = resolver.standard(&self.config.status.problems.text);
        resolver.markers.insert(tokens::PROBLEMS, problems_text);
        resolver.markers.insert(
            tokens::WORKSPACE_EXCLUDED_TEXT,
            workspace_excluded_text(&self.config.ignore, state, exclusions.workspace),
        );
        resolver
    }
}
