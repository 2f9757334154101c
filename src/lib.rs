//! `editor_presence` builds the rich presence payload of a code editor.
//!
//! The main struct of this crate is `PresenceSession` which keeps the last
//! payload and the problem count between builds. A single build can also be
//! done with `builder::PresenceBuilder` directly.
//!
//! Templates are read from `config::PresenceConfig` and may contain
//! placeholders such as `{file_name}`, `{git_branch}` or `{workspace}`.
//! Unknown or unavailable values resolve to `constants::FAKE_EMPTY`.
//!
//! Example:
//! ```
//! use std::path::PathBuf;
//! use editor_presence::prelude::*;
//! use editor_presence::state::{ActiveEditor, Document};
//!
//! let builder = PresenceBuilder::new(PresenceConfig::default(), FsFileSize)
//!     .with_clock(Box::new(|| 1_700_000_000_000));
//! let session = PresenceSession::new(builder);
//!
//! let state = EditorState {
//!     app_name: "Visual Studio Code".to_string(),
//!     editor: Some(ActiveEditor {
//!         document: Document {
//!             path: PathBuf::from("/work/hello/README.md"),
//!             language_id: "markdown".to_string(),
//!             line_count: 10,
//!             unsaved_size: Some(42),
//!         },
//!         selection: None,
//!     }),
//!     ..Default::default()
//! };
//!
//! let presence = smol::block_on(session.update(&state, ActivityFlags::default()));
//! assert_eq!(presence.small_image_key.as_deref(), Some("vscode"));
//! assert_eq!(presence.start_timestamp, Some(1_700_000_000_000));
//! ```

pub mod builder;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod exclusion;
pub mod file_size;
pub mod language;
pub mod log;
pub mod placeholders;
pub mod presence;
pub mod session;
pub mod state;

/// The editor_presence prelude
///
/// This module re-exports the most commonly used items.
/// You can use it with `use editor_presence::prelude::*;` to bring all common items into scope.
pub mod prelude {
    // Re-export commonly used traits
    pub use crate::file_size::FileSizeProvider;

    // Re-export commonly used types
    pub use crate::builder::{ActivityFlags, Mode, PresenceBuilder};
    pub use crate::config::PresenceConfig;
    pub use crate::error::Result;
    pub use crate::file_size::FsFileSize;
    pub use crate::presence::{Button, Presence};
    pub use crate::session::PresenceSession;
    pub use crate::state::EditorState;

    // Re-export commonly used constants
    pub use crate::constants::FAKE_EMPTY;
}
