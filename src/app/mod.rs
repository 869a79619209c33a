//! Application layer.
//!
//! - `workspace` - the wiki folder and its filesystem operations
//! - `document` - the buffer currently loaded in the editor
//! - `preview` - Markdown rendering and view-mode state
//! - `syntax` - token-level highlighting for the editor
//! - `state` - main application coordinator
//! - `messages`, `settings`, `error`, `platform`, `buffer_utils` - plumbing

pub mod buffer_utils;
pub mod document;
pub mod error;
pub mod messages;
pub mod platform;
pub mod preview;
pub mod settings;
pub mod state;
pub mod syntax;
pub mod workspace;

// Re-exports for convenient external access
pub use buffer_utils::buffer_text_no_leak;
pub use error::{AppError, Result};
pub use messages::Message;
pub use platform::detect_system_dark_mode;
pub use preview::ViewMode;
pub use settings::{AppSettings, FontChoice, ThemeMode};
pub use workspace::{Entry, EntryKind, Workspace};
