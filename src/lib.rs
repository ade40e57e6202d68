//! Core of the To-Do List Manager: the task list, its flat-file persistence and the
//! settings/theme model. A presentation host drives it through [`commands`].

pub mod commands;
pub mod error;
pub mod events;
pub mod format;
pub mod logging;
pub mod models;
pub mod settings;
pub mod state;
pub mod storage;
pub mod store;
pub mod theme;

pub use commands::{CommandCtx, CommandError, CommandResult, Confirmation, MassDelete};
pub use error::{Error, ErrorKind, Result};
pub use events::StatePayload;
#[cfg(feature = "app")]
pub use logging::init_logging;
pub use models::{Rgb, Settings, Task, Theme};
pub use state::AppState;
pub use storage::{Persistence, Storage, StorageError, StorageLayout};
pub use store::TaskStore;
pub use theme::Palette;
