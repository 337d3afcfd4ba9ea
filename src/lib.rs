//! downsort - organize a downloads folder into category subdirectories.
//!
//! Scans the top level of one directory, classifies each file by extension
//! against a fixed category table, and moves it into the matching subfolder.
//! Name collisions are resolved with a single timestamp-suffixed rename, and
//! every run reports aggregate statistics. A dry-run mode logs the full
//! narrative without touching the filesystem.

pub mod category;
pub mod cli;
pub mod config;
pub mod logging;
pub mod organizer;
pub mod output;

pub use category::{Category, CategoryTable, FALLBACK_CATEGORY};
pub use config::{CompiledExcludes, ConfigError, ExcludeConfig};
pub use organizer::{CategoryListing, MoveError, MoveOutcome, Organizer, Stats};

pub use cli::{Args, run};
