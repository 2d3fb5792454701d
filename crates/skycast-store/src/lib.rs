//! Lookup-history persistence for the skycast weather service.
//!
//! This crate provides SQLite-based storage for the append-only log of
//! successful weather lookups. Entries are created once per fetch, never
//! mutated, listed newest-first with a caller-supplied limit, and removed
//! only by clearing the whole log.
//!
//! # Example
//!
//! ```no_run
//! use skycast_store::Store;
//!
//! let store = Store::open_default()?;
//! let recent = store.recent(10)?;
//! println!("{} recent lookups", recent.len());
//! # Ok::<(), skycast_store::Error>(())
//! ```

mod error;
mod models;
mod schema;
mod store;

pub use error::{Error, Result};
pub use models::StoredLookup;
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/skycast/history.db`
/// - macOS: `~/Library/Application Support/skycast/history.db`
/// - Windows: `C:\Users\<user>\AppData\Local\skycast\history.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("skycast")
        .join("history.db")
}
