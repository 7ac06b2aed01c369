//! Word cache implementations.
//!
//! Available backends:
//! - `MemoryWordCache` - In-memory (always available)
//! - `JsonFileCache` - Single JSON file (always available)
//! - `SqliteWordCache` - SQLite database (requires `sqlite` feature)

pub mod file;
pub mod memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::JsonFileCache;
pub use memory::MemoryWordCache;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWordCache;
