// SQLite row source
// Runs report queries as-is and hands back typed cells

mod db;
mod error;

// Public API
pub use db::{Database, SUMMARY_LABELS};
pub use error::{Error, Result};
