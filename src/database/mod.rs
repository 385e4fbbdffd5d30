// Database module
// SQLite storage for the FAQ table and its full-text search projection

pub mod sqlite;

pub use sqlite::*;
