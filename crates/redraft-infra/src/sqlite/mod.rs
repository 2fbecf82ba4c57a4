//! SQLite storage layer.
//!
//! The durable draft store backed by SQLite with WAL mode and split
//! read/write connection pools.

pub mod draft;
pub mod pool;
