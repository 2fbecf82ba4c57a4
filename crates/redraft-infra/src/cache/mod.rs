//! Device-local draft cache.

pub mod file;
