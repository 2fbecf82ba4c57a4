//! Infrastructure layer for redraft.
//!
//! Contains implementations of the port traits defined in `redraft-core`:
//! the SQLite durable store, the file-backed device cache, the HTTP client
//! store, identity probes, the OpenAI-compatible provider, and the config
//! and data directory loaders.

pub mod backend;
pub mod cache;
pub mod config;
pub mod filesystem;
pub mod identity;
pub mod llm;
pub mod remote;
pub mod sqlite;
