//! Shared domain types for redraft.
//!
//! This crate contains the core domain types used across the workspace:
//! the resume document and its sections, builder steps, draft records,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod assist;
pub mod builder;
pub mod config;
pub mod document;
pub mod draft;
pub mod error;
pub mod llm;
