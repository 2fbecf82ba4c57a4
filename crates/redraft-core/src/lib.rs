//! Business logic and port trait definitions for redraft.
//!
//! This crate defines the "ports" (store, cache, identity, and provider
//! traits) that the infrastructure layer implements, plus the logic built on
//! them: the draft synchronizer, the builder session, and the writing
//! assistant. It depends only on `redraft-types` -- never on `redraft-infra`
//! or any database/IO crate.

pub mod assist;
pub mod builder;
pub mod draft;
pub mod llm;
