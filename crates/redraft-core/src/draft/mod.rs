//! Draft persistence and synchronization.
//!
//! Defines the storage ports (`DurableDraftStore`, `DraftCache`,
//! `IdentityProbe`) that the infrastructure layer implements, and the
//! `DraftSynchronizer` that decides which of the two stores is authoritative
//! for the current caller.

pub mod cache;
pub mod identity;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;
