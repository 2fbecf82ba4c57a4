//! Guided resume builder: step transitions and the editing session.

pub mod session;
pub mod state;
