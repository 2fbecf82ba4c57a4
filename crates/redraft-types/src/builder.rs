//! Builder progress types.
//!
//! `BuilderProgress` is the in-memory accumulator for one editing session:
//! which step is displayed, which steps were explicitly completed, and the
//! document built so far. Transition logic lives in `redraft-core`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::document::ResumeDocument;
use crate::draft::Step;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderProgress {
    pub current_step: Step,
    /// Not necessarily contiguous, though in normal flow a prefix of the order.
    pub completed_steps: BTreeSet<Step>,
    pub document: ResumeDocument,
}
