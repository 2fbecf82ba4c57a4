//! BuilderProgress transition logic.
//!
//! The `BuilderProgress` struct lives in `redraft-types`; this module provides
//! an extension trait (`BuilderProgressExt`) with the wizard transitions:
//! completing the current step, navigating back, and jumping from review.
//! None of these suspend or touch storage; persistence is the caller's job.

use redraft_types::builder::BuilderProgress;
use redraft_types::document::ResumeDocument;
use redraft_types::draft::{Step, WorkingState};

/// Build the progress for a session resumed from `working`.
///
/// Every step up to and including `last_completed_step` counts as completed,
/// and the wizard opens on the step after it (or on review when everything
/// is done). A fresh draft opens on the first step.
pub fn new_builder_progress(working: WorkingState) -> BuilderProgress {
    let (current_step, completed_steps) = match working.last_completed_step {
        Some(last) => (
            last.next().unwrap_or(Step::last()),
            Step::ORDER[..=last.index()].iter().copied().collect(),
        ),
        None => (Step::first(), Default::default()),
    };

    BuilderProgress {
        current_step,
        completed_steps,
        document: working.document,
    }
}

pub trait BuilderProgressExt {
    /// Merge `data` into the document, mark the current step completed and
    /// advance. Stays put on the last step. Returns the new current step.
    fn complete_current_step(&mut self, data: ResumeDocument) -> Step;

    /// Move to the previous step without touching completion or content.
    /// Returns `None` on the first step.
    fn go_back(&mut self) -> Option<Step>;

    /// Show an arbitrary step (the review screen's edit action).
    fn jump_to(&mut self, step: Step);

    /// Highest explicitly completed step.
    fn last_completed_step(&self) -> Option<Step>;

    fn is_completed(&self, step: Step) -> bool;

    /// Snapshot for persistence.
    fn working_state(&self) -> WorkingState;
}

impl BuilderProgressExt for BuilderProgress {
    fn complete_current_step(&mut self, data: ResumeDocument) -> Step {
        self.document.merge(data);
        self.completed_steps.insert(self.current_step);
        if let Some(next) = self.current_step.next() {
            self.current_step = next;
        }
        self.current_step
    }

    fn go_back(&mut self) -> Option<Step> {
        let previous = self.current_step.previous()?;
        self.current_step = previous;
        Some(previous)
    }

    fn jump_to(&mut self, step: Step) {
        self.current_step = step;
    }

    fn last_completed_step(&self) -> Option<Step> {
        self.completed_steps.last().copied()
    }

    fn is_completed(&self, step: Step) -> bool {
        self.completed_steps.contains(&step)
    }

    fn working_state(&self) -> WorkingState {
        WorkingState {
            document: self.document.clone(),
            last_completed_step: self.last_completed_step(),
        }
    }
}
