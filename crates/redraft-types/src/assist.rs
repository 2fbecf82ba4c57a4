//! Request and response shapes for the writing assistant.
//!
//! The assistant turns resume sections into suggestions: professional
//! summaries, stronger bullet points, and a parsed profile ready for import.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::document::{EducationEntry, WorkEntry};

/// Minimum trimmed length of a job description sent for enhancement.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 10;

/// Minimum trimmed length of pasted profile text sent for parsing.
pub const MIN_PROFILE_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub work_history: Vec<WorkEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summaries: Vec<String>,
}

/// Optional context for a bullet-point enhancement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhanceContext {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceRequest {
    pub job_description: String,
    #[serde(default)]
    pub context: Option<EnhanceContext>,
}

/// Either clarifying questions or improved bullet suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceResponse {
    #[serde(default)]
    pub needs_clarification: bool,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileImportRequest {
    #[serde(alias = "linkedinText")]
    pub profile_text: String,
}

/// Seniority bucket used to tailor generated summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CareerLevel {
    EntryLevel,
    MidLevel,
    Senior,
    SeniorLeadership,
}

impl fmt::Display for CareerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CareerLevel::EntryLevel => write!(f, "entry-level"),
            CareerLevel::MidLevel => write!(f, "mid-level"),
            CareerLevel::Senior => write!(f, "senior"),
            CareerLevel::SeniorLeadership => write!(f, "senior leadership"),
        }
    }
}
