//! Draft persistence types.
//!
//! These types model the builder steps, the persisted draft record shared by
//! both storage homes (device cache and per-owner durable store), and the
//! in-memory working state handed to the builder.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::document::ResumeDocument;

/// Default lifetime of a device-local cache record.
pub const CACHE_TTL_DAYS: i64 = 7;

/// One step of the guided builder, in fixed order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    BasicInfo,
    WorkHistory,
    Education,
    Summary,
    Review,
}

impl Step {
    /// All steps in wizard order.
    pub const ORDER: [Step; 5] = [
        Step::BasicInfo,
        Step::WorkHistory,
        Step::Education,
        Step::Summary,
        Step::Review,
    ];

    /// Zero-based position in [`Step::ORDER`].
    pub fn index(&self) -> usize {
        match self {
            Step::BasicInfo => 0,
            Step::WorkHistory => 1,
            Step::Education => 2,
            Step::Summary => 3,
            Step::Review => 4,
        }
    }

    pub fn first() -> Step {
        Step::BasicInfo
    }

    pub fn last() -> Step {
        Step::Review
    }

    /// The following step, or `None` on the last one.
    pub fn next(&self) -> Option<Step> {
        Step::ORDER.get(self.index() + 1).copied()
    }

    /// The preceding step, or `None` on the first one.
    pub fn previous(&self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Step::ORDER[i])
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::BasicInfo => "basic_info",
            Step::WorkHistory => "work_history",
            Step::Education => "education",
            Step::Summary => "summary",
            Step::Review => "review",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ORDER
            .into_iter()
            .find(|step| step.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("invalid step: '{s}'"))
    }
}

/// Stable identifier of an authenticated caller.
///
/// Opaque to this system: it is whatever the upstream auth layer hands out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Build an owner id, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted unit: document plus step and expiry metadata.
///
/// A cache record always carries `expires_at`; a durable record never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    #[serde(default)]
    pub document: ResumeDocument,
    #[serde(default)]
    pub last_completed_step: Option<Step>,
    /// Epoch milliseconds on the wire.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl DraftRecord {
    /// A record for the durable store (no expiry).
    pub fn durable(document: ResumeDocument, last_completed_step: Option<Step>) -> Self {
        Self {
            document,
            last_completed_step,
            expires_at: None,
        }
    }

    /// A record for the device cache, expiring `ttl` after `now`.
    pub fn cached(
        document: ResumeDocument,
        last_completed_step: Option<Step>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            document,
            last_completed_step,
            expires_at: Some(now + ttl),
        }
    }

    /// Whether the record is no longer valid at `now`.
    ///
    /// A record is valid strictly before `expires_at`; at the instant of
    /// expiry it is already expired. Records without expiry never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= now,
            None => false,
        }
    }

    pub fn into_working_state(self) -> WorkingState {
        WorkingState {
            document: self.document,
            last_completed_step: self.last_completed_step,
        }
    }
}

/// The current in-memory draft seen by the builder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingState {
    pub document: ResumeDocument,
    pub last_completed_step: Option<Step>,
}

/// Which store is authoritative for the current session.
///
/// The only allowed transitions are `Unknown -> Guest` and
/// `Unknown -> Authenticated`, once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    Unknown,
    Guest,
    Authenticated,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Unknown => write!(f, "unknown"),
            SyncMode::Guest => write!(f, "guest"),
            SyncMode::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Request body for saving a draft over HTTP.
///
/// Accepts both the record field names and the shorter `data` /
/// `step_completed` names used by browser clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDraftRequest {
    #[serde(default, alias = "data")]
    pub document: ResumeDocument,
    #[serde(default, alias = "step_completed")]
    pub last_completed_step: Option<Step>,
}

/// Response body of the draft read and write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResponse {
    pub draft: Option<DraftRecord>,
}

/// Response body of the draft delete endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDraftResponse {
    pub success: bool,
}
