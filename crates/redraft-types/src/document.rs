//! Resume document types.
//!
//! A `ResumeDocument` is a typed mapping from a closed set of named sections
//! to their own partial structures. Every section is optional: the document is
//! valid at every stage of completion. Merging is defined exactly once, in
//! [`ResumeDocument::merge`], as "replace the named section wholesale".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Contact and identity details at the top of a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

/// A single position in the work history section.
///
/// `id` is assigned where an entry is created and then carried verbatim;
/// reading a document never mints one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    /// `YYYY-MM` when known.
    #[serde(default)]
    pub start_date: String,
    /// `None` for the current position.
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_current: bool,
    /// What the user typed before any enhancement.
    #[serde(default)]
    pub raw_description: String,
    #[serde(default)]
    pub enhanced_bullets: Vec<String>,
}

/// A single entry in the education section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<String>,
}

/// Names of the top-level document sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    BasicInfo,
    WorkHistory,
    Education,
    Skills,
    Summary,
}

impl Section {
    /// All sections in document order.
    pub const ALL: [Section; 5] = [
        Section::BasicInfo,
        Section::WorkHistory,
        Section::Education,
        Section::Skills,
        Section::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::BasicInfo => "basic_info",
            Section::WorkHistory => "work_history",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Summary => "summary",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("invalid section: '{s}'"))
    }
}

/// The accumulating resume content.
///
/// A section that is `None` is absent, which is different from a section that
/// is present but empty (`Some(vec![])`). Absent sections never overwrite
/// stored ones during a merge; present-but-empty sections do.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_info: Option<BasicInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_history: Option<Vec<WorkEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ResumeDocument {
    /// Merge `incoming` into `self` at section granularity.
    ///
    /// Every section present in `incoming` replaces the same-named section
    /// here wholesale (no per-entry merge). Sections absent from `incoming`
    /// are left untouched.
    pub fn merge(&mut self, incoming: ResumeDocument) {
        if let Some(basic_info) = incoming.basic_info {
            self.basic_info = Some(basic_info);
        }
        if let Some(work_history) = incoming.work_history {
            self.work_history = Some(work_history);
        }
        if let Some(education) = incoming.education {
            self.education = Some(education);
        }
        if let Some(skills) = incoming.skills {
            self.skills = Some(skills);
        }
        if let Some(summary) = incoming.summary {
            self.summary = Some(summary);
        }
    }

    /// Consuming variant of [`merge`](Self::merge).
    pub fn merged(mut self, incoming: ResumeDocument) -> Self {
        self.merge(incoming);
        self
    }

    /// Whether a section key is present.
    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::BasicInfo => self.basic_info.is_some(),
            Section::WorkHistory => self.work_history.is_some(),
            Section::Education => self.education.is_some(),
            Section::Skills => self.skills.is_some(),
            Section::Summary => self.summary.is_some(),
        }
    }

    /// Present section keys, in document order.
    pub fn sections(&self) -> Vec<Section> {
        Section::ALL
            .into_iter()
            .filter(|section| self.has_section(*section))
            .collect()
    }

    /// True when no section key is present.
    pub fn is_empty(&self) -> bool {
        self.sections().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> ResumeDocument {
        ResumeDocument {
            skills: Some(items.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_keeps_sections_absent_from_incoming() {
        let mut doc = skills(&["rust", "sql"]);
        doc.merge(ResumeDocument {
            summary: Some("Backend engineer".to_string()),
            ..Default::default()
        });

        assert_eq!(doc.skills.as_ref().unwrap().len(), 2);
        assert_eq!(doc.summary.as_deref(), Some("Backend engineer"));
        assert_eq!(doc.sections(), vec![Section::Skills, Section::Summary]);
    }

    #[test]
    fn test_merge_replaces_section_wholesale() {
        let first = WorkEntry {
            id: Some(Uuid::now_v7()),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2020-01".to_string(),
            end_date: Some("2022-06".to_string()),
            is_current: false,
            raw_description: String::new(),
            enhanced_bullets: vec![],
        };
        let second = WorkEntry {
            title: "Senior Engineer".to_string(),
            company: "Globex".to_string(),
            id: Some(Uuid::now_v7()),
            ..first.clone()
        };

        let mut doc = ResumeDocument {
            work_history: Some(vec![first]),
            ..Default::default()
        };
        doc.merge(ResumeDocument {
            work_history: Some(vec![second.clone()]),
            ..Default::default()
        });

        // No per-entry merge: the old entry is gone.
        assert_eq!(doc.work_history, Some(vec![second]));
    }

    #[test]
    fn test_merge_same_section_twice_is_idempotent() {
        let once = ResumeDocument::default().merged(skills(&["a", "b"]));
        let twice = once.clone().merged(skills(&["a", "b"]));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_present_but_empty_section_overwrites() {
        let mut doc = skills(&["go"]);
        doc.merge(skills(&[]));
        assert_eq!(doc.skills, Some(vec![]));
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let doc = ResumeDocument::default();
        assert!(doc.is_empty());
        assert_eq!(serde_json::to_string(&doc).unwrap(), "{}");
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let doc: ResumeDocument = serde_json::from_str(
            r#"{"basic_info":{"full_name":"Jane Doe"},"work_history":[{"title":"Chef","company":"Bistro"}]}"#,
        )
        .unwrap();

        assert_eq!(
            doc.basic_info.unwrap().full_name.as_deref(),
            Some("Jane Doe")
        );
        let work = doc.work_history.unwrap();
        assert_eq!(work[0].company, "Bistro");
        assert!(work[0].end_date.is_none());
        assert!(doc.education.is_none());
    }

    #[test]
    fn test_reading_same_payload_twice_yields_same_document() {
        let payload = r#"{"work_history":[{"title":"Chef","company":"Bistro"}],"education":[{"degree":"BA"}]}"#;
        let first: ResumeDocument = serde_json::from_str(payload).unwrap();
        let second: ResumeDocument = serde_json::from_str(payload).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.work_history.as_ref().unwrap()[0].id, None);

        let once = ResumeDocument::default().merged(first);
        let twice = once.clone().merged(second);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_entry_id_is_carried_verbatim() {
        let id = Uuid::now_v7();
        let entry = WorkEntry {
            id: Some(id),
            title: "Chef".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: WorkEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, Some(id));
        assert!(!serde_json::to_string(&WorkEntry::default()).unwrap().contains("\"id\""));
    }

    #[test]
    fn test_section_roundtrip() {
        for section in Section::ALL {
            let parsed: Section = section.to_string().parse().unwrap();
            assert_eq!(section, parsed);
        }
        assert!("hobbies".parse::<Section>().is_err());
    }
}
