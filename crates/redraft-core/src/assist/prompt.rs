//! Prompt builders for the writing assistant.
//!
//! Pure functions: everything here is deterministic and testable without a
//! provider. Each task asks for a JSON object reply so `service` can parse it.

use redraft_types::assist::{CareerLevel, EnhanceContext};
use redraft_types::document::{EducationEntry, WorkEntry};

/// Rough experience estimate used when dates are not parsed.
const YEARS_PER_ROLE: usize = 2;

const LEADERSHIP_MARKERS: [&str; 3] = ["lead", "principal", "director"];

/// Classify seniority from job titles and role count.
///
/// Leadership titles win over everything; a "senior" title or an estimated
/// seven years makes a senior; three years makes mid-level.
pub fn career_level(work_history: &[WorkEntry]) -> CareerLevel {
    let years = work_history.len() * YEARS_PER_ROLE;
    let titles = work_history
        .iter()
        .map(|w| w.title.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if LEADERSHIP_MARKERS.iter().any(|m| titles.contains(m)) {
        CareerLevel::SeniorLeadership
    } else if titles.contains("senior") || years >= 7 {
        CareerLevel::Senior
    } else if years >= 3 {
        CareerLevel::MidLevel
    } else {
        CareerLevel::EntryLevel
    }
}

pub fn summary_system_prompt(level: CareerLevel) -> String {
    format!(
        "You write professional summaries for resumes.\n\n\
         Guidelines:\n\
         1. Active voice, confident tone.\n\
         2. Lead with strengths and areas of expertise.\n\
         3. Mention relevant technical skills where they apply.\n\
         4. Two to three sentences each.\n\
         5. No cliches such as \"hard worker\" or \"team player\".\n\
         6. Pitch the wording at a {level} candidate.\n\
         7. Produce three distinct variations with different angles.\n\n\
         Never invent experience, skills, or accomplishments that are not in the data."
    )
}

pub fn summary_user_prompt(
    work_history: &[WorkEntry],
    education: &[EducationEntry],
    skills: &[String],
    level: CareerLevel,
) -> String {
    let roles = work_history
        .iter()
        .map(|w| {
            format!(
                "- {} at {} ({} - {})",
                w.title,
                w.company,
                w.start_date,
                w.end_date.as_deref().unwrap_or("Present")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let schools = education
        .iter()
        .map(|e| {
            format!(
                "- {} in {} from {}",
                e.degree,
                e.field.as_deref().unwrap_or("N/A"),
                e.institution
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Write 3 professional summary variations for this candidate.\n\n\
         Work history:\n{roles}\n\n\
         Education:\n{schools}\n\n\
         Skills: {skills}\n\n\
         Career level: {level}\n\n\
         Reply with JSON only: {{\"summaries\": [\"...\", \"...\", \"...\"]}}",
        skills = skills.join(", "),
    )
}

pub const ENHANCE_SYSTEM_PROMPT: &str = "You are a resume coach helping people write strong, \
quantified bullet points.\n\n\
Rules:\n\
1. Never invent numbers, metrics, or accomplishments.\n\
2. If the description has no measurable detail, ask one or two clarifying questions.\n\
3. Start bullets with action verbs.\n\
4. Follow Situation, Task, Action, Result where possible.\n\
5. One to two lines per bullet.\n\
6. Keep an encouraging tone.\n\n\
Vague descriptions get needs_clarification = true plus questions. \
Detailed descriptions get two or three improved bullets.";

pub fn enhance_user_prompt(job_description: &str, context: Option<&EnhanceContext>) -> String {
    let mut prompt = format!("Improve this job responsibility description:\n\n\"{job_description}\"\n");
    if let Some(company) = context.and_then(|c| c.company.as_deref()) {
        prompt.push_str(&format!("\nCompany: {company}"));
    }
    if let Some(title) = context.and_then(|c| c.title.as_deref()) {
        prompt.push_str(&format!("\nRole: {title}"));
    }
    prompt.push_str(
        "\n\nReply with JSON only: {\"needs_clarification\": bool, \
         \"questions\": [..], \"suggestions\": [..]}",
    );
    prompt
}

pub const PROFILE_SYSTEM_PROMPT: &str = "You turn pasted professional profile text into \
structured resume data: basic info (name, location), work experience (company, title, dates, \
description), education (degree, institution, field, graduation year) and skills.\n\n\
Rules:\n\
1. Extract only what is explicitly in the text.\n\
2. Never guess; omit missing fields.\n\
3. Rewrite role descriptions as resume bullets.\n\
4. Use YYYY-MM for dates when possible.";

pub fn profile_user_prompt(profile_text: &str) -> String {
    format!(
        "Parse this profile into resume data:\n\n{profile_text}\n\n\
         Reply with JSON only, shaped like:\n\
         {{\"basic_info\": {{\"full_name\": \"\", \"location\": \"\"}}, \
         \"work_history\": [{{\"title\": \"\", \"company\": \"\", \"start_date\": \"YYYY-MM\", \
         \"end_date\": \"YYYY-MM or null\", \"is_current\": false, \"raw_description\": \"\", \
         \"enhanced_bullets\": [\"\"]}}], \
         \"education\": [{{\"degree\": \"\", \"institution\": \"\", \"field\": \"\", \
         \"graduation_year\": \"YYYY\"}}], \
         \"skills\": [\"\"]}}"
    )
}
