//! ResumeAssistant -- suggestions for summaries, bullets, and profile import.
//!
//! Every call validates its input, sends one completion request, and parses a
//! JSON object out of the reply. Provider errors and replies that cannot be
//! parsed (or parse to nothing useful) become `AssistError::EnhancementFailed`
//! so the caller is told generation failed instead of receiving empty content.

use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use redraft_types::assist::{
    EnhanceRequest, EnhanceResponse, MIN_JOB_DESCRIPTION_CHARS, MIN_PROFILE_TEXT_CHARS,
    SummaryRequest, SummaryResponse,
};
use redraft_types::document::ResumeDocument;
use redraft_types::error::AssistError;
use redraft_types::llm::CompletionRequest;

use super::prompt;
use crate::llm::box_provider::BoxLlmProvider;

const SUMMARY_MAX_TOKENS: u32 = 600;
const SUMMARY_TEMPERATURE: f64 = 0.8;
const ENHANCE_MAX_TOKENS: u32 = 500;
const ENHANCE_TEMPERATURE: f64 = 0.7;
const PROFILE_MAX_TOKENS: u32 = 2000;
const PROFILE_TEMPERATURE: f64 = 0.3;

pub struct ResumeAssistant {
    provider: BoxLlmProvider,
    model: String,
}

impl ResumeAssistant {
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Three summary variations tailored to the candidate's seniority.
    pub async fn generate_summaries(
        &self,
        request: &SummaryRequest,
    ) -> Result<SummaryResponse, AssistError> {
        if request.work_history.is_empty()
            || request.education.is_empty()
            || request.skills.is_empty()
        {
            return Err(AssistError::ValidationFailed(
                "work history, education, and skills are required".into(),
            ));
        }

        let level = prompt::career_level(&request.work_history);
        let response: SummaryResponse = self
            .complete_json(
                "summary",
                prompt::summary_system_prompt(level),
                prompt::summary_user_prompt(
                    &request.work_history,
                    &request.education,
                    &request.skills,
                    level,
                ),
                SUMMARY_MAX_TOKENS,
                SUMMARY_TEMPERATURE,
            )
            .await?;

        let summaries: Vec<String> = response
            .summaries
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if summaries.is_empty() {
            return Err(AssistError::EnhancementFailed("reply contained no summaries".into()));
        }
        Ok(SummaryResponse { summaries })
    }

    /// Either clarifying questions or improved bullets for one description.
    pub async fn enhance_description(
        &self,
        request: &EnhanceRequest,
    ) -> Result<EnhanceResponse, AssistError> {
        let description = request.job_description.trim();
        if description.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
            return Err(AssistError::ValidationFailed(format!(
                "job description must be at least {MIN_JOB_DESCRIPTION_CHARS} characters"
            )));
        }

        let response: EnhanceResponse = self
            .complete_json(
                "enhance",
                prompt::ENHANCE_SYSTEM_PROMPT.to_string(),
                prompt::enhance_user_prompt(description, request.context.as_ref()),
                ENHANCE_MAX_TOKENS,
                ENHANCE_TEMPERATURE,
            )
            .await?;

        let empty = if response.needs_clarification {
            response.questions.is_empty()
        } else {
            response.suggestions.is_empty()
        };
        if empty {
            return Err(AssistError::EnhancementFailed(
                "reply contained neither questions nor suggestions".into(),
            ));
        }
        Ok(response)
    }

    /// Structured sections extracted from pasted profile text.
    ///
    /// Every work and education entry gets a fresh id regardless of what the
    /// model returned.
    pub async fn parse_profile(&self, profile_text: &str) -> Result<ResumeDocument, AssistError> {
        let text = profile_text.trim();
        if text.chars().count() < MIN_PROFILE_TEXT_CHARS {
            return Err(AssistError::ValidationFailed(format!(
                "profile text must be at least {MIN_PROFILE_TEXT_CHARS} characters"
            )));
        }

        let mut document: ResumeDocument = self
            .complete_json(
                "profile",
                prompt::PROFILE_SYSTEM_PROMPT.to_string(),
                prompt::profile_user_prompt(text),
                PROFILE_MAX_TOKENS,
                PROFILE_TEMPERATURE,
            )
            .await?;

        if document.is_empty() {
            return Err(AssistError::EnhancementFailed(
                "no resume content found in profile".into(),
            ));
        }
        for entry in document.work_history.iter_mut().flatten() {
            entry.id = Some(Uuid::now_v7());
        }
        for entry in document.education.iter_mut().flatten() {
            entry.id = Some(Uuid::now_v7());
        }

        tracing::debug!(sections = document.sections().len(), "profile parsed");
        Ok(document)
    }

    async fn complete_json<T: DeserializeOwned>(
        &self,
        task: &'static str,
        system: String,
        user: String,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<T, AssistError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: Some(system),
            prompt: user,
            max_tokens,
            temperature: Some(temperature),
        };

        let span = tracing::info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            assist.task = task,
        );

        let response = self
            .provider
            .complete(&request)
            .instrument(span)
            .await
            .map_err(|e| {
                tracing::warn!(task, error = %e, "text generation failed");
                AssistError::EnhancementFailed(e.to_string())
            })?;

        tracing::debug!(
            task,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "text generation complete"
        );

        parse_json_reply(&response.content)
    }
}

/// Parse the JSON object in a reply, tolerating prose or code fences around it.
fn parse_json_reply<T: DeserializeOwned>(content: &str) -> Result<T, AssistError> {
    let start = content.find('{');
    let end = content.rfind('}');
    let body = match (start, end) {
        (Some(start), Some(end)) if start < end => &content[start..=end],
        _ => {
            return Err(AssistError::EnhancementFailed(
                "reply did not contain a JSON object".into(),
            ));
        }
    };
    serde_json::from_str(body)
        .map_err(|e| AssistError::EnhancementFailed(format!("unparseable reply: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use redraft_types::assist::EnhanceContext;
    use redraft_types::document::{EducationEntry, WorkEntry};
    use redraft_types::llm::{CompletionResponse, LlmError, Usage};

    use crate::llm::provider::LlmProvider;

    /// Replies with a fixed body (or error) and records the last request.
    struct ScriptedProvider {
        reply: Result<String, ()>,
        last_request: Arc<Mutex<Option<CompletionRequest>>>,
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            *self.last_request.lock().unwrap() = Some(request.clone());
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    id: "r1".into(),
                    content: content.clone(),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                Err(()) => Err(LlmError::Provider {
                    message: "upstream 500".into(),
                }),
            }
        }
    }

    fn scripted(reply: Result<&str, ()>) -> (ResumeAssistant, Arc<Mutex<Option<CompletionRequest>>>) {
        let last_request = Arc::new(Mutex::new(None));
        let provider = ScriptedProvider {
            reply: reply.map(str::to_string),
            last_request: Arc::clone(&last_request),
        };
        (
            ResumeAssistant::new(BoxLlmProvider::new(provider), "gpt-4o"),
            last_request,
        )
    }

    fn summary_request() -> SummaryRequest {
        SummaryRequest {
            work_history: vec![WorkEntry {
                title: "Senior Engineer".into(),
                company: "Acme".into(),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                degree: "BSc".into(),
                institution: "State".into(),
                ..Default::default()
            }],
            skills: vec!["Rust".into()],
        }
    }

    const PROFILE_TEXT: &str = "Jane Doe, Berlin. Staff engineer at Acme since 2019, \
        previously developer at Initech. BSc Computer Science, State University.";

    #[tokio::test]
    async fn test_generate_summaries() {
        let (assistant, last) = scripted(Ok(
            "```json\n{\"summaries\": [\"One.\", \"Two.\", \" \", \"Three.\"]}\n```",
        ));

        let response = assistant.generate_summaries(&summary_request()).await.unwrap();

        assert_eq!(response.summaries, vec!["One.", "Two.", "Three."]);
        let request = last.lock().unwrap().clone().unwrap();
        assert_eq!(request.max_tokens, SUMMARY_MAX_TOKENS);
        assert_eq!(request.model, "gpt-4o");
        assert!(request.system.unwrap().contains("senior"));
    }

    #[tokio::test]
    async fn test_summaries_require_all_sections() {
        let (assistant, last) = scripted(Ok("{}"));
        let mut request = summary_request();
        request.skills.clear();

        let err = assistant.generate_summaries(&request).await.unwrap_err();

        assert!(matches!(err, AssistError::ValidationFailed(_)));
        assert!(last.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_summaries_is_failure() {
        let (assistant, _) = scripted(Ok(r#"{"summaries": []}"#));
        let err = assistant.generate_summaries(&summary_request()).await.unwrap_err();
        assert!(matches!(err, AssistError::EnhancementFailed(_)));
    }

    #[tokio::test]
    async fn test_provider_error_is_enhancement_failed() {
        let (assistant, _) = scripted(Err(()));
        let err = assistant.generate_summaries(&summary_request()).await.unwrap_err();
        assert_eq!(
            err,
            AssistError::EnhancementFailed("provider error: upstream 500".into())
        );
    }

    #[tokio::test]
    async fn test_enhance_returns_questions() {
        let (assistant, last) = scripted(Ok(
            r#"{"needs_clarification": true, "questions": ["How many users?"]}"#,
        ));
        let request = EnhanceRequest {
            job_description: "Worked on the billing system".into(),
            context: Some(EnhanceContext {
                company: Some("Acme".into()),
                title: Some("Engineer".into()),
            }),
        };

        let response = assistant.enhance_description(&request).await.unwrap();

        assert!(response.needs_clarification);
        assert_eq!(response.questions, vec!["How many users?"]);
        let sent = last.lock().unwrap().clone().unwrap();
        assert!(sent.prompt.contains("Role: Engineer"));
    }

    #[tokio::test]
    async fn test_enhance_rejects_short_description() {
        let (assistant, _) = scripted(Ok("{}"));
        let request = EnhanceRequest {
            job_description: "  coded  ".into(),
            context: None,
        };
        let err = assistant.enhance_description(&request).await.unwrap_err();
        assert!(matches!(err, AssistError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_enhance_without_suggestions_is_failure() {
        let (assistant, _) = scripted(Ok(r#"{"needs_clarification": false}"#));
        let request = EnhanceRequest {
            job_description: "Reduced deploy time by 40% across 12 services".into(),
            context: None,
        };
        let err = assistant.enhance_description(&request).await.unwrap_err();
        assert!(matches!(err, AssistError::EnhancementFailed(_)));
    }

    #[tokio::test]
    async fn test_parse_profile_assigns_fresh_ids() {
        let fixed = "00000000-0000-0000-0000-000000000001";
        let reply = format!(
            r#"{{"basic_info": {{"full_name": "Jane Doe", "headline": "Staff engineer"}},
                "work_history": [{{"id": "{fixed}", "title": "Staff Engineer", "company": "Acme"}},
                                 {{"title": "Developer", "company": "Initech"}}],
                "education": [{{"degree": "BSc", "institution": "State University"}}],
                "skills": ["Rust"]}}"#
        );
        let (assistant, _) = scripted(Ok(&reply));

        let document = assistant.parse_profile(PROFILE_TEXT).await.unwrap();

        let work = document.work_history.unwrap();
        assert_eq!(work.len(), 2);
        assert_ne!(work[0].id.map(|id| id.to_string()).as_deref(), Some(fixed));
        assert!(work.iter().all(|entry| entry.id.is_some()));
        assert_ne!(work[0].id, work[1].id);
        assert_eq!(
            document.basic_info.unwrap().full_name.as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(document.education.unwrap()[0].degree, "BSc");
        assert!(document.summary.is_none());
    }

    #[tokio::test]
    async fn test_parse_profile_rejects_short_text() {
        let (assistant, _) = scripted(Ok("{}"));
        let err = assistant.parse_profile("Jane Doe").await.unwrap_err();
        assert!(matches!(err, AssistError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn test_parse_profile_garbage_is_failure() {
        let (assistant, _) = scripted(Ok("I could not read that profile."));
        let err = assistant.parse_profile(PROFILE_TEXT).await.unwrap_err();
        assert!(matches!(err, AssistError::EnhancementFailed(_)));

        let (assistant, _) = scripted(Ok("{}"));
        let err = assistant.parse_profile(PROFILE_TEXT).await.unwrap_err();
        assert!(matches!(err, AssistError::EnhancementFailed(_)));
    }
}
