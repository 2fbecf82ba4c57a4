//! Text-generation provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] trait defined
//! in `redraft-core`, and a factory ([`create_provider`]) that builds it from
//! the `[assistant]` config section.
//!
//! [`LlmProvider`]: redraft_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use redraft_core::llm::box_provider::BoxLlmProvider;
use redraft_types::config::AssistantConfig;
use redraft_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;

/// Build the configured provider, reading the API key from the environment
/// variable named by `api_key_env`.
///
/// # Errors
///
/// `AuthenticationFailed` when the variable is unset or empty.
pub fn create_provider(config: &AssistantConfig) -> Result<BoxLlmProvider, LlmError> {
    let key = std::env::var(&config.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or(LlmError::AuthenticationFailed)?;

    let provider = OpenAiCompatibleProvider::new(
        "openai",
        &config.provider_base_url,
        SecretString::from(key),
        &config.model,
    );
    Ok(BoxLlmProvider::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_requires_key() {
        let config = AssistantConfig {
            api_key_env: "REDRAFT_TEST_MISSING_KEY".into(),
            ..Default::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(LlmError::AuthenticationFailed)
        ));
    }

    #[test]
    fn test_create_provider_with_key() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("REDRAFT_TEST_PRESENT_KEY", "sk-test");
        }
        let config = AssistantConfig {
            api_key_env: "REDRAFT_TEST_PRESENT_KEY".into(),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        unsafe {
            std::env::remove_var("REDRAFT_TEST_PRESENT_KEY");
        }
    }
}
