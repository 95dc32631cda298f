//! # AI Provider Factory
//!
//! Builds a concrete AI provider from its configuration. The server and the
//! CLI both go through here so they agree on defaults and validation.

use crate::{
    errors::PromptError,
    providers::ai::{
        gemini::GeminiProvider, local::LocalAiProvider, AiProvider, GenerationParams,
    },
    types::ProviderConfig,
};
use tracing::info;

/// Creates the provider described by `config`. `name` is only used in
/// error messages and logs.
pub fn create_provider(
    name: &str,
    config: &ProviderConfig,
    params: GenerationParams,
) -> Result<Box<dyn AiProvider>, PromptError> {
    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "gemini" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    PromptError::MissingAiProvider(format!(
                        "api_key is required for gemini provider '{name}'"
                    ))
                })?;
            // If api_url is not provided in config, construct it from the model name.
            let api_url = config
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| GeminiProvider::endpoint_for(&config.model_name));
            info!(provider = name, %api_url, "Configuring Gemini provider.");
            Box::new(GeminiProvider::new(api_url, api_key, params)?)
        }
        "local" => {
            let api_url = config
                .api_url
                .clone()
                .filter(|url| !url.is_empty())
                .ok_or_else(|| {
                    PromptError::MissingAiProvider(format!(
                        "api_url is required for local provider '{name}'. Please set LOCAL_AI_API_URL in your .env file."
                    ))
                })?;
            // Single-model servers ignore the field; an empty name leaves it out.
            let model = Some(config.model_name.clone()).filter(|model| !model.is_empty());
            info!(provider = name, %api_url, ?model, "Configuring local AI provider.");
            Box::new(LocalAiProvider::new(
                api_url,
                config.api_key.clone().filter(|key| !key.is_empty()),
                model,
                params,
            )?)
        }
        other => {
            return Err(PromptError::MissingAiProvider(format!(
                "Unsupported AI provider type '{other}' for provider '{name}'"
            )))
        }
    };
    Ok(provider)
}
