//! # Answer Generator
//!
//! Wraps an [`AiProvider`] with the fixed advisor prompts. The outcome of a
//! call is returned as a plain `Result` so the composer can render either
//! variant without the caller branching.

use crate::errors::GenerationError;
use crate::prompts::advisor::{
    render_user_prompt, PROGRAM_ANSWER_SYSTEM_PROMPT, PROGRAM_ANSWER_USER_PROMPT,
};
use crate::providers::ai::AiProvider;
use tracing::{debug, error, info};

/// Either the generated answer text or the failure that prevented it.
pub type GenerationResult = Result<String, GenerationError>;

#[derive(Debug, Clone)]
pub struct AnswerGenerator {
    provider: Box<dyn AiProvider>,
    system_prompt: String,
    user_prompt: String,
}

impl AnswerGenerator {
    /// Uses the built-in advisor prompts.
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self::with_prompts(
            provider,
            PROGRAM_ANSWER_SYSTEM_PROMPT,
            PROGRAM_ANSWER_USER_PROMPT,
        )
    }

    /// Uses custom prompts. The user prompt may reference `{program}`,
    /// `{context}` and `{question}`.
    pub fn with_prompts(
        provider: Box<dyn AiProvider>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Asks the model about one program. Never panics on provider failure;
    /// the error is handed back for the composer to render.
    pub async fn generate(&self, context: &str, question: &str, program: &str) -> GenerationResult {
        let user_prompt = render_user_prompt(&self.user_prompt, program, context, question);
        debug!(system_prompt = %self.system_prompt, user_prompt = %user_prompt, "--> Sending prompts to AI Provider");

        match self.provider.generate(&self.system_prompt, &user_prompt).await {
            Ok(answer) => {
                info!(program, chars = answer.len(), "Generated answer.");
                debug!("<-- Answer from AI: {}", &answer);
                Ok(answer)
            }
            Err(e) => {
                error!(program, "Answer generation failed: {e}");
                Err(GenerationError(e))
            }
        }
    }
}
