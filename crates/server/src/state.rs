//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it at
//! startup. The catalog, link table, major index and AI provider are loaded
//! once here and then only read by the request handlers.

use crate::config::{AppConfig, PROGRAM_ANSWER_TASK};
use abroad_rag::providers::factory::create_provider;
use abroad_rag::{Advisor, AnswerGenerator, Catalog, LinkTable};
use anyhow::{anyhow, Context};
use std::sync::Arc;
use tracing::{info, warn};

/// A fully resolved task configuration with non-optional fields.
#[derive(Clone, Debug)]
pub struct ResolvedTask {
    pub provider: String,
    pub system_prompt: String,
    pub user_prompt: String,
}

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// The frozen catalog, index and generator.
    pub advisor: Arc<Advisor>,
}

/// Resolves a task, failing on any field the configuration layers left unset.
fn resolve_task(config: &AppConfig, name: &str) -> anyhow::Result<ResolvedTask> {
    let task = config
        .tasks
        .get(name)
        .ok_or_else(|| anyhow!("Task '{name}' is not configured"))?;
    let provider = task
        .provider
        .clone()
        .ok_or_else(|| anyhow!("Resolved task '{name}' is missing required 'provider' field"))?;
    let system_prompt = task.system_prompt.clone().ok_or_else(|| {
        anyhow!("Resolved task '{name}' is missing required 'system_prompt' field")
    })?;
    let user_prompt = task
        .user_prompt
        .clone()
        .ok_or_else(|| anyhow!("Resolved task '{name}' is missing required 'user_prompt' field"))?;
    Ok(ResolvedTask {
        provider,
        system_prompt,
        user_prompt,
    })
}

/// Builds the shared application state from the configuration.
///
/// A catalog or link file that cannot be read is fatal; the server does not
/// start with partial data.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let task = resolve_task(&config, PROGRAM_ANSWER_TASK)?;
    let provider_config = config.providers.get(&task.provider).ok_or_else(|| {
        anyhow!(
            "Task '{PROGRAM_ANSWER_TASK}' uses provider '{}', which is not configured",
            task.provider
        )
    })?;
    let provider = create_provider(&task.provider, provider_config, config.generation.clone())?;

    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog from '{}'", config.catalog_path))?;
    let links = match &config.links_path {
        Some(path) => LinkTable::load(path)
            .with_context(|| format!("Failed to load program links from '{path}'"))?,
        None => {
            warn!("No links_path configured. Answers will not carry program links.");
            LinkTable::default()
        }
    };

    let generator = AnswerGenerator::with_prompts(provider, task.system_prompt, task.user_prompt);
    let advisor = Advisor::new(catalog, links, generator, config.major_matching);
    info!(
        sections = advisor.catalog().len(),
        majors = advisor.majors().len(),
        links = advisor.links().len(),
        "Advisor ready."
    );

    Ok(AppState {
        config: Arc::new(config),
        advisor: Arc::new(advisor),
    })
}
