//! # Application Configuration
//!
//! Defines the configuration of `abroad-rag-server` and loads it in layers:
//! library defaults, a YAML file with `${VAR}` substitution, optional prompt
//! overrides, and finally environment variables.

use abroad_rag::prompts::advisor::{PROGRAM_ANSWER_SYSTEM_PROMPT, PROGRAM_ANSWER_USER_PROMPT};
use abroad_rag::providers::ai::GenerationParams;
use abroad_rag::types::ProviderConfig;
use abroad_rag::MajorMatching;
use config::{
    Config as ConfigBuilder, Environment, File, FileFormat, Value as ConfigValue,
    ValueKind as ConfigValueKind,
};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// The task whose prompts and provider answer program questions.
pub const PROGRAM_ANSWER_TASK: &str = "program_answer";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// An error from the underlying `config` crate or a malformed file.
    #[error("Configuration error: {0}")]
    General(String),
    /// A required configuration file was not found.
    #[error("{0}")]
    NotFound(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Loaded from the `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The program catalog CSV. Loaded from the `CATALOG_PATH` env var.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,
    /// The program link CSV. Without it answers carry no link.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub links_path: Option<String>,
    #[serde(default)]
    pub major_matching: MajorMatching,
    /// Sampling parameters sent with every generation request.
    #[serde(default)]
    pub generation: GenerationParams,
    /// A map of named, reusable AI provider configurations.
    pub providers: HashMap<String, ProviderConfig>,
    /// A map of tasks, each specifying a provider and prompts.
    pub tasks: HashMap<String, TaskConfig>,
}

fn default_port() -> u16 {
    9090
}

fn default_catalog_path() -> String {
    "data/cal_poly_embeddings.csv".to_string()
}

/// `${VAR}` substitution of an unset variable leaves an empty string behind.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// Defines the prompts and provider for a specific application task.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    /// The key of the provider to use from the `providers` map.
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub user_prompt: Option<String>,
}

/// The built-in tasks, used as the lowest configuration layer.
fn build_default_tasks() -> HashMap<String, ConfigValue> {
    let tasks = [(
        PROGRAM_ANSWER_TASK,
        (
            "gemini_default",
            PROGRAM_ANSWER_SYSTEM_PROMPT,
            PROGRAM_ANSWER_USER_PROMPT,
        ),
    )];

    tasks
        .into_iter()
        .map(|(name, (provider, sys, user))| {
            let mut table = HashMap::new();
            table.insert("provider".to_string(), ConfigValue::from(provider));
            table.insert("system_prompt".to_string(), ConfigValue::from(sys));
            table.insert("user_prompt".to_string(), ConfigValue::from(user));
            (
                name.to_string(),
                ConfigValue::new(None, ConfigValueKind::Table(table)),
            )
        })
        .collect()
}

/// Reads a file and substitutes `${VAR}` references from the environment.
/// Returns `Ok(None)` when the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let placeholder = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid placeholder pattern: {e}")))?;
    let expanded = placeholder.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded.into_owned()))
}

/// Loads the application configuration.
///
/// - Top-level keys are overridden by plain variables (`PORT`, `CATALOG_PATH`, `LINKS_PATH`).
/// - Nested keys are overridden by `ABROAD_RAG_...` variables, e.g.
///   `ABROAD_RAG_GENERATION__MAX_TOKENS`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder().set_default("tasks", build_default_tasks())?;

    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "local".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Main config file not found at '{main_config_path}'. Please ensure 'config.yml' exists or set AI_PROVIDER to 'local' or 'gemini'."
        ))
    })?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let user_prompt_path = format!("{base_path}/prompt.yml");
    if let Some(user_prompts_content) = read_and_substitute(&user_prompt_path)? {
        info!("Loading user prompt overrides from '{user_prompt_path}'.");
        builder = builder.add_source(File::from_str(&user_prompts_content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("ABROAD_RAG")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
