//! # Command Handlers
//!
//! Builds the advisor from command line arguments and implements the
//! one-shot commands. Output goes to any `Write` so the handlers can be
//! exercised without a terminal.

use abroad_rag::providers::ai::GenerationParams;
use abroad_rag::providers::factory::create_provider;
use abroad_rag::types::ProviderConfig;
use abroad_rag::{Advisor, AnswerGenerator, Catalog, LinkTable, MajorMatching, ProgramDetails};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::Write;
use tracing::info;

/// The chat endpoint LM Studio and llama.cpp serve by default.
const DEFAULT_LOCAL_API_URL: &str = "http://localhost:1234/v1/chat/completions";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MatchingArg {
    Substring,
    Exact,
}

impl From<MatchingArg> for MajorMatching {
    fn from(arg: MatchingArg) -> Self {
        match arg {
            MatchingArg::Substring => MajorMatching::Substring,
            MatchingArg::Exact => MajorMatching::Exact,
        }
    }
}

/// Where the catalog lives and which model answers questions.
#[derive(Args, Debug)]
pub struct AdvisorArgs {
    /// The program catalog CSV
    #[arg(long, env = "CATALOG_PATH", default_value = "data/cal_poly_embeddings.csv")]
    pub catalog: String,
    /// The program link CSV (columns `filename,content`)
    #[arg(long, env = "LINKS_PATH")]
    pub links: Option<String>,
    /// The AI provider type: "local" or "gemini"
    #[arg(long, env = "AI_PROVIDER", default_value = "local")]
    pub provider: String,
    /// The provider endpoint. Gemini derives it from the model when omitted.
    #[arg(long, env = "AI_API_URL")]
    pub api_url: Option<String>,
    #[arg(long, env = "AI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// The model name. Defaults to gemini-2.0-flash for Gemini and to
    /// whatever the server has loaded for a local provider.
    #[arg(long, env = "AI_MODEL")]
    pub model: Option<String>,
    /// How study areas are matched against a major
    #[arg(long, value_enum, default_value_t = MatchingArg::Substring)]
    pub matching: MatchingArg,
}

impl AdvisorArgs {
    /// The provider configuration these arguments describe.
    pub fn provider_config(&self) -> ProviderConfig {
        let api_url = match (self.provider.as_str(), &self.api_url) {
            (_, Some(url)) => Some(url.clone()),
            ("local", None) => Some(DEFAULT_LOCAL_API_URL.to_string()),
            (_, None) => None,
        };
        let model_name = match (self.provider.as_str(), &self.model) {
            (_, Some(model)) => model.clone(),
            ("gemini", None) => DEFAULT_GEMINI_MODEL.to_string(),
            (_, None) => String::new(),
        };
        ProviderConfig {
            provider: self.provider.clone(),
            api_url,
            api_key: self.api_key.clone(),
            model_name,
        }
    }

    /// Loads the catalog and links and freezes them into an advisor.
    pub fn build(&self) -> Result<Advisor> {
        let catalog = Catalog::load(&self.catalog)
            .with_context(|| format!("Failed to load catalog from '{}'", self.catalog))?;
        let links = match &self.links {
            Some(path) => LinkTable::load(path)
                .with_context(|| format!("Failed to load program links from '{path}'"))?,
            None => LinkTable::default(),
        };
        let provider = create_provider("cli", &self.provider_config(), GenerationParams::default())?;
        info!(sections = catalog.len(), links = links.len(), "Catalog loaded.");
        Ok(Advisor::new(
            catalog,
            links,
            AnswerGenerator::new(provider),
            self.matching.into(),
        ))
    }
}

pub fn list_majors(advisor: &Advisor, out: &mut impl Write) -> Result<()> {
    if advisor.majors().is_empty() {
        writeln!(out, "No majors found in the catalog.")?;
    }
    for major in advisor.majors() {
        writeln!(out, "{major}")?;
    }
    Ok(())
}

pub fn list_programs(advisor: &Advisor, major: &str, out: &mut impl Write) -> Result<()> {
    for program in advisor.programs_for_major(major)? {
        writeln!(out, "{program}")?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AskOptions {
    pub show_summary: bool,
    pub json: bool,
}

pub async fn ask(
    advisor: &Advisor,
    program: &str,
    question: &str,
    options: AskOptions,
    out: &mut impl Write,
) -> Result<()> {
    if options.show_summary {
        let details = advisor.program_details(program)?;
        write_summary(&details, out)?;
    }
    let answer = advisor.ask(program, question).await?;
    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&answer)?)?;
    } else {
        writeln!(out, "{}", answer.text)?;
    }
    Ok(())
}

/// Prints a program's name, study areas, sections and link.
pub fn write_summary(details: &ProgramDetails, out: &mut impl Write) -> Result<()> {
    let summary = &details.summary;
    writeln!(out, "Program: {}", summary.program_name)?;
    writeln!(out, "Areas of study: {}", summary.areas_of_study)?;
    writeln!(
        out,
        "Sections ({}): {}",
        summary.total_sections,
        summary.section_names.join(", ")
    )?;
    if let Some(link) = &details.link {
        writeln!(out, "Link: {link}")?;
    }
    writeln!(out)?;
    Ok(())
}
