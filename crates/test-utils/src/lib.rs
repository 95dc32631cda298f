//! # Shared Test Utilities
//!
//! Catalog fixtures and a scriptable AI provider used by the library, server
//! and CLI test suites.

use abroad_rag::errors::PromptError;
use abroad_rag::providers::ai::AiProvider;
use abroad_rag::ProgramSection;
use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};

// --- Catalog Fixtures ---

/// Header line of a catalog CSV.
pub const CATALOG_HEADER: &str = "filename,tab_name,content,areas_of_study,embedding";

/// A small catalog with three programs. `Peru-Lima` has no study areas and
/// is therefore unreachable from every major.
pub const SAMPLE_CATALOG_CSV: &str = r#"filename,tab_name,content,areas_of_study,embedding
Spain-IEP,Overview,Study business in Madrid.,"Business, Finance","[0.1, 0.2, 0.3]"
Italy-IEP,Overview,Art and design in Florence.,Art; Italian Studies,"[0.4, 0.5, 0.6]"
Spain-IEP,Costs,Program fee is $12000.,"Business, Finance","[0.7, 0.8, 0.9]"
Italy-IEP,Housing,Homestays with local families.,Art; Italian Studies,"[0.1, 0.1, 0.1]"
Peru-Lima,Overview,Volunteer in Lima.,,"[0.0, 0.0, 0.0]"
"#;

/// Links for the sample catalog. `Spain-IEP` deliberately has none.
pub const SAMPLE_LINKS_CSV: &str = r#"filename,content
 Italy-IEP , https://abroad.example.edu/italy-iep 
Peru-Lima,https://abroad.example.edu/peru-lima
"#;

/// Builds a section with an empty embedding.
pub fn section(filename: &str, tab_name: &str, content: &str, areas: &str) -> ProgramSection {
    ProgramSection {
        filename: filename.to_string(),
        tab_name: tab_name.to_string(),
        content: content.to_string(),
        areas_of_study: areas.to_string(),
        embedding: Vec::new(),
    }
}

/// Catalog and link files written to a temporary directory that lives as
/// long as the fixture.
pub struct CatalogFixture {
    pub catalog_path: PathBuf,
    pub links_path: PathBuf,
    pub dir: TempDir,
}

impl CatalogFixture {
    /// Writes the sample catalog and links.
    pub fn sample() -> Result<Self> {
        Self::with_contents(SAMPLE_CATALOG_CSV, SAMPLE_LINKS_CSV)
    }

    /// Writes arbitrary catalog and link contents.
    pub fn with_contents(catalog_csv: &str, links_csv: &str) -> Result<Self> {
        let dir = tempdir()?;
        let catalog_path = dir.path().join("programs.csv");
        let links_path = dir.path().join("urls.csv");
        fs::write(&catalog_path, catalog_csv)?;
        fs::write(&links_path, links_csv)?;
        Ok(Self {
            catalog_path,
            links_path,
            dir,
        })
    }
}

// --- Mock AI Provider ---

/// An AI provider that records every call and answers from a script.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    response: Arc<Mutex<Result<String, String>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    /// A provider that answers every call with `response`.
    pub fn answering(response: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(response.to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails with an API error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Err(message.to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded `(system_prompt, user_prompt)` calls.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::answering("Mock answer.")
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        match &*self.response.lock().unwrap() {
            Ok(answer) => Ok(answer.clone()),
            Err(message) => Err(PromptError::AiApi(message.clone())),
        }
    }
}
