//! # Catalog Store
//!
//! Loads the static program catalog (one CSV row per program section) and the
//! program link table. Both are read once at startup and never mutated; the
//! rest of the crate only ever borrows them.

use crate::errors::DataLoadError;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Columns every catalog file must carry.
pub const CATALOG_COLUMNS: [&str; 5] = [
    "filename",
    "tab_name",
    "content",
    "areas_of_study",
    "embedding",
];

/// Columns every link file must carry.
pub const LINK_COLUMNS: [&str; 2] = ["filename", "content"];

/// One row of the catalog: a titled block of text belonging to a program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramSection {
    /// The program identifier. Shared by every section of the same program.
    pub filename: String,
    /// The section label, e.g. "Costs" or "Housing".
    pub tab_name: String,
    pub content: String,
    /// Delimiter-separated majors of the program, repeated on every section.
    pub areas_of_study: String,
    /// Precomputed embedding. Kept as passive data; nothing ranks by it.
    #[serde(skip_serializing)]
    pub embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct RawSection {
    filename: String,
    tab_name: String,
    content: String,
    areas_of_study: String,
    embedding: String,
}

#[derive(Deserialize)]
struct RawLink {
    filename: String,
    content: String,
}

/// A short description of one program, derived from its sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramSummary {
    pub program_name: String,
    pub areas_of_study: String,
    pub total_sections: usize,
    pub section_names: Vec<String>,
}

/// The immutable table of program sections.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sections: Vec<ProgramSection>,
}

impl Catalog {
    /// Wraps already-parsed sections, keeping their order.
    pub fn from_sections(sections: Vec<ProgramSection>) -> Self {
        Self { sections }
    }

    /// Loads the catalog from a CSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_reader(file, path)?;
        info!(
            path = %path.display(),
            sections = catalog.len(),
            programs = catalog.program_ids().len(),
            "Loaded program catalog."
        );
        Ok(catalog)
    }

    /// Parses a catalog from any reader. `source` is only used in error messages.
    pub fn from_reader<R: Read>(
        reader: R,
        source: impl Into<PathBuf>,
    ) -> Result<Self, DataLoadError> {
        let source = source.into();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| csv_error(&source, e))?
            .clone();
        require_columns(&headers, &CATALOG_COLUMNS, &source)?;

        let mut sections = Vec::new();
        for (index, record) in reader.deserialize::<RawSection>().enumerate() {
            let raw = record.map_err(|e| csv_error(&source, e))?;
            // Row numbers are 1-based and count the header line.
            let row = index + 2;
            let embedding = parse_embedding(&raw.embedding).map_err(|e| {
                DataLoadError::Embedding {
                    path: source.clone(),
                    row,
                    source: e,
                }
            })?;
            sections.push(ProgramSection {
                filename: raw.filename,
                tab_name: raw.tab_name,
                content: raw.content,
                areas_of_study: raw.areas_of_study,
                embedding,
            });
        }

        debug!(sections = sections.len(), "Parsed catalog rows.");
        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[ProgramSection] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Distinct program identifiers, in order of first appearance.
    pub fn program_ids(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for section in &self.sections {
            if !seen.contains(&section.filename.as_str()) {
                seen.push(section.filename.as_str());
            }
        }
        seen
    }

    /// Summarizes a program, or `None` when the catalog has no rows for it.
    pub fn summary(&self, filename: &str) -> Option<ProgramSummary> {
        let rows: Vec<&ProgramSection> = self
            .sections
            .iter()
            .filter(|s| s.filename == filename)
            .collect();
        let first = rows.first()?;
        Some(ProgramSummary {
            program_name: first.filename.clone(),
            areas_of_study: first.areas_of_study.clone(),
            total_sections: rows.len(),
            section_names: rows.iter().map(|s| s.tab_name.clone()).collect(),
        })
    }
}

/// Program id to source-page URL. Programs without an entry simply get no link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    links: HashMap<String, String>,
}

impl LinkTable {
    /// Loads the link table from a CSV file with `filename, content` columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, path)?;
        info!(path = %path.display(), links = table.len(), "Loaded program links.");
        Ok(table)
    }

    /// Parses a link table from any reader. Both fields are trimmed.
    pub fn from_reader<R: Read>(
        reader: R,
        source: impl Into<PathBuf>,
    ) -> Result<Self, DataLoadError> {
        let source = source.into();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| csv_error(&source, e))?
            .clone();
        require_columns(&headers, &LINK_COLUMNS, &source)?;

        let mut links = HashMap::new();
        for record in reader.deserialize::<RawLink>() {
            let raw = record.map_err(|e| csv_error(&source, e))?;
            let url = raw.content.trim();
            if url.is_empty() {
                debug!(program = raw.filename.trim(), "Skipping link row without a URL.");
                continue;
            }
            links.insert(raw.filename.trim().to_string(), url.to_string());
        }
        Ok(Self { links })
    }

    /// Looks up the link for a program. The name is trimmed before lookup.
    pub fn get(&self, program: &str) -> Option<&str> {
        self.links.get(program.trim()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LinkTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            links: iter
                .into_iter()
                .map(|(k, v)| (k.into().trim().to_string(), v.into().trim().to_string()))
                .filter(|(_, v)| !v.is_empty())
                .collect(),
        }
    }
}

/// Parses the textual embedding list, e.g. `[0.12, -0.5, 3e-05]`.
fn parse_embedding(raw: &str) -> Result<Vec<f32>, serde_json::Error> {
    serde_json::from_str(raw.trim())
}

fn require_columns(
    headers: &StringRecord,
    required: &[&'static str],
    source: &Path,
) -> Result<(), DataLoadError> {
    for column in required.iter().copied() {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                path: source.to_path_buf(),
                column,
            });
        }
    }
    Ok(())
}

fn csv_error(source: &Path, err: csv::Error) -> DataLoadError {
    DataLoadError::Csv {
        path: source.to_path_buf(),
        source: err,
    }
}
