use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by an AI provider. A failed call carries one of these as the
/// cause of a generation failure.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider returned an empty response")]
    EmptyResponse,
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

/// Errors raised while loading the catalog or the link table.
///
/// Any of these aborts the whole load; no partial catalog is ever served.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed CSV in '{path}': {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("Required column '{column}' is missing from '{path}'")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("Unparseable embedding in '{path}' at row {row}: {source}")]
    Embedding {
        path: PathBuf,
        row: usize,
        source: serde_json::Error,
    },
}

/// Errors raised while assembling the context for one program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("No data found for program '{0}'")]
    ProgramNotFound(String),
    #[error("Data integrity issue: expected 1 program, found {} ({})", .found.len(), .found.join(", "))]
    DataIntegrity { requested: String, found: Vec<String> },
}

/// Per-query failures. Each one leaves the query at its previous step and is
/// shown to the user as a status message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please select a major first.")]
    NoMajorSelected,
    #[error("Unknown major '{0}'.")]
    UnknownMajor(String),
    #[error("No programs found for this major.")]
    NoProgramsForMajor(String),
    #[error("Please select a program first.")]
    NoProgramSelected,
    #[error("Program '{program}' is not available for major '{major}'.")]
    ProgramNotInMajor { major: String, program: String },
    #[error("Please enter a question.")]
    EmptyQuestion,
    #[error("No data found for the selected program. Please try another program.")]
    ProgramNotFound(String),
    #[error("Data integrity issue for program '{requested}': found {}", .found.join(", "))]
    DataIntegrity { requested: String, found: Vec<String> },
}

impl From<ContextError> for QueryError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::ProgramNotFound(program) => QueryError::ProgramNotFound(program),
            ContextError::DataIntegrity { requested, found } => {
                QueryError::DataIntegrity { requested, found }
            }
        }
    }
}

/// A failed call to the generation capability. Rendered inline as answer text
/// rather than propagated.
#[derive(Error, Debug)]
#[error("ERROR generating answer: {0}")]
pub struct GenerationError(#[from] pub PromptError);
