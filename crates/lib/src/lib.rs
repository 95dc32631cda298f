//! # Study-Abroad Program Advisor
//!
//! This crate answers free-text questions about study-abroad programs. A
//! student picks a major, then one of the programs offered for it, then asks
//! a question; the program's catalog sections are concatenated into a context
//! and sent with fixed advisor prompts to a configurable AI provider. The
//! answer comes back with a link to the program's page when one is known.
//!
//! The catalog, the major index and the link table are built once at startup
//! and never change afterwards; see [`Advisor`].

pub mod advisor;
pub mod catalog;
pub mod composer;
pub mod context;
pub mod errors;
pub mod generator;
pub mod major_index;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod types;

pub use advisor::{Advisor, Answer, ProgramDetails};
pub use catalog::{Catalog, LinkTable, ProgramSection, ProgramSummary};
pub use errors::{ContextError, DataLoadError, GenerationError, PromptError, QueryError};
pub use generator::{AnswerGenerator, GenerationResult};
pub use major_index::{MajorIndex, MajorMatching};
pub use session::{Session, Stage, HISTORY_LIMIT};
