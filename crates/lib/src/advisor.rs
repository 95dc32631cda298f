//! # Program Advisor
//!
//! The process-wide, read-only view of the catalog: the loaded sections, the
//! derived major index, the link table and the answer generator. It is built
//! once at startup and shared by reference (usually behind an `Arc`) with
//! every request.

use crate::catalog::{Catalog, LinkTable, ProgramSummary};
use crate::composer::compose_outcome;
use crate::context::assemble_context;
use crate::errors::QueryError;
use crate::generator::AnswerGenerator;
use crate::major_index::{MajorIndex, MajorMatching};
use crate::prompts::advisor::frame_question;
use serde::Serialize;
use tracing::{info, warn};

/// A composed answer ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub program: String,
    pub text: String,
    /// The program's source page, when the link table knows it.
    pub link: Option<String>,
    /// True when the text describes a generation failure instead of an answer.
    pub degraded: bool,
}

/// A program summary together with its link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramDetails {
    #[serde(flatten)]
    pub summary: ProgramSummary,
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Advisor {
    catalog: Catalog,
    index: MajorIndex,
    links: LinkTable,
    generator: AnswerGenerator,
}

impl Advisor {
    /// Builds the major index and freezes everything.
    pub fn new(
        catalog: Catalog,
        links: LinkTable,
        generator: AnswerGenerator,
        matching: MajorMatching,
    ) -> Self {
        let index = MajorIndex::build_with(catalog.sections(), matching);
        Self {
            catalog,
            index,
            links,
            generator,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &MajorIndex {
        &self.index
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// The sorted major vocabulary.
    pub fn majors(&self) -> &[String] {
        self.index.majors()
    }

    /// Programs a student of `major` can choose from.
    pub fn programs_for_major(&self, major: &str) -> Result<&[String], QueryError> {
        if major.trim().is_empty() {
            return Err(QueryError::NoMajorSelected);
        }
        let programs = self
            .index
            .programs_for(major)
            .ok_or_else(|| QueryError::UnknownMajor(major.to_string()))?;
        if programs.is_empty() {
            return Err(QueryError::NoProgramsForMajor(major.to_string()));
        }
        Ok(programs)
    }

    /// Name, study areas, sections and link of one program.
    pub fn program_details(&self, program: &str) -> Result<ProgramDetails, QueryError> {
        if program.trim().is_empty() {
            return Err(QueryError::NoProgramSelected);
        }
        let summary = self
            .catalog
            .summary(program)
            .ok_or_else(|| QueryError::ProgramNotFound(program.to_string()))?;
        Ok(ProgramDetails {
            summary,
            link: self.links.get(program).map(String::from),
        })
    }

    /// The context sent to the model for `program`. An empty context means
    /// nothing can be answered and is reported as a missing program.
    pub fn context_for(&self, program: &str) -> Result<String, QueryError> {
        if program.trim().is_empty() {
            return Err(QueryError::NoProgramSelected);
        }
        let context = assemble_context(self.catalog.sections(), program)?;
        if context.is_empty() {
            return Err(QueryError::ProgramNotFound(program.to_string()));
        }
        Ok(context)
    }

    /// Answers a question about one program.
    ///
    /// Precondition failures and catalog problems are returned as
    /// [`QueryError`]. A failing model call is not an error here: its message
    /// becomes the answer text and [`Answer::degraded`] is set.
    pub async fn ask(&self, program: &str, question: &str) -> Result<Answer, QueryError> {
        if question.trim().is_empty() {
            return Err(QueryError::EmptyQuestion);
        }
        let context = self.context_for(program)?;
        Ok(self.ask_with_context(program, question, &context).await)
    }

    /// Generates and composes an answer from a context already obtained with
    /// [`Advisor::context_for`].
    pub async fn ask_with_context(&self, program: &str, question: &str, context: &str) -> Answer {
        let framed = frame_question(program, question);
        info!(program, "Answering question.");

        let outcome = self.generator.generate(context, &framed, program).await;
        let degraded = outcome.is_err();
        if degraded {
            warn!(program, "Returning degraded answer.");
        }

        Answer {
            program: program.to_string(),
            text: compose_outcome(&outcome, program, &self.links),
            link: self.links.get(program).map(String::from),
            degraded,
        }
    }
}
