//! # Query Session
//!
//! Walks one user through the three steps (major, program, question). Each
//! step either advances the session or leaves it where it was and records a
//! status message for display. Nothing is retried.

use crate::advisor::{Advisor, Answer, ProgramDetails};
use crate::errors::QueryError;
use std::sync::Arc;
use tracing::debug;

/// Stages kept in [`Session::history`]. Older ones are dropped.
pub const HISTORY_LIMIT: usize = 16;

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    MajorSelected,
    ProgramSelected,
    QueryReceived,
    ContextAssembled,
    GenerationPending,
    AnswerComposed,
    Displayed,
}

#[derive(Debug)]
pub struct Session {
    advisor: Arc<Advisor>,
    stage: Stage,
    major: Option<String>,
    programs: Vec<String>,
    program: Option<String>,
    context: Option<String>,
    status: Option<String>,
    history: Vec<Stage>,
}

impl Session {
    pub fn new(advisor: Arc<Advisor>) -> Self {
        Self {
            advisor,
            stage: Stage::Idle,
            major: None,
            programs: Vec::new(),
            program: None,
            context: None,
            status: None,
            history: vec![Stage::Idle],
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn major(&self) -> Option<&str> {
        self.major.as_deref()
    }

    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// Programs available for the selected major.
    pub fn programs(&self) -> &[String] {
        &self.programs
    }

    /// The message from the last step that did not advance.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The context assembled for the last question, kept until the program
    /// changes.
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The most recent stages entered, oldest first, at most
    /// [`HISTORY_LIMIT`] of them.
    pub fn history(&self) -> &[Stage] {
        &self.history
    }

    /// Selects a major. Any previously selected program is dropped.
    pub fn select_major(&mut self, major: &str) -> Result<&[String], QueryError> {
        let result = self.advisor.programs_for_major(major).map(<[String]>::to_vec);
        let programs = match result {
            Ok(programs) => programs,
            Err(e) => return Err(self.reject(e)),
        };
        self.major = Some(major.to_string());
        self.programs = programs;
        self.program = None;
        self.context = None;
        self.enter(Stage::MajorSelected);
        Ok(&self.programs)
    }

    /// Selects one of the programs offered for the current major.
    pub fn select_program(&mut self, program: &str) -> Result<ProgramDetails, QueryError> {
        let Some(major) = self.major.clone() else {
            return Err(self.reject(QueryError::NoMajorSelected));
        };
        if program.trim().is_empty() {
            return Err(self.reject(QueryError::NoProgramSelected));
        }
        if !self.programs.iter().any(|p| p == program) {
            return Err(self.reject(QueryError::ProgramNotInMajor {
                major,
                program: program.to_string(),
            }));
        }
        let advisor = Arc::clone(&self.advisor);
        let details = match advisor.program_details(program) {
            Ok(details) => details,
            Err(e) => return Err(self.reject(e)),
        };
        self.program = Some(program.to_string());
        self.context = None;
        self.enter(Stage::ProgramSelected);
        Ok(details)
    }

    /// Asks a question about the selected program.
    ///
    /// On a precondition or catalog failure the session returns to
    /// `ProgramSelected` (or stays where it was). A failed model call still
    /// completes with a degraded answer.
    pub async fn ask(&mut self, question: &str) -> Result<Answer, QueryError> {
        let Some(program) = self.program.clone() else {
            return Err(self.reject(QueryError::NoProgramSelected));
        };
        if question.trim().is_empty() {
            return Err(self.reject(QueryError::EmptyQuestion));
        }
        let resume = self.stage;
        self.enter(Stage::QueryReceived);

        let advisor = Arc::clone(&self.advisor);
        let context = match advisor.context_for(&program) {
            Ok(context) => context,
            Err(e) => {
                self.stage = resume;
                return Err(self.reject(e));
            }
        };
        self.enter(Stage::ContextAssembled);
        self.enter(Stage::GenerationPending);

        let answer = advisor.ask_with_context(&program, question, &context).await;
        self.context = Some(context);
        self.enter(Stage::AnswerComposed);
        self.enter(Stage::Displayed);
        Ok(answer)
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = ?self.stage, to = ?stage, "Session transition.");
        self.stage = stage;
        self.status = None;
        self.history.push(stage);
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
    }

    fn reject(&mut self, err: QueryError) -> QueryError {
        debug!(stage = ?self.stage, "Step rejected: {err}");
        self.status = Some(err.to_string());
        err
    }
}
