//! # Context Assembly
//!
//! Turns the sections of one program into the text block sent to the model.

use crate::catalog::ProgramSection;
use crate::errors::ContextError;
use std::collections::BTreeSet;
use tracing::{debug, error};

/// Builds the context for the program identified by `filename`.
///
/// Each matching row contributes `<filename>\n<content>\n\n`, in catalog
/// order. An empty catalog yields `Ok("")`, which callers must treat as
/// "no answer possible".
pub fn assemble_context(
    sections: &[ProgramSection],
    filename: &str,
) -> Result<String, ContextError> {
    assemble_context_matching(sections, filename, |s| s.filename == filename)
}

/// Builds a context from every row accepted by `predicate`.
///
/// `requested` names the program the caller asked for. Rows accepted by the
/// predicate must all belong to a single program; if they span several, the
/// query fails with [`ContextError::DataIntegrity`] instead of mixing them.
pub fn assemble_context_matching<F>(
    sections: &[ProgramSection],
    requested: &str,
    predicate: F,
) -> Result<String, ContextError>
where
    F: Fn(&ProgramSection) -> bool,
{
    if sections.is_empty() {
        debug!(program = requested, "Catalog is empty; no context to assemble.");
        return Ok(String::new());
    }

    let rows: Vec<&ProgramSection> = sections.iter().filter(|s| predicate(s)).collect();
    if rows.is_empty() {
        return Err(ContextError::ProgramNotFound(requested.to_string()));
    }

    let programs: BTreeSet<&str> = rows.iter().map(|s| s.filename.as_str()).collect();
    if programs.len() != 1 {
        let found: Vec<String> = programs.into_iter().map(String::from).collect();
        error!(program = requested, ?found, "Filter matched more than one program.");
        return Err(ContextError::DataIntegrity {
            requested: requested.to_string(),
            found,
        });
    }

    let context = rows.iter().fold(String::new(), |mut acc, row| {
        acc.push_str(&row.filename);
        acc.push('\n');
        acc.push_str(&row.content);
        acc.push_str("\n\n");
        acc
    });
    debug!(
        program = requested,
        sections = rows.len(),
        bytes = context.len(),
        "Assembled program context."
    );
    Ok(context)
}
