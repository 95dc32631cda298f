//! # Response Composer
//!
//! Appends the program's source link to a generated answer.

use crate::catalog::LinkTable;
use crate::generator::GenerationResult;

/// Formats the citation line appended after an answer.
pub fn citation(url: &str) -> String {
    format!("\n\n📎 [**Click here to view the program on Cal Poly's Website**]({url})")
}

/// Appends the program's link, if the table has one. Total and pure: an
/// answer that already ends with the citation is returned unchanged.
pub fn compose(answer: &str, program: &str, links: &LinkTable) -> String {
    match links.get(program) {
        Some(url) => {
            let citation = citation(url);
            if answer.ends_with(&citation) {
                answer.to_string()
            } else {
                format!("{answer}{citation}")
            }
        }
        None => answer.to_string(),
    }
}

/// Composes the final text for either generation outcome. A failure is
/// rendered as its error message and still gets the program link.
pub fn compose_outcome(outcome: &GenerationResult, program: &str, links: &LinkTable) -> String {
    match outcome {
        Ok(answer) => compose(answer, program, links),
        Err(e) => compose(&e.to_string(), program, links),
    }
}
