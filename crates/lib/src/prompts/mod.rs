//! # Prompt Template Modules
//!
//! This module holds the prompt templates used to ask the model about a
//! program, and the helper that fills their placeholders.

pub mod advisor;

/// Fills `{name}` placeholders in `template` in a single pass.
///
/// Substituted values are never rescanned, so a context that happens to
/// contain `{question}` is left untouched. Unknown placeholders are kept as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
