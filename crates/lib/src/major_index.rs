//! # Major Index
//!
//! Derives the list of majors a user can pick from, and for each major the
//! programs whose `areas_of_study` field matches it. The index is built once
//! from the catalog and then only read.

use crate::catalog::ProgramSection;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// How a program's study areas are compared against a major.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorMatching {
    /// Case-insensitive substring test in both directions. "Business" matches
    /// "International Business", but "IT" also matches "Italian Studies".
    #[default]
    Substring,
    /// Case-insensitive equality of a program token and the major.
    Exact,
}

impl MajorMatching {
    /// Compares one lowercased program token with one lowercased major.
    pub fn matches(self, token: &str, major: &str) -> bool {
        match self {
            MajorMatching::Substring => major.contains(token) || token.contains(major),
            MajorMatching::Exact => major == token,
        }
    }
}

/// Splits an `areas_of_study` value on commas, semicolons and newlines,
/// trimming each token and dropping empty ones.
pub fn split_areas(areas_of_study: &str) -> Vec<&str> {
    areas_of_study
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// The frozen major vocabulary and the major to programs mapping.
#[derive(Debug, Clone, Default)]
pub struct MajorIndex {
    majors: Vec<String>,
    programs: BTreeMap<String, Vec<String>>,
    matching: MajorMatching,
}

impl MajorIndex {
    /// Builds the index with the default substring matching.
    pub fn build(sections: &[ProgramSection]) -> Self {
        Self::build_with(sections, MajorMatching::default())
    }

    /// Builds the index with an explicit matching strategy.
    pub fn build_with(sections: &[ProgramSection], matching: MajorMatching) -> Self {
        let vocabulary: BTreeSet<&str> = sections
            .iter()
            .flat_map(|s| split_areas(&s.areas_of_study))
            .collect();

        // One lowercased token list per program. Sections of a program share
        // the same areas, but every row is folded in regardless.
        let mut program_tokens: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        for section in sections {
            let tokens = program_tokens.entry(section.filename.as_str()).or_default();
            tokens.extend(
                split_areas(&section.areas_of_study)
                    .into_iter()
                    .map(str::to_lowercase),
            );
        }

        let mut programs = BTreeMap::new();
        for major in &vocabulary {
            let major_lower = major.to_lowercase();
            let matching_programs: Vec<String> = program_tokens
                .iter()
                .filter(|(_, tokens)| tokens.iter().any(|t| matching.matches(t, &major_lower)))
                .map(|(filename, _)| filename.to_string())
                .collect();
            debug!(major = %major, programs = matching_programs.len(), "Indexed major.");
            programs.insert(major.to_string(), matching_programs);
        }

        let unreachable = program_tokens.values().filter(|t| t.is_empty()).count();
        info!(
            majors = vocabulary.len(),
            programs = program_tokens.len(),
            unreachable,
            ?matching,
            "Built major index."
        );

        Self {
            majors: vocabulary.into_iter().map(String::from).collect(),
            programs,
            matching,
        }
    }

    /// The sorted, deduplicated major vocabulary.
    pub fn majors(&self) -> &[String] {
        &self.majors
    }

    /// Sorted programs for a major, or `None` when the major is not in the
    /// vocabulary. Lookup is by the exact display form of the major.
    pub fn programs_for(&self, major: &str) -> Option<&[String]> {
        self.programs.get(major).map(Vec::as_slice)
    }

    pub fn contains_major(&self, major: &str) -> bool {
        self.programs.contains_key(major)
    }

    pub fn matching(&self) -> MajorMatching {
        self.matching
    }
}
