//! # Major Index Tests
//!
//! Exercises vocabulary construction and the loose major/program matching.

use abroad_rag::major_index::split_areas;
use abroad_rag::{Catalog, MajorIndex, MajorMatching, ProgramSection};
use abroad_rag_test_utils::{section, SAMPLE_CATALOG_CSV};
use anyhow::Result;

fn sample_sections() -> Result<Vec<ProgramSection>> {
    Ok(Catalog::from_reader(SAMPLE_CATALOG_CSV.as_bytes(), "sample.csv")?
        .sections()
        .to_vec())
}

/// Reference check: a program matches a major iff one of its tokens and the
/// major contain each other, ignoring case.
fn expected_match(sections: &[ProgramSection], program: &str, major: &str) -> bool {
    let major = major.to_lowercase();
    sections
        .iter()
        .filter(|s| s.filename == program)
        .flat_map(|s| split_areas(&s.areas_of_study))
        .map(str::to_lowercase)
        .any(|t| major.contains(&t) || t.contains(&major))
}

#[test]
fn test_single_program_is_found_by_each_of_its_majors() {
    let sections = vec![
        section("Spain-IEP", "Overview", "Study in Madrid.", "Business, Finance"),
        section("Spain-IEP", "Costs", "Fees.", "Business, Finance"),
    ];

    let index = MajorIndex::build(&sections);

    assert_eq!(index.majors(), ["Business", "Finance"]);
    assert_eq!(index.programs_for("Business"), Some(&["Spain-IEP".to_string()][..]));
    assert_eq!(index.programs_for("Finance"), Some(&["Spain-IEP".to_string()][..]));
}

#[test]
fn test_vocabulary_is_sorted_deduplicated_and_non_empty() -> Result<()> {
    let mut sections = sample_sections()?;
    sections.push(section("Japan-Tokyo", "Overview", "Text", " Finance ;\n;Anthropology,"));

    let index = MajorIndex::build(&sections);

    let majors = index.majors();
    assert!(majors.iter().all(|m| !m.is_empty() && m.trim() == m));
    assert!(majors.windows(2).all(|w| w[0] < w[1]), "not strictly sorted: {majors:?}");
    assert_eq!(
        majors,
        ["Anthropology", "Art", "Business", "Finance", "Italian Studies"]
    );
    Ok(())
}

#[test]
fn test_membership_matches_the_bidirectional_substring_rule() -> Result<()> {
    let mut sections = sample_sections()?;
    sections.push(section("Global-IB", "Overview", "Text", "International Business"));
    sections.push(section("Rome-IT", "Overview", "Text", "IT"));

    let index = MajorIndex::build(&sections);

    let programs = ["Spain-IEP", "Italy-IEP", "Peru-Lima", "Global-IB", "Rome-IT"];
    for major in index.majors() {
        let listed = index.programs_for(major).unwrap_or_default();
        for program in programs {
            assert_eq!(
                listed.iter().any(|p| p == program),
                expected_match(&sections, program, major),
                "program {program} vs major {major}"
            );
        }
    }
    Ok(())
}

#[test]
fn test_substring_matching_is_loose_in_both_directions() {
    let sections = vec![
        section("Global-IB", "Overview", "Text", "International Business"),
        section("Spain-IEP", "Overview", "Text", "business"),
        section("Rome-IT", "Overview", "Text", "IT"),
        section("Italy-IEP", "Overview", "Text", "Italian Studies"),
    ];

    let index = MajorIndex::build(&sections);

    // Case-insensitive and symmetric.
    assert_eq!(
        index.programs_for("business").unwrap(),
        ["Global-IB", "Spain-IEP"]
    );
    assert_eq!(
        index.programs_for("International Business").unwrap(),
        ["Global-IB", "Spain-IEP"]
    );
    // Short tokens over-match: "IT" is a substring of "Italian Studies".
    assert_eq!(
        index.programs_for("IT").unwrap(),
        ["Italy-IEP", "Rome-IT"]
    );
}

#[test]
fn test_exact_matching_only_pairs_equal_tokens() {
    let sections = vec![
        section("Global-IB", "Overview", "Text", "International Business"),
        section("Spain-IEP", "Overview", "Text", "Business"),
        section("Rome-IT", "Overview", "Text", "it"),
        section("Italy-IEP", "Overview", "Text", "Italian Studies; IT"),
    ];

    let index = MajorIndex::build_with(&sections, MajorMatching::Exact);

    assert_eq!(index.matching(), MajorMatching::Exact);
    assert_eq!(index.programs_for("Business").unwrap(), ["Spain-IEP"]);
    assert_eq!(index.programs_for("IT").unwrap(), ["Italy-IEP", "Rome-IT"]);
    assert_eq!(index.programs_for("Italian Studies").unwrap(), ["Italy-IEP"]);
}

#[test]
fn test_program_without_study_areas_is_unreachable() -> Result<()> {
    let sections = sample_sections()?;

    let index = MajorIndex::build(&sections);

    for major in index.majors() {
        let programs = index.programs_for(major).unwrap();
        assert!(!programs.iter().any(|p| p == "Peru-Lima"), "{major}");
    }
    Ok(())
}

#[test]
fn test_unknown_major_has_no_entry() {
    let index = MajorIndex::build(&[section("Spain-IEP", "Overview", "Text", "Business")]);

    assert!(index.programs_for("Biology").is_none());
    assert!(!index.contains_major("Biology"));
    assert!(index.contains_major("Business"));
}

#[test]
fn test_empty_catalog_builds_an_empty_index() {
    let index = MajorIndex::build(&[]);

    assert!(index.majors().is_empty());
}
