//! # Context Assembly Tests

use abroad_rag::context::{assemble_context, assemble_context_matching};
use abroad_rag::ContextError;
use abroad_rag_test_utils::section;

#[test]
fn test_only_the_selected_program_is_concatenated_in_order() {
    let sections = vec![
        section("Spain-IEP", "Overview", "Study business in Madrid.", "Business"),
        section("Italy-IEP", "Overview", "Art in Florence.", "Art"),
        section("Spain-IEP", "Costs", "Program fee is $12000.", "Business"),
    ];

    let context = assemble_context(&sections, "Spain-IEP").unwrap();

    assert_eq!(
        context,
        "Spain-IEP\nStudy business in Madrid.\n\nSpain-IEP\nProgram fee is $12000.\n\n"
    );
    assert!(!context.contains("Florence"));
}

#[test]
fn test_assembly_is_deterministic() {
    let sections = vec![
        section("Spain-IEP", "Overview", "One", "Business"),
        section("Italy-IEP", "Overview", "Two", "Art"),
        section("Spain-IEP", "Costs", "Three", "Business"),
    ];

    let first = assemble_context(&sections, "Spain-IEP").unwrap();
    let _ = assemble_context(&sections, "Italy-IEP").unwrap();
    let second = assemble_context(&sections, "Spain-IEP").unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_unknown_program_is_not_found() {
    let sections = vec![section("Spain-IEP", "Overview", "One", "Business")];

    let err = assemble_context(&sections, "Atlantis").unwrap_err();

    assert_eq!(err, ContextError::ProgramNotFound("Atlantis".to_string()));
}

#[test]
fn test_filename_match_is_exact() {
    let sections = vec![section("Spain-IEP", "Overview", "One", "Business")];

    assert!(assemble_context(&sections, "spain-iep").is_err());
    assert!(assemble_context(&sections, "Spain").is_err());
}

#[test]
fn test_colliding_programs_are_reported_not_merged() {
    let sections = vec![
        section("Spain-IEP", "Overview", "Madrid", "Business"),
        section("Spain-IEP-Summer", "Overview", "Seville", "Business"),
    ];

    let err = assemble_context_matching(&sections, "Spain-IEP", |s| {
        s.filename.starts_with("Spain-IEP")
    })
    .unwrap_err();

    assert_eq!(
        err,
        ContextError::DataIntegrity {
            requested: "Spain-IEP".to_string(),
            found: vec!["Spain-IEP".to_string(), "Spain-IEP-Summer".to_string()],
        }
    );
    assert!(err.to_string().contains("expected 1 program, found 2"));
}

#[test]
fn test_empty_catalog_yields_empty_context() {
    assert_eq!(assemble_context(&[], "Spain-IEP").unwrap(), "");
}
