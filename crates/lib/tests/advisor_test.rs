//! # Advisor Pipeline Tests
//!
//! End-to-end runs of major selection, context assembly, generation and
//! composition over the sample catalog, with a mock AI provider.

use abroad_rag::prompts::advisor::PROGRAM_ANSWER_SYSTEM_PROMPT;
use abroad_rag::providers::ai::{gemini::GeminiProvider, GenerationParams};
use abroad_rag::{Advisor, AnswerGenerator, Catalog, LinkTable, MajorMatching, QueryError};
use abroad_rag_test_utils::{CatalogFixture, MockAiProvider, SAMPLE_CATALOG_CSV, SAMPLE_LINKS_CSV};
use anyhow::Result;

fn sample_advisor(provider: MockAiProvider) -> Result<Advisor> {
    let catalog = Catalog::from_reader(SAMPLE_CATALOG_CSV.as_bytes(), "sample.csv")?;
    let links = LinkTable::from_reader(SAMPLE_LINKS_CSV.as_bytes(), "urls.csv")?;
    Ok(Advisor::new(
        catalog,
        links,
        AnswerGenerator::new(Box::new(provider)),
        MajorMatching::Substring,
    ))
}

#[test]
fn test_selecting_a_major_lists_its_programs() -> Result<()> {
    let advisor = sample_advisor(MockAiProvider::default())?;

    assert_eq!(
        advisor.majors(),
        ["Art", "Business", "Finance", "Italian Studies"]
    );
    assert_eq!(advisor.programs_for_major("Business")?, ["Spain-IEP"]);
    assert_eq!(advisor.programs_for_major("Art")?, ["Italy-IEP"]);
    Ok(())
}

#[test]
fn test_major_preconditions_are_reported() -> Result<()> {
    let advisor = sample_advisor(MockAiProvider::default())?;

    assert_eq!(
        advisor.programs_for_major("  ").unwrap_err(),
        QueryError::NoMajorSelected
    );
    assert_eq!(
        advisor.programs_for_major("Biology").unwrap_err(),
        QueryError::UnknownMajor("Biology".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_answer_without_link_equals_generated_text() -> Result<()> {
    let provider = MockAiProvider::answering("The program fee is $12000.");
    let advisor = sample_advisor(provider.clone())?;

    let answer = advisor.ask("Spain-IEP", "What are the costs?").await?;

    assert_eq!(answer.text, "The program fee is $12000.");
    assert_eq!(answer.link, None);
    assert!(!answer.degraded);

    let calls = provider.get_calls();
    assert_eq!(calls.len(), 1);
    let (system_prompt, user_prompt) = &calls[0];
    assert_eq!(system_prompt, PROGRAM_ANSWER_SYSTEM_PROMPT);
    assert!(user_prompt.contains("PROGRAM: Spain-IEP"));
    assert!(user_prompt.contains(
        "Spain-IEP\nStudy business in Madrid.\n\nSpain-IEP\nProgram fee is $12000.\n\n"
    ));
    assert!(user_prompt
        .contains("Regarding the Spain-IEP study abroad program: What are the costs?"));
    assert!(!user_prompt.contains("Florence"));
    Ok(())
}

#[tokio::test]
async fn test_answer_with_link_gets_citation() -> Result<()> {
    let advisor = sample_advisor(MockAiProvider::answering("Homestays."))?;

    let answer = advisor.ask("Italy-IEP", "Where will I live?").await?;

    assert!(answer.text.starts_with("Homestays."));
    assert!(answer
        .text
        .ends_with("(https://abroad.example.edu/italy-iep)"));
    assert_eq!(
        answer.link.as_deref(),
        Some("https://abroad.example.edu/italy-iep")
    );
    Ok(())
}

#[tokio::test]
async fn test_generation_failure_becomes_a_degraded_answer() -> Result<()> {
    let advisor = sample_advisor(MockAiProvider::failing("quota exceeded"))?;

    let answer = advisor.ask("Spain-IEP", "What are the costs?").await?;

    assert!(answer.degraded);
    assert!(!answer.text.is_empty());
    assert!(answer.text.starts_with("ERROR generating answer:"));
    assert!(answer.text.contains("quota exceeded"));
    Ok(())
}

#[tokio::test]
async fn test_query_preconditions_do_not_call_the_model() -> Result<()> {
    let provider = MockAiProvider::default();
    let advisor = sample_advisor(provider.clone())?;

    assert_eq!(
        advisor.ask("Spain-IEP", "   ").await.unwrap_err(),
        QueryError::EmptyQuestion
    );
    assert_eq!(
        advisor.ask("", "Costs?").await.unwrap_err(),
        QueryError::NoProgramSelected
    );
    assert_eq!(
        advisor.ask("Atlantis", "Costs?").await.unwrap_err(),
        QueryError::ProgramNotFound("Atlantis".to_string())
    );
    assert!(provider.get_calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_cannot_answer() -> Result<()> {
    let advisor = Advisor::new(
        Catalog::default(),
        LinkTable::default(),
        AnswerGenerator::new(Box::new(MockAiProvider::default())),
        MajorMatching::Substring,
    );

    assert!(advisor.majors().is_empty());
    assert_eq!(
        advisor.ask("Spain-IEP", "Costs?").await.unwrap_err(),
        QueryError::ProgramNotFound("Spain-IEP".to_string())
    );
    Ok(())
}

#[test]
fn test_program_details_include_summary_and_link() -> Result<()> {
    let advisor = sample_advisor(MockAiProvider::default())?;

    let details = advisor.program_details("Italy-IEP")?;

    assert_eq!(details.summary.total_sections, 2);
    assert_eq!(details.summary.section_names, vec!["Overview", "Housing"]);
    assert_eq!(details.summary.areas_of_study, "Art; Italian Studies");
    assert_eq!(
        details.link.as_deref(),
        Some("https://abroad.example.edu/italy-iep")
    );
    Ok(())
}

#[test]
fn test_custom_prompts_are_used_verbatim() -> Result<()> {
    let generator = AnswerGenerator::with_prompts(
        Box::new(MockAiProvider::default()),
        "Custom system.",
        "{question}",
    );

    assert_eq!(generator.system_prompt(), "Custom system.");
    Ok(())
}

#[tokio::test]
async fn test_loading_from_fixture_files() -> Result<()> {
    let fixture = CatalogFixture::with_contents(
        "filename,tab_name,content,areas_of_study,embedding\n\
         Chile-Santiago,Overview,Andes hiking.,Geology,[0.5]\n",
        "filename,content\nChile-Santiago,https://abroad.example.edu/chile\n",
    )?;
    let advisor = Advisor::new(
        Catalog::load(&fixture.catalog_path)?,
        LinkTable::load(&fixture.links_path)?,
        AnswerGenerator::new(Box::new(MockAiProvider::answering("Bring boots."))),
        MajorMatching::Exact,
    );

    assert_eq!(advisor.programs_for_major("Geology")?, ["Chile-Santiago"]);
    let answer = advisor.ask("Chile-Santiago", "What should I pack?").await?;
    assert!(answer.text.contains("Bring boots."));
    assert!(answer.text.contains("https://abroad.example.edu/chile"));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_gemini_answer_hides_the_api_key() -> Result<()> {
    let catalog = Catalog::from_reader(SAMPLE_CATALOG_CSV.as_bytes(), "sample.csv")?;
    let links = LinkTable::from_reader(SAMPLE_LINKS_CSV.as_bytes(), "urls.csv")?;
    let provider = GeminiProvider::new(
        "http://127.0.0.1:1/v1beta/models/m:generateContent".to_string(),
        "SECRET-GEMINI-KEY".to_string(),
        GenerationParams::default(),
    )?;
    let advisor = Advisor::new(
        catalog,
        links,
        AnswerGenerator::new(Box::new(provider)),
        MajorMatching::Substring,
    );

    let answer = advisor.ask("Spain-IEP", "Costs?").await?;

    assert!(answer.degraded);
    assert!(answer.text.starts_with("ERROR generating answer:"));
    assert!(!answer.text.contains("SECRET-GEMINI-KEY"));
    assert!(!answer.text.contains("127.0.0.1:1"));
    Ok(())
}
