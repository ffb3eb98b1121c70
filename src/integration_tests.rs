//! End-to-end tests of the composed analysis pipeline: segmentation feeds
//! pairs into the quality checker, alignment and glossary matcher, and whole
//! documents into the readability analyzer.

use crate::alignment::align_texts;
use crate::glossary::{GlossaryTerm, parse_csv_content, validate_glossary_consistency};
use crate::quality::{IssueType, Severity, run_quality_checks};
use crate::readability::calculate_readability;
use crate::segmentation::{
    Granularity, create_segment_pairs, ensure_segment_integrity, join_segments,
    join_target_segments, split_into_segments,
};
use crate::translator::{MockMode, MockTranslator, pretranslate_segments};

const SOURCE: &str = "Our API serves 3 regions. Contact Maria today!\nThe cloud dashboard is ready.";

#[test]
fn test_segment_pair_and_check() {
    let sources = split_into_segments(SOURCE, Granularity::Sentence);
    assert_eq!(sources.len(), 4);
    assert_eq!(join_segments(&sources), SOURCE);

    let targets = [
        "Nossa interface atende regiões.",
        "Fale com a Maria hoje!",
        "",
        "O painel da nuvem está pronto.",
    ];
    let pairs = ensure_segment_integrity(&create_segment_pairs(&sources, &targets));

    let first = run_quality_checks(&pairs[0].source, &pairs[0].target);
    assert!(first.iter().any(|i| i.issue_type == IssueType::MissingNumber
        && i.severity == Severity::Error
        && i.source_text.as_deref() == Some("3")));
    assert!(first.iter().any(|i| i.issue_type == IssueType::UntranslatedTerm));

    assert!(run_quality_checks(&pairs[1].source, &pairs[1].target).is_empty());
    assert!(run_quality_checks(&pairs[2].source, &pairs[2].target).is_empty());

    assert_eq!(
        join_target_segments(&pairs),
        "Nossa interface atende regiões. Fale com a Maria hoje!\nO painel da nuvem está pronto."
    );
}

#[test]
fn test_alignment_across_pairs() {
    let alignment = align_texts(
        "Contact Maria at maria@example.com!",
        "Fale com a Maria em maria@example.com!",
    );
    let matched_sources = alignment
        .source_elements
        .iter()
        .filter(|e| alignment.matches.contains_key(&e.id))
        .count();
    assert_eq!(matched_sources, 2);
}

#[test]
fn test_glossary_from_csv() {
    let terms: Vec<GlossaryTerm> =
        parse_csv_content("Term,Definition\ncloud,nuvem\ndashboard,painel\n");
    let report = validate_glossary_consistency(
        "The cloud dashboard lives at https://example.com/status.",
        "O quadro da nuvem fica em https://example.com/status.",
        &terms,
    );
    assert!(!report.is_consistent);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].source_term, "dashboard");
}

#[test]
fn test_readability_of_both_documents() {
    let source = calculate_readability(SOURCE, "en");
    let target = calculate_readability(
        "Nossa interface atende três regiões. Fale com a Maria!\nO painel fica online.",
        "pt-BR",
    );
    assert_eq!(source.statistics.sentences, 3);
    assert!(source.flesch.is_available());
    assert!(source.smog.is_available());
    assert_eq!(target.statistics.sentences, 3);
    assert!(target.flesch.is_available());
}

#[tokio::test]
async fn test_pretranslate_then_check() {
    let sources = split_into_segments("Buy 2 tickets.\nSee you soon!", Granularity::Sentence);
    let pairs = create_segment_pairs(&sources, &Vec::<String>::new());
    let mock = MockTranslator::new(MockMode::Tagged);

    let translated = pretranslate_segments(&pairs, &mock, "en", "pt").await.unwrap();
    for pair in translated.iter().filter(|p| !p.is_line_break) {
        assert!(run_quality_checks(&pair.source, &pair.target)
            .iter()
            .all(|i| i.severity != Severity::Error));
    }
    assert_eq!(
        join_target_segments(&translated),
        "[pt] Buy 2 tickets.\n[pt] See you soon!"
    );
}
