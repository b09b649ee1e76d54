// Composition tests — verifying that the stages chain together correctly.
//
// These tests exercise the data flow between modules:
//   File/HTML -> Document -> Pipeline -> Report -> Markdown/JSON
// without any network calls. Documents and lexicons are written to
// temporary files.

use std::io::Write;

use filing_tone::document::{Document, Segment};
use filing_tone::edgar::sections::{document_from_html, PREAMBLE_SECTION};
use filing_tone::lexicon::file::FileLexicon;
use filing_tone::lexicon::traits::LexiconSource;
use filing_tone::lexicon::{Category, Lexicon};
use filing_tone::output::markdown;
use filing_tone::pipeline::clean::{Cleaner, NumericPattern, StopWordSet};
use filing_tone::pipeline::SentimentPipeline;
use filing_tone::source::file::FileSource;
use filing_tone::source::DocumentSource;

const LEXICON_CSV: &str = "word,sentiment\n\
    loss,negative\n\
    losses,negative\n\
    impairment,negative\n\
    litigation,litigious\n\
    settlement,negative\n\
    settlement,litigious\n\
    may,uncertainty\n\
    growth,positive\n\
    covenants,constraining\n";

fn temp_with_suffix(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn filing_stop_words() -> StopWordSet {
    StopWordSet::from_words(["the", "and", "of", "in", "to", "a", "we", "our", "is", "from"])
}

// ============================================================
// Chain: JSON file -> Document -> Pipeline
// ============================================================

#[tokio::test]
async fn json_document_file_scores_per_section() {
    let lexicon_file = temp_with_suffix(".csv", LEXICON_CSV);
    let lexicon = FileLexicon::new(lexicon_file.path()).load().unwrap();

    let doc_file = temp_with_suffix(
        ".json",
        r#"{"segments": [
            {"section": "PART I", "text": "Our growth may slow. Litigation and a settlement in 2022 may follow."},
            {"section": "PART II", "text": "We recorded an impairment loss; debt covenants restrict us."},
            {"section": "PART III", "text": "Directors and officers."}
        ]}"#,
    );
    let doc = FileSource::new(doc_file.path()).fetch().await.unwrap();
    assert_eq!(doc.sections(), vec!["PART I", "PART II", "PART III"]);

    let stop = filing_stop_words();
    let pipeline = SentimentPipeline::new(Cleaner::new(NumericPattern::two_digit_run(), &stop), &lexicon);
    let report = pipeline.run(&doc).unwrap();

    assert_eq!(report.category_counts.get(Category::Uncertainty), 2);
    assert_eq!(report.category_counts.get(Category::Litigious), 2);
    assert_eq!(report.category_counts.get(Category::Negative), 3);
    assert_eq!(report.category_counts.get(Category::Positive), 1);
    assert_eq!(report.category_counts.get(Category::Constraining), 1);
    assert_eq!(report.category_counts.total(), report.stages.classified);

    let sections = report.sections.sections();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[0].counts.get(Category::Litigious), 2);
    assert_eq!(sections[1].counts.get(Category::Negative), 2);
    assert!(sections[2].counts.is_empty());

    let section_total: usize = sections.iter().map(|s| s.total_tokens).sum();
    assert_eq!(section_total, report.summary.total_tokens);
}

#[tokio::test]
async fn plain_text_file_uses_given_section() {
    let doc_file = temp_with_suffix(".txt", "Net losses widened.");
    let source = FileSource::new(doc_file.path()).with_section("PART II");
    let doc = source.fetch().await.unwrap();
    assert_eq!(doc.segments(), &[Segment::new("PART II", "Net losses widened.")]);
}

#[tokio::test]
async fn missing_document_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let result = FileSource::new(dir.path().join("missing.json")).fetch().await;
    assert!(result.is_err());
}

// ============================================================
// Chain: HTML -> sections -> Pipeline
// ============================================================

#[test]
fn html_filing_splits_into_parts_and_scores() {
    let html = r#"<html><body>
        <div>FORM 10-K</div>
        <div>PART I</div>
        <p>Item 1A. Risk Factors. Litigation may result in losses.</p>
        <div>PART II</div>
        <p>Item 7. Revenue growth offset an impairment.</p>
    </body></html>"#;
    let doc = document_from_html(html).unwrap();
    assert_eq!(doc.sections(), vec![PREAMBLE_SECTION, "PART I", "PART II"]);

    let lexicon = FileLexicon::new(temp_with_suffix(".csv", LEXICON_CSV).path())
        .load()
        .unwrap();
    let stop = filing_stop_words();
    let report = SentimentPipeline::new(Cleaner::new(NumericPattern::two_digit_run(), &stop), &lexicon)
        .run(&doc)
        .unwrap();

    let part_one = &report.sections.sections()[1];
    assert_eq!(part_one.section, "PART I");
    assert_eq!(part_one.counts.get(Category::Litigious), 1);
    assert_eq!(part_one.counts.get(Category::Uncertainty), 1);
    assert_eq!(part_one.counts.get(Category::Negative), 1);
}

// ============================================================
// Report -> Markdown / JSON
// ============================================================

fn sample_report() -> filing_tone::pipeline::SentimentReport {
    let lexicon = Lexicon::from_pairs([
        ("settlement", Category::Negative),
        ("settlement", Category::Litigious),
        ("litigation", Category::Litigious),
    ]);
    let stop = StopWordSet::from_words(["the"]);
    let doc = Document::from_text("PART I", "The contract litigation 19000 settlement").unwrap();
    SentimentPipeline::new(Cleaner::new(NumericPattern::two_digit_run(), &stop), &lexicon)
        .run(&doc)
        .unwrap()
}

#[test]
fn markdown_report_contains_aggregates() {
    let md = markdown::render("Example Corp 10-K", &sample_report(), 5);
    assert!(md.starts_with("# Sentiment profile: Example Corp 10-K"));
    assert!(md.contains("| litigious | 2 |"));
    assert!(md.contains("| negative | 1 |"));
    assert!(md.contains("| Sentiment share | 100.00% |"));
    assert!(md.contains("### litigious"));
    assert!(md.contains("| litigation | 1 |"));
}

#[test]
fn markdown_report_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.md");
    markdown::write_report(&path, "Example", &sample_report(), 3).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("## Categories"));
}

#[test]
fn json_report_has_stable_shape() {
    let value = serde_json::to_value(sample_report()).unwrap();
    assert_eq!(value["summary"]["total_tokens"], 3);
    assert_eq!(value["category_counts"][0]["category"], "litigious");
    assert_eq!(value["category_counts"][0]["count"], 2);
    assert_eq!(value["word_ranking"][0]["word"], "litigation");
    assert_eq!(value["word_frequencies"][0]["word"], "contract");
    assert_eq!(value["sections"][0]["section"], "PART I");
}
