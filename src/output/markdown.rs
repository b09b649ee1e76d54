// Markdown report generation.
//
// Produces a standalone document with the same aggregates the terminal
// shows, as tables, so it can be committed or shared alongside a filing.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::pipeline::SentimentReport;

/// Render the report as Markdown text.
pub fn render(title: &str, report: &SentimentReport, top_n: usize) -> String {
    let mut md = String::new();
    let summary = &report.summary;
    let stages = &report.stages;

    let _ = writeln!(md, "# Sentiment profile: {title}\n");
    let _ = writeln!(
        md,
        "_Generated {}_\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    md.push_str("## Summary\n\n");
    md.push_str("| Measure | Value |\n|---|---:|\n");
    let _ = writeln!(md, "| Tokens | {} |", stages.tokens);
    let _ = writeln!(md, "| Tokens after cleaning | {} |", stages.cleaned);
    let _ = writeln!(md, "| Sentiment matches | {} |", stages.classified);
    let _ = writeln!(
        md,
        "| Distinct sentiment words | {} |",
        stages.distinct_classified_words
    );
    let _ = writeln!(md, "| Sentiment share | {:.2}% |", summary.percent_sentiment);
    let _ = writeln!(
        md,
        "| Non-sentiment share | {:.2}% |\n",
        summary.percent_nonsentiment
    );

    md.push_str("## Categories\n\n");
    if report.category_counts.is_empty() {
        md.push_str("No lexicon words found.\n\n");
    } else {
        md.push_str("| Category | Count |\n|---|---:|\n");
        for entry in report.category_counts.ranked() {
            let _ = writeln!(md, "| {} | {} |", entry.category, entry.count);
        }
        md.push('\n');
    }

    let _ = writeln!(md, "## Top {top_n} words per category\n");
    for entry in report.category_counts.ranked() {
        let _ = writeln!(md, "### {}\n", entry.category);
        md.push_str("| Word | Count |\n|---|---:|\n");
        for word in report.word_ranking.top(entry.category, top_n) {
            let _ = writeln!(md, "| {} | {} |", word.word, word.count);
        }
        md.push('\n');
    }

    let sections = report.sections.sections();
    if !sections.is_empty() {
        md.push_str("## By section\n\n");
        md.push_str("| Section | Words | Sentiment matches |\n|---|---:|---:|\n");
        for section in sections {
            let _ = writeln!(
                md,
                "| {} | {} | {} |",
                section.section,
                section.total_tokens,
                section.counts.total()
            );
        }
        md.push('\n');
    }

    md.push_str("## Most frequent words\n\n");
    let words: Vec<String> = report
        .word_frequencies
        .top(top_n.saturating_mul(2))
        .iter()
        .map(|w| format!("{} ({})", w.word, w.count))
        .collect();
    let _ = writeln!(md, "{}", words.join(", "));

    md
}

/// Write the Markdown report to `path`.
pub fn write_report(path: &Path, title: &str, report: &SentimentReport, top_n: usize) -> Result<()> {
    let md = render(title, report, top_n);
    std::fs::write(path, md)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
