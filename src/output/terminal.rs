// Colored terminal output for sentiment reports.
//
// Stands in for the chart layer: category bar chart, top words per
// category, the sentiment vs. non-sentiment split, and word-cloud terms.

use colored::{ColoredString, Colorize};

use crate::lexicon::{Category, Lexicon};
use crate::pipeline::SentimentReport;

const BAR_WIDTH: usize = 30;

fn colorize_category(category: Category, text: &str) -> ColoredString {
    match category {
        Category::Negative => text.red(),
        Category::Positive => text.green(),
        Category::Uncertainty => text.yellow(),
        Category::Litigious => text.magenta(),
        Category::Constraining => text.cyan(),
        Category::Superfluous => text.blue(),
    }
}

/// Display a full sentiment report.
pub fn display_report(title: &str, report: &SentimentReport, top_n: usize) {
    println!("\n{}", format!("=== Sentiment profile: {title} ===").bold());

    let s = &report.stages;
    println!(
        "  Tokens: {}  |  After cleaning: {}  |  Sentiment matches: {} ({} distinct words)",
        s.tokens, s.cleaned, s.classified, s.distinct_classified_words
    );

    display_summary(report);
    display_category_counts(report);
    display_top_words(report, top_n);
    display_sections(report);
    display_word_cloud_terms(report, top_n.saturating_mul(2));
}

fn display_summary(report: &SentimentReport) {
    let summary = &report.summary;
    println!("\n{}", "Sentiment vs. non-sentiment words".bold());
    println!(
        "  {} {:>6.2}%",
        format!("[{}]", super::bar(summary.percent_sentiment / 100.0, BAR_WIDTH, '#')).bright_red(),
        summary.percent_sentiment
    );
    println!(
        "  {} {:>6.2}%",
        format!("[{}]", super::bar(summary.percent_nonsentiment / 100.0, BAR_WIDTH, '#')).dimmed(),
        summary.percent_nonsentiment
    );
    if summary.percent_sentiment > 100.0 {
        println!(
            "  {}",
            "Note: words in several categories count once per category, so the share exceeds 100%."
                .yellow()
        );
    }
}

fn display_category_counts(report: &SentimentReport) {
    println!("\n{}", "Words per sentiment category".bold());
    let counts = &report.category_counts;
    if counts.is_empty() {
        println!("  {}", "No lexicon words found in this document.".dimmed());
        return;
    }

    let max = counts.ranked().first().map_or(1, |c| c.count.max(1));
    for entry in counts.ranked() {
        let bar = super::bar(entry.count as f64 / max as f64, BAR_WIDTH, '=');
        println!(
            "  {:<13} {} {:>6}",
            colorize_category(entry.category, entry.category.as_str()),
            colorize_category(entry.category, &format!("[{bar}]")),
            entry.count
        );
    }
}

fn display_top_words(report: &SentimentReport, top_n: usize) {
    println!("\n{}", format!("Top {top_n} words per category").bold());
    for entry in report.category_counts.ranked() {
        let top = report.word_ranking.top(entry.category, top_n);
        let words: Vec<String> = top.iter().map(|w| format!("{} ({})", w.word, w.count)).collect();
        println!(
            "  {:<13} {}",
            colorize_category(entry.category, entry.category.as_str()).bold(),
            words.join(", ")
        );
    }
}

fn display_sections(report: &SentimentReport) {
    let sections = report.sections.sections();
    if sections.len() < 2 {
        return;
    }
    println!("\n{}", "By section".bold());
    for section in sections {
        let parts: Vec<String> = section
            .counts
            .ranked()
            .iter()
            .map(|c| format!("{} {}", c.category, c.count))
            .collect();
        let detail = if parts.is_empty() {
            "no sentiment words".dimmed().to_string()
        } else {
            parts.join(", ")
        };
        println!(
            "  {:<10} {:>7} words  {}",
            section.section, section.total_tokens, detail
        );
    }
}

fn display_word_cloud_terms(report: &SentimentReport, n: usize) {
    let top = report.word_frequencies.top(n);
    if top.is_empty() {
        return;
    }
    println!("\n{}", "Most frequent words".bold());
    let words: Vec<String> = top.iter().map(|w| format!("{} {}", w.word, w.count)).collect();
    println!("  {}", words.join(" · ").dimmed());
}

/// Display how many lexicon words fall in each category.
pub fn display_lexicon(lexicon: &Lexicon) {
    println!(
        "\n{}",
        format!("=== Lexicon ({} words) ===", lexicon.len()).bold()
    );
    for (category, count) in lexicon.words_per_category() {
        println!(
            "  {:<13} {:>6}",
            colorize_category(category, category.as_str()),
            count
        );
    }
    println!(
        "  {} words belong to more than one category",
        lexicon.multi_category_words()
    );
}
