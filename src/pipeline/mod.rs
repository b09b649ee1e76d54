// Sentiment scoring pipeline: tokenize -> clean -> classify -> aggregate.
//
// Each stage is a pure function of the previous stage's full output. The
// pipeline does no I/O; the document and lexicon are loaded beforehand.

pub mod aggregate;
pub mod classify;
pub mod clean;
pub mod tokenize;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::Document;
use crate::error::{PipelineError, Result};
use crate::lexicon::Lexicon;

use aggregate::{CategoryCounts, SectionBreakdown, SentimentSummary, WordFrequencies, WordRanking};
use classify::classify;
use clean::Cleaner;
use tokenize::tokenize;

/// Token counts after each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub tokens: usize,
    pub cleaned: usize,
    pub classified: usize,
    /// Distinct words among the classified tokens.
    pub distinct_classified_words: usize,
}

/// Everything a renderer needs from one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentReport {
    pub stages: StageCounts,
    pub category_counts: CategoryCounts,
    pub word_ranking: WordRanking,
    pub summary: SentimentSummary,
    pub word_frequencies: WordFrequencies,
    pub sections: SectionBreakdown,
}

/// A configured pipeline. Holds only shared, read-only references.
pub struct SentimentPipeline<'a> {
    cleaner: Cleaner<'a>,
    lexicon: &'a Lexicon,
}

impl<'a> SentimentPipeline<'a> {
    pub fn new(cleaner: Cleaner<'a>, lexicon: &'a Lexicon) -> Self {
        Self { cleaner, lexicon }
    }

    /// Score a document with the default English stop words and the
    /// two-digit numeric rule.
    pub fn with_defaults(lexicon: &'a Lexicon) -> Self {
        Self::new(Cleaner::default(), lexicon)
    }

    pub fn run(&self, document: &Document) -> Result<SentimentReport> {
        if document.is_empty() {
            return Err(PipelineError::EmptyDocument("document has no segments"));
        }
        if self.lexicon.is_empty() {
            return Err(PipelineError::lexicon("lexicon has no entries"));
        }

        let tokens = tokenize(document);
        if tokens.is_empty() {
            return Err(PipelineError::EmptyDocument("no words in any segment"));
        }
        let token_count = tokens.len();

        let cleaned = self.cleaner.clean(tokens);
        debug!(tokens = token_count, cleaned = cleaned.len(), "Cleaned tokens");

        let classified = classify(&cleaned, self.lexicon);

        let category_counts = CategoryCounts::from_classified(&classified);
        let summary = SentimentSummary::compute(cleaned.len(), &category_counts)?;
        let word_ranking = WordRanking::from_classified(&classified);
        let word_frequencies = WordFrequencies::from_tokens(&cleaned);
        let sections = SectionBreakdown::compute(&document.sections(), &cleaned, &classified);

        let mut distinct: Vec<&str> = classified.iter().map(|c| c.word.as_str()).collect();
        distinct.sort_unstable();
        distinct.dedup();

        let stages = StageCounts {
            tokens: token_count,
            cleaned: cleaned.len(),
            classified: classified.len(),
            distinct_classified_words: distinct.len(),
        };

        info!(
            tokens = stages.tokens,
            cleaned = stages.cleaned,
            classified = stages.classified,
            percent_sentiment = summary.percent_sentiment,
            "Scored document"
        );

        Ok(SentimentReport {
            stages,
            category_counts,
            word_ranking,
            summary,
            word_frequencies,
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Segment;
    use crate::lexicon::Category;

    #[test]
    fn test_zero_segments_is_empty_document() {
        let lex = Lexicon::from_pairs([("loss", Category::Negative)]);
        let doc = Document::new(vec![]).unwrap();
        let result = SentimentPipeline::with_defaults(&lex).run(&doc);
        assert!(matches!(result, Err(PipelineError::EmptyDocument(_))));
    }

    #[test]
    fn test_punctuation_only_is_empty_document() {
        let lex = Lexicon::from_pairs([("loss", Category::Negative)]);
        let doc = Document::new(vec![Segment::new("PART I", " -- ... !! ")]).unwrap();
        let result = SentimentPipeline::with_defaults(&lex).run(&doc);
        assert!(matches!(result, Err(PipelineError::EmptyDocument(_))));
    }

    #[test]
    fn test_only_stop_words_hits_division_guard() {
        let lex = Lexicon::from_pairs([("loss", Category::Negative)]);
        let doc = Document::from_text("PART I", "the and of 2021").unwrap();
        let result = SentimentPipeline::with_defaults(&lex).run(&doc);
        assert!(matches!(result, Err(PipelineError::EmptyDocument(_))));
    }

    #[test]
    fn test_empty_lexicon_is_not_zero_sentiment() {
        let lex = Lexicon::default();
        let doc = Document::from_text("PART I", "material weakness").unwrap();
        let result = SentimentPipeline::with_defaults(&lex).run(&doc);
        assert!(matches!(result, Err(PipelineError::LexiconUnavailable { .. })));
    }
}
