// Aggregator — counts, rankings and the sentiment summary.
//
// Every ranking here sorts by count descending and breaks ties by first
// occurrence in token order, so two runs over the same document always
// produce the same sequences.

use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::classify::ClassifiedToken;
use super::tokenize::Token;
use crate::error::{PipelineError, Result};
use crate::lexicon::Category;

/// Count keys in first-occurrence order, then stable-sort by count descending.
fn rank_by_count<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut ranked: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match index.get(&key) {
            Some(&i) => ranked[i].1 += 1,
            None => {
                index.insert(key.clone(), ranked.len());
                ranked.push((key, 1));
            }
        }
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Classified tokens counted per category. Only categories that occur are
/// listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCounts {
    ranked: Vec<CategoryCount>,
}

impl CategoryCounts {
    pub fn from_classified(classified: &[ClassifiedToken]) -> Self {
        let ranked = rank_by_count(classified.iter().map(|c| c.category))
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        Self { ranked }
    }

    /// Count for one category; zero when it never occurred.
    pub fn get(&self, category: Category) -> usize {
        self.ranked
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }

    /// Sum over all categories. Equals the number of classified tokens.
    pub fn total(&self) -> usize {
        self.ranked.iter().map(|c| c.count).sum()
    }

    /// Highest count first.
    pub fn ranked(&self) -> &[CategoryCount] {
        &self.ranked
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub category: Category,
    pub count: usize,
}

/// Per-word-per-category counts, highest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordRanking {
    entries: Vec<WordCount>,
}

impl WordRanking {
    /// Ties are broken by where the word first appears, not where the
    /// (word, category) pair first appears.
    pub fn from_classified(classified: &[ClassifiedToken]) -> Self {
        let mut word_first: HashMap<&str, usize> = HashMap::new();
        for c in classified {
            let next = word_first.len();
            word_first.entry(c.word.as_str()).or_insert(next);
        }

        let mut counted = rank_by_count(classified.iter().map(|c| (c.word.as_str(), c.category)));
        counted.sort_by(|((wa, _), ca), ((wb, _), cb)| {
            cb.cmp(ca).then_with(|| word_first[wa].cmp(&word_first[wb]))
        });

        let entries = counted
            .into_iter()
            .map(|((word, category), count)| WordCount {
                word: word.to_string(),
                category,
                count,
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    /// The `n` most frequent words within one category.
    pub fn top(&self, category: Category, n: usize) -> Vec<&WordCount> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .take(n)
            .collect()
    }
}

/// Share of cleaned words that carry sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// Cleaned tokens, each counted once.
    pub total_tokens: usize,
    /// Classified tokens; a multi-category word counts once per category.
    pub sentiment_words: usize,
    pub percent_sentiment: f64,
    pub percent_nonsentiment: f64,
}

impl SentimentSummary {
    /// `percent_sentiment` may exceed 100 when multi-category words dominate,
    /// since the numerator counts categories and the denominator counts words.
    pub fn compute(total_tokens: usize, counts: &CategoryCounts) -> Result<Self> {
        if total_tokens == 0 {
            return Err(PipelineError::EmptyDocument(
                "no tokens left after cleaning to compute percentages from",
            ));
        }
        let sentiment_words = counts.total();
        let percent_sentiment = 100.0 * sentiment_words as f64 / total_tokens as f64;
        Ok(Self {
            total_tokens,
            sentiment_words,
            percent_sentiment,
            percent_nonsentiment: 100.0 - percent_sentiment,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// Cleaned word frequencies, highest first. This is the data behind a
/// word cloud.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordFrequencies {
    entries: Vec<WordFrequency>,
}

impl WordFrequencies {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let entries = rank_by_count(tokens.iter().map(|t| t.word.as_str()))
            .into_iter()
            .map(|(word, count)| WordFrequency {
                word: word.to_string(),
                count,
            })
            .collect();
        Self { entries }
    }

    pub fn top(&self, n: usize) -> &[WordFrequency] {
        &self.entries[..n.min(self.entries.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCounts {
    pub section: String,
    /// Cleaned tokens in this section.
    pub total_tokens: usize,
    pub counts: CategoryCounts,
}

/// Category counts per document section, in section order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionBreakdown {
    sections: Vec<SectionCounts>,
}

impl SectionBreakdown {
    /// `sections` fixes the output order; sections with no sentiment words
    /// still appear with empty counts.
    pub fn compute(sections: &[&str], cleaned: &[Token], classified: &[ClassifiedToken]) -> Self {
        let sections = sections
            .iter()
            .map(|&section| {
                let in_section: Vec<ClassifiedToken> = classified
                    .iter()
                    .filter(|c| c.section == section)
                    .cloned()
                    .collect();
                SectionCounts {
                    section: section.to_string(),
                    total_tokens: cleaned.iter().filter(|t| t.section == section).count(),
                    counts: CategoryCounts::from_classified(&in_section),
                }
            })
            .collect();
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionCounts] {
        &self.sections
    }
}
