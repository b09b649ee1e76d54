// Sentiment lexicon — word to category mapping, and where it comes from.

pub mod file;
pub mod traits;

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// The six financial sentiment categories.
///
/// Declaration order is the order a multi-category word emits its
/// classified tokens in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Negative,
    Positive,
    Uncertainty,
    Litigious,
    Constraining,
    Superfluous,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Negative,
        Category::Positive,
        Category::Uncertainty,
        Category::Litigious,
        Category::Constraining,
        Category::Superfluous,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Negative => "negative",
            Category::Positive => "positive",
            Category::Uncertainty => "uncertainty",
            Category::Litigious => "litigious",
            Category::Constraining => "constraining",
            Category::Superfluous => "superfluous",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| PipelineError::lexicon(format!("unknown sentiment category '{s}'")))
    }
}

/// Read-only word → categories mapping. Keys are stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, BTreeSet<Category>>,
}

impl Lexicon {
    /// Build a lexicon from (word, category) pairs. Repeated pairs merge;
    /// a word listed under several categories keeps all of them.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Category)>,
        S: AsRef<str>,
    {
        let mut entries: HashMap<String, BTreeSet<Category>> = HashMap::new();
        for (word, category) in pairs {
            entries
                .entry(word.as_ref().trim().to_lowercase())
                .or_default()
                .insert(category);
        }
        Self { entries }
    }

    /// Categories for a word, in canonical order. Lookup is case-normalized.
    pub fn categories(&self, word: &str) -> Option<&BTreeSet<Category>> {
        match self.entries.get(word) {
            Some(found) => Some(found),
            None => self.entries.get(&word.to_lowercase()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many words carry each category, in canonical category order.
    pub fn words_per_category(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.entries.values().filter(|cats| cats.contains(&c)).count()))
            .collect()
    }

    /// Number of words that belong to more than one category.
    pub fn multi_category_words(&self) -> usize {
        self.entries.values().filter(|cats| cats.len() > 1).count()
    }
}
