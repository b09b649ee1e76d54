// Lexicon classifier — inner join of cleaned tokens against the lexicon.

use serde::{Deserialize, Serialize};

use super::tokenize::Token;
use crate::lexicon::{Category, Lexicon};

/// One token matched to one of its lexicon categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedToken {
    pub word: String,
    pub category: Category,
    pub section: String,
}

/// Emit one classified token per (token, category) hit.
///
/// Words absent from the lexicon are dropped without error. A word with
/// several categories yields several tokens, in canonical category order.
pub fn classify(tokens: &[Token], lexicon: &Lexicon) -> Vec<ClassifiedToken> {
    tokens
        .iter()
        .filter_map(|token| lexicon.categories(&token.word).map(|cats| (token, cats)))
        .flat_map(|(token, cats)| {
            cats.iter().map(move |&category| ClassifiedToken {
                word: token.word.clone(),
                category,
                section: token.section.clone(),
            })
        })
        .collect()
}
