// Tokenizer — split segment text into lowercase words.

use serde::{Deserialize, Serialize};

use crate::document::Document;

/// A single lowercase word and the section it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub word: String,
    pub section: String,
}

impl Token {
    pub fn new(word: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            section: section.into(),
        }
    }
}

/// Split every segment at non-alphanumeric characters and lowercase the
/// pieces. Output order is segment order, then left to right.
pub fn tokenize(document: &Document) -> Vec<Token> {
    document
        .segments()
        .iter()
        .flat_map(|segment| {
            split_words(&segment.text).map(move |word| Token {
                word,
                section: segment.section.clone(),
            })
        })
        .collect()
}

/// Lowercase words of one block of text.
pub fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .map(str::to_lowercase)
}
