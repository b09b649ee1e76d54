// Cleaner — drop numeric-looking tokens and stop words.
//
// The numeric rule is a substring test: any word containing two digits in a
// row goes, so "covid19" and "section2021" are removed along with "19000".

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

use super::tokenize::Token;

/// Default stop words: the English list from the `stop-words` crate.
static ENGLISH_STOP_WORDS: LazyLock<StopWordSet> =
    LazyLock::new(|| StopWordSet::from_words(get(LANGUAGE::English)));

static TWO_DIGITS: LazyLock<NumericPattern> = LazyLock::new(|| NumericPattern {
    regex: Regex::new(r"\d{2}").expect("static numeric pattern compiles"),
});

/// Words treated as semantically empty. Stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The process-wide English stop word set, built on first use.
    pub fn english() -> &'static StopWordSet {
        &ENGLISH_STOP_WORDS
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&word.to_lowercase())
    }

    /// Add extra words (e.g. filing boilerplate) on top of an existing set.
    pub fn extended<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = self.words.clone();
        words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Rule that marks a token as numeric noise.
#[derive(Debug, Clone)]
pub struct NumericPattern {
    regex: Regex,
}

impl NumericPattern {
    /// Two or more consecutive ASCII digits anywhere in the word.
    pub fn two_digit_run() -> &'static NumericPattern {
        &TWO_DIGITS
    }

    /// Compile a custom pattern.
    pub fn new(pattern: &str) -> Result<Self, regex_lite::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn is_match(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }
}

/// Removes tokens; never adds or rewrites one.
#[derive(Debug, Clone, Copy)]
pub struct Cleaner<'a> {
    pub numeric: &'a NumericPattern,
    pub stop_words: &'a StopWordSet,
}

impl Default for Cleaner<'static> {
    fn default() -> Self {
        Self {
            numeric: NumericPattern::two_digit_run(),
            stop_words: StopWordSet::english(),
        }
    }
}

impl<'a> Cleaner<'a> {
    pub fn new(numeric: &'a NumericPattern, stop_words: &'a StopWordSet) -> Self {
        Self {
            numeric,
            stop_words,
        }
    }

    pub fn keeps(&self, word: &str) -> bool {
        !self.numeric.is_match(word) && !self.stop_words.contains(word)
    }

    /// Filter tokens, preserving relative order.
    pub fn clean(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens.into_iter().filter(|t| self.keeps(&t.word)).collect()
    }

    /// Borrowing variant of [`Cleaner::clean`].
    pub fn clean_ref(&self, tokens: &[Token]) -> Vec<Token> {
        tokens
            .iter()
            .filter(|t| self.keeps(&t.word))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(*w, "PART I")).collect()
    }

    #[test]
    fn test_numeric_is_substring_match() {
        let p = NumericPattern::two_digit_run();
        assert!(p.is_match("19000"));
        assert!(p.is_match("covid19"));
        assert!(p.is_match("section2021"));
        assert!(!p.is_match("item1a"));
        assert!(!p.is_match("q4"));
        assert!(!p.is_match("revenue"));
    }

    #[test]
    fn test_word_in_both_sets_removed_once() {
        let stop = StopWordSet::from_words(["the", "10"]);
        let cleaner = Cleaner::new(NumericPattern::two_digit_run(), &stop);
        let cleaned = cleaner.clean(tokens(&["10", "the", "loss"]));
        assert_eq!(cleaned, tokens(&["loss"]));
    }

    #[test]
    fn test_stop_word_lookup_is_case_normalized() {
        let stop = StopWordSet::from_words(["The"]);
        assert!(stop.contains("the"));
        assert!(stop.contains("THE"));
    }

    #[test]
    fn test_english_defaults_cover_common_words() {
        let cleaner = Cleaner::default();
        assert!(!cleaner.keeps("the"));
        assert!(!cleaner.keeps("and"));
        assert!(cleaner.keeps("litigation"));
    }

    #[test]
    fn test_extended_stop_words() {
        let stop = StopWordSet::from_words(["the"]).extended(["inc"]);
        assert!(stop.contains("inc"));
        assert!(stop.contains("the"));
        assert_eq!(stop.len(), 2);
    }
}
