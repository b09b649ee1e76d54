// CSV lexicon loader.
//
// Reads the long form of the Loughran-McDonald dictionary: a header row
// followed by one `word,sentiment` pair per line. A word that appears on
// several lines is a multi-category word.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use super::traits::LexiconSource;
use super::{Category, Lexicon};
use crate::error::{PipelineError, Result};

/// Lexicon loaded from a `word,sentiment` CSV file.
pub struct FileLexicon {
    path: PathBuf,
}

impl FileLexicon {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LexiconSource for FileLexicon {
    fn load(&self) -> Result<Lexicon> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            PipelineError::lexicon(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let lexicon = parse_csv(&contents)?;
        info!(
            path = %self.path.display(),
            words = lexicon.len(),
            multi_category = lexicon.multi_category_words(),
            "Loaded sentiment lexicon"
        );
        Ok(lexicon)
    }
}

/// One `word,sentiment` row.
#[derive(Debug, Deserialize)]
struct Row {
    word: String,
    sentiment: String,
}

/// Parse `word,sentiment` CSV text into a lexicon.
///
/// The first row is treated as a header when its second column isn't a
/// known category. Any malformed row fails the whole load.
pub fn parse_csv(contents: &str) -> Result<Lexicon> {
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(contents.as_bytes());

    let mut pairs: Vec<(String, Category)> = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(index as u64 + 1, |p| p.line());
            PipelineError::lexicon(format!("line {line}: {e}"))
        })?;
        let line = record.position().map_or(index as u64 + 1, |p| p.line());

        if record.len() != 2 {
            return Err(PipelineError::lexicon(format!(
                "line {line}: expected `word,sentiment`, got {} fields",
                record.len()
            )));
        }
        let row: Row = record
            .deserialize(None)
            .map_err(|e| PipelineError::lexicon(format!("line {line}: {e}")))?;

        let parsed = row.sentiment.parse::<Category>();
        if index == 0 && parsed.is_err() {
            continue;
        }
        let category = parsed.map_err(|_| {
            PipelineError::lexicon(format!(
                "line {line}: unknown sentiment category '{}'",
                row.sentiment
            ))
        })?;
        if row.word.is_empty() {
            return Err(PipelineError::lexicon(format!("line {line}: empty word")));
        }
        pairs.push((row.word, category));
    }

    if pairs.is_empty() {
        return Err(PipelineError::lexicon("lexicon file has no entries"));
    }

    Ok(Lexicon::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let lex = parse_csv("word,sentiment\nabandon,negative\nabandon,litigious\nable,positive\n")
            .unwrap();
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.categories("abandon").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_without_header() {
        let lex = parse_csv("loss,negative\n\n  may , uncertainty \n").unwrap();
        assert!(lex.categories("may").unwrap().contains(&Category::Uncertainty));
    }

    #[test]
    fn test_parse_unknown_category_fails() {
        let err = parse_csv("word,sentiment\nloss,sad\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_parse_header_only_is_unavailable() {
        assert!(matches!(
            parse_csv("word,sentiment\n"),
            Err(PipelineError::LexiconUnavailable { .. })
        ));
    }

    #[test]
    fn test_parse_extra_column_fails() {
        assert!(parse_csv("loss,negative,2009\n").is_err());
    }

    #[test]
    fn test_parse_short_row_reports_line() {
        let err = parse_csv("word,sentiment\nloss,negative\nmay\n").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn test_bom_does_not_swallow_first_word() {
        let lex = parse_csv("\u{feff}abandon,negative\nloss,negative\n").unwrap();
        assert!(lex.categories("abandon").is_some());
        assert_eq!(lex.len(), 2);
    }

    #[test]
    fn test_bom_before_header() {
        let lex = parse_csv("\u{feff}word,sentiment\nloss,negative\n").unwrap();
        assert_eq!(lex.len(), 1);
    }

    #[test]
    fn test_quoted_comma_in_word() {
        let lex = parse_csv("word,sentiment\n\"write-off, net\",negative\nloss,negative\n").unwrap();
        assert!(lex.categories("write-off, net").is_some());
    }

    #[test]
    fn test_escaped_quote_in_word() {
        let lex = parse_csv("\"o\"\"clock\",superfluous\n").unwrap();
        assert!(lex
            .categories("o\"clock")
            .unwrap()
            .contains(&Category::Superfluous));
    }
}
