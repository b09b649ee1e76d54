// Lexicon source trait — where the word → category mapping comes from.
//
// The pipeline only ever sees a loaded Lexicon. Anything that can produce
// one (a CSV on disk, a fixture in a test) sits behind this trait.

use super::Lexicon;
use crate::error::Result;

/// Supplies a fully loaded lexicon, or `LexiconUnavailable` if it can't.
///
/// Implementations must never hand back an empty lexicon in place of a
/// failure.
pub trait LexiconSource {
    fn load(&self) -> Result<Lexicon>;
}

/// A lexicon that is already in memory.
pub struct StaticLexicon(pub Lexicon);

impl LexiconSource for StaticLexicon {
    fn load(&self) -> Result<Lexicon> {
        if self.0.is_empty() {
            return Err(crate::error::PipelineError::lexicon("lexicon has no entries"));
        }
        Ok(self.0.clone())
    }
}
