use std::fmt;
use thiserror::Error;

/// What a length mismatch was measured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Sentence counts of two corpora.
    Corpora,
    /// Token counts of two sentences.
    Sentences,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Corpora => write!(f, "corpora"),
            Unit::Sentences => write!(f, "sentences"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("can't compare {unit} of different lengths ({left} vs. {right})")]
    LengthMismatch { unit: Unit, left: usize, right: usize },

    #[error("sentence {index}")]
    AtSentence {
        index: usize,
        #[source]
        source: Box<CompareError>,
    },

    #[error("{corpus} has no annotation at position {index}")]
    MissingSentence { corpus: String, index: usize },

    #[error("nothing to compare: no tokens were scored ({ignored} sentences ignored)")]
    Empty { ignored: usize },
}

impl CompareError {
    /// True for tokenisation or corpus-size discrepancies, however deeply
    /// they are wrapped.
    pub fn is_length_mismatch(&self) -> bool {
        match self {
            CompareError::LengthMismatch { .. } => true,
            CompareError::AtSentence { source, .. } => source.is_length_mismatch(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric: {0} (expected plain, diff or norm)")]
pub struct UnknownMetric(pub String);
