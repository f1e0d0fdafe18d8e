use crate::error::{CompareError, Unit};
use std::ops::AddAssign;
use syn_protocol::{Corpus, Sentence, Slot};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw agreement counts between two annotations of the same tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tally {
    pub tokens: usize,
    /// Same head.
    pub uas: usize,
    /// Same head and same label.
    pub las: usize,
    /// Same label, whatever the head.
    pub lbl: usize,
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.tokens += other.tokens;
        self.uas += other.uas;
        self.las += other.las;
        self.lbl += other.lbl;
    }
}

/// Attachment and label agreement as fractions of the tokens compared.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccuracyScores {
    pub uas: f64,
    pub las: f64,
    pub lbl: f64,
}

impl AccuracyScores {
    /// `None` when no token was scored.
    pub(crate) fn normalise(uas: f64, las: f64, lbl: f64, tokens: usize) -> Option<Self> {
        if tokens == 0 {
            return None;
        }
        let tokens = tokens as f64;
        Some(Self {
            uas: uas / tokens,
            las: las / tokens,
            lbl: lbl / tokens,
        })
    }
}

/// Count agreement between two annotations of one sentence, token by token.
///
/// Unset heads and labels compare equal to each other.
pub fn compare_sentences(a: &Sentence, b: &Sentence) -> Result<Tally, CompareError> {
    if a.tokens.len() != b.tokens.len() {
        return Err(CompareError::LengthMismatch {
            unit: Unit::Sentences,
            left: a.tokens.len(),
            right: b.tokens.len(),
        });
    }

    let mut tally = Tally::default();
    for (ta, tb) in a.words().iter().zip(b.words()) {
        tally.tokens += 1;
        let same_label = ta.deprel == tb.deprel;
        if ta.head == tb.head {
            tally.uas += 1;
            if same_label {
                tally.las += 1;
            }
        }
        if same_label {
            tally.lbl += 1;
        }
    }
    Ok(tally)
}

fn present_at<'a>(corpus: &'a Corpus, index: usize, slot: &'a Slot<Sentence>) -> Result<&'a Sentence, CompareError> {
    slot.as_present().ok_or_else(|| CompareError::MissingSentence {
        corpus: corpus.name.clone(),
        index,
    })
}

/// Score two complete annotations of the same corpus against each other.
///
/// Strict: a differing sentence count, a tokenisation difference in any
/// sentence, or a gap on either side aborts the comparison.
pub fn compare_corpora(a: &Corpus, b: &Corpus) -> Result<AccuracyScores, CompareError> {
    if a.len() != b.len() {
        return Err(CompareError::LengthMismatch {
            unit: Unit::Corpora,
            left: a.len(),
            right: b.len(),
        });
    }

    let mut total = Tally::default();
    for (index, (sa, sb)) in a.iter().zip(b.iter()).enumerate() {
        let sa = present_at(a, index, sa)?;
        let sb = present_at(b, index, sb)?;
        total += compare_sentences(sa, sb).map_err(|source| CompareError::AtSentence {
            index: index + 1,
            source: Box::new(source),
        })?;
    }

    log::info!(
        "Compared {} against {}: {} sentences, {} tokens",
        a.name,
        b.name,
        a.len(),
        total.tokens
    );
    AccuracyScores::normalise(total.uas as f64, total.las as f64, total.lbl as f64, total.tokens)
        .ok_or(CompareError::Empty { ignored: 0 })
}
