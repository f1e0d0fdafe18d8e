use crate::accuracy::{compare_sentences, AccuracyScores, Tally};
use crate::error::CompareError;
use syn_protocol::{Corpus, Sentence};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Agreement averaged over every pair of annotators, plus how many aligned
/// positions were left out because the annotators tokenised differently.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairwiseScores {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub scores: AccuracyScores,
    pub ignored: usize,
    pub compared: usize,
}

/// The annotations present at each aligned position.
///
/// Walks as far as the shortest corpus, the way a zip would.
pub(crate) fn aligned<T>(corpora: &[Corpus<T>]) -> impl Iterator<Item = Vec<&T>> + '_ {
    let depth = corpora.iter().map(Corpus::len).min().unwrap_or(0);
    if corpora.iter().any(|corpus| corpus.len() != depth) {
        log::warn!(
            "Corpora differ in length; only the first {} positions are compared",
            depth
        );
    }
    (0..depth).map(move |index| {
        corpora
            .iter()
            .filter_map(|corpus| corpus.slots[index].as_present())
            .collect()
    })
}

/// Per-position running sums, each already averaged over its annotator pairs.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    pub uas: f64,
    pub las: f64,
    pub lbl: f64,
    pub tokens: usize,
    pub ignored: usize,
    pub compared: usize,
}

impl Accumulator {
    /// Fails with `Empty` when nothing was scored, still reporting how many
    /// positions were ignored on the way.
    pub fn finish(self) -> Result<PairwiseScores, CompareError> {
        let scores = AccuracyScores::normalise(self.uas, self.las, self.lbl, self.tokens)
            .ok_or(CompareError::Empty { ignored: self.ignored })?;
        Ok(PairwiseScores {
            scores,
            ignored: self.ignored,
            compared: self.compared,
        })
    }
}

fn number_of_pairs(k: usize) -> usize {
    k * (k - 1) / 2
}

/// Sum of pairwise tallies for one position; fails on the first pair that
/// was tokenised differently.
fn pair_tallies(sentences: &[&Sentence]) -> Result<Tally, CompareError> {
    let mut sum = Tally::default();
    for (i, a) in sentences.iter().enumerate() {
        for b in &sentences[i + 1..] {
            sum += compare_sentences(a, b)?;
        }
    }
    Ok(sum)
}

/// Average attachment agreement across any number of annotators.
///
/// Each aligned position with at least two annotations contributes its
/// pairwise tallies averaged over the C(k,2) pairs; the final scores divide
/// those by the token count of the positions used. A position whose
/// annotations differ in token count is skipped and counted in `ignored`.
/// Any other error aborts.
pub fn pairwise_compare(corpora: &[Corpus]) -> Result<PairwiseScores, CompareError> {
    let mut acc = Accumulator::default();

    for (index, sentences) in aligned(corpora).enumerate() {
        if sentences.len() < 2 {
            continue;
        }

        let sum = match pair_tallies(&sentences) {
            Ok(sum) => sum,
            Err(CompareError::LengthMismatch { left, right, .. }) => {
                log::warn!(
                    "Ignoring sentence {}: annotators disagree on tokenisation ({} vs. {} tokens)",
                    index + 1,
                    left,
                    right
                );
                acc.ignored += 1;
                continue;
            }
            Err(other) => return Err(other),
        };

        let pairs = number_of_pairs(sentences.len()) as f64;
        acc.uas += sum.uas as f64 / pairs;
        acc.las += sum.las as f64 / pairs;
        acc.lbl += sum.lbl as f64 / pairs;
        acc.tokens += sentences[0].word_count();
        acc.compared += 1;
    }

    log::info!(
        "Pairwise comparison of {} annotators: {} sentences compared, {} ignored",
        corpora.len(),
        acc.compared,
        acc.ignored
    );
    acc.finish()
}
