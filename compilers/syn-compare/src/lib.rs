//! Agreement scoring between annotations of the same sentences.
//!
//! - [`compare_sentences`] / [`compare_corpora`]: attachment and label
//!   agreement between two complete annotations.
//! - [`pairwise_compare`]: the same scores averaged over any number of
//!   annotators, tolerating gaps and counting tokenisation mismatches.
//! - [`pairwise_jaccard`]: bracket overlap for constituency annotations.
//! - [`distance`]: hooks for tree edit distance and agreement coefficients.

pub mod accuracy;
pub mod brackets;
pub mod distance;
pub mod error;
pub mod pairwise;

pub use accuracy::{compare_corpora, compare_sentences, AccuracyScores, Tally};
pub use brackets::{bracket_set, jaccard, pairwise_jaccard, Bracket, BracketScore, ConstituencyTree};
pub use distance::{dependency_alpha, AgreementCoefficient, Metric, TreeEditDistance};
pub use error::{CompareError, Unit, UnknownMetric};
pub use pairwise::{pairwise_compare, PairwiseScores};
