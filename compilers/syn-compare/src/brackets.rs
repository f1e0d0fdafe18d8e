//! Bracket overlap between constituency trees.
//!
//! Trees come from an external bracketed reader; anything that exposes a
//! label and ordered children can be scored.

use crate::error::CompareError;
use crate::pairwise::{aligned, Accumulator, PairwiseScores};
use std::collections::BTreeSet;
use syn_protocol::Corpus;

/// A node of a constituency tree. Leaves are nodes without children and
/// carry the word as their label.
pub trait ConstituencyTree: Sized {
    fn label(&self) -> &str;
    fn children(&self) -> &[Self];
}

/// A labelled span over leaf positions, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bracket {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Collect the brackets under `tree`, numbering leaves from `next_leaf`.
/// Returns the number of the first leaf after this subtree.
fn collect_brackets<T: ConstituencyTree>(tree: &T, next_leaf: usize, out: &mut BTreeSet<Bracket>) -> usize {
    let start = next_leaf;
    let next = if tree.children().is_empty() {
        next_leaf + 1
    } else {
        tree.children()
            .iter()
            .fold(next_leaf, |next, child| collect_brackets(child, next, out))
    };

    out.insert(Bracket {
        start,
        end: next - 1,
        label: tree.label().to_string(),
    });
    next
}

/// Every node's span and label, leaves numbered from 1.
pub fn bracket_set<T: ConstituencyTree>(tree: &T) -> BTreeSet<Bracket> {
    let mut brackets = BTreeSet::new();
    collect_brackets(tree, 1, &mut brackets);
    brackets
}

pub fn leaf_count<T: ConstituencyTree>(tree: &T) -> usize {
    if tree.children().is_empty() {
        1
    } else {
        tree.children().iter().map(leaf_count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketScore {
    pub jaccard: f64,
    pub tokens: usize,
}

/// Jaccard index of the bracket sets of two trees.
pub fn jaccard<T: ConstituencyTree>(a: &T, b: &T) -> BracketScore {
    let brackets_a = bracket_set(a);
    let brackets_b = bracket_set(b);
    let shared = brackets_a.intersection(&brackets_b).count();
    let union = brackets_a.union(&brackets_b).count();

    BracketScore {
        jaccard: shared as f64 / union as f64,
        tokens: leaf_count(a),
    }
}

/// Token-weighted mean Jaccard index across every pair of annotators.
///
/// The one score is reported as UAS, LAS and lbl alike. Positions where the
/// annotators' trees cover different numbers of leaves are counted as
/// ignored.
pub fn pairwise_jaccard<T: ConstituencyTree>(corpora: &[Corpus<T>]) -> Result<PairwiseScores, CompareError> {
    let mut acc = Accumulator::default();

    for (index, trees) in aligned(corpora).enumerate() {
        if trees.len() < 2 {
            continue;
        }

        let tokens = leaf_count(trees[0]);
        if trees[1..].iter().any(|tree| leaf_count(*tree) != tokens) {
            log::warn!("Ignoring tree {}: annotators disagree on the number of leaves", index + 1);
            acc.ignored += 1;
            continue;
        }

        let mut sum = 0.0;
        let mut pairs = 0usize;
        for (i, a) in trees.iter().enumerate() {
            for b in &trees[i + 1..] {
                sum += jaccard(*a, *b).jaccard;
                pairs += 1;
            }
        }

        let weighted = tokens as f64 * sum / pairs as f64;
        acc.uas += weighted;
        acc.las += weighted;
        acc.lbl += weighted;
        acc.tokens += tokens;
        acc.compared += 1;
    }

    acc.finish()
}
