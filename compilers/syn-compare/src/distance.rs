//! Tree distances and the agreement coefficient built on them.
//!
//! Neither the edit distance nor the coefficient is computed here: callers
//! plug in implementations through [`TreeEditDistance`] and
//! [`AgreementCoefficient`], and this module supplies the node views,
//! label distance and squared metrics that connect them to sentences.

use crate::brackets::{leaf_count, ConstituencyTree};
use crate::error::UnknownMetric;
use std::fmt;
use std::str::FromStr;
use syn_protocol::{Corpus, Sentence, Token};

/// An ordered-tree edit distance.
pub trait TreeEditDistance {
    fn distance<N, L, C, D>(&self, a: N, b: N, label_of: L, children_of: C, label_distance: D) -> f64
    where
        N: Clone,
        L: Fn(&N) -> String,
        C: Fn(&N) -> Vec<N>,
        D: Fn(&str, &str) -> f64;
}

/// An inter-annotator agreement coefficient (e.g. Krippendorff's alpha)
/// over aligned annotations, given a squared distance between two of them.
pub trait AgreementCoefficient {
    fn alpha<T, M>(&self, items: &[Corpus<T>], metric: M) -> f64
    where
        M: Fn(&T, &T) -> f64;
}

/// 0 for identical labels, 1 otherwise.
pub fn label_distance(a: &str, b: &str) -> f64 {
    if a == b {
        0.0
    } else {
        1.0
    }
}

/// A token seen as a node of its sentence's dependency tree.
#[derive(Debug, Clone, Copy)]
pub struct DependencyNode<'a> {
    sentence: &'a Sentence,
    index: usize,
}

impl<'a> DependencyNode<'a> {
    pub fn root(sentence: &'a Sentence) -> Self {
        Self { sentence, index: 0 }
    }

    /// `None` only for the root of a sentence that has no tokens at all.
    pub fn token(&self) -> Option<&'a Token> {
        self.sentence.tokens.get(self.index)
    }

    /// The relation label, empty when unset.
    pub fn label(&self) -> &'a str {
        self.token().and_then(|token| token.deprel.as_deref()).unwrap_or("")
    }

    pub fn children(&self) -> Vec<Self> {
        let sentence = self.sentence;
        self.token()
            .map(|token| token.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&index| Self { sentence, index })
            .collect()
    }
}

/// Edit distance between the dependency trees of two sentences, labelled
/// by relation.
pub fn dependency_delta<E: TreeEditDistance>(ted: &E, a: &Sentence, b: &Sentence) -> f64 {
    ted.distance(
        DependencyNode::root(a),
        DependencyNode::root(b),
        |node| node.label().to_string(),
        |node| node.children(),
        label_distance,
    )
}

fn tree_label<T: ConstituencyTree>(node: &&T) -> String {
    node.label().to_string()
}

fn tree_children<'t, T: ConstituencyTree>(node: &&'t T) -> Vec<&'t T> {
    let node: &'t T = *node;
    node.children().iter().collect()
}

/// Edit distance between two constituency trees, labelled by category.
pub fn constituency_delta<E: TreeEditDistance, T: ConstituencyTree>(ted: &E, a: &T, b: &T) -> f64 {
    ted.distance(a, b, tree_label::<T>, tree_children::<T>, label_distance)
}

/// How an edit distance is turned into the squared difference the
/// agreement coefficient consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// `delta²`
    Plain,
    /// `(delta - |len_a - len_b|)²`, discounting edits forced by length.
    Diff,
    /// `(delta / (len_a + len_b))²`
    Norm,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Plain, Metric::Diff, Metric::Norm];

    pub fn score(self, delta: f64, len_a: usize, len_b: usize) -> f64 {
        let value = match self {
            Metric::Plain => delta,
            Metric::Diff => delta - (len_a as f64 - len_b as f64).abs(),
            Metric::Norm => delta / (len_a + len_b) as f64,
        };
        value * value
    }

    /// Squared distance between two dependency annotations. Lengths count
    /// the synthetic root.
    pub fn dependency<'e, E: TreeEditDistance + 'e>(self, ted: &'e E) -> impl Fn(&Sentence, &Sentence) -> f64 + 'e {
        move |a: &Sentence, b: &Sentence| self.score(dependency_delta(ted, a, b), a.tokens.len(), b.tokens.len())
    }

    /// Squared distance between two constituency annotations; lengths are
    /// leaf counts.
    pub fn constituency<'e, E: TreeEditDistance + 'e, T: ConstituencyTree + 'e>(
        self,
        ted: &'e E,
    ) -> impl Fn(&T, &T) -> f64 + 'e {
        move |a: &T, b: &T| self.score(constituency_delta(ted, a, b), leaf_count(a), leaf_count(b))
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Plain => write!(f, "plain"),
            Metric::Diff => write!(f, "diff"),
            Metric::Norm => write!(f, "norm"),
        }
    }
}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Metric::Plain),
            "diff" => Ok(Metric::Diff),
            "norm" => Ok(Metric::Norm),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// Agreement coefficient over dependency corpora under one metric.
pub fn dependency_alpha<A, E>(coefficient: &A, ted: &E, corpora: &[Corpus], metric: Metric) -> f64
where
    A: AgreementCoefficient,
    E: TreeEditDistance,
{
    coefficient.alpha(corpora, metric.dependency(ted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn_conll::parse_sentence;
    use syn_protocol::Slot;

    /// Counts label mismatches along a simultaneous preorder walk, plus one
    /// per node present in only one tree. Enough to exercise the plumbing.
    struct PreorderDistance;

    impl PreorderDistance {
        fn walk<N, L, C, D>(a: Option<&N>, b: Option<&N>, label_of: &L, children_of: &C, label_distance: &D) -> f64
        where
            L: Fn(&N) -> String,
            C: Fn(&N) -> Vec<N>,
            D: Fn(&str, &str) -> f64,
        {
            match (a, b) {
                (None, None) => 0.0,
                (Some(only), None) | (None, Some(only)) => {
                    let below: f64 = children_of(only)
                        .iter()
                        .map(|c| Self::walk(Some(c), None, label_of, children_of, label_distance))
                        .sum();
                    1.0 + below
                }
                (Some(a), Some(b)) => {
                    let here = label_distance(&label_of(a), &label_of(b));
                    let ca = children_of(a);
                    let cb = children_of(b);
                    let width = ca.len().max(cb.len());
                    let below: f64 = (0..width)
                        .map(|i| Self::walk(ca.get(i), cb.get(i), label_of, children_of, label_distance))
                        .sum();
                    here + below
                }
            }
        }
    }

    impl TreeEditDistance for PreorderDistance {
        fn distance<N, L, C, D>(&self, a: N, b: N, label_of: L, children_of: C, label_distance: D) -> f64
        where
            N: Clone,
            L: Fn(&N) -> String,
            C: Fn(&N) -> Vec<N>,
            D: Fn(&str, &str) -> f64,
        {
            Self::walk(Some(&a), Some(&b), &label_of, &children_of, &label_distance)
        }
    }

    /// Mean metric over all present pairs at each position.
    struct MeanDisagreement;

    impl AgreementCoefficient for MeanDisagreement {
        fn alpha<T, M>(&self, items: &[Corpus<T>], metric: M) -> f64
        where
            M: Fn(&T, &T) -> f64,
        {
            let mut total = 0.0;
            let mut pairs = 0;
            let depth = items.iter().map(Corpus::len).min().unwrap_or(0);
            for index in 0..depth {
                let present: Vec<&T> = items.iter().filter_map(|c| c.slots[index].as_present()).collect();
                for (i, a) in present.iter().enumerate() {
                    for b in &present[i + 1..] {
                        total += metric(*a, *b);
                        pairs += 1;
                    }
                }
            }
            total / pairs as f64
        }
    }

    fn sentence(text: &str) -> Sentence {
        parse_sentence(text).unwrap()
    }

    #[test]
    fn test_dependency_node_walk() {
        let s = sentence("1\ta\t_\t_\t_\t_\t2\tdet\t_\t_\n2\tb\t_\t_\t_\t_\t0\troot\t_\t_\n");
        let root = DependencyNode::root(&s);
        assert_eq!(root.label(), "");
        let children = root.children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].label(), "root");
        assert_eq!(children[0].children()[0].token().map(|t| t.id), Some(1));
    }

    #[test]
    fn test_rootless_sentence_is_a_bare_node() {
        let empty = Sentence { tokens: Vec::new(), comments: Vec::new() };
        let root = DependencyNode::root(&empty);
        assert!(root.token().is_none());
        assert_eq!(root.label(), "");
        assert!(root.children().is_empty());
        assert_eq!(dependency_delta(&PreorderDistance, &empty, &empty), 0.0);
    }

    #[test]
    fn test_dependency_delta_uses_labels() {
        let a = sentence("1\ta\t_\t_\t_\t_\t2\tdet\t_\t_\n2\tb\t_\t_\t_\t_\t0\troot\t_\t_\n");
        let b = sentence("1\ta\t_\t_\t_\t_\t2\tamod\t_\t_\n2\tb\t_\t_\t_\t_\t0\troot\t_\t_\n");
        assert_eq!(dependency_delta(&PreorderDistance, &a, &a), 0.0);
        assert_eq!(dependency_delta(&PreorderDistance, &a, &b), 1.0);
    }

    #[test]
    fn test_metric_scores() {
        assert_eq!(Metric::Plain.score(3.0, 4, 6), 9.0);
        assert_eq!(Metric::Diff.score(3.0, 4, 6), 1.0);
        assert_eq!(Metric::Norm.score(5.0, 4, 6), 0.25);
    }

    #[test]
    fn test_metric_names() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>(), Ok(metric));
        }
        assert_eq!("cosine".parse::<Metric>(), Err(UnknownMetric("cosine".to_string())));
    }

    #[test]
    fn test_dependency_alpha_plumbing() {
        let a = sentence("1\ta\t_\t_\t_\t_\t0\troot\t_\t_\n");
        let b = sentence("1\ta\t_\t_\t_\t_\t0\tdep\t_\t_\n");
        let corpora = vec![
            Corpus { name: "x".into(), slots: vec![Slot::Present(a.clone()), Slot::Present(a.clone())] },
            Corpus { name: "y".into(), slots: vec![Slot::Present(b), Slot::Missing] },
        ];
        // Only the first position has a pair; its delta is 1.
        assert_eq!(dependency_alpha(&MeanDisagreement, &PreorderDistance, &corpora, Metric::Plain), 1.0);
        assert_eq!(dependency_alpha(&MeanDisagreement, &PreorderDistance, &corpora, Metric::Norm), 0.0625);
    }

    #[test]
    fn test_constituency_metric() {
        #[derive(Debug)]
        struct Node(&'static str, Vec<Node>);
        impl ConstituencyTree for Node {
            fn label(&self) -> &str {
                self.0
            }
            fn children(&self) -> &[Self] {
                &self.1
            }
        }

        let a = Node("S", vec![Node("x", vec![]), Node("y", vec![])]);
        let b = Node("S", vec![Node("x", vec![])]);
        let metric = Metric::Diff.constituency::<_, Node>(&PreorderDistance);
        // delta 1 (one extra leaf), length difference 1.
        assert_eq!(metric(&a, &b), 0.0);
        assert_eq!(constituency_delta(&PreorderDistance, &a, &b), 1.0);
    }
}
