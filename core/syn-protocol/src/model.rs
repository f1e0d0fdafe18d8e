use crate::error::StructureError;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row of a dependency-annotated sentence.
///
/// `head` and `phead` are positions in the owning [`Sentence::tokens`];
/// position 0 is the synthetic root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub id: u32,
    pub word: Option<String>,
    pub lemma: Option<String>,
    pub cpos: Option<String>,
    pub pos: Option<String>,
    pub feats: Vec<String>,
    pub head: Option<usize>,
    pub deprel: Option<String>,
    pub phead: Option<usize>,
    pub prel: Option<String>,

    /// Dependents of this token, in the order they were attached.
    pub children: Vec<usize>,
}

impl Token {
    /// The synthetic root every sentence starts with.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.id == 0
    }

    fn attach(&mut self, child: usize) {
        self.children.push(child);
    }
}

/// A sentence: the synthetic root, the annotated tokens in file order, and
/// any comment lines that preceded them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sentence {
    pub tokens: Vec<Token>,
    pub comments: Vec<String>,
}

impl Default for Sentence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sentence {
    pub fn new() -> Self {
        Self {
            tokens: vec![Token::root()],
            comments: Vec::new(),
        }
    }

    pub fn push_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Wire every token into the child list of its head.
    ///
    /// A token without a head hangs off the root. Heads are validated before
    /// any edge is added, so a failed call leaves the sentence unchanged.
    /// Calling it again rebuilds the child lists from scratch.
    pub fn finish(&mut self) -> Result<(), StructureError> {
        let len = self.tokens.len();
        for (index, token) in self.tokens.iter().enumerate().skip(1) {
            let head = token.head.unwrap_or(0);
            if head >= len {
                return Err(StructureError::HeadOutOfRange { token: index, head, len });
            }
        }

        for token in &mut self.tokens {
            token.children.clear();
        }
        for index in 1..len {
            let head = self.tokens[index].head.unwrap_or(0);
            self.tokens[head].attach(index);
        }
        Ok(())
    }

    /// `None` only for a sentence assembled by hand without its root.
    pub fn root(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// The annotated tokens, root excluded.
    pub fn words(&self) -> &[Token] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    pub fn word_count(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    pub fn children(&self, index: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens
            .get(index)
            .into_iter()
            .flat_map(|token| token.children.iter())
            .map(move |&child| &self.tokens[child])
    }

    /// Reject head chains that loop back on themselves.
    ///
    /// `finish` happily wires a cycle, which leaves its members unreachable
    /// from the root; callers that need a real tree check here.
    pub fn check_acyclic(&self) -> Result<(), StructureError> {
        let mut graph = DiGraph::<usize, ()>::with_capacity(self.tokens.len(), self.tokens.len());
        let nodes: Vec<_> = (0..self.tokens.len()).map(|i| graph.add_node(i)).collect();

        for (index, token) in self.tokens.iter().enumerate().skip(1) {
            let head = token.head.unwrap_or(0);
            if let Some(&from) = nodes.get(head) {
                graph.add_edge(from, nodes[index], ());
            }
        }

        toposort(&graph, None)
            .map(|_| ())
            .map_err(|cycle| StructureError::Cycle { token: graph[cycle.node_id()] })
    }
}
