use thiserror::Error;

/// A sentence whose head columns do not describe a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("token {token} points at head {head}, but the sentence only has positions 0..{len}")]
    HeadOutOfRange { token: usize, head: usize, len: usize },

    #[error("token {token} lies on a cycle of head references")]
    Cycle { token: usize },
}
