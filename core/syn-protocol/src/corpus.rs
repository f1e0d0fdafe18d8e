use crate::model::Sentence;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Anything whose size can be measured in tokens.
///
/// The aggregator and the distance metrics only need this much from a
/// sentence, so they work for dependency and constituency data alike.
pub trait TokenCount {
    fn token_count(&self) -> usize;
}

impl TokenCount for Sentence {
    fn token_count(&self) -> usize {
        self.word_count()
    }
}

/// One position of an aligned corpus: an annotation, or a gap where this
/// annotator has no data for the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Slot<T> {
    Missing,
    Present(T),
}

impl<T> Slot<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Slot::Present(_))
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            Slot::Present(item) => Some(item),
            Slot::Missing => None,
        }
    }

    pub fn into_present(self) -> Option<T> {
        match self {
            Slot::Present(item) => Some(item),
            Slot::Missing => None,
        }
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(item: Option<T>) -> Self {
        match item {
            Some(item) => Slot::Present(item),
            None => Slot::Missing,
        }
    }
}

/// A named, ordered sequence of annotations.
///
/// Corpora read from a single file never contain gaps; corpora assembled
/// from several documents may, and keep positional alignment with the
/// other annotators through them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corpus<T = Sentence> {
    pub name: String,
    pub slots: Vec<Slot<T>>,
}

impl<T> Corpus<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
        }
    }

    pub fn from_sentences(name: impl Into<String>, sentences: Vec<T>) -> Self {
        Self {
            name: name.into(),
            slots: sentences.into_iter().map(Slot::Present).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot<T>> + '_ {
        self.slots.iter()
    }

    pub fn slots_mut(&mut self) -> &mut [Slot<T>] {
        &mut self.slots
    }

    /// Annotations only, gaps skipped.
    pub fn present(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Slot::as_present)
    }

    pub fn missing_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_present()).count()
    }

    pub fn extend_present<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.slots.extend(items.into_iter().map(Slot::Present));
    }

    pub fn extend_missing(&mut self, count: usize) {
        self.slots.extend((0..count).map(|_| Slot::Missing));
    }
}

impl<'a, T> IntoIterator for &'a Corpus<T> {
    type Item = &'a Slot<T>;
    type IntoIter = std::slice::Iter<'a, Slot<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaps_keep_alignment() {
        let mut corpus: Corpus<u32> = Corpus::new("ann1");
        corpus.extend_present(vec![1, 2]);
        corpus.extend_missing(3);
        corpus.extend_present(vec![6]);

        assert_eq!(corpus.len(), 6);
        assert_eq!(corpus.missing_count(), 3);
        assert_eq!(corpus.present().copied().collect::<Vec<_>>(), vec![1, 2, 6]);
        assert_eq!(corpus.get(5), Some(&Slot::Present(6)));
        assert_eq!(corpus.get(3), Some(&Slot::Missing));
    }

    #[test]
    fn test_slot_replacement() {
        let mut corpus = Corpus::from_sentences("doc", vec!["a", "b"]);
        corpus.slots_mut()[0] = Slot::Missing;
        assert_eq!(corpus.present().collect::<Vec<_>>(), vec![&"b"]);
        assert_eq!(Slot::from(None::<u8>), Slot::Missing);
    }

    #[test]
    fn test_sentence_token_count_excludes_root() {
        assert_eq!(Sentence::new().token_count(), 0);
    }
}
