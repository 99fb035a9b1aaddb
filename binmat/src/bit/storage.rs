use crate::bit::{BitAddress, Word, WORD_BIT_LEN, low_mask, word_count_for};
use derive_more::Deref;

/// Contiguous words holding a row-major bit sequence.
///
/// Storage does not know its logical length; owners pass it where needed. Bits beyond the
/// owner's logical length are kept at zero by every method that takes a `bit_count`.
#[must_use]
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Deref)]
pub struct PackedStorage {
    words: Vec<Word>,
}

impl PackedStorage {
    pub fn zeroed(bit_count: usize) -> Self {
        Self {
            words: vec![0; word_count_for(bit_count)],
        }
    }

    pub fn filled(bit_count: usize, value: bool) -> Self {
        let mut storage = Self::zeroed(bit_count);
        storage.fill(bit_count, value);
        storage
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    #[inline]
    #[must_use]
    pub fn word(&self, index: usize) -> Word {
        self.words[index]
    }

    #[inline]
    pub fn word_mut(&mut self, index: usize) -> &mut Word {
        &mut self.words[index]
    }

    #[inline]
    #[must_use]
    pub fn read(&self, bit_index: usize) -> bool {
        BitAddress::of(bit_index).value_in(&self.words)
    }

    #[inline]
    pub fn write(&mut self, bit_index: usize, to: bool) {
        BitAddress::of(bit_index).assign_in(&mut self.words, to);
    }

    #[inline]
    pub fn flip(&mut self, bit_index: usize) {
        BitAddress::of(bit_index).flip_in(&mut self.words);
    }

    /// Drops the current content and allocates zeroed words for `bit_count` bits.
    pub fn reallocate(&mut self, bit_count: usize) {
        self.words = vec![0; word_count_for(bit_count)];
    }

    pub fn fill(&mut self, bit_count: usize, value: bool) {
        self.words.fill(if value { Word::MAX } else { 0 });
        self.clear_tail(bit_count);
    }

    /// Zeroes the bits of the last word that lie at or beyond `bit_count`.
    pub fn clear_tail(&mut self, bit_count: usize) {
        let remaining = bit_count % WORD_BIT_LEN;
        if remaining == 0 {
            return;
        }
        if let Some(last) = self.words.last_mut() {
            *last &= low_mask(remaining);
        }
    }
}
