pub mod storage;
pub use storage::PackedStorage;

pub type Word = u64;

/// Number of matrix elements packed into one [`Word`].
pub const WORD_BIT_LEN: usize = Word::BITS as usize;

/// Number of words needed to hold `bit_count` bits.
#[inline]
#[must_use]
pub const fn word_count_for(bit_count: usize) -> usize {
    bit_count.div_ceil(WORD_BIT_LEN)
}

/// Word with the lowest `bit_count` bits set.
#[inline]
#[must_use]
pub const fn low_mask(bit_count: usize) -> Word {
    if bit_count >= WORD_BIT_LEN {
        Word::MAX
    } else {
        (1 << bit_count) - 1
    }
}

/// Location of a single bit inside a word slice.
#[must_use]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct BitAddress {
    pub word_index: usize,
    pub bitmask: Word,
}

impl BitAddress {
    pub const fn of(bit_index: usize) -> Self {
        Self {
            word_index: bit_index / WORD_BIT_LEN,
            bitmask: 1 << (bit_index % WORD_BIT_LEN),
        }
    }

    #[inline]
    #[must_use]
    pub fn value_in(&self, words: &[Word]) -> bool {
        (words[self.word_index] & self.bitmask) != 0
    }

    #[inline]
    pub fn assign_in(&self, words: &mut [Word], to: bool) {
        let word = &mut words[self.word_index];
        if to {
            *word |= self.bitmask;
        } else {
            *word &= !self.bitmask;
        }
    }

    #[inline]
    pub fn flip_in(&self, words: &mut [Word]) {
        words[self.word_index] ^= self.bitmask;
    }
}

/// Reads `bit_count` consecutive bits starting at bit `start` of the word sequence produced
/// by `word_at`, returned in the low bits of the result.
///
/// At most two words are read. Bits past `bit_count` are zero.
///
/// # Panics
///
/// Panics if `bit_count` exceeds [`WORD_BIT_LEN`].
#[must_use]
pub fn extract_bits(word_at: impl Fn(usize) -> Word, start: usize, bit_count: usize) -> Word {
    assert!(bit_count <= WORD_BIT_LEN);
    if bit_count == 0 {
        return 0;
    }
    let word_index = start / WORD_BIT_LEN;
    let offset = start % WORD_BIT_LEN;
    let mut bits = word_at(word_index) >> offset;
    if offset != 0 && offset + bit_count > WORD_BIT_LEN {
        bits |= word_at(word_index + 1) << (WORD_BIT_LEN - offset);
    }
    bits & low_mask(bit_count)
}
