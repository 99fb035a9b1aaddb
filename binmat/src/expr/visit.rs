//! Reductions that walk the packed words of an expression.

use crate::BinaryExpr;
use crate::bit::{WORD_BIT_LEN, Word, low_mask};
use crate::expr::valid_bits_in_word;

/// Consumes the words of an expression in order.
///
/// `valid_bits` is the number of low bits of `word` that belong to the expression; it is
/// [`WORD_BIT_LEN`] for every word but possibly the last. Higher bits are arbitrary and must be
/// masked by the visitor.
pub trait WordVisitor {
    type Output;

    fn visit(&mut self, word: Word, valid_bits: usize);

    /// Once true, the remaining words cannot change the output and are skipped.
    fn is_decided(&self) -> bool {
        false
    }

    fn finish(self) -> Self::Output;
}

/// Feeds every word of `expr` to `visitor`, stopping early once the visitor is decided.
pub fn visit_words<E, V>(expr: &E, mut visitor: V) -> V::Output
where
    E: BinaryExpr + ?Sized,
    V: WordVisitor,
{
    let len = expr.len();
    for index in 0..expr.word_count() {
        visitor.visit(expr.word(index), valid_bits_in_word(len, index));
        if visitor.is_decided() {
            break;
        }
    }
    visitor.finish()
}

#[derive(Debug)]
pub struct AllVisitor {
    result: bool,
}

impl Default for AllVisitor {
    fn default() -> Self {
        Self { result: true }
    }
}

impl WordVisitor for AllVisitor {
    type Output = bool;

    #[inline]
    fn visit(&mut self, word: Word, valid_bits: usize) {
        self.result &= !(word | !low_mask(valid_bits)) == 0;
    }

    #[inline]
    fn is_decided(&self) -> bool {
        !self.result
    }

    fn finish(self) -> bool {
        self.result
    }
}

#[derive(Debug, Default)]
pub struct AnyVisitor {
    result: bool,
}

impl WordVisitor for AnyVisitor {
    type Output = bool;

    #[inline]
    fn visit(&mut self, word: Word, valid_bits: usize) {
        self.result |= (word & low_mask(valid_bits)) != 0;
    }

    #[inline]
    fn is_decided(&self) -> bool {
        self.result
    }

    fn finish(self) -> bool {
        self.result
    }
}

#[derive(Debug, Default)]
pub struct CountOnesVisitor {
    count: usize,
}

impl WordVisitor for CountOnesVisitor {
    type Output = usize;

    #[inline]
    fn visit(&mut self, word: Word, valid_bits: usize) {
        self.count += (word & low_mask(valid_bits)).count_ones() as usize;
    }

    fn finish(self) -> usize {
        self.count
    }
}

/// Iterator over the `(row, column)` positions of the true elements of an expression.
pub struct Support<'life, E: ?Sized> {
    expr: &'life E,
    len: usize,
    column_count: usize,
    next_word: usize,
    pending: Word,
    pending_base: usize,
}

impl<'life, E: BinaryExpr + ?Sized> Support<'life, E> {
    pub fn new(expr: &'life E) -> Self {
        Self {
            expr,
            len: expr.len(),
            column_count: expr.column_count(),
            next_word: 0,
            pending: 0,
            pending_base: 0,
        }
    }
}

impl<E: BinaryExpr + ?Sized> Iterator for Support<'_, E> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending == 0 {
            if self.next_word >= self.expr.word_count() {
                return None;
            }
            let valid_bits = valid_bits_in_word(self.len, self.next_word);
            self.pending = self.expr.word(self.next_word) & low_mask(valid_bits);
            self.pending_base = self.next_word * WORD_BIT_LEN;
            self.next_word += 1;
        }
        let bit = self.pending.trailing_zeros() as usize;
        self.pending &= self.pending - 1;
        let index = self.pending_base + bit;
        Some((index / self.column_count, index % self.column_count))
    }
}
