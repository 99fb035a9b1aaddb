pub mod visit;

use crate::bit::{WORD_BIT_LEN, Word, word_count_for};
use crate::error::{Error, check_in_bounds, check_same_shape, or_panic};
use crate::matrix::{BinaryMatrix, Block};
use sorted_iter::SortedIterator;
use sorted_iter::assume::AssumeSortedByItemExt;
use visit::Support;

/// A boolean matrix that can be read element by element and word by word.
///
/// Implemented by the owning [`BinaryMatrix`] and by the lazy nodes built on top of it
/// ([`Negation`], [`BinaryOp`], [`Block`]). Word `k` holds elements `k * 64 .. k * 64 + 64` of
/// the row-major bit sequence of the expression, element `(i, j)` being bit
/// `i * column_count + j`. Bits of the last word beyond [`len`](BinaryExpr::len) are unspecified.
///
/// See also [`BinaryExprMut`].
pub trait BinaryExpr {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;

    /// Element `(row, column)`.
    ///
    /// Unlike [`get`](BinaryExpr::get), out-of-range coordinates are only caught by debug
    /// assertions; the result is unspecified in release builds.
    fn element(&self, row: usize, column: usize) -> bool;

    /// Packed word `index`, for `index < word_count()`.
    fn word(&self, index: usize) -> Word;

    #[inline]
    fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    #[inline]
    fn len(&self) -> usize {
        self.row_count() * self.column_count()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn word_count(&self) -> usize {
        word_count_for(self.len())
    }

    /// # Panics
    ///
    /// Panics if `index` is outside the shape.
    #[track_caller]
    fn get(&self, index: (usize, usize)) -> bool {
        or_panic(check_in_bounds(self.shape(), index));
        self.element(index.0, index.1)
    }

    /// True iff every element is true; vacuously true when empty.
    fn all(&self) -> bool {
        visit::visit_words(self, visit::AllVisitor::default())
    }

    /// True iff at least one element is true.
    fn any(&self) -> bool {
        visit::visit_words(self, visit::AnyVisitor::default())
    }

    fn count_ones(&self) -> usize {
        visit::visit_words(self, visit::CountOnesVisitor::default())
    }

    /// Positions of the true elements in row-major order.
    fn support(&self) -> impl SortedIterator<Item = (usize, usize)> {
        Support::new(self).assume_sorted_by_item()
    }

    /// Materializes the expression into a new owning matrix.
    fn evaluate(&self) -> BinaryMatrix {
        let mut matrix = BinaryMatrix::empty();
        matrix.assign(self);
        matrix
    }

    /// View of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= row_count()`.
    #[track_caller]
    fn row(&self, index: usize) -> Block<&Self> {
        Block::row(self, index)
    }

    /// View of column `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= column_count()`.
    #[track_caller]
    fn column(&self, index: usize) -> Block<&Self> {
        Block::column(self, index)
    }

    /// View of the `ROWS x COLUMNS` block whose top-left element is `start`.
    ///
    /// # Panics
    ///
    /// Panics if the block does not fit.
    #[track_caller]
    fn fixed_block<const ROWS: usize, const COLUMNS: usize>(&self, start: (usize, usize)) -> Block<&Self> {
        Block::fixed::<ROWS, COLUMNS>(self, start)
    }

    /// View of the block of shape `extent` whose top-left element is `start`.
    ///
    /// # Panics
    ///
    /// Panics if the block does not fit.
    #[track_caller]
    fn block(&self, start: (usize, usize), extent: (usize, usize)) -> Block<&Self> {
        Block::new(self, start, extent)
    }
}

/// See also [`BinaryExpr`].
pub trait BinaryExprMut: BinaryExpr {
    /// Writes element `(row, column)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, column)` is outside the shape.
    fn assign_element(&mut self, row: usize, column: usize, to: bool);

    /// # Panics
    ///
    /// Panics if `index` is outside the shape.
    #[track_caller]
    fn assign_index(&mut self, index: (usize, usize), to: bool) {
        self.assign_element(index.0, index.1, to);
    }

    /// # Panics
    ///
    /// Panics if `index` is outside the shape.
    #[track_caller]
    fn set(&mut self, index: (usize, usize)) {
        self.assign_index(index, true);
    }

    /// # Panics
    ///
    /// Panics if `index` is outside the shape.
    #[track_caller]
    fn clear(&mut self, index: (usize, usize)) {
        self.assign_index(index, false);
    }

    /// Flips one element.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the shape.
    #[track_caller]
    fn negate(&mut self, index: (usize, usize)) {
        let value = self.get(index);
        self.assign_element(index.0, index.1, !value);
    }

    /// Writable view of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= row_count()`.
    #[track_caller]
    fn row_mut(&mut self, index: usize) -> Block<&mut Self> {
        Block::row(self, index)
    }

    /// # Panics
    ///
    /// Panics if `index >= column_count()`.
    #[track_caller]
    fn column_mut(&mut self, index: usize) -> Block<&mut Self> {
        Block::column(self, index)
    }

    /// # Panics
    ///
    /// Panics if the block does not fit.
    #[track_caller]
    fn fixed_block_mut<const ROWS: usize, const COLUMNS: usize>(&mut self, start: (usize, usize)) -> Block<&mut Self> {
        Block::fixed::<ROWS, COLUMNS>(self, start)
    }

    /// # Panics
    ///
    /// Panics if the block does not fit.
    #[track_caller]
    fn block_mut(&mut self, start: (usize, usize), extent: (usize, usize)) -> Block<&mut Self> {
        Block::new(self, start, extent)
    }
}

impl<T: BinaryExpr + ?Sized> BinaryExpr for &T {
    #[inline]
    fn row_count(&self) -> usize {
        (**self).row_count()
    }
    #[inline]
    fn column_count(&self) -> usize {
        (**self).column_count()
    }
    #[inline]
    fn element(&self, row: usize, column: usize) -> bool {
        (**self).element(row, column)
    }
    #[inline]
    fn word(&self, index: usize) -> Word {
        (**self).word(index)
    }
}

impl<T: BinaryExpr + ?Sized> BinaryExpr for &mut T {
    #[inline]
    fn row_count(&self) -> usize {
        (**self).row_count()
    }
    #[inline]
    fn column_count(&self) -> usize {
        (**self).column_count()
    }
    #[inline]
    fn element(&self, row: usize, column: usize) -> bool {
        (**self).element(row, column)
    }
    #[inline]
    fn word(&self, index: usize) -> Word {
        (**self).word(index)
    }
}

impl<T: BinaryExprMut + ?Sized> BinaryExprMut for &mut T {
    #[inline]
    fn assign_element(&mut self, row: usize, column: usize, to: bool) {
        (**self).assign_element(row, column, to);
    }
}

/// Boolean function applied element-wise by a [`BinaryOp`], either one bit or one word at a time.
pub trait Combinator: Copy {
    fn bits(left: bool, right: bool) -> bool;
    fn words(left: Word, right: Word) -> Word;
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct And;

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Or;

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Xor;

impl Combinator for And {
    #[inline]
    fn bits(left: bool, right: bool) -> bool {
        left & right
    }
    #[inline]
    fn words(left: Word, right: Word) -> Word {
        left & right
    }
}

impl Combinator for Or {
    #[inline]
    fn bits(left: bool, right: bool) -> bool {
        left | right
    }
    #[inline]
    fn words(left: Word, right: Word) -> Word {
        left | right
    }
}

impl Combinator for Xor {
    #[inline]
    fn bits(left: bool, right: bool) -> bool {
        left ^ right
    }
    #[inline]
    fn words(left: Word, right: Word) -> Word {
        left ^ right
    }
}

/// Lazy element-wise NOT of an expression.
#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Negation<E> {
    operand: E,
}

impl<E: BinaryExpr> Negation<E> {
    pub fn new(operand: E) -> Self {
        Self { operand }
    }

    pub fn into_inner(self) -> E {
        self.operand
    }
}

impl<E: BinaryExpr> BinaryExpr for Negation<E> {
    #[inline]
    fn row_count(&self) -> usize {
        self.operand.row_count()
    }
    #[inline]
    fn column_count(&self) -> usize {
        self.operand.column_count()
    }
    #[inline]
    fn element(&self, row: usize, column: usize) -> bool {
        !self.operand.element(row, column)
    }
    #[inline]
    fn word(&self, index: usize) -> Word {
        !self.operand.word(index)
    }
}

/// Lazy element-wise `F` of two expressions of equal shape.
#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct BinaryOp<L, R, F> {
    left: L,
    right: R,
    combinator: F,
}

impl<L: BinaryExpr, R: BinaryExpr, F: Combinator> BinaryOp<L, R, F> {
    /// # Panics
    ///
    /// Panics if the operands differ in shape.
    #[track_caller]
    pub fn new(left: L, right: R, combinator: F) -> Self {
        or_panic(Self::try_new(left, right, combinator))
    }

    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the operands differ in shape.
    pub fn try_new(left: L, right: R, combinator: F) -> Result<Self, Error> {
        check_same_shape(left.shape(), right.shape())?;
        Ok(Self {
            left,
            right,
            combinator,
        })
    }

    pub fn combinator(&self) -> F {
        self.combinator
    }

    pub fn into_operands(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L: BinaryExpr, R: BinaryExpr, F: Combinator> BinaryExpr for BinaryOp<L, R, F> {
    #[inline]
    fn row_count(&self) -> usize {
        self.left.row_count()
    }
    #[inline]
    fn column_count(&self) -> usize {
        self.left.column_count()
    }
    #[inline]
    fn element(&self, row: usize, column: usize) -> bool {
        F::bits(self.left.element(row, column), self.right.element(row, column))
    }
    #[inline]
    fn word(&self, index: usize) -> Word {
        F::words(self.left.word(index), self.right.word(index))
    }
}

/// `left & right`, lazily.
///
/// # Panics
///
/// Panics if the operands differ in shape.
#[track_caller]
pub fn and<L: BinaryExpr, R: BinaryExpr>(left: L, right: R) -> BinaryOp<L, R, And> {
    BinaryOp::new(left, right, And)
}

/// `left | right`, lazily.
///
/// # Panics
///
/// Panics if the operands differ in shape.
#[track_caller]
pub fn or<L: BinaryExpr, R: BinaryExpr>(left: L, right: R) -> BinaryOp<L, R, Or> {
    BinaryOp::new(left, right, Or)
}

/// `left ^ right`, lazily.
///
/// # Panics
///
/// Panics if the operands differ in shape.
#[track_caller]
pub fn xor<L: BinaryExpr, R: BinaryExpr>(left: L, right: R) -> BinaryOp<L, R, Xor> {
    BinaryOp::new(left, right, Xor)
}

/// Number of bits of word `index` that belong to an expression of length `len`.
#[inline]
pub(crate) fn valid_bits_in_word(len: usize, index: usize) -> usize {
    len.saturating_sub(index * WORD_BIT_LEN).min(WORD_BIT_LEN)
}

/// Implements `&`, `|`, `^` (against any [`BinaryExpr`]) and `!` for an expression type, building
/// lazy nodes.
macro_rules! impl_expr_operators {
    ([$($generics:tt)*] $type:ty) => {
        impl<$($generics)*, Rhs: $crate::BinaryExpr> ::std::ops::BitAnd<Rhs> for $type {
            type Output = $crate::expr::BinaryOp<Self, Rhs, $crate::expr::And>;
            #[track_caller]
            fn bitand(self, right: Rhs) -> Self::Output {
                $crate::expr::and(self, right)
            }
        }

        impl<$($generics)*, Rhs: $crate::BinaryExpr> ::std::ops::BitOr<Rhs> for $type {
            type Output = $crate::expr::BinaryOp<Self, Rhs, $crate::expr::Or>;
            #[track_caller]
            fn bitor(self, right: Rhs) -> Self::Output {
                $crate::expr::or(self, right)
            }
        }

        impl<$($generics)*, Rhs: $crate::BinaryExpr> ::std::ops::BitXor<Rhs> for $type {
            type Output = $crate::expr::BinaryOp<Self, Rhs, $crate::expr::Xor>;
            #[track_caller]
            fn bitxor(self, right: Rhs) -> Self::Output {
                $crate::expr::xor(self, right)
            }
        }

        impl<$($generics)*> ::std::ops::Not for $type {
            type Output = $crate::expr::Negation<Self>;
            fn not(self) -> Self::Output {
                $crate::expr::Negation::new(self)
            }
        }
    };
}

/// Renders an expression type through a materialized temporary.
macro_rules! impl_display_via_evaluate {
    ([$($generics:tt)*] $type:ty) => {
        impl<$($generics)*> ::std::fmt::Display for $type {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&$crate::BinaryExpr::evaluate(self), formatter)
            }
        }
    };
}

impl_expr_operators!([E: BinaryExpr] Negation<E>);
impl_expr_operators!([L: BinaryExpr, R: BinaryExpr, F: Combinator] BinaryOp<L, R, F>);
impl_display_via_evaluate!([E: BinaryExpr] Negation<E>);
impl_display_via_evaluate!([L: BinaryExpr, R: BinaryExpr, F: Combinator] BinaryOp<L, R, F>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_bits() {
        assert_eq!(valid_bits_in_word(0, 0), 0);
        assert_eq!(valid_bits_in_word(25, 0), 25);
        assert_eq!(valid_bits_in_word(64, 0), 64);
        assert_eq!(valid_bits_in_word(70, 1), 6);
        assert_eq!(valid_bits_in_word(70, 2), 0);
    }

    #[test]
    fn combinators_agree_bitwise_and_wordwise() {
        for (left, right) in [(false, false), (false, true), (true, false), (true, true)] {
            let (left_word, right_word) = (Word::from(left), Word::from(right));
            assert_eq!(Word::from(And::bits(left, right)), And::words(left_word, right_word));
            assert_eq!(Word::from(Or::bits(left, right)), Or::words(left_word, right_word));
            assert_eq!(Word::from(Xor::bits(left, right)), Xor::words(left_word, right_word));
        }
    }
}
