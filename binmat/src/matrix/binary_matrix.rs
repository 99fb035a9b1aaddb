use crate::bit::{PackedStorage, Word};
use crate::error::{Error, check_in_bounds, check_same_shape, check_vector_shape, element_count, or_panic};
use crate::expr::{And, BinaryExpr, BinaryExprMut, Combinator, Or, Xor};
use crate::shape::{Dynamic, Fixed, Shape};
use rand::Rng;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{BitAndAssign, BitOrAssign, BitXorAssign, Index};

/// A dense matrix of booleans packed 64 to a word.
///
/// `BinaryMatrix` is the owning leaf of the expression machinery: the bitwise operators on
/// `&BinaryMatrix` build lazy [`BinaryExpr`] trees, and [`assign`](BinaryMatrix::assign)
/// evaluates such a tree back into a matrix one word at a time. Element `(i, j)` is bit
/// `i * column_count + j` of the storage; rows are not padded.
///
/// The shape parameter `S` is [`Dynamic`] by default. A `BinaryMatrix<Fixed<R, C>>` always has
/// shape `R x C` and cannot be resized.
///
/// # Construction
///
/// ```
/// use binmat::{BinaryExpr, BinaryMatrix, Fixed};
///
/// let dynamic = BinaryMatrix::zeros(10, 20);
/// let ones = BinaryMatrix::ones(3, 3);
/// let fixed = BinaryMatrix::<Fixed<4, 4>>::new();
/// let flags = BinaryMatrix::vector(100);
/// assert_eq!(fixed.shape(), (4, 4));
/// assert_eq!(flags.shape(), (100, 1));
/// assert!(ones.all() && !dynamic.any());
/// ```
///
/// # Expressions
///
/// ```
/// use binmat::{BinaryExpr, BinaryExprMut, BinaryMatrix};
///
/// let mut boundary = BinaryMatrix::zeros(2, 3);
/// boundary.set((0, 0));
/// boundary.set((1, 2));
/// let mut visited = BinaryMatrix::zeros(2, 3);
/// visited.set((0, 0));
///
/// let pending = &boundary & !&visited;
/// assert!(pending.get((1, 2)));
/// assert!(!pending.get((0, 0)));
///
/// let mut result = BinaryMatrix::empty();
/// result.assign(&pending);
/// assert_eq!(result.to_string(), "000\n001");
/// ```
#[must_use]
pub struct BinaryMatrix<S: Shape = Dynamic> {
    storage: PackedStorage,
    row_count: usize,
    column_count: usize,
    shape: PhantomData<S>,
}

/// Column vector of booleans with a compile-time length.
pub type BinaryVector<const LEN: usize> = BinaryMatrix<Fixed<LEN, 1>>;

impl<S: Shape> BinaryMatrix<S> {
    /// Storage for `shape` with every element set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the element count overflows `usize`.
    #[track_caller]
    fn storage_for(shape: (usize, usize), value: bool) -> PackedStorage {
        PackedStorage::filled(or_panic(element_count(shape)), value)
    }

    fn from_storage(storage: PackedStorage, (row_count, column_count): (usize, usize)) -> Self {
        debug_assert!(S::admits((row_count, column_count)));
        Self {
            storage,
            row_count,
            column_count,
            shape: PhantomData,
        }
    }

    /// Converts between shape kinds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `S` is fixed to a shape other than `other`'s.
    pub fn try_from_matrix<T: Shape>(other: BinaryMatrix<T>) -> Result<Self, Error> {
        let shape = other.shape();
        if !S::admits(shape) {
            return Err(Error::ShapeMismatch {
                left: S::resolve(shape),
                right: shape,
            });
        }
        Ok(Self::from_storage(other.storage, shape))
    }

    pub fn into_dynamic(self) -> BinaryMatrix<Dynamic> {
        BinaryMatrix::from_storage(self.storage, (self.row_count, self.column_count))
    }

    pub fn storage(&self) -> &PackedStorage {
        &self.storage
    }

    /// The packed words; bits past `len()` in the last word are zero.
    #[must_use]
    pub fn as_words(&self) -> &[Word] {
        self.storage.as_words()
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: bool) {
        let len = self.len();
        self.storage.fill(len, value);
    }

    /// Evaluates `expr` word by word into this matrix.
    ///
    /// A dynamic matrix takes the shape of `expr`, reallocating if needed.
    ///
    /// # Panics
    ///
    /// Panics if `S` is fixed and `expr` has a different shape.
    #[track_caller]
    pub fn assign<E: BinaryExpr + ?Sized>(&mut self, expr: &E) {
        or_panic(self.try_assign(expr));
    }

    /// See [`assign`](BinaryMatrix::assign).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `S` is fixed and `expr` has a different shape; the
    /// matrix is left unchanged.
    pub fn try_assign<E: BinaryExpr + ?Sized>(&mut self, expr: &E) -> Result<(), Error> {
        let shape = expr.shape();
        if !S::admits(shape) {
            return Err(Error::ShapeMismatch {
                left: self.shape(),
                right: shape,
            });
        }
        let len = expr.len();
        let word_count = expr.word_count();
        if self.storage.word_count() != word_count {
            self.storage.reallocate(len);
        }
        for index in 0..word_count {
            *self.storage.word_mut(index) = expr.word(index);
        }
        self.storage.clear_tail(len);
        (self.row_count, self.column_count) = shape;
        tracing::trace!(rows = shape.0, columns = shape.1, words = word_count, "assigned expression");
        Ok(())
    }

    #[track_caller]
    fn combine_assign<F: Combinator, E: BinaryExpr + ?Sized>(&mut self, right: &E) {
        or_panic(check_same_shape(self.shape(), right.shape()));
        for index in 0..self.storage.word_count() {
            let word = self.storage.word_mut(index);
            *word = F::words(*word, right.word(index));
        }
        let len = self.len();
        self.storage.clear_tail(len);
    }

    /// Element `index` of a single-column matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has more than one column or `index` is out of bounds.
    #[track_caller]
    #[must_use]
    pub fn get_at(&self, index: usize) -> bool {
        or_panic(check_vector_shape(self.shape()));
        self.get((index, 0))
    }

    /// # Panics
    ///
    /// Panics if the matrix has more than one column or `index` is out of bounds.
    #[track_caller]
    pub fn set_at(&mut self, index: usize) {
        or_panic(check_vector_shape(self.shape()));
        self.set((index, 0));
    }

    /// # Panics
    ///
    /// Panics if the matrix has more than one column or `index` is out of bounds.
    #[track_caller]
    pub fn clear_at(&mut self, index: usize) {
        or_panic(check_vector_shape(self.shape()));
        self.clear((index, 0));
    }
}

impl BinaryMatrix<Dynamic> {
    /// The `0 x 0` matrix, typically a target for [`assign`](BinaryMatrix::assign).
    pub fn empty() -> Self {
        Self::zeros(0, 0)
    }

    /// Alias for [`zeros`](BinaryMatrix::zeros).
    #[track_caller]
    pub fn with_shape(row_count: usize, column_count: usize) -> Self {
        Self::zeros(row_count, column_count)
    }

    /// # Panics
    ///
    /// Panics if `row_count * column_count` overflows `usize`.
    #[track_caller]
    pub fn zeros(row_count: usize, column_count: usize) -> Self {
        let shape = (row_count, column_count);
        Self::from_storage(Self::storage_for(shape, false), shape)
    }

    /// # Panics
    ///
    /// Panics if `row_count * column_count` overflows `usize`.
    #[track_caller]
    pub fn ones(row_count: usize, column_count: usize) -> Self {
        let shape = (row_count, column_count);
        Self::from_storage(Self::storage_for(shape, true), shape)
    }

    pub fn identity(dimension: usize) -> Self {
        let mut matrix = Self::zeros(dimension, dimension);
        for index in 0..dimension {
            matrix.set((index, index));
        }
        matrix
    }

    /// A `len x 1` matrix of zeros, for use with [`get_at`](BinaryMatrix::get_at) and friends.
    pub fn vector(len: usize) -> Self {
        Self::zeros(len, 1)
    }

    /// # Panics
    ///
    /// Panics if a row does not have `column_count` elements.
    ///
    /// # Example
    ///
    /// ```
    /// use binmat::{BinaryExpr, BinaryMatrix};
    ///
    /// let matrix = BinaryMatrix::from_iter([[true, false], [false, false], [true, true]], 2);
    /// assert_eq!(matrix.shape(), (3, 2));
    /// assert_eq!(matrix.count_ones(), 3);
    /// ```
    #[track_caller]
    pub fn from_iter<Row, Rows>(rows: Rows, column_count: usize) -> Self
    where
        Row: IntoIterator<Item = bool>,
        Rows: IntoIterator<Item = Row>,
    {
        let rows: Vec<Vec<bool>> = rows.into_iter().map(|row| row.into_iter().collect()).collect();
        let mut matrix = Self::zeros(rows.len(), column_count);
        for (row_index, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                column_count,
                "row {row_index} has {} columns, expected {column_count}",
                row.len()
            );
            for (column_index, &value) in row.iter().enumerate() {
                matrix.assign_element(row_index, column_index, value);
            }
        }
        matrix
    }

    pub fn random_with_rng<R: Rng>(row_count: usize, column_count: usize, rng: &mut R) -> Self {
        let mut matrix = Self::zeros(row_count, column_count);
        for index in 0..matrix.storage.word_count() {
            *matrix.storage.word_mut(index) = rng.r#gen();
        }
        let len = matrix.len();
        matrix.storage.clear_tail(len);
        matrix
    }

    /// Changes the shape, discarding the content: every element of the resized matrix is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use binmat::{BinaryExpr, BinaryMatrix};
    ///
    /// let mut matrix = BinaryMatrix::ones(3, 3);
    /// matrix.resize(5, 2);
    /// assert_eq!(matrix.shape(), (5, 2));
    /// assert!(!matrix.any());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `row_count * column_count` overflows `usize`.
    #[track_caller]
    pub fn resize(&mut self, row_count: usize, column_count: usize) {
        self.storage = Self::storage_for((row_count, column_count), false);
        self.row_count = row_count;
        self.column_count = column_count;
        tracing::debug!(
            rows = row_count,
            columns = column_count,
            words = self.storage.word_count(),
            "resized binary matrix"
        );
    }
}

impl<const ROWS: usize, const COLUMNS: usize> BinaryMatrix<Fixed<ROWS, COLUMNS>> {
    pub fn new() -> Self {
        Self::from_storage(Self::storage_for((ROWS, COLUMNS), false), (ROWS, COLUMNS))
    }

    /// Every element set to `value`.
    pub fn with_value(value: bool) -> Self {
        Self::from_storage(Self::storage_for((ROWS, COLUMNS), value), (ROWS, COLUMNS))
    }
}

impl<S: Shape> Default for BinaryMatrix<S> {
    /// Zeros of the fixed shape, or `0 x 0` for [`Dynamic`].
    fn default() -> Self {
        let shape = S::resolve((0, 0));
        Self::from_storage(Self::storage_for(shape, false), shape)
    }
}

impl<S: Shape> Clone for BinaryMatrix<S> {
    fn clone(&self) -> Self {
        Self::from_storage(self.storage.clone(), self.shape())
    }
}

impl<S: Shape> BinaryExpr for BinaryMatrix<S> {
    #[inline]
    fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    fn column_count(&self) -> usize {
        self.column_count
    }

    #[inline]
    fn element(&self, row: usize, column: usize) -> bool {
        debug_assert!(row < self.row_count && column < self.column_count);
        self.storage.read(row * self.column_count + column)
    }

    #[inline]
    fn word(&self, index: usize) -> Word {
        self.storage.word(index)
    }
}

impl<S: Shape> BinaryExprMut for BinaryMatrix<S> {
    #[inline]
    #[track_caller]
    fn assign_element(&mut self, row: usize, column: usize, to: bool) {
        or_panic(check_in_bounds(self.shape(), (row, column)));
        self.storage.write(row * self.column_count + column, to);
    }

    #[track_caller]
    fn negate(&mut self, index: (usize, usize)) {
        or_panic(check_in_bounds(self.shape(), index));
        self.storage.flip(index.0 * self.column_count + index.1);
    }
}

impl<S: Shape> Index<(usize, usize)> for BinaryMatrix<S> {
    type Output = bool;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        if self.get(index) {
            return &true;
        }
        &false
    }
}

impl<S: Shape, T: Shape> PartialEq<BinaryMatrix<T>> for BinaryMatrix<S> {
    fn eq(&self, other: &BinaryMatrix<T>) -> bool {
        self.shape() == other.shape() && self.storage == other.storage
    }
}

impl<S: Shape> Eq for BinaryMatrix<S> {}

impl<S: Shape> Hash for BinaryMatrix<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
        self.storage.hash(state);
    }
}

impl<S: Shape> std::fmt::Debug for BinaryMatrix<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BinaryMatrix(shape={:?},value={:#})", self.shape(), self)
    }
}

macro_rules! impl_assign_operator {
    ($trait:ident, $method:ident, $combinator:ty) => {
        impl<S: Shape, Rhs: BinaryExpr> $trait<Rhs> for BinaryMatrix<S> {
            #[track_caller]
            fn $method(&mut self, right: Rhs) {
                self.combine_assign::<$combinator, _>(&right);
            }
        }
    };
}

impl_assign_operator!(BitAndAssign, bitand_assign, And);
impl_assign_operator!(BitOrAssign, bitor_assign, Or);
impl_assign_operator!(BitXorAssign, bitxor_assign, Xor);

impl_expr_operators!(['life, S: Shape] &'life BinaryMatrix<S>);
