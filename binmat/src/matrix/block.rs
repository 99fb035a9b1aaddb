use crate::bit::{WORD_BIT_LEN, Word, extract_bits};
use crate::error::{Error, check_in_bounds, check_same_shape, or_panic};
use crate::expr::{BinaryExpr, BinaryExprMut, Combinator};

/// Rectangular window over a parent expression, addressed in local coordinates.
///
/// A block borrows its parent through `E`: `Block<&BinaryMatrix>` is read-only,
/// `Block<&mut BinaryMatrix>` also writes through to the parent.
///
/// # Example
///
/// ```
/// use binmat::{BinaryExpr, BinaryExprMut, BinaryMatrix};
///
/// let mut mask = BinaryMatrix::zeros(4, 70);
/// mask.block_mut((1, 60), (2, 8)).set((1, 5));
/// assert!(mask.get((2, 65)));
///
/// let window = mask.block((2, 62), (1, 4));
/// assert_eq!(window.to_string(), "0001");
/// ```
#[must_use]
#[derive(Clone, Copy, Debug)]
pub struct Block<E> {
    parent: E,
    start_row: usize,
    start_column: usize,
    row_count: usize,
    column_count: usize,
}

impl<E: BinaryExpr> Block<E> {
    /// # Errors
    ///
    /// Returns [`Error::BlockOutOfRange`] unless `start + extent` fits inside the parent.
    pub fn try_new(parent: E, start: (usize, usize), extent: (usize, usize)) -> Result<Self, Error> {
        let parent_shape = parent.shape();
        let fits = |start: usize, extent: usize, limit: usize| start.checked_add(extent).is_some_and(|end| end <= limit);
        if !(fits(start.0, extent.0, parent_shape.0) && fits(start.1, extent.1, parent_shape.1)) {
            return Err(Error::BlockOutOfRange {
                start,
                extent,
                parent: parent_shape,
            });
        }
        Ok(Self {
            parent,
            start_row: start.0,
            start_column: start.1,
            row_count: extent.0,
            column_count: extent.1,
        })
    }

    /// # Panics
    ///
    /// Panics unless `start + extent` fits inside the parent.
    #[track_caller]
    pub fn new(parent: E, start: (usize, usize), extent: (usize, usize)) -> Self {
        or_panic(Self::try_new(parent, start, extent))
    }

    /// Single row `index`, spanning every column of the parent.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a row of the parent.
    #[track_caller]
    pub fn row(parent: E, index: usize) -> Self {
        let column_count = parent.column_count();
        Self::new(parent, (index, 0), (1, column_count))
    }

    /// Single column `index`, spanning every row of the parent.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a column of the parent.
    #[track_caller]
    pub fn column(parent: E, index: usize) -> Self {
        let row_count = parent.row_count();
        Self::new(parent, (0, index), (row_count, 1))
    }

    /// # Panics
    ///
    /// Panics unless the `ROWS x COLUMNS` block at `start` fits inside the parent.
    #[track_caller]
    pub fn fixed<const ROWS: usize, const COLUMNS: usize>(parent: E, start: (usize, usize)) -> Self {
        Self::new(parent, start, (ROWS, COLUMNS))
    }

    #[must_use]
    pub fn start(&self) -> (usize, usize) {
        (self.start_row, self.start_column)
    }

    pub fn parent(&self) -> &E {
        &self.parent
    }

    pub fn into_parent(self) -> E {
        self.parent
    }

    /// Bit offset in the parent of local element `(row, column)`.
    #[inline]
    fn parent_bit_index(&self, row: usize, column: usize) -> usize {
        (self.start_row + row) * self.parent.column_count() + self.start_column + column
    }

    /// Whether each block row covers a whole parent row, making the block contiguous in the parent.
    #[inline]
    fn is_contiguous(&self) -> bool {
        self.start_column == 0 && self.column_count == self.parent.column_count()
    }

    /// Overwrites the block's elements with those of `source`.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    #[track_caller]
    pub fn copy_from<Source>(&mut self, source: &Source)
    where
        E: BinaryExprMut,
        Source: BinaryExpr + ?Sized,
    {
        self.combine_from::<Source, Replace>(source);
    }

    /// Applies `F` between this block and `source`, writing the result through to the parent.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    #[track_caller]
    pub fn combine_from<Source, F>(&mut self, source: &Source)
    where
        E: BinaryExprMut,
        Source: BinaryExpr + ?Sized,
        F: Combinator,
    {
        or_panic(check_same_shape(self.shape(), source.shape()));
        for row in 0..self.row_count {
            for column in 0..self.column_count {
                let value = F::bits(self.element(row, column), source.element(row, column));
                self.assign_element(row, column, value);
            }
        }
    }
}

/// Right operand wins; used to overwrite a block.
#[derive(Clone, Copy, Debug, Default)]
struct Replace;

impl Combinator for Replace {
    fn bits(_: bool, right: bool) -> bool {
        right
    }
    fn words(_: Word, right: Word) -> Word {
        right
    }
}

impl<E: BinaryExpr> BinaryExpr for Block<E> {
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
        self.parent.element(row + self.start_row, column + self.start_column)
    }

    /// Gathers local bits `index * 64 ..` from the parent.
    ///
    /// The local bits are cut into runs that stay inside one block row. A run is contiguous in
    /// the parent, so it is fetched with at most two parent words. Consecutive runs are
    /// `parent.column_count() - column_count` parent bits apart; when that stride is zero the
    /// whole word is one run.
    fn word(&self, index: usize) -> Word {
        let first = index * WORD_BIT_LEN;
        let end = self.len().min(first + WORD_BIT_LEN);
        let contiguous = self.is_contiguous();
        let mut output: Word = 0;
        let mut local = first;
        while local < end {
            let row = local / self.column_count;
            let column = local % self.column_count;
            let run = if contiguous {
                end - local
            } else {
                (self.column_count - column).min(end - local)
            };
            let bits = extract_bits(|k| self.parent.word(k), self.parent_bit_index(row, column), run);
            output |= bits << (local - first);
            local += run;
        }
        output
    }
}

impl<E: BinaryExprMut> BinaryExprMut for Block<E> {
    #[inline]
    #[track_caller]
    fn assign_element(&mut self, row: usize, column: usize, to: bool) {
        or_panic(check_in_bounds(self.shape(), (row, column)));
        self.parent.assign_element(row + self.start_row, column + self.start_column, to);
    }
}

impl_expr_operators!([E: BinaryExpr] Block<E>);
impl_display_via_evaluate!([E: BinaryExpr] Block<E>);
