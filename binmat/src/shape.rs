//! Compile-time shape markers for [`BinaryMatrix`](crate::BinaryMatrix).

/// Dimensions known at compile time, if any.
pub trait Shape {
    const ROWS: Option<usize>;
    const COLUMNS: Option<usize>;

    /// Whether a matrix of this shape may hold `shape`.
    #[must_use]
    fn admits(shape: (usize, usize)) -> bool {
        Self::ROWS.is_none_or(|rows| rows == shape.0) && Self::COLUMNS.is_none_or(|columns| columns == shape.1)
    }

    /// The shape a matrix of this kind must have, or `fallback` where a dimension is dynamic.
    #[must_use]
    fn resolve(fallback: (usize, usize)) -> (usize, usize) {
        (Self::ROWS.unwrap_or(fallback.0), Self::COLUMNS.unwrap_or(fallback.1))
    }
}

/// Dimensions chosen at run time; the matrix can be resized.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Dynamic;

/// `ROWS x COLUMNS`, fixed at compile time.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Fixed<const ROWS: usize, const COLUMNS: usize>;

impl Shape for Dynamic {
    const ROWS: Option<usize> = None;
    const COLUMNS: Option<usize> = None;
}

impl<const ROWS: usize, const COLUMNS: usize> Shape for Fixed<ROWS, COLUMNS> {
    const ROWS: Option<usize> = Some(ROWS);
    const COLUMNS: Option<usize> = Some(COLUMNS);
}
