/// Contract violations of the matrix API.
///
/// The panicking entry points (`get`, `set`, `&`, `block`, ...) panic with the `Display` form of
/// these values. The `try_*` entry points return them instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index ({row}, {column}) is out of bounds for a {}x{} matrix", .shape.0, .shape.1)]
    OutOfBounds {
        row: usize,
        column: usize,
        shape: (usize, usize),
    },
    #[error("shape mismatch: {}x{} against {}x{}", .left.0, .left.1, .right.0, .right.1)]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error(
        "block of extent {}x{} at ({}, {}) does not fit a {}x{} parent",
        .extent.0, .extent.1, .start.0, .start.1, .parent.0, .parent.1
    )]
    BlockOutOfRange {
        start: (usize, usize),
        extent: (usize, usize),
        parent: (usize, usize),
    },
    #[error("vector operation on a {}x{} matrix, expected a single column", .shape.0, .shape.1)]
    WrongShapeForVectorOps { shape: (usize, usize) },
    #[error("a {}x{} matrix has more elements than fit in usize", .shape.0, .shape.1)]
    TooManyElements { shape: (usize, usize) },
}

/// Failure to read a matrix from its text form.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected character {character:?} in row {row}")]
    UnexpectedCharacter { character: char, row: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error(transparent)]
    Shape(#[from] Error),
}

pub(crate) fn check_in_bounds(shape: (usize, usize), (row, column): (usize, usize)) -> Result<(), Error> {
    if row < shape.0 && column < shape.1 {
        Ok(())
    } else {
        Err(Error::OutOfBounds { row, column, shape })
    }
}

pub(crate) fn check_same_shape(left: (usize, usize), right: (usize, usize)) -> Result<(), Error> {
    if left == right {
        Ok(())
    } else {
        Err(Error::ShapeMismatch { left, right })
    }
}

pub(crate) fn element_count(shape: (usize, usize)) -> Result<usize, Error> {
    shape.0.checked_mul(shape.1).ok_or(Error::TooManyElements { shape })
}

pub(crate) fn check_vector_shape(shape: (usize, usize)) -> Result<(), Error> {
    if shape.1 == 1 {
        Ok(())
    } else {
        Err(Error::WrongShapeForVectorOps { shape })
    }
}

/// Unwraps a contract check, panicking at the caller's location with the error message.
#[track_caller]
pub(crate) fn or_panic<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("{error}"),
    }
}
