//! Bit-packed boolean matrices.
//!
//! [`BinaryMatrix`] stores elements 64 to a [`Word`] in row-major order. Bitwise operators on
//! borrowed matrices build lazy expression trees ([`BinaryOp`], [`Negation`], [`Block`]) that
//! are evaluated one word at a time on [`assign`](BinaryMatrix::assign), and reductions such as
//! [`all`](BinaryExpr::all) and [`any`](BinaryExpr::any) run directly over an expression's words.

pub mod bit;
pub use bit::{PackedStorage, WORD_BIT_LEN, Word};

pub mod shape;
pub use shape::{Dynamic, Fixed, Shape};

#[macro_use]
pub mod expr;
pub use expr::{And, BinaryExpr, BinaryExprMut, BinaryOp, Combinator, Negation, Or, Xor, and, or, xor};

pub mod matrix;
pub use matrix::{BinaryMatrix, BinaryVector, Block};

mod error;
pub use error::{Error, ParseError};

#[cfg(feature = "serde")]
mod serde;
