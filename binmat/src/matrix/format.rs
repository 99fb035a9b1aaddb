//! Text form of matrices: one line of `0`/`1` per row.
//!
//! `{}` separates rows with newlines and has no trailing newline; `{:#}` renders
//! `[row|row|...]` on a single line. Lazy expressions are evaluated into a temporary matrix
//! before rendering.

use crate::error::ParseError;
use crate::expr::BinaryExpr;
use crate::matrix::BinaryMatrix;
use crate::shape::{Dynamic, Shape};
use std::fmt::{self, Write};
use std::str::FromStr;

impl<S: Shape> fmt::Display for BinaryMatrix<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, separator, close) = if f.alternate() { ("[", '|', "]") } else { ("", '\n', "") };
        f.write_str(open)?;
        for row in 0..self.row_count() {
            if row > 0 {
                f.write_char(separator)?;
            }
            for column in 0..self.column_count() {
                f.write_char(if self.element(row, column) { '1' } else { '0' })?;
            }
        }
        f.write_str(close)
    }
}

impl<S: Shape> FromStr for BinaryMatrix<S> {
    type Err = ParseError;

    /// Reads rows of `0`/`1` (`.` also reads as `0`) separated by newlines, `|` or `;`.
    /// Brackets, spaces and commas are ignored, as are empty rows.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::<Vec<bool>>::new();
        for row_text in text.split(['\n', '|', ';']) {
            let mut row = Vec::new();
            for character in row_text.chars() {
                match character {
                    '0' | '.' => row.push(false),
                    '1' => row.push(true),
                    '[' | ']' | ' ' | ',' | '\t' | '\r' => {}
                    _ => {
                        return Err(ParseError::UnexpectedCharacter {
                            character,
                            row: rows.len(),
                        });
                    }
                }
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        let column_count = rows.first().map_or(0, Vec::len);
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != column_count)
        {
            return Err(ParseError::RaggedRow {
                row,
                expected: column_count,
                found,
            });
        }
        let matrix = BinaryMatrix::<Dynamic>::from_iter(rows, column_count);
        Ok(Self::try_from_matrix(matrix)?)
    }
}
