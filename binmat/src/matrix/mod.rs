mod binary_matrix;
mod block;
mod format;

pub use binary_matrix::{BinaryMatrix, BinaryVector};
pub use block::Block;
