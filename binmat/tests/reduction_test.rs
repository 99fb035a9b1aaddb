use binmat::bit::low_mask;
use binmat::expr::visit::{WordVisitor, visit_words};
use binmat::{BinaryExpr, BinaryExprMut, BinaryMatrix, Fixed, Word};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sorted_iter::SortedIterator;

proptest! {
    #[test]
    fn count_ones_matches_elements(matrix in arbitrary_matrix(100)) {
        let mut expected = 0;
        for row in 0..matrix.row_count() {
            for column in 0..matrix.column_count() {
                expected += usize::from(matrix[(row, column)]);
            }
        }
        assert_eq!(matrix.count_ones(), expected);
        assert_eq!((!&matrix).count_ones(), matrix.len() - expected);
        assert_eq!(matrix.any(), expected > 0);
        assert_eq!(matrix.all(), expected == matrix.len());
    }

    #[test]
    fn support_is_sorted_and_complete(matrix in arbitrary_matrix(100)) {
        let mut expected = Vec::new();
        for row in 0..matrix.row_count() {
            for column in 0..matrix.column_count() {
                if matrix[(row, column)] {
                    expected.push((row, column));
                }
            }
        }
        assert_eq!(matrix.support().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn support_of_intersection((left, right) in equal_shape_matrices(60)) {
        let intersection: Vec<_> = left.support().intersection(right.support()).collect();
        assert_eq!((&left & &right).support().collect::<Vec<_>>(), intersection);
    }
}

#[test]
fn five_by_five_boundaries() {
    let mut matrix = BinaryMatrix::ones(5, 5);
    assert!(matrix.all());
    matrix.clear((4, 4));
    assert!(!matrix.all());
    assert!(matrix.any());

    let mut matrix = BinaryMatrix::zeros(5, 5);
    assert!(!matrix.any());
    matrix.set((4, 4));
    assert!(matrix.any());
    assert!(!matrix.all());
}

#[test]
fn word_aligned_shapes() {
    let ones = BinaryMatrix::ones(8, 8);
    assert_eq!(ones.as_words(), &[Word::MAX]);
    assert!(ones.all());
    assert!(!(!&ones).any());
    let wide = BinaryMatrix::ones(2, 64);
    assert_eq!(wide.count_ones(), 128);
    assert!(wide.block((1, 0), (1, 64)).all());
}

#[test]
fn empty_shapes() {
    for (row_count, column_count) in [(0, 0), (0, 7), (7, 0)] {
        let matrix = BinaryMatrix::zeros(row_count, column_count);
        assert!(matrix.is_empty());
        assert!(matrix.all());
        assert!(!matrix.any());
        assert!((!&matrix).all());
        assert_eq!(matrix.count_ones(), 0);
        assert_eq!(matrix.support().count(), 0);
        assert!(matrix.as_words().is_empty());
    }
}

#[test]
fn tail_bits_are_ignored() {
    let ones = BinaryMatrix::ones(1, 70);
    assert_eq!(ones.count_ones(), 70);
    assert_eq!((!&ones).count_ones(), 0);
    assert!((!!&ones).all());
    assert!(BinaryMatrix::<Fixed<3, 3>>::with_value(true).all());
    assert!(!BinaryMatrix::<Fixed<3, 3>>::with_value(false).any());
}

#[test]
fn identity_support() {
    let identity = BinaryMatrix::identity(70);
    let support: Vec<_> = identity.support().collect();
    assert_eq!(support.len(), 70);
    assert!(support.iter().all(|(row, column)| row == column));
}

#[derive(Default)]
struct ParityVisitor {
    parity: bool,
}

impl WordVisitor for ParityVisitor {
    type Output = bool;

    fn visit(&mut self, word: Word, valid_bits: usize) {
        self.parity ^= (word & low_mask(valid_bits)).count_ones() % 2 == 1;
    }

    fn finish(self) -> bool {
        self.parity
    }
}

#[test]
fn custom_word_visitor() {
    let mut matrix = BinaryMatrix::zeros(3, 50);
    assert!(!visit_words(&matrix, ParityVisitor::default()));
    matrix.set((0, 1));
    matrix.set((2, 49));
    matrix.set((1, 20));
    assert!(visit_words(&matrix, ParityVisitor::default()));
    assert!(visit_words(&!&matrix, ParityVisitor::default()));
    matrix.set((1, 21));
    assert!(!visit_words(&!&matrix, ParityVisitor::default()));
    assert!(visit_words(&matrix.row(0), ParityVisitor::default()));
}

fn random_matrix(row_count: usize, column_count: usize, seed: u64) -> BinaryMatrix {
    BinaryMatrix::random_with_rng(row_count, column_count, &mut StdRng::seed_from_u64(seed))
}

prop_compose! {
    fn arbitrary_matrix(max_dimension: usize)(shape in (0..=max_dimension, 0..=max_dimension), seed in any::<u64>()) -> BinaryMatrix {
        random_matrix(shape.0, shape.1, seed)
    }
}

prop_compose! {
    fn equal_shape_matrices(max_dimension: usize)(shape in (0..=max_dimension, 0..=max_dimension), seeds in any::<(u64, u64)>()) -> (BinaryMatrix, BinaryMatrix) {
        (random_matrix(shape.0, shape.1, seeds.0), random_matrix(shape.0, shape.1, seeds.1))
    }
}
