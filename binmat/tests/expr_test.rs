use binmat::{And, BinaryExpr, BinaryExprMut, BinaryMatrix, BinaryOp, Error, Negation, Or, and, xor};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

proptest! {
    #[test]
    fn de_morgan((left, right) in equal_shape_matrices(80)) {
        let negated_and = !(&left & &right);
        let or_of_negations = !&left | !&right;
        for row in 0..left.row_count() {
            for column in 0..left.column_count() {
                assert_eq!(negated_and.get((row, column)), or_of_negations.get((row, column)));
            }
        }
        assert_eq!(negated_and.evaluate(), or_of_negations.evaluate());
    }

    #[test]
    fn word_evaluation_matches_elements((a, b, c) in equal_shape_triples(80)) {
        let expr = (&a & &b) | !&c;
        let mut result = BinaryMatrix::empty();
        result.assign(&expr);
        assert_eq!(result.shape(), a.shape());
        for row in 0..a.row_count() {
            for column in 0..a.column_count() {
                let expected = (a[(row, column)] & b[(row, column)]) | !c[(row, column)];
                assert_eq!(result[(row, column)], expected);
                assert_eq!(expr.get((row, column)), expected);
            }
        }
    }

    #[test]
    fn xor_with_itself_is_zero(matrix in arbitrary_matrix(80)) {
        assert!(!(&matrix ^ &matrix).any());
        assert!((&matrix ^ !&matrix).all());
        assert_eq!((&matrix | &matrix).evaluate(), matrix);
    }

    #[test]
    fn reductions_over_expressions((left, right) in equal_shape_matrices(80)) {
        let expr = &left & &right;
        let mut expected = 0;
        for row in 0..left.row_count() {
            for column in 0..left.column_count() {
                expected += usize::from(left[(row, column)] && right[(row, column)]);
            }
        }
        assert_eq!(expr.count_ones(), expected);
        assert_eq!(expr.any(), expected > 0);
        assert_eq!(expr.all(), expected == left.len());
    }
}

#[test]
fn expression_display() {
    let left: BinaryMatrix = "1100\n1010".parse().unwrap();
    let right: BinaryMatrix = "1010\n0110".parse().unwrap();
    assert_eq!((&left & &right).to_string(), "1000\n0010");
    assert_eq!((&left | &right).to_string(), "1110\n1110");
    assert_eq!((&left ^ &right).to_string(), "0110\n1100");
    assert_eq!((!&left).to_string(), "0011\n0101");
    assert_eq!(format!("{:#}", !(&left ^ &right)), "[1001|0011]");
}

#[test]
fn negation_masks_tail_bits() {
    let ones = BinaryMatrix::ones(5, 5);
    let zeros = BinaryMatrix::zeros(5, 5);
    assert!(!(!&ones).any());
    assert!((!&zeros).all());
    assert_eq!((!&zeros).count_ones(), 25);
    assert_eq!((!&zeros).evaluate().as_words(), &[(1 << 25) - 1]);
    assert_eq!((!!&ones).evaluate(), ones);
}

#[test]
fn free_functions_build_the_same_nodes() {
    let left = BinaryMatrix::identity(3);
    let right = BinaryMatrix::ones(3, 3);
    assert_eq!(and(&left, &right).evaluate(), (&left & &right).evaluate());
    assert_eq!(xor(&left, &right).evaluate(), (&left ^ &right).evaluate());
    assert_eq!(xor(&left, &right).evaluate().count_ones(), 6);
    let (first, second) = and(&left, &right).into_operands();
    assert_eq!(first, &left);
    assert_eq!(second, &right);
    assert_eq!(Negation::new(&left).into_inner(), &left);
}

#[test]
fn expressions_nest_through_owned_nodes() {
    let a = BinaryMatrix::identity(4);
    let b = BinaryMatrix::ones(4, 4);
    let c = BinaryMatrix::zeros(4, 4);
    let expr = ((&a ^ &b) & !&c) | (&a & &c);
    let nested: BinaryOp<_, _, Or> = expr;
    assert_eq!(nested.count_ones(), 12);
    assert!(!nested.get((2, 2)));
}

#[test]
#[should_panic(expected = "shape mismatch: 3x4 against 4x3")]
fn mismatched_shapes_panic() {
    let left = BinaryMatrix::zeros(3, 4);
    let right = BinaryMatrix::zeros(4, 3);
    let _ = &left & &right;
}

#[test]
fn try_new_reports_mismatch() {
    let left = BinaryMatrix::zeros(3, 4);
    let right = BinaryMatrix::zeros(4, 3);
    assert_eq!(
        BinaryOp::try_new(&left, &right, And).err(),
        Some(Error::ShapeMismatch {
            left: (3, 4),
            right: (4, 3)
        })
    );
    assert!(BinaryOp::try_new(&left, &left, And).is_ok());
}

#[test]
#[should_panic(expected = "out of bounds")]
fn expression_get_out_of_bounds() {
    let matrix = BinaryMatrix::zeros(2, 2);
    let _ = (!&matrix).get((0, 2));
}

#[test]
fn matrix_written_from_expression_of_itself() {
    let mut matrix: BinaryMatrix = "0110".parse().unwrap();
    let negated = (!&matrix).evaluate();
    matrix.assign(&negated);
    assert_eq!(matrix.to_string(), "1001");
    matrix.set((0, 1));
    assert_eq!(matrix.count_ones(), 3);
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

prop_compose! {
    fn equal_shape_triples(max_dimension: usize)(shape in (0..=max_dimension, 0..=max_dimension), seeds in any::<(u64, u64, u64)>()) -> (BinaryMatrix, BinaryMatrix, BinaryMatrix) {
        (
            random_matrix(shape.0, shape.1, seeds.0),
            random_matrix(shape.0, shape.1, seeds.1),
            random_matrix(shape.0, shape.1, seeds.2),
        )
    }
}
