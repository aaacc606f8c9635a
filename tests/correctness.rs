use fixed_matrix::matrix::transpose::{rotate_90, rotate_180, rotate_270, transpose};
use fixed_matrix::{
    Diagnostic, Element, Matrix, Tier, UNROLL_BOUND, mul, mul_generic, mul_via, mul_with,
    tier_of,
};

fn assert_matrices_identical<T: Element, const R: usize, const C: usize>(
    expected: &Matrix<T, R, C>,
    actual: &Matrix<T, R, C>,
    name: &str,
) {
    for i in 0..R * C {
        assert!(
            expected[i].bit_eq(actual[i]),
            "{}: mismatch at index {}: expected {}, got {}",
            name,
            i,
            expected[i],
            actual[i]
        );
    }
}

fn ramp<const R: usize, const C: usize>(offset: usize) -> Matrix<f64, R, C> {
    let mut m = Matrix::zeros();
    for (i, x) in m.as_mut_slice().iter_mut().enumerate() {
        // not exactly representable sums, so summation order would show
        *x = ((i + offset) % 10) as f64 * 0.1 + 0.3;
    }
    m
}

/// Runs every tier plus the dispatcher and checks they agree bit for bit with
/// the generic loop.
fn check_all_tiers<const R: usize, const K: usize, const C: usize>() {
    let a: Matrix<f64, R, K> = ramp(0);
    let b: Matrix<f64, K, C> = ramp(3);
    let name = format!("{}x{}x{}", R, K, C);

    let mut expected: Matrix<f64, R, C> = Matrix::zeros();
    mul_generic(&a, &b, &mut expected);

    for tier in Tier::ALL {
        let mut c: Matrix<f64, R, C> = Matrix::filled(-1.0);
        let ran = mul_via(tier, &a, &b, &mut c);
        assert_eq!(ran, tier.or_fallback(tier_of::<R, K, C>()), "{}", name);
        assert_matrices_identical(&expected, &c, &format!("{} via {}", name, tier));
    }

    let mut c: Matrix<f64, R, C> = Matrix::filled(-1.0);
    mul(&a, &b, &mut c);
    assert_matrices_identical(&expected, &c, &format!("{} dispatched", name));
}

// ============================================================
// Known products
// ============================================================

#[test]
fn test_2x2_multiply() {
    let a: Matrix<i32, 2, 2> = Matrix::from([[1, 2], [3, 4]]);
    let b: Matrix<i32, 2, 2> = Matrix::from([[5, 6], [7, 8]]);
    let expected: Matrix<i32, 2, 2> = Matrix::from([[19, 22], [43, 50]]);

    for tier in Tier::ALL {
        let mut c: Matrix<i32, 2, 2> = Matrix::zeros();
        mul_via(tier, &a, &b, &mut c);
        assert_eq!(c, expected, "via {}", tier);
    }

    let mut c: Matrix<i32, 2, 2> = Matrix::zeros();
    mul(&a, &b, &mut c);
    assert_eq!(c, expected);
}

#[test]
fn test_2x3_times_3x2() {
    let a: Matrix<f64, 2, 3> = Matrix::from([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let b: Matrix<f64, 3, 2> = Matrix::from([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);

    let mut c: Matrix<f64, 2, 2> = Matrix::zeros();
    mul(&a, &b, &mut c);

    assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_1x1_multiply() {
    let a: Matrix<i32, 1, 1> = Matrix::filled(3);
    let b: Matrix<i32, 1, 1> = Matrix::filled(4);
    let mut c: Matrix<i32, 1, 1> = Matrix::zeros();

    mul(&a, &b, &mut c);

    assert_eq!(c[0], 12);
}

#[test]
fn test_outer_and_inner_products() {
    let col: Matrix<i64, 3, 1> = Matrix::from([[1], [2], [3]]);
    let row: Matrix<i64, 1, 3> = Matrix::from([[4, 5, 6]]);

    let mut outer: Matrix<i64, 3, 3> = Matrix::zeros();
    mul(&col, &row, &mut outer);
    assert_eq!(outer, Matrix::from([[4, 5, 6], [8, 10, 12], [12, 15, 18]]));

    let mut inner: Matrix<i64, 1, 1> = Matrix::zeros();
    mul(&row, &col, &mut inner);
    assert_eq!(inner[0], 32);
}

// ============================================================
// Tier agreement around the unrolling bound
// ============================================================

#[test]
fn test_small_shapes_all_tiers() {
    check_all_tiers::<1, 1, 1>();
    check_all_tiers::<2, 2, 2>();
    check_all_tiers::<3, 3, 3>();
    check_all_tiers::<2, 3, 4>();
    check_all_tiers::<4, 3, 2>();
    check_all_tiers::<1, 4, 1>();
}

#[test]
fn test_bound_edge_shapes_all_tiers() {
    check_all_tiers::<4, 4, 4>();
    check_all_tiers::<5, 4, 4>();
    check_all_tiers::<4, 4, 5>();
    check_all_tiers::<4, 5, 4>();
    check_all_tiers::<5, 5, 5>();
    check_all_tiers::<9, 8, 9>();
    check_all_tiers::<9, 9, 9>();
}

#[test]
fn test_tall_and_wide_shapes_all_tiers() {
    check_all_tiers::<16, 1, 16>();
    check_all_tiers::<32, 2, 3>();
    check_all_tiers::<3, 2, 32>();
    check_all_tiers::<7, 13, 11>();
    check_all_tiers::<17, 17, 17>();
}

#[test]
fn test_natural_tiers() {
    let n = UNROLL_BOUND;
    if n == 0 {
        assert_eq!(tier_of::<1, 1, 1>(), Tier::Generic);
        return;
    }
    assert_eq!(tier_of::<1, 1, 1>(), Tier::Unrolled);
    assert_eq!(tier_of::<64, 1, 64>(), Tier::FixedInner);
    assert_eq!(tier_of::<1, 9, 1>(), Tier::Generic);
    assert_eq!(Tier::select(n, n, n), Tier::Unrolled);
    assert_eq!(Tier::select(n + 1, n, 1), Tier::FixedInner);
    assert_eq!(Tier::select(1, n + 1, 1), Tier::Generic);
}

// ============================================================
// Algebraic sanity
// ============================================================

#[test]
fn test_identity_and_zero() {
    let a: Matrix<f64, 3, 5> = ramp(1);

    let mut left_id: Matrix<f64, 3, 3> = Matrix::zeros();
    let mut right_id: Matrix<f64, 5, 5> = Matrix::zeros();
    for i in 0..3 {
        left_id[(i, i)] = 1.0;
    }
    for i in 0..5 {
        right_id[(i, i)] = 1.0;
    }

    let mut c: Matrix<f64, 3, 5> = Matrix::zeros();
    mul(&left_id, &a, &mut c);
    assert_matrices_identical(&a, &c, "I * A");
    mul(&a, &right_id, &mut c);
    assert_matrices_identical(&a, &c, "A * I");

    let zero: Matrix<f64, 5, 2> = Matrix::zeros();
    let mut z: Matrix<f64, 3, 2> = Matrix::filled(7.0);
    mul(&a, &zero, &mut z);
    assert_eq!(z, Matrix::zeros());
}

#[test]
fn test_output_is_overwritten() {
    let a: Matrix<i32, 3, 3> = Matrix::filled(1);
    let b: Matrix<i32, 3, 3> = Matrix::filled(1);
    let mut c: Matrix<i32, 3, 3> = Matrix::filled(1000);

    mul(&a, &b, &mut c);
    mul(&a, &b, &mut c);

    assert_eq!(c, Matrix::filled(3));
}

#[test]
fn test_transpose_of_product() {
    // (A B)^T = B^T A^T
    let a: Matrix<i32, 2, 3> = Matrix::from([[1, 2, 3], [4, 5, 6]]);
    let b: Matrix<i32, 3, 4> = Matrix::from([[1, 0, 2, 1], [0, 1, 1, 2], [3, 1, 0, 1]]);

    let mut ab: Matrix<i32, 2, 4> = Matrix::zeros();
    mul(&a, &b, &mut ab);
    let mut ab_t: Matrix<i32, 4, 2> = Matrix::zeros();
    transpose(&ab, &mut ab_t);

    let mut a_t: Matrix<i32, 3, 2> = Matrix::zeros();
    let mut b_t: Matrix<i32, 4, 3> = Matrix::zeros();
    transpose(&a, &mut a_t);
    transpose(&b, &mut b_t);
    let mut bt_at: Matrix<i32, 4, 2> = Matrix::zeros();
    mul(&b_t, &a_t, &mut bt_at);

    assert_eq!(ab_t, bt_at);
}

#[test]
fn test_four_quarter_turns() {
    let a: Matrix<u16, 3, 4> = Matrix::from([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]]);
    let mut once: Matrix<u16, 4, 3> = Matrix::zeros();
    let mut twice: Matrix<u16, 3, 4> = Matrix::zeros();
    let mut thrice: Matrix<u16, 4, 3> = Matrix::zeros();
    let mut back: Matrix<u16, 3, 4> = Matrix::zeros();

    rotate_90(&a, &mut once);
    rotate_90(&once, &mut twice);
    rotate_90(&twice, &mut thrice);
    rotate_90(&thrice, &mut back);
    assert_eq!(back, a);

    let mut half: Matrix<u16, 3, 4> = Matrix::zeros();
    rotate_180(&a, &mut half);
    assert_eq!(half, twice);

    let mut left: Matrix<u16, 4, 3> = Matrix::zeros();
    rotate_270(&a, &mut left);
    assert_eq!(left, thrice);
}

// ============================================================
// Mixed element types
// ============================================================

#[test]
fn test_int_times_float_into_double() {
    let a: Matrix<i32, 2, 2> = Matrix::from([[1, 2], [3, 4]]);
    let b: Matrix<f32, 2, 2> = Matrix::from([[0.5, 0.25], [1.5, 2.0]]);
    let mut c: Matrix<f64, 2, 2> = Matrix::zeros();

    for tier in Tier::ALL {
        mul_via(tier, &a, &b, &mut c);
        assert_eq!(c, Matrix::from([[3.5, 4.25], [7.5, 8.75]]), "via {}", tier);
    }
}

#[test]
fn test_int_times_float_is_rounded_in_float() {
    let a: Matrix<i32, 1, 1> = Matrix::from([[3]]);
    let b: Matrix<f32, 1, 1> = Matrix::from([[0.1]]);
    let mut c: Matrix<f64, 1, 1> = Matrix::zeros();

    let in_f32 = f64::from(3.0f32 * 0.1f32);
    let in_f64 = 3.0 * f64::from(0.1f32);
    assert_ne!(in_f32, in_f64);

    for tier in Tier::ALL {
        mul_via(tier, &a, &b, &mut c);
        // i32 * f32 is evaluated in f32, then widened for the store
        assert_eq!(c[0], in_f32, "via {}", tier);
    }
}

#[test]
fn test_float_product_into_integers_truncates_once() {
    let a: Matrix<f64, 1, 3> = Matrix::from([[0.4, 0.4, 0.4]]);
    let b: Matrix<f64, 3, 1> = Matrix::from([[1.0], [1.0], [1.0]]);
    let mut c: Matrix<i32, 1, 1> = Matrix::zeros();

    for tier in Tier::ALL {
        mul_via(tier, &a, &b, &mut c);
        // 0.4 * 3 = 1.2 -> 1, not 0 + 0 + 0
        assert_eq!(c[0], 1, "via {}", tier);
    }
}

#[test]
fn test_unsigned_times_signed() {
    let a: Matrix<u8, 1, 2> = Matrix::from([[200, 100]]);
    let b: Matrix<i8, 2, 1> = Matrix::from([[-1], [-1]]);
    let mut c: Matrix<i32, 1, 1> = Matrix::zeros();

    mul(&a, &b, &mut c);

    // summed in i32: -300
    assert_eq!(c[0], -300);
}

#[test]
fn test_narrow_integers_are_summed_in_i32() {
    let a: Matrix<u8, 1, 2> = Matrix::from([[200, 100]]);
    let b: Matrix<u8, 2, 1> = Matrix::from([[2], [3]]);
    let mut c: Matrix<i32, 1, 1> = Matrix::zeros();

    for tier in Tier::ALL {
        mul_via(tier, &a, &b, &mut c);
        assert_eq!(c[0], 700, "via {}", tier);
    }

    let a: Matrix<i8, 1, 2> = Matrix::from([[100, -100]]);
    let b: Matrix<i8, 2, 1> = Matrix::from([[100], [-100]]);

    for tier in Tier::ALL {
        mul_via(tier, &a, &b, &mut c);
        assert_eq!(c[0], 20_000, "via {}", tier);
    }

    let a: Matrix<i16, 1, 3> = Matrix::from([[i16::MAX, i16::MAX, i16::MAX]]);
    let b: Matrix<u8, 3, 1> = Matrix::from([[2], [2], [2]]);

    for tier in Tier::ALL {
        mul_via(tier, &a, &b, &mut c);
        assert_eq!(c[0], 6 * i32::from(i16::MAX), "via {}", tier);
    }
}

// ============================================================
// In-place multiplication and aliasing
// ============================================================

#[test]
fn test_mul_assign_squares() {
    let mut a: Matrix<i32, 3, 3> = Matrix::from([[1, 2, 0], [0, 1, 0], [0, 0, 2]]);
    let b = a.clone();
    let mut expected: Matrix<i32, 3, 3> = Matrix::zeros();
    mul(&a, &b, &mut expected);

    a *= &b;

    assert_eq!(a, expected);
    assert_eq!(a, Matrix::from([[1, 4, 0], [0, 1, 0], [0, 0, 4]]));
}

#[test]
fn test_no_diagnostics_for_separate_storage() {
    let a: Matrix<f32, 4, 4> = Matrix::filled(1.0f32);
    let b = a.clone();
    let mut c: Matrix<f32, 4, 4> = Matrix::zeros();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    mul_with(&a, &b, &mut c, &mut diagnostics);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(c, Matrix::filled(4.0f32));
}
