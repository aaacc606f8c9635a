//! Generated small-shape kernels.
//!
//! `build.rs` writes these from the same triple loop over
//! `(rows_a, inner, cols_b)` in `1..=UNROLL_BOUND`, so the unrolled code never
//! has to be maintained by hand. Both entry points work on row-major slices and
//! overwrite `c`.
//!
//! - `mul_exact`: Tier 1, a literal sum of products for every output element.
//! - `mul_fixed_inner`: Tier 2, runtime row/column loops around an unrolled
//!   inner sum.
//!
//! Each one matches on its const dimensions, so after monomorphization only the
//! arm for the actual shape survives. Reaching any other arm is a dispatcher
//! bug, hence the `unreachable!`.

use num_traits::AsPrimitive;

use crate::element::{Element, Product, Promote};
// unused when UNROLL_BOUND is 0
#[allow(unused_imports)]
use crate::element::product;

include!(concat!(env!("OUT_DIR"), "/unrolled.rs"));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive::mul_generic_slices;

    fn ramp(len: usize, scale: i64) -> Vec<i64> {
        (0..len as i64).map(|i| (i * scale) % 17 - 8).collect()
    }

    #[test]
    fn bound_stays_within_what_rustc_can_build() {
        assert!(MAX_UNROLL_BOUND <= 6);
        assert!(UNROLL_BOUND <= MAX_UNROLL_BOUND);
    }

    #[test]
    fn exact_kernel_matches_the_triple_loop() {
        if UNROLL_BOUND < 3 {
            return;
        }
        let a = ramp(2 * 3, 5);
        let b = ramp(3 * 3, 7);
        let mut expected = vec![0i64; 2 * 3];
        let mut actual = vec![0i64; 2 * 3];

        mul_generic_slices::<i64, i64, i64, 2, 3, 3>(&a, &b, &mut expected);
        mul_exact::<i64, i64, i64, 2, 3, 3>(&a, &b, &mut actual);

        assert_eq!(expected, actual);
    }

    #[test]
    fn fixed_inner_kernel_handles_long_sides() {
        if UNROLL_BOUND < 2 {
            return;
        }
        let a = ramp(9 * 2, 3);
        let b = ramp(2 * 11, 4);
        let mut expected = vec![0i64; 9 * 11];
        let mut actual = vec![0i64; 9 * 11];

        mul_generic_slices::<i64, i64, i64, 9, 2, 11>(&a, &b, &mut expected);
        mul_fixed_inner::<i64, i64, i64, 9, 2, 11>(&a, &b, &mut actual);

        assert_eq!(expected, actual);
    }
}
