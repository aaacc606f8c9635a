//! Fixed-size matrices with dimension-specialized multiplication.
//!
//! For small matrices the overhead of loops dominates the arithmetic, so
//! `C = A * B` is dispatched on the (compile-time) shape: tiny products get a
//! fully unrolled sum of products, products with a small inner dimension get an
//! unrolled inner sum, everything else gets the plain triple loop. All three
//! produce bit-identical results.
//!
//! ## Usage
//!
//! ```
//! use fixed_matrix::{Matrix, mul};
//!
//! let a: Matrix<i32, 2, 2> = Matrix::from([[1, 2], [3, 4]]);
//! let b: Matrix<i32, 2, 2> = Matrix::from([[5, 6], [7, 8]]);
//! let mut c: Matrix<i32, 2, 2> = Matrix::zeros();
//!
//! mul(&a, &b, &mut c);
//! assert_eq!(c, Matrix::from([[19, 22], [43, 50]]));
//! ```
//!
//! Element types may differ. Each output element is summed in the promoted
//! product type and converted to the output type once:
//!
//! ```
//! use fixed_matrix::{Matrix, mul};
//!
//! let a: Matrix<i32, 1, 2> = Matrix::from([[1, 2]]);
//! let b: Matrix<f32, 2, 1> = Matrix::from([[0.5], [0.25]]);
//! let mut c: Matrix<f64, 1, 1> = Matrix::zeros();
//!
//! mul(&a, &b, &mut c);
//! assert_eq!(c[0], 1.0);
//! ```
//!
//! ## What's inside
//!
//! - `Matrix<T, ROWS, COLS>`: owned row-major storage, checked access
//! - Tier 1 / Tier 2 kernels generated by `build.rs` up to `UNROLL_BOUND`
//!   (features `unroll-3`, `unroll-4` (default), `unroll-5`, `no-unroll`)
//! - Tier 3 triple loop in [`matrix::naive`]
//! - Element-wise arithmetic in [`ops`], transpose and rotations in
//!   [`matrix::transpose`]
//! - Non-fatal diagnostics through a caller-chosen [`DiagnosticSink`]

pub mod diagnostics;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod ops;

use num_traits::AsPrimitive;

pub use diagnostics::{Diagnostic, DiagnosticSink, Operand, TracingSink};
pub use dispatch::{Shape, Tier, tier_of};
pub use element::{Element, Product, Promote};
pub use error::MatrixError;
pub use kernels::{MAX_UNROLL_BOUND, UNROLL_BOUND};
pub use matrix::Matrix;
pub use matrix::naive::mul_generic;

/// Matrix multiply: C = A * B
///
/// Picks the tier for the shape at compile time (see [`Tier::select`]).
/// Diagnostics are logged with `tracing`; use [`mul_with`] to receive them.
///
/// `C` is overwritten, not accumulated into. Shapes are checked by the type
/// system, so a mismatched inner dimension does not compile:
///
/// ```compile_fail
/// use fixed_matrix::{Matrix, mul};
///
/// let a: Matrix<i32, 2, 3> = Matrix::zeros();
/// let b: Matrix<i32, 2, 2> = Matrix::zeros();
/// let mut c: Matrix<i32, 2, 2> = Matrix::zeros();
/// mul(&a, &b, &mut c);
/// ```
///
/// Neither does using an input as the output. Multiply in place with `*=`,
/// which copies the left operand first:
///
/// ```compile_fail
/// use fixed_matrix::{Matrix, mul};
///
/// let mut a: Matrix<i32, 2, 2> = Matrix::filled(1);
/// let b = a.clone();
/// mul(&a, &b, &mut a);
/// ```
pub fn mul<TA, TB, TC, const R: usize, const K: usize, const C: usize>(
    a: &Matrix<TA, R, K>,
    b: &Matrix<TB, K, C>,
    c: &mut Matrix<TC, R, C>,
) where
    TA: Promote<TB>,
    TB: Element,
    TC: Element,
    Product<TA, TB>: AsPrimitive<TC>,
{
    mul_with(a, b, c, &mut TracingSink);
}

/// Same as [`mul`], reporting diagnostics to `sink`.
///
/// The only diagnostic is [`Diagnostic::AliasedOperand`]: when an input has
/// the output's shape and shares its storage. The product is still computed
/// and may be wrong.
pub fn mul_with<TA, TB, TC, S, const R: usize, const K: usize, const C: usize>(
    a: &Matrix<TA, R, K>,
    b: &Matrix<TB, K, C>,
    c: &mut Matrix<TC, R, C>,
    sink: &mut S,
) where
    TA: Promote<TB>,
    TB: Element,
    TC: Element,
    Product<TA, TB>: AsPrimitive<TC>,
    S: DiagnosticSink + ?Sized,
{
    report_aliasing::<TA, TB, TC, S, R, K, C>(a.as_slice(), b.as_slice(), c.as_slice(), sink);

    let (a, b, c) = (a.as_slice(), b.as_slice(), c.as_mut_slice());
    match Shape::<R, K, C>::TIER {
        Tier::Unrolled => kernels::mul_exact::<TA, TB, TC, R, K, C>(a, b, c),
        Tier::FixedInner => kernels::mul_fixed_inner::<TA, TB, TC, R, K, C>(a, b, c),
        Tier::Generic => matrix::naive::mul_generic_slices::<TA, TB, TC, R, K, C>(a, b, c),
    }
}

/// Runs a specific tier, for benchmarks and cross-checking.
///
/// A tier without generated code for this shape falls back to the next more
/// generic one (see [`Tier::or_fallback`]); the tier that actually ran is
/// returned.
///
/// ```
/// use fixed_matrix::{Matrix, Tier, mul_via};
///
/// let a: Matrix<i32, 2, 2> = Matrix::from([[1, 2], [3, 4]]);
/// let b: Matrix<i32, 2, 2> = Matrix::from([[5, 6], [7, 8]]);
/// let mut c: Matrix<i32, 2, 2> = Matrix::zeros();
///
/// assert_eq!(mul_via(Tier::Generic, &a, &b, &mut c), Tier::Generic);
/// assert_eq!(c, Matrix::from([[19, 22], [43, 50]]));
/// ```
pub fn mul_via<TA, TB, TC, const R: usize, const K: usize, const C: usize>(
    tier: Tier,
    a: &Matrix<TA, R, K>,
    b: &Matrix<TB, K, C>,
    c: &mut Matrix<TC, R, C>,
) -> Tier
where
    TA: Promote<TB>,
    TB: Element,
    TC: Element,
    Product<TA, TB>: AsPrimitive<TC>,
{
    let tier = tier.or_fallback(Shape::<R, K, C>::TIER);
    let (a, b, c) = (a.as_slice(), b.as_slice(), c.as_mut_slice());
    match tier {
        Tier::Unrolled => kernels::mul_exact::<TA, TB, TC, R, K, C>(a, b, c),
        Tier::FixedInner => kernels::mul_fixed_inner::<TA, TB, TC, R, K, C>(a, b, c),
        Tier::Generic => matrix::naive::mul_generic_slices::<TA, TB, TC, R, K, C>(a, b, c),
    }
    tier
}

// Only an input with the output's shape can be the output. A is R x K and
// B is K x C against C's R x C.
fn report_aliasing<TA, TB, TC, S, const R: usize, const K: usize, const C: usize>(
    a: &[TA],
    b: &[TB],
    c: &[TC],
    sink: &mut S,
) where
    S: DiagnosticSink + ?Sized,
{
    if K == C && diagnostics::overlaps(a, c) {
        sink.report(Diagnostic::AliasedOperand { operand: Operand::A });
    }
    if K == R && diagnostics::overlaps(b, c) {
        sink.report(Diagnostic::AliasedOperand { operand: Operand::B });
    }
}
