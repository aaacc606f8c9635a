use num_traits::AsPrimitive;

use crate::element::{Element, Product, Promote, product};
use crate::matrix::Matrix;

/// Tier 3: the textbook i-j-k triple loop, for any shape.
///
/// Slow for the reasons every i-j-k loop is slow (B is walked with stride
/// `C`), but it is correct for every shape and is what the specialized
/// kernels must agree with bit for bit. Each output element is summed in the
/// product type in the order `k = 0, 1, ..`, then converted to `TC` once,
/// exactly like the unrolled kernels do.
///
/// # Arguments
///
/// * `a` - Matrix A (R × K), row-major
/// * `b` - Matrix B (K × C), row-major
/// * `c` - Matrix C (R × C), row-major, overwritten
pub fn mul_generic_slices<TA, TB, TC, const R: usize, const K: usize, const C: usize>(
    a: &[TA],
    b: &[TB],
    c: &mut [TC],
) where
    TA: Promote<TB>,
    TB: Element,
    TC: Element,
    Product<TA, TB>: AsPrimitive<TC>,
{
    assert_eq!(a.len(), R * K, "A: expected {}x{}={} elements", R, K, R * K);
    assert_eq!(b.len(), K * C, "B: expected {}x{}={} elements", K, C, K * C);
    assert_eq!(c.len(), R * C, "C: expected {}x{}={} elements", R, C, R * C);

    for i in 0..R {
        let row = &a[i * K..(i + 1) * K];
        for j in 0..C {
            // Seeding with the first term (K >= 1) keeps the addition order
            // identical to the unrolled `p0 + p1 + ..` expressions.
            let mut acc = product(row[0], b[j]);
            for p in 1..K {
                acc = acc + product(row[p], b[p * C + j]);
            }
            c[i * C + j] = acc.as_();
        }
    }
}

/// [`mul_generic_slices`] on matrices: `C = A * B` without any unrolling.
///
/// ```
/// use fixed_matrix::{Matrix, matrix::naive::mul_generic};
///
/// let a: Matrix<i32, 2, 2> = Matrix::from([[1, 2], [3, 4]]);
/// let b: Matrix<i32, 2, 2> = Matrix::from([[5, 6], [7, 8]]);
/// let mut c: Matrix<i32, 2, 2> = Matrix::zeros();
///
/// mul_generic(&a, &b, &mut c);
/// assert_eq!(c, Matrix::from([[19, 22], [43, 50]]));
/// ```
pub fn mul_generic<TA, TB, TC, const R: usize, const K: usize, const C: usize>(
    a: &Matrix<TA, R, K>,
    b: &Matrix<TB, K, C>,
    c: &mut Matrix<TC, R, C>,
) where
    TA: Promote<TB>,
    TB: Element,
    TC: Element,
    Product<TA, TB>: AsPrimitive<TC>,
{
    mul_generic_slices::<TA, TB, TC, R, K, C>(a.as_slice(), b.as_slice(), c.as_mut_slice());
}
