//! Transpose and quarter-turn rotations.
//!
//! All four write into a caller-owned destination whose shape is fixed by
//! the type, converting each element on the way.

use num_traits::AsPrimitive;

use crate::element::Element;
use crate::matrix::Matrix;

/// Transpose a matrix: dst = src^T
///
/// What was column j of src becomes row j of dst.
///
/// # Example
///
/// ```
/// use fixed_matrix::{Matrix, matrix::transpose::transpose};
///
/// let src: Matrix<f64, 2, 3> = Matrix::from([[1.0, 2.0, 3.0],
///                                            [4.0, 5.0, 6.0]]);
/// let mut dst: Matrix<f64, 3, 2> = Matrix::zeros();
///
/// transpose(&src, &mut dst);
///
/// assert_eq!(dst, Matrix::from([[1.0, 4.0],
///                               [2.0, 5.0],
///                               [3.0, 6.0]]));
/// ```
pub fn transpose<TA, TB, const ROWS: usize, const COLS: usize>(
    src: &Matrix<TA, ROWS, COLS>,
    dst: &mut Matrix<TB, COLS, ROWS>,
) where
    TA: Element + AsPrimitive<TB>,
    TB: Element,
{
    let (src, dst) = (src.as_slice(), dst.as_mut_slice());
    for i in 0..ROWS {
        for j in 0..COLS {
            dst[j * ROWS + i] = src[i * COLS + j].as_();
        }
    }
}

/// Rotate a quarter turn clockwise: `dst[r][c] = src[ROWS - 1 - c][r]`.
///
/// ```
/// use fixed_matrix::{Matrix, matrix::transpose::rotate_90};
///
/// let src: Matrix<i32, 2, 3> = Matrix::from([[1, 2, 3],
///                                            [4, 5, 6]]);
/// let mut dst: Matrix<i32, 3, 2> = Matrix::zeros();
///
/// rotate_90(&src, &mut dst);
///
/// assert_eq!(dst, Matrix::from([[4, 1],
///                               [5, 2],
///                               [6, 3]]));
/// ```
pub fn rotate_90<TA, TB, const ROWS: usize, const COLS: usize>(
    src: &Matrix<TA, ROWS, COLS>,
    dst: &mut Matrix<TB, COLS, ROWS>,
) where
    TA: Element + AsPrimitive<TB>,
    TB: Element,
{
    let (src, dst) = (src.as_slice(), dst.as_mut_slice());
    for r in 0..COLS {
        for c in 0..ROWS {
            dst[r * ROWS + c] = src[(ROWS - 1 - c) * COLS + r].as_();
        }
    }
}

/// Rotate half a turn, which reverses the row-major order.
pub fn rotate_180<TA, TB, const ROWS: usize, const COLS: usize>(
    src: &Matrix<TA, ROWS, COLS>,
    dst: &mut Matrix<TB, ROWS, COLS>,
) where
    TA: Element + AsPrimitive<TB>,
    TB: Element,
{
    for (d, &s) in dst.as_mut_slice().iter_mut().zip(src.iter().rev()) {
        *d = s.as_();
    }
}

/// Rotate a quarter turn counter-clockwise: `dst[r][c] = src[c][COLS - 1 - r]`.
pub fn rotate_270<TA, TB, const ROWS: usize, const COLS: usize>(
    src: &Matrix<TA, ROWS, COLS>,
    dst: &mut Matrix<TB, COLS, ROWS>,
) where
    TA: Element + AsPrimitive<TB>,
    TB: Element,
{
    let (src, dst) = (src.as_slice(), dst.as_mut_slice());
    for r in 0..COLS {
        for c in 0..ROWS {
            dst[r * ROWS + c] = src[c * COLS + (COLS - 1 - r)].as_();
        }
    }
}
