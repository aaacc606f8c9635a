//! Element-wise arithmetic.
//!
//! Every function writes into a caller-owned destination of the same shape.
//! `+ - * /` are evaluated in the [`Promote`] output type of the two operand
//! types, `pow`, `exp` and `sqrt` in `f64`. The result is converted to the
//! destination element type with `as` semantics.
//!
//! ```
//! use fixed_matrix::{Matrix, ops};
//!
//! let a: Matrix<u8, 2, 2> = Matrix::from([[1, 2], [3, 4]]);
//! let b: Matrix<f32, 2, 2> = Matrix::filled(0.5f32);
//! let mut c: Matrix<f64, 2, 2> = Matrix::zeros();
//!
//! ops::mul_ebe(&a, &b, &mut c);
//! assert_eq!(c, Matrix::from([[0.5, 1.0], [1.5, 2.0]]));
//! ```
//!
//! Integer division by zero panics, as it does for the scalar types.

use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use num_traits::AsPrimitive;

use crate::element::{Element, Product, Promote, store};
use crate::matrix::Matrix;

fn zip_with<TA, TB, TC, F, const ROWS: usize, const COLS: usize>(
    a: &Matrix<TA, ROWS, COLS>,
    b: &Matrix<TB, ROWS, COLS>,
    out: &mut Matrix<TC, ROWS, COLS>,
    op: F,
) where
    TA: Promote<TB>,
    TB: Element,
    TC: Element,
    Product<TA, TB>: AsPrimitive<TC>,
    F: Fn(Product<TA, TB>, Product<TA, TB>) -> Product<TA, TB>,
{
    for ((dst, &x), &y) in out.as_mut_slice().iter_mut().zip(a.iter()).zip(b.iter()) {
        *dst = store(op(
            <TA as Promote<TB>>::promote(x),
            <TA as Promote<TB>>::promote_rhs(y),
        ));
    }
}

fn map<TA, TC, P, F, const ROWS: usize, const COLS: usize>(
    a: &Matrix<TA, ROWS, COLS>,
    out: &mut Matrix<TC, ROWS, COLS>,
    op: F,
) where
    TA: Element,
    TC: Element,
    P: AsPrimitive<TC>,
    F: Fn(TA) -> P,
{
    for (dst, &x) in out.as_mut_slice().iter_mut().zip(a.iter()) {
        *dst = store(op(x));
    }
}

// Generates `name(a, b, out)`, `name_scalar(a, s, out)` and, where given,
// `scalar_name(s, a, out)` for one arithmetic operator.
macro_rules! arithmetic {
    (
        $(#[$doc:meta])*
        $name:ident, $with_scalar:ident, $scalar_with:ident, $op:tt
    ) => {
        $(#[$doc])*
        pub fn $name<TA, TB, TC, const ROWS: usize, const COLS: usize>(
            a: &Matrix<TA, ROWS, COLS>,
            b: &Matrix<TB, ROWS, COLS>,
            out: &mut Matrix<TC, ROWS, COLS>,
        ) where
            TA: Promote<TB>,
            TB: Element,
            TC: Element,
            Product<TA, TB>: AsPrimitive<TC>,
        {
            zip_with(a, b, out, |x, y| x $op y);
        }

        /// Same as the matrix form with every right-hand element set to `scalar`.
        pub fn $with_scalar<TA, TB, TC, const ROWS: usize, const COLS: usize>(
            a: &Matrix<TA, ROWS, COLS>,
            scalar: TB,
            out: &mut Matrix<TC, ROWS, COLS>,
        ) where
            TA: Promote<TB>,
            TB: Element,
            TC: Element,
            Product<TA, TB>: AsPrimitive<TC>,
        {
            let s = <TA as Promote<TB>>::promote_rhs(scalar);
            map(a, out, |x| <TA as Promote<TB>>::promote(x) $op s);
        }

        /// Same as the matrix form with every left-hand element set to `scalar`.
        pub fn $scalar_with<TA, TB, TC, const ROWS: usize, const COLS: usize>(
            scalar: TA,
            a: &Matrix<TB, ROWS, COLS>,
            out: &mut Matrix<TC, ROWS, COLS>,
        ) where
            TA: Promote<TB>,
            TB: Element,
            TC: Element,
            Product<TA, TB>: AsPrimitive<TC>,
        {
            let s = <TA as Promote<TB>>::promote(scalar);
            map(a, out, |x| s $op <TA as Promote<TB>>::promote_rhs(x));
        }
    };
}

arithmetic! {
    /// `out = a + b`
    add, add_scalar, scalar_add, +
}

arithmetic! {
    /// `out = a - b`
    sub, sub_scalar, scalar_sub, -
}

arithmetic! {
    /// `out = a * b`, element by element (not the matrix product, see
    /// [`mul`](crate::mul)).
    mul_ebe, mul_ebe_scalar, scalar_mul_ebe, *
}

arithmetic! {
    /// `out = a / b`, element by element.
    div_ebe, div_ebe_scalar, scalar_div_ebe, /
}

/// `out = a ^ b`, element by element, evaluated in `f64`.
pub fn pow_ebe<TA, TB, TC, const ROWS: usize, const COLS: usize>(
    a: &Matrix<TA, ROWS, COLS>,
    b: &Matrix<TB, ROWS, COLS>,
    out: &mut Matrix<TC, ROWS, COLS>,
) where
    TA: Element + AsPrimitive<f64>,
    TB: Element + AsPrimitive<f64>,
    TC: Element,
    f64: AsPrimitive<TC>,
{
    for ((dst, &x), &y) in out.as_mut_slice().iter_mut().zip(a.iter()).zip(b.iter()) {
        let (x, y): (f64, f64) = (x.as_(), y.as_());
        *dst = store(x.powf(y));
    }
}

pub fn pow_ebe_scalar<TA, TB, TC, const ROWS: usize, const COLS: usize>(
    a: &Matrix<TA, ROWS, COLS>,
    exponent: TB,
    out: &mut Matrix<TC, ROWS, COLS>,
) where
    TA: Element + AsPrimitive<f64>,
    TB: Element + AsPrimitive<f64>,
    TC: Element,
    f64: AsPrimitive<TC>,
{
    let e: f64 = exponent.as_();
    map(a, out, |x| AsPrimitive::<f64>::as_(x).powf(e));
}

pub fn scalar_pow_ebe<TA, TB, TC, const ROWS: usize, const COLS: usize>(
    base: TA,
    a: &Matrix<TB, ROWS, COLS>,
    out: &mut Matrix<TC, ROWS, COLS>,
) where
    TA: Element + AsPrimitive<f64>,
    TB: Element + AsPrimitive<f64>,
    TC: Element,
    f64: AsPrimitive<TC>,
{
    let base: f64 = base.as_();
    map(a, out, |x| base.powf(x.as_()));
}

/// `out = e ^ a`, element by element.
pub fn exp_ebe<TA, TC, const ROWS: usize, const COLS: usize>(
    a: &Matrix<TA, ROWS, COLS>,
    out: &mut Matrix<TC, ROWS, COLS>,
) where
    TA: Element + AsPrimitive<f64>,
    TC: Element,
    f64: AsPrimitive<TC>,
{
    map(a, out, |x| AsPrimitive::<f64>::as_(x).exp());
}

/// Square root of every element. Negative inputs give `NaN`, which converts
/// to `0` for integer destinations.
pub fn sqrt_ebe<TA, TC, const ROWS: usize, const COLS: usize>(
    a: &Matrix<TA, ROWS, COLS>,
    out: &mut Matrix<TC, ROWS, COLS>,
) where
    TA: Element + AsPrimitive<f64>,
    TC: Element,
    f64: AsPrimitive<TC>,
{
    map(a, out, |x| AsPrimitive::<f64>::as_(x).sqrt());
}

impl<T, const ROWS: usize, const COLS: usize> Add for &Matrix<T, ROWS, COLS>
where
    T: Promote<T>,
    Product<T, T>: AsPrimitive<T>,
{
    type Output = Matrix<T, ROWS, COLS>;

    fn add(self, rhs: Self) -> Self::Output {
        let mut out = Matrix::zeros();
        add(self, rhs, &mut out);
        out
    }
}

impl<T, const ROWS: usize, const COLS: usize> Sub for &Matrix<T, ROWS, COLS>
where
    T: Promote<T>,
    Product<T, T>: AsPrimitive<T>,
{
    type Output = Matrix<T, ROWS, COLS>;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut out = Matrix::zeros();
        sub(self, rhs, &mut out);
        out
    }
}

impl<T, U, const ROWS: usize, const COLS: usize> AddAssign<&Matrix<U, ROWS, COLS>>
    for Matrix<T, ROWS, COLS>
where
    T: Promote<U>,
    U: Element,
    Product<T, U>: AsPrimitive<T>,
{
    fn add_assign(&mut self, rhs: &Matrix<U, ROWS, COLS>) {
        for (x, &y) in self.as_mut_slice().iter_mut().zip(rhs.iter()) {
            *x = store(<T as Promote<U>>::promote(*x) + <T as Promote<U>>::promote_rhs(y));
        }
    }
}

impl<T, U, const ROWS: usize, const COLS: usize> SubAssign<&Matrix<U, ROWS, COLS>>
    for Matrix<T, ROWS, COLS>
where
    T: Promote<U>,
    U: Element,
    Product<T, U>: AsPrimitive<T>,
{
    fn sub_assign(&mut self, rhs: &Matrix<U, ROWS, COLS>) {
        for (x, &y) in self.as_mut_slice().iter_mut().zip(rhs.iter()) {
            *x = store(<T as Promote<U>>::promote(*x) - <T as Promote<U>>::promote_rhs(y));
        }
    }
}

/// Matrix product through [`mul`](crate::mul).
///
/// ```
/// use fixed_matrix::Matrix;
///
/// let a: Matrix<i32, 2, 3> = Matrix::from([[1, 2, 3], [4, 5, 6]]);
/// let b: Matrix<i32, 3, 2> = Matrix::from([[7, 8], [9, 10], [11, 12]]);
/// assert_eq!(&a * &b, Matrix::from([[58, 64], [139, 154]]));
/// ```
impl<T, const R: usize, const K: usize, const C: usize> Mul<&Matrix<T, K, C>> for &Matrix<T, R, K>
where
    T: Promote<T>,
    Product<T, T>: AsPrimitive<T>,
{
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: &Matrix<T, K, C>) -> Self::Output {
        let mut out = Matrix::zeros();
        crate::mul(self, rhs, &mut out);
        out
    }
}

/// In-place product with a square right-hand side.
///
/// The left operand is copied before multiplying, since the kernels read `A`
/// while writing `C`.
impl<T, U, const ROWS: usize, const COLS: usize> MulAssign<&Matrix<U, COLS, COLS>>
    for Matrix<T, ROWS, COLS>
where
    T: Promote<U>,
    U: Element,
    Product<T, U>: AsPrimitive<T>,
{
    fn mul_assign(&mut self, rhs: &Matrix<U, COLS, COLS>) {
        let lhs = self.clone();
        crate::mul(&lhs, rhs, self);
    }
}
