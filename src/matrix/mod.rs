//! The fixed-size matrix container and the plain loop kernels built on it.
//!
//! `naive` holds the Tier-3 triple loop that every specialized kernel is
//! checked against, `transpose` the transpose and rotation helpers.

pub mod naive;
pub mod transpose;

use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::AsPrimitive;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::element::Element;
use crate::error::MatrixError;

/// A `ROWS x COLS` matrix stored row-major in one heap buffer.
///
/// The dimensions are part of the type, so shape errors in products are
/// compile errors. `(row, col)` lives at linear index `row * COLS + col`.
///
/// ```
/// use fixed_matrix::Matrix;
///
/// let primes: Matrix<u8, 2, 3> = Matrix::from([[2, 3, 5], [7, 11, 13]]);
/// assert_eq!(primes[(1, 2)], 13);
/// assert_eq!(primes[4], 11);
/// ```
#[derive(Clone)]
pub struct Matrix<T, const ROWS: usize, const COLS: usize> {
    data: Box<[T]>,
}

impl<T, const ROWS: usize, const COLS: usize> Matrix<T, ROWS, COLS> {
    pub const ROWS: usize = ROWS;
    pub const COLS: usize = COLS;
    pub const LEN: usize = ROWS * COLS;

    // Evaluated by every constructor, so `Matrix<T, 0, N>` can name a type but
    // never hold a value.
    const NON_EMPTY: () = assert!(
        ROWS > 0 && COLS > 0,
        "matrix dimensions must be at least 1x1"
    );

    fn from_boxed_unchecked(data: Box<[T]>) -> Self {
        let () = Self::NON_EMPTY;
        debug_assert_eq!(data.len(), Self::LEN);
        Self { data }
    }

    /// Takes ownership of an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::BufferLength`] (handing nothing back) unless the
    /// buffer holds exactly `ROWS * COLS` elements.
    pub fn from_boxed(data: Box<[T]>) -> Result<Self, MatrixError> {
        if data.len() != Self::LEN {
            return Err(MatrixError::BufferLength {
                len: data.len(),
                expected: Self::LEN,
            });
        }
        Ok(Self::from_boxed_unchecked(data))
    }

    /// Same as [`Matrix::from_boxed`] for a `Vec`.
    pub fn from_vec(data: Vec<T>) -> Result<Self, MatrixError> {
        Self::from_boxed(data.into_boxed_slice())
    }

    /// Releases the buffer.
    pub fn into_boxed(self) -> Box<[T]> {
        self.data
    }

    pub const fn rows(&self) -> usize {
        ROWS
    }

    pub const fn cols(&self) -> usize {
        COLS
    }

    pub const fn len(&self) -> usize {
        ROWS * COLS
    }

    /// Always false, zero-sized matrices cannot be built.
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    fn check(row: usize, col: usize) -> Result<usize, MatrixError> {
        // `>=`: a position equal to the dimension is already one past the end.
        if row >= ROWS || col >= COLS {
            return Err(MatrixError::OutOfRange {
                row,
                col,
                rows: ROWS,
                cols: COLS,
            });
        }
        Ok(row * COLS + col)
    }

    fn check_linear(index: usize) -> Result<usize, MatrixError> {
        if index >= Self::LEN {
            return Err(MatrixError::IndexOutOfRange {
                index,
                len: Self::LEN,
            });
        }
        Ok(index)
    }

    /// Bounds-checked access to `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> Result<&T, MatrixError> {
        let i = Self::check(row, col)?;
        Ok(&self.data[i])
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T, MatrixError> {
        let i = Self::check(row, col)?;
        Ok(&mut self.data[i])
    }

    /// Bounds-checked access by row-major linear index.
    pub fn at_linear(&self, index: usize) -> Result<&T, MatrixError> {
        let i = Self::check_linear(index)?;
        Ok(&self.data[i])
    }

    pub fn at_linear_mut(&mut self, index: usize) -> Result<&mut T, MatrixError> {
        let i = Self::check_linear(index)?;
        Ok(&mut self.data[i])
    }
}

impl<T: Element, const ROWS: usize, const COLS: usize> Matrix<T, ROWS, COLS> {
    /// Every element set to `value`, converted to `T`.
    ///
    /// ```
    /// use fixed_matrix::Matrix;
    ///
    /// let all_pi: Matrix<f64, 3, 8> = Matrix::filled(3.141592658979323);
    /// let truncated: Matrix<i32, 2, 2> = Matrix::filled(2.75);
    /// assert_eq!(truncated, Matrix::from([[2, 2], [2, 2]]));
    /// # let _ = all_pi;
    /// ```
    pub fn filled<S>(value: S) -> Self
    where
        S: AsPrimitive<T>,
    {
        Self::from_boxed_unchecked(vec![value.as_(); Self::LEN].into_boxed_slice())
    }

    pub fn zeros() -> Self {
        Self::from_boxed_unchecked(vec![T::zero(); Self::LEN].into_boxed_slice())
    }

    /// Builds a matrix from nested rows, reporting size mismatches as
    /// [`Diagnostic::ElementCount`] through `tracing`.
    ///
    /// See [`Matrix::from_rows_with`].
    pub fn from_rows<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        Self::from_rows_with(rows, &mut TracingSink)
    }

    /// Builds a matrix from nested rows.
    ///
    /// The rows are flattened in order, ignoring how the elements are split
    /// between them. Too few elements are padded with zeros, too many are
    /// dropped; either way one [`Diagnostic::ElementCount`] goes to `sink`.
    ///
    /// ```
    /// use fixed_matrix::{Diagnostic, Matrix};
    ///
    /// let mut diagnostics: Vec<Diagnostic> = Vec::new();
    /// let m: Matrix<i32, 2, 2> = Matrix::from_rows_with([vec![1, 2], vec![3]], &mut diagnostics);
    ///
    /// assert_eq!(m, Matrix::from([[1, 2], [3, 0]]));
    /// assert_eq!(diagnostics, [Diagnostic::ElementCount { supplied: 3, expected: 4 }]);
    /// ```
    pub fn from_rows_with<I, R, S>(rows: I, sink: &mut S) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
        S: DiagnosticSink + ?Sized,
    {
        let mut data = Vec::with_capacity(Self::LEN);
        let mut supplied = 0;
        for element in rows.into_iter().flatten() {
            if supplied < Self::LEN {
                data.push(element);
            }
            supplied += 1;
        }

        if supplied != Self::LEN {
            sink.report(Diagnostic::ElementCount {
                supplied,
                expected: Self::LEN,
            });
        }
        data.resize(Self::LEN, T::zero());

        Self::from_boxed_unchecked(data.into_boxed_slice())
    }

    /// Element-wise conversion from a matrix of another element type.
    ///
    /// ```
    /// use fixed_matrix::Matrix;
    ///
    /// let primes: Matrix<u8, 1, 3> = Matrix::from([[2, 3, 5]]);
    /// let doubles: Matrix<f64, 1, 3> = Matrix::from_matrix(&primes);
    /// assert_eq!(doubles, Matrix::from([[2.0, 3.0, 5.0]]));
    /// ```
    pub fn from_matrix<U>(other: &Matrix<U, ROWS, COLS>) -> Self
    where
        U: Element + AsPrimitive<T>,
    {
        let data: Vec<T> = other.iter().map(|&x| x.as_()).collect();
        Self::from_boxed_unchecked(data.into_boxed_slice())
    }

    /// Copies `other` into `self`, converting each element.
    pub fn assign<U>(&mut self, other: &Matrix<U, ROWS, COLS>)
    where
        U: Element + AsPrimitive<T>,
    {
        for (dst, &src) in self.data.iter_mut().zip(other.iter()) {
            *dst = src.as_();
        }
    }

    /// Sets every element to `value`, converted to `T`.
    pub fn fill<S>(&mut self, value: S)
    where
        S: AsPrimitive<T>,
    {
        self.data.fill(value.as_());
    }

    /// True iff the dimensions match and every element is bit-identical.
    ///
    /// ```
    /// use fixed_matrix::Matrix;
    ///
    /// let wide: Matrix<i32, 1, 4> = Matrix::zeros();
    /// let square: Matrix<i32, 2, 2> = Matrix::zeros();
    /// assert!(!wide.bit_eq(&square));
    /// assert!(square.bit_eq(&square.clone()));
    /// ```
    pub fn bit_eq<const R2: usize, const C2: usize>(&self, other: &Matrix<T, R2, C2>) -> bool {
        ROWS == R2
            && COLS == C2
            && self
                .iter()
                .zip(other.iter())
                .all(|(&x, &y)| x.bit_eq(y))
    }

    /// Writes the column-aligned rendering (see the `Display` impl) to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl<T: Element, const ROWS: usize, const COLS: usize> From<[[T; COLS]; ROWS]>
    for Matrix<T, ROWS, COLS>
{
    fn from(rows: [[T; COLS]; ROWS]) -> Self {
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_boxed_unchecked(data.into_boxed_slice())
    }
}

impl<T, const ROWS: usize, const COLS: usize> Index<(usize, usize)> for Matrix<T, ROWS, COLS> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.at(row, col) {
            Ok(x) => x,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const ROWS: usize, const COLS: usize> IndexMut<(usize, usize)>
    for Matrix<T, ROWS, COLS>
{
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match self.at_mut(row, col) {
            Ok(x) => x,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const ROWS: usize, const COLS: usize> Index<usize> for Matrix<T, ROWS, COLS> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at_linear(index) {
            Ok(x) => x,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T, const ROWS: usize, const COLS: usize> IndexMut<usize> for Matrix<T, ROWS, COLS> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_linear_mut(index) {
            Ok(x) => x,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Bit-identical element-wise equality. Comparing matrices of different
/// shapes with `==` does not type-check, see [`Matrix::bit_eq`] for that.
impl<T: Element, const ROWS: usize, const COLS: usize> PartialEq for Matrix<T, ROWS, COLS> {
    fn eq(&self, other: &Self) -> bool {
        self.bit_eq(other)
    }
}

impl<T: Element, const ROWS: usize, const COLS: usize> Eq for Matrix<T, ROWS, COLS> {}

impl<T: fmt::Debug, const ROWS: usize, const COLS: usize> fmt::Debug for Matrix<T, ROWS, COLS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.chunks(COLS)).finish()
    }
}

/// One line per row, columns right-aligned to their widest entry:
///
/// ```text
/// |   1, 22 |
/// | 333,  4 |
/// ```
impl<T: fmt::Display, const ROWS: usize, const COLS: usize> fmt::Display
    for Matrix<T, ROWS, COLS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.data.iter().map(|x| x.to_string()).collect();

        // widest entry per column, plus one space of padding
        let mut widths = [0usize; COLS];
        for (i, cell) in cells.iter().enumerate() {
            let w = &mut widths[i % COLS];
            *w = (*w).max(cell.chars().count() + 1);
        }

        for row in cells.chunks(COLS) {
            f.write_str("|")?;
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{cell:>width$}", width = widths[col])?;
            }
            f.write_str(" |\n")?;
        }
        Ok(())
    }
}
