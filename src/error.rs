use thiserror::Error;

/// Errors raised by fallible matrix accessors and buffer adoption.
///
/// Shape mismatches never show up here: they are compile errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MatrixError {
    #[error("position ({row}, {col}) is out of range for a {rows}x{cols} matrix")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("linear index {index} is out of range for a matrix of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("tried to adopt a buffer of length {len}, {expected} elements expected")]
    BufferLength { len: usize, expected: usize },
}
