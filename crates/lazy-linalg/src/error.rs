//! Runtime size-check failures.
//!
//! Mismatches that can be decided from types alone are compile errors (see [`SameDim`],
//! [`CheckShape`] and [`ProductShape`]). Everything that depends on a runtime dimension is
//! reported through [`SizeError`], always before any element of the faulting operation is
//! computed or written.
//!
//! [`SameDim`]: crate::SameDim
//! [`CheckShape`]: crate::CheckShape
//! [`ProductShape`]: crate::ProductShape

/// A dimension mismatch detected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum SizeError {
    /// Two vector operands (or a vector destination and its source) differ in length.
    #[error("vector size mismatch: expected {expected} elements, got {actual}")]
    VectorSize { expected: usize, actual: usize },

    /// Two matrix operands (or a matrix destination and its source) differ in shape.
    #[error(
        "matrix size mismatch: expected {expected_rows}x{expected_cols}, got {actual_rows}x{actual_cols}"
    )]
    MatrixSize {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// The inner dimensions of a product do not agree.
    #[error("incompatible product: left operand has {left_cols} columns, right operand has {right_rows} rows")]
    InnerDimension { left_cols: usize, right_rows: usize },

    /// An operation that requires a square matrix got a non-square one.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A caller-supplied buffer does not have the length the requested shape needs.
    #[error("external buffer holds {actual} elements, but {expected} are required")]
    BufferSize { expected: usize, actual: usize },
}

/// Result alias for fallible operations of this crate.
pub type Result<T> = std::result::Result<T, SizeError>;
