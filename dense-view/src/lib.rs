//! Shared-buffer vector and matrix views.
//!
//! Storage is a reference-counted [`Buffer`] of element cells. [`Vector`] and
//! [`Matrix`] are descriptors (offset, stride, extents) into a buffer, so
//! slicing, row/column extraction and transposition never copy data:
//!
//! - `subvector`, `submatrix`, `row`, `col`, `transpose`: zero-copy views
//!   that alias the parent. A write through the view is visible through the
//!   parent and vice versa.
//! - `copy`, `copy_into`, `zeros_like`: explicit operations that produce or
//!   fill independent storage.
//!
//! Accessors common to both containers (`len`, `buffer`, `copy`,
//! `zeros_like`, `shares_buffer`) are defined once, on [`Container`].
//!
//! # Example
//!
//! ```rust
//! use dense_view::Matrix;
//!
//! // Column-major fill: columns are [0, 1], [2, 3], [4, 5].
//! let a = Matrix::from_col_major(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(a.entry(1, 2).unwrap(), 5.0);
//!
//! // Transpose (zero-copy)
//! let t = a.transpose();
//! assert_eq!((t.rows(), t.cols()), (3, 2));
//! assert_eq!(t.entry(2, 1).unwrap(), 5.0);
//!
//! // Row views alias the matrix
//! let mut r = a.row(0).unwrap();
//! r.set_entry(1, 20.0).unwrap();
//! assert_eq!(a.entry(0, 1).unwrap(), 20.0);
//! ```

mod buffer;
mod display;
mod layout;
mod matrix;
mod vector;

pub use buffer::{Buffer, RawCursor};
pub use dense_traits::Scalar;
pub use layout::{Container, Layout, Positions};
pub use matrix::Matrix;
pub use vector::Vector;

// ============================================================================
// Constants
// ============================================================================

/// Maximum number of entries printed per axis by the `Display` impls.
///
/// Longer vectors (and matrices with more rows or columns) print the leading
/// and trailing entries around an elision mark.
pub const PRINT_LIMIT: usize = 16;

// ============================================================================
// Error types
// ============================================================================

/// Coarse classification of [`DenseError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Shapes are incompatible for the requested operation.
    DimensionMismatch,
    /// An index, offset or sub-range falls outside the backing storage.
    Range,
    /// The arguments cannot describe a valid container: malformed literal or
    /// raw input, an unrepresentable shape, or a zero vector stride.
    Construction,
}

/// Errors that can occur while building or operating on dense containers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenseError {
    /// Operand extents do not match what the operation requires.
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A sub-range extends past the extent it was taken from.
    #[error("range {start}..{} out of bounds for extent {extent}", .start + .len)]
    OutOfRange {
        start: usize,
        len: usize,
        extent: usize,
    },

    /// A single-element index lies outside the container.
    #[error("index {index:?} out of bounds for dims {dims:?}")]
    IndexOutOfBounds { index: Vec<usize>, dims: Vec<usize> },

    /// Vector strides must be non-zero. Classified as
    /// [`ErrorKind::Construction`]: no buffer position is involved.
    #[error("invalid stride 0")]
    ZeroStride,

    /// The view would reach positions outside its buffer.
    #[error("offset overflow: view reaches outside a buffer of length {len}")]
    OffsetOverflow { len: usize },

    /// Leading dimension is smaller than the stored row count.
    #[error("leading dimension {ld} smaller than stored rows {rows}")]
    LeadingDimension { ld: usize, rows: usize },

    /// `rows * cols` does not fit in `usize`.
    #[error("shape {rows} x {cols} overflows the element count")]
    ShapeOverflow { rows: usize, cols: usize },

    /// Literal element count does not match the declared shape.
    #[error("expected {expected} values, got {actual}")]
    InvalidLiteral { expected: usize, actual: usize },

    /// Raw byte input is not a whole number of elements.
    #[error("{bytes} bytes is not a multiple of the element width {width}")]
    RawLength { bytes: usize, width: usize },

    /// A linear combination was evaluated without any terms.
    #[error("linear combination has no terms")]
    EmptyCombination,
}

impl DenseError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DenseError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            DenseError::OutOfRange { .. }
            | DenseError::IndexOutOfBounds { .. }
            | DenseError::OffsetOverflow { .. }
            | DenseError::LeadingDimension { .. } => ErrorKind::Range,
            DenseError::ZeroStride
            | DenseError::ShapeOverflow { .. }
            | DenseError::InvalidLiteral { .. }
            | DenseError::RawLength { .. }
            | DenseError::EmptyCombination => ErrorKind::Construction,
        }
    }
}

/// Result type for dense container operations.
pub type Result<T> = std::result::Result<T, DenseError>;

/// Fail with [`DenseError::DimensionMismatch`] unless both shapes are equal.
#[inline]
pub fn ensure_same_shape(expected: &[usize], actual: &[usize]) -> Result<()> {
    if expected != actual {
        return Err(DenseError::DimensionMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}
