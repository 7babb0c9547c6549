//! Dense vector and matrix kernels with shared-buffer views.
//!
//! This crate is the facade over the workspace: storage and views come from
//! `dense-view`, element-wise map/fold from `dense-kernel`, and the BLAS
//! Level 1-3 routines live here.
//!
//! # Core Types
//!
//! - [`Vector`] / [`Matrix`]: offset/stride descriptors into a shared [`Buffer`].
//!   Sub-views, rows, columns and transposes alias their parent.
//! - [`Container`]: the trait Level 1 and the functional layer are written against.
//!
//! # BLAS API
//!
//! Every routine comes in a pure form that allocates its result and an
//! `_inplace` form that writes into a designated argument and returns it.
//!
//! ## Level 1
//!
//! - [`asum`], [`sum`], [`dot`], [`nrm2`], [`amax`], [`iamax`]: reductions
//! - [`scal`] / [`ax`]: scaling
//! - [`axpy`] / [`axpy_inplace`], [`Combination`]: `y := a*x + y` and its
//!   variadic form
//! - [`xpy`]: addition
//! - [`swp`]: exchange entries
//!
//! ## Level 2
//!
//! - [`mv`] / [`mv_inplace`]: `y := alpha*A*x + beta*y`
//! - [`rk`] / [`rk_inplace`]: `A := alpha*x*y^T + A`
//!
//! ## Level 3
//!
//! - [`mm`] / [`mm_inplace`]: `C := alpha*A*B + beta*C`
//!
//! # Example
//!
//! ```rust
//! use dense_blas::{dot, mm, mv, Matrix, Vector};
//!
//! let x = Vector::from_slice(&[1.0, 2.0, 3.0]);
//! let y = Vector::from_slice(&[1.0, 3.0, 5.0]);
//! assert_eq!(dot(&x, &y).unwrap(), 22.0);
//!
//! let a = Matrix::from_col_major(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(mv(&a, &x).unwrap().to_vec(), vec![16.0, 22.0]);
//!
//! let b = Matrix::from_col_major(3, 1, &[0.0, 1.0, 2.0]).unwrap();
//! assert_eq!(mm(&a, &b).unwrap().to_vec(), vec![10.0, 13.0]);
//! ```

pub mod level1;
pub mod level2;
pub mod level3;

// ============================================================================
// Re-exports from dense-view
// ============================================================================
pub use dense_view::{
    Buffer, Container, DenseError, ErrorKind, Layout, Matrix, RawCursor, Result, Scalar, Vector,
    PRINT_LIMIT,
};

// ============================================================================
// Functional layer
// ============================================================================
pub use dense_kernel::{
    fmap, fmap2, fmap2_inplace, fmap3, fmap3_inplace, fmap_inplace, fold, fold2, fold_sum,
    foldmap, foldmap2,
};

// ============================================================================
// BLAS
// ============================================================================
pub use level1::{
    amax, asum, ax, axpy, axpy_inplace, dot, iamax, nrm2, scal, sum, swp, xpy, Combination,
};
pub use level2::{mv, mv_inplace, rk, rk_inplace};
pub use level3::{mm, mm_inplace};

// ============================================================================
// Constants
// ============================================================================

/// Width, in columns, of the panels `mm` walks when forming `A*B`.
///
/// Each panel of `C` is accumulated in scratch while a column of `A` is
/// reused across all of the panel's columns.
pub const MM_BLOCK: usize = 64;
