//! Element-wise map, fold and fused fold-map over dense views.
//!
//! Every operation walks its operands in index order (`0..n` for vectors,
//! column-major for matrices) and calls a primitive-typed closure per
//! element. Nothing is boxed, and [`foldmap`]/[`foldmap2`] never materialize
//! the mapped intermediate.
//!
//! # Map Operations
//!
//! - [`fmap`], [`fmap2`], [`fmap3`]: allocate a result of the operands' shape
//! - [`fmap_inplace`], [`fmap2_inplace`], [`fmap3_inplace`]: write into the
//!   first operand and return it
//!
//! # Reduce Operations
//!
//! - [`fold`], [`fold2`]: left-to-right reduction seeded with `init`
//! - [`fold_sum`]: sum of all elements
//! - [`foldmap`], [`foldmap2`]: fused `fold(fmap(..))`
//!
//! # Example
//!
//! ```rust
//! use dense_kernel::{fmap2, fold, foldmap2, Vector};
//!
//! let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
//! let b = Vector::from_slice(&[1.0, 3.0, 5.0]);
//!
//! let products = fmap2(&a, &b, |x, y| x * y).unwrap();
//! let composed = fold(&products, 0.0, |acc, x| acc + x);
//! let fused = foldmap2(&a, &b, 0.0, |x, y| x * y, |acc, x| acc + x).unwrap();
//! assert_eq!(composed, 22.0);
//! assert_eq!(fused, composed);
//! ```

mod fuse;
mod kernel;
mod map;
mod reduce;

// ============================================================================
// Re-exports from dense-view
// ============================================================================
pub use dense_view::{
    Buffer, Container, DenseError, ErrorKind, Layout, Matrix, Result, Scalar, Vector,
};

pub use fuse::fuse_layouts;

// ============================================================================
// Map operations
// ============================================================================
pub use map::{fmap, fmap2, fmap2_inplace, fmap3, fmap3_inplace, fmap_inplace};

// ============================================================================
// Reduce operations
// ============================================================================
pub use reduce::{fold, fold2, fold_sum, foldmap, foldmap2};
