//! Normalized 2-D layout descriptors and the [`Container`] trait.
//!
//! Every container reduces to a [`Layout`]: two extents, two strides and a
//! base offset into its buffer. A vector of length `n` and stride `s` is
//! `dims = [n, 1]`, `strides = [s, 0]`; a matrix is `dims = [rows, cols]`
//! with its row and column strides. Kernels only ever see layouts, which is
//! what lets one traversal serve vectors, matrices, transposes and
//! sub-views alike.

use crate::{Buffer, DenseError, Result, Scalar};

/// Extents, strides and offset of a container, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub dims: [usize; 2],
    pub strides: [isize; 2],
    pub offset: usize,
}

impl Layout {
    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffer position of logical element `(i0, i1)`.
    #[inline]
    pub fn position(&self, i0: usize, i1: usize) -> usize {
        (self.offset as isize + i0 as isize * self.strides[0] + i1 as isize * self.strides[1])
            as usize
    }

    /// Returns the first buffer position if the elements occupy one unbroken
    /// run `offset..offset + len` in index order.
    pub fn contiguous_start(&self) -> Option<usize> {
        let mut expected = 1isize;
        for (&dim, &stride) in self.dims.iter().zip(self.strides.iter()) {
            if dim <= 1 {
                continue;
            }
            if stride != expected {
                return None;
            }
            expected *= dim as isize;
        }
        Some(self.offset)
    }

    /// Buffer positions in index order (first extent fastest).
    pub fn positions(&self) -> Positions {
        Positions {
            layout: *self,
            i0: 0,
            i1: 0,
            remaining: self.len(),
        }
    }

    /// Check that every reachable position lies in `[0, buffer_len)`.
    ///
    /// Extents, offset and the element count are all converted and combined
    /// with checked arithmetic, so a layout that cannot be addressed in
    /// `isize` is rejected instead of wrapping.
    pub fn validate(&self, buffer_len: usize) -> Result<()> {
        let overflow = DenseError::OffsetOverflow { len: buffer_len };
        self.dims[0]
            .checked_mul(self.dims[1])
            .ok_or_else(|| overflow.clone())?;
        let offset = isize::try_from(self.offset).map_err(|_| overflow)?;
        validate_bounds(buffer_len, &self.dims, &self.strides, offset)
    }
}

/// Validate that all accessed offsets stay within `[0, len)`.
fn validate_bounds(len: usize, dims: &[usize], strides: &[isize], offset: isize) -> Result<()> {
    // Empty view - no access needed
    if dims.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let overflow = DenseError::OffsetOverflow { len };
    let mut min_offset = offset;
    let mut max_offset = offset;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let last = isize::try_from(dim - 1).map_err(|_| overflow.clone())?;
            let end = stride.checked_mul(last).ok_or_else(|| overflow.clone())?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or_else(|| overflow.clone())?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or_else(|| overflow.clone())?;
            }
        }
    }
    if min_offset < 0 || max_offset < 0 || max_offset as usize >= len {
        return Err(overflow);
    }
    Ok(())
}

/// Iterator over the buffer positions of a [`Layout`].
#[derive(Debug, Clone)]
pub struct Positions {
    layout: Layout,
    i0: usize,
    i1: usize,
    remaining: usize,
}

impl Iterator for Positions {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let pos = self.layout.position(self.i0, self.i1);
        self.remaining -= 1;
        self.i0 += 1;
        if self.i0 == self.layout.dims[0] {
            self.i0 = 0;
            self.i1 += 1;
        }
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Positions {}

/// A dense container backed by a shared [`Buffer`].
///
/// Implemented by [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix).
/// Kernels that are generic over containers (BLAS Level 1, the functional
/// layer) are written against this trait; element order is always index
/// order of [`Container::layout`].
pub trait Container<T: Scalar>: Sized {
    /// Logical extents: `[len]` for vectors, `[rows, cols]` for matrices.
    fn shape(&self) -> Vec<usize>;

    /// Normalized layout used by the kernels.
    fn layout(&self) -> Layout;

    /// Backing storage.
    fn buffer(&self) -> &Buffer<T>;

    /// A fresh, zero-filled container of the same shape.
    fn zeros_like(&self) -> Self;

    /// A fresh container holding the same values.
    fn copy(&self) -> Self;

    /// Number of elements.
    fn len(&self) -> usize {
        self.layout().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if both containers view the same buffer.
    fn shares_buffer<C: Container<T>>(&self, other: &C) -> bool {
        self.buffer().ptr_eq(other.buffer())
    }
}
