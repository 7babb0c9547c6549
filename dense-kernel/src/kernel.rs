//! Traversal engine shared by the map and fold kernels.

use std::cell::Cell;
use std::ops::Deref;

use dense_view::{Container, Layout, Scalar};

use crate::fuse::fuse_layouts;

/// Iterator over the buffer positions of `N` same-shaped layouts, in index
/// order. Each item holds one position per layout.
///
/// Layouts are fused first, so packed operands are walked as one flat run.
pub(crate) struct Walk<const N: usize> {
    layouts: [Layout; N],
    column: [isize; N],
    pos: [isize; N],
    i0: usize,
    remaining: usize,
}

impl<const N: usize> Walk<N> {
    pub(crate) fn new(layouts: [Layout; N]) -> Self {
        let fused = fuse_layouts(layouts);
        let remaining = fused.first().map_or(0, Layout::len);
        log::trace!(
            "walking {} operand(s) of {:?}, fused to {:?}",
            N,
            layouts.first().map(|l| l.dims),
            fused.first().map(|l| l.dims)
        );
        let column = fused.map(|l| l.offset as isize);
        Self {
            layouts: fused,
            column,
            pos: column,
            i0: 0,
            remaining,
        }
    }
}

impl<const N: usize> Iterator for Walk<N> {
    type Item = [usize; N];

    #[inline]
    fn next(&mut self) -> Option<[usize; N]> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.pos.map(|p| p as usize);
        self.remaining -= 1;
        self.i0 += 1;
        if self.i0 == self.layouts[0].dims[0] {
            self.i0 = 0;
            for (c, l) in self.column.iter_mut().zip(self.layouts.iter()) {
                *c += l.strides[1];
            }
            self.pos = self.column;
        } else {
            for (p, l) in self.pos.iter_mut().zip(self.layouts.iter()) {
                *p += l.strides[0];
            }
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Walk<N> {}

/// Visit the positions of `N` same-shaped layouts in index order.
#[inline]
pub(crate) fn for_each_position<const N: usize>(layouts: [Layout; N], f: impl FnMut([usize; N])) {
    Walk::new(layouts).for_each(f);
}

/// The cells of a container if they form one unbroken run in index order.
#[inline]
pub(crate) fn contiguous_cells<T: Scalar, C: Container<T>>(c: &C) -> Option<&[Cell<T>]> {
    let layout = c.layout();
    if layout.is_empty() {
        return None;
    }
    let start = layout.contiguous_start()?;
    c.buffer().cells().get(start..start + layout.len())
}

/// An input operand, detached from the destination when the two share storage.
pub(crate) enum Operand<'a, C> {
    Live(&'a C),
    Detached(C),
}

impl<'a, C> Operand<'a, C> {
    /// Snapshot `src` if it views the same buffer as `dest`, so that writes
    /// to `dest` during a traversal never feed back into the inputs.
    pub(crate) fn new<T: Scalar>(dest: &C, src: &'a C) -> Self
    where
        C: Container<T>,
    {
        if dest.shares_buffer(src) {
            log::trace!("operand shares the destination buffer, detaching");
            Operand::Detached(src.copy())
        } else {
            Operand::Live(src)
        }
    }
}

impl<C> Deref for Operand<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        match self {
            Operand::Live(c) => c,
            Operand::Detached(c) => c,
        }
    }
}
