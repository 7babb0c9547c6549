//! Reference-counted element storage.
//!
//! A [`Buffer`] is a fixed-length run of cells shared by every view created
//! over it. Cells are individually mutable through any handle, so two views
//! over the same buffer observe each other's writes in program order. The
//! `Rc` handle keeps buffers on the thread that created them.

use std::cell::Cell;
use std::rc::Rc;

use crate::{DenseError, Result, Scalar};

/// Shared, fixed-length storage of `T` cells.
///
/// `Clone` shares the storage; it never copies elements.
pub struct Buffer<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T> std::fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.cells.len())
            .field("handles", &Rc::strong_count(&self.cells))
            .finish()
    }
}

impl<T: Scalar> Buffer<T> {
    /// Allocate `len` zero-initialized cells.
    pub fn zeroed(len: usize) -> Self {
        log::debug!("allocating {} x {} buffer", len, T::NAME);
        Self {
            cells: (0..len).map(|_| Cell::new(T::zero())).collect(),
        }
    }

    /// Take ownership of `values` as a new buffer.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self {
            cells: values.into_iter().map(Cell::new).collect(),
        }
    }

    /// Build a buffer from native-endian raw bytes.
    ///
    /// # Errors
    /// Returns [`DenseError::RawLength`] if `bytes` is not a whole number of
    /// elements.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let width = std::mem::size_of::<T>();
        if bytes.len() % width != 0 {
            return Err(DenseError::RawLength {
                bytes: bytes.len(),
                width,
            });
        }
        Ok(Self {
            cells: bytes
                .chunks_exact(width)
                .map(|chunk| Cell::new(bytemuck::pod_read_unaligned::<T>(chunk)))
                .collect(),
        })
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the cell at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is outside the buffer. Views validate their reach on
    /// construction, so this only fires on a broken invariant.
    #[inline]
    pub fn get(&self, pos: usize) -> T {
        self.cells[pos].get()
    }

    /// Write the cell at `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is outside the buffer.
    #[inline]
    pub fn set(&self, pos: usize, value: T) {
        self.cells[pos].set(value);
    }

    /// Borrow every cell.
    ///
    /// Kernels use this for flat traversals of contiguous views.
    #[inline]
    pub fn cells(&self) -> &[Cell<T>] {
        &self.cells
    }

    /// Copy every cell out into a `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }

    /// Native-endian raw bytes of every cell.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vec()).to_vec()
    }

    /// Returns true if both handles refer to the same storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Buffer<T>) -> bool {
        Rc::ptr_eq(&self.cells, &other.cells)
    }

    /// Number of live handles (buffers and views) sharing this storage.
    #[inline]
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.cells)
    }

    /// A byte-position cursor for writing raw element data into this buffer.
    pub fn cursor(&self) -> RawCursor<'_, T> {
        RawCursor {
            buffer: self,
            position: 0,
        }
    }
}

/// Write cursor over the raw bytes of a [`Buffer`].
///
/// The position is measured in bytes and always sits on an element boundary.
/// Values are stored in native byte order; callers supplying raw bytes are
/// responsible for their endianness.
#[derive(Debug)]
pub struct RawCursor<'a, T> {
    buffer: &'a Buffer<T>,
    position: usize,
}

impl<'a, T: Scalar> RawCursor<'a, T> {
    /// Current byte position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left before the end of the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() * std::mem::size_of::<T>() - self.position
    }

    /// Reset the position to the start of the buffer.
    pub fn rewind(&mut self) -> &mut Self {
        self.position = 0;
        self
    }

    /// Write one element at the current position and advance past it.
    ///
    /// # Errors
    /// Returns [`DenseError::OutOfRange`] when the buffer is full.
    pub fn put(&mut self, value: T) -> Result<&mut Self> {
        let width = std::mem::size_of::<T>();
        let slot = self.position / width;
        if slot >= self.buffer.len() {
            return Err(DenseError::OutOfRange {
                start: slot,
                len: 1,
                extent: self.buffer.len(),
            });
        }
        self.buffer.set(slot, value);
        self.position += width;
        Ok(self)
    }

    /// Write whole elements decoded from native-endian `bytes`.
    ///
    /// # Errors
    /// Returns [`DenseError::RawLength`] if `bytes` is not a whole number of
    /// elements, or [`DenseError::OutOfRange`] if they do not fit. Nothing is
    /// written on error.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        let width = std::mem::size_of::<T>();
        if bytes.len() % width != 0 {
            return Err(DenseError::RawLength {
                bytes: bytes.len(),
                width,
            });
        }
        if bytes.len() > self.remaining() {
            return Err(DenseError::OutOfRange {
                start: self.position / width,
                len: bytes.len() / width,
                extent: self.buffer.len(),
            });
        }
        for chunk in bytes.chunks_exact(width) {
            self.put(bytemuck::pod_read_unaligned::<T>(chunk))?;
        }
        Ok(self)
    }
}
