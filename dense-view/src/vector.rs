//! Strided vector views.

use crate::layout::{Container, Layout};
use crate::{ensure_same_shape, Buffer, DenseError, Result, Scalar};

/// A 1-D strided view over a shared [`Buffer`].
///
/// Logical element `i` lives at buffer position `offset + i * stride`. The
/// stride is non-zero and may be negative. Views created with
/// [`subvector`](Vector::subvector) (and matrix [`row`](crate::Matrix::row) /
/// [`col`](crate::Matrix::col)) alias their parent's storage.
///
/// `==` compares values, not storage.
pub struct Vector<T> {
    buffer: Buffer<T>,
    offset: usize,
    stride: isize,
    len: usize,
}

impl<T> std::fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vector")
            .field("len", &self.len)
            .field("offset", &self.offset)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<T: Scalar> Vector<T> {
    /// Zero-filled vector of length `len` over a fresh buffer.
    pub fn zeros(len: usize) -> Self {
        Self::contiguous(Buffer::zeroed(len))
    }

    /// Vector holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Self {
        Self::from_vec(values.to_vec())
    }

    /// Vector taking ownership of `values`.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self::contiguous(Buffer::from_vec(values))
    }

    /// Vector over native-endian raw bytes.
    ///
    /// # Errors
    /// Returns [`DenseError::RawLength`] if the byte count is not a multiple
    /// of the element width.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::contiguous(Buffer::from_bytes(bytes)?))
    }

    /// View an existing buffer. No data is copied.
    ///
    /// # Errors
    /// Returns [`DenseError::ZeroStride`] for a zero stride and
    /// [`DenseError::OffsetOverflow`] if any element would fall outside the
    /// buffer or the view cannot be addressed without overflow.
    pub fn from_buffer(buffer: Buffer<T>, offset: usize, stride: isize, len: usize) -> Result<Self> {
        if stride == 0 {
            return Err(DenseError::ZeroStride);
        }
        let v = Self {
            buffer,
            offset,
            stride,
            len,
        };
        v.layout().validate(v.buffer.len())?;
        Ok(v)
    }

    fn contiguous(buffer: Buffer<T>) -> Self {
        let len = buffer.len();
        Self {
            buffer,
            offset: 0,
            stride: 1,
            len,
        }
    }

    /// Buffer position of element 0.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Distance between consecutive elements in the buffer.
    #[inline]
    pub fn stride(&self) -> isize {
        self.stride
    }

    #[inline]
    fn position(&self, i: usize) -> usize {
        (self.offset as isize + i as isize * self.stride) as usize
    }

    fn check_index(&self, i: usize) -> Result<usize> {
        if i >= self.len {
            return Err(DenseError::IndexOutOfBounds {
                index: vec![i],
                dims: vec![self.len],
            });
        }
        Ok(self.position(i))
    }

    /// Read element `i`.
    pub fn entry(&self, i: usize) -> Result<T> {
        Ok(self.buffer.get(self.check_index(i)?))
    }

    /// Write element `i` in place and return the vector for chaining.
    ///
    /// The write is visible through every view sharing the buffer.
    pub fn set_entry(&mut self, i: usize, value: T) -> Result<&mut Self> {
        let pos = self.check_index(i)?;
        self.buffer.set(pos, value);
        Ok(self)
    }

    /// Aliasing view of `len` elements starting at `start`.
    ///
    /// # Errors
    /// Returns [`DenseError::OutOfRange`] if `start + len` exceeds this
    /// vector's length.
    pub fn subvector(&self, start: usize, len: usize) -> Result<Vector<T>> {
        let end = start.checked_add(len);
        if end.map_or(true, |end| end > self.len) {
            return Err(DenseError::OutOfRange {
                start,
                len,
                extent: self.len,
            });
        }
        let offset = if len == 0 {
            self.offset
        } else {
            self.position(start)
        };
        Ok(Vector {
            buffer: self.buffer.clone(),
            offset,
            stride: self.stride,
            len,
        })
    }

    /// Aliasing view of the whole vector.
    pub fn view(&self) -> Vector<T> {
        Vector {
            buffer: self.buffer.clone(),
            offset: self.offset,
            stride: self.stride,
            len: self.len,
        }
    }

    /// Elements in index order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.layout().positions().map(move |pos| self.buffer.get(pos))
    }

    /// Copy the elements out in index order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Native-endian raw bytes of the elements in index order.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vec()).to_vec()
    }

    /// Overwrite `dst` with this vector's values and return it.
    ///
    /// # Errors
    /// Returns [`DenseError::DimensionMismatch`] if the lengths differ.
    pub fn copy_into<'d>(&self, dst: &'d mut Vector<T>) -> Result<&'d mut Vector<T>> {
        ensure_same_shape(&[self.len], &[dst.len])?;
        // Snapshot first: src and dst may overlap in one buffer.
        let values = self.to_vec();
        for (pos, value) in dst.layout().positions().zip(values) {
            dst.buffer.set(pos, value);
        }
        Ok(dst)
    }

    /// Returns true if the elements occupy one unbroken forward run.
    pub fn is_contiguous(&self) -> bool {
        self.layout().contiguous_start().is_some()
    }
}

impl<T: Scalar> Container<T> for Vector<T> {
    fn shape(&self) -> Vec<usize> {
        vec![self.len]
    }

    fn layout(&self) -> Layout {
        Layout {
            dims: [self.len, 1],
            strides: [self.stride, 0],
            offset: self.offset,
        }
    }

    fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Zero-filled vector of the same length over a fresh buffer.
    fn zeros_like(&self) -> Self {
        Vector::zeros(self.len)
    }

    /// A new vector with the same values over a fresh buffer.
    fn copy(&self) -> Self {
        Vector::from_vec(self.to_vec())
    }
}

impl<T: Scalar> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Scalar> From<Vec<T>> for Vector<T> {
    fn from(values: Vec<T>) -> Self {
        Vector::from_vec(values)
    }
}

impl<T: Scalar> From<&[T]> for Vector<T> {
    fn from(values: &[T]) -> Self {
        Vector::from_slice(values)
    }
}
