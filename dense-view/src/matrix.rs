//! Column-major matrix views.

use crate::layout::{Container, Layout};
use crate::{ensure_same_shape, Buffer, DenseError, Result, Scalar, Vector};

/// A 2-D column-major view over a shared [`Buffer`].
///
/// When not transposed, element `(r, c)` lives at `offset + r + c * ld`.
/// [`transpose`](Matrix::transpose) flips a flag and swaps the extents
/// without touching the data, after which `(r, c)` lives at
/// `offset + c + r * ld`. Sub-views ([`submatrix`](Matrix::submatrix),
/// [`row`](Matrix::row), [`col`](Matrix::col)) alias the parent.
///
/// `==` compares shape and values, not storage.
pub struct Matrix<T> {
    buffer: Buffer<T>,
    offset: usize,
    rows: usize,
    cols: usize,
    ld: usize,
    transposed: bool,
}

impl<T> std::fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("offset", &self.offset)
            .field("ld", &self.ld)
            .field("transposed", &self.transposed)
            .finish()
    }
}

impl<T: Scalar> Matrix<T> {
    /// Zero-filled `rows x cols` matrix over a fresh buffer.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`, like `Vec::with_capacity`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::packed(Buffer::zeroed(packed_len(rows, cols)), rows, cols)
    }

    /// Matrix holding a copy of `values` in column-major order.
    ///
    /// # Errors
    /// Returns [`DenseError::ShapeOverflow`] if `rows * cols` overflows and
    /// [`DenseError::InvalidLiteral`] if `values.len() != rows * cols`.
    pub fn from_col_major(rows: usize, cols: usize, values: &[T]) -> Result<Self> {
        let expected = element_count(rows, cols)?;
        if values.len() != expected {
            return Err(DenseError::InvalidLiteral {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self::packed(Buffer::from_vec(values.to_vec()), rows, cols))
    }

    /// Matrix filled by calling `f(row, col)` in column-major order.
    ///
    /// # Panics
    /// Panics if `rows * cols` overflows `usize`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut values = Vec::with_capacity(packed_len(rows, cols));
        for c in 0..cols {
            for r in 0..rows {
                values.push(f(r, c));
            }
        }
        Self::packed(Buffer::from_vec(values), rows, cols)
    }

    /// Matrix over native-endian raw bytes laid out column-major.
    ///
    /// # Errors
    /// Returns [`DenseError::RawLength`] for a partial element,
    /// [`DenseError::ShapeOverflow`] if `rows * cols` overflows and
    /// [`DenseError::InvalidLiteral`] if the element count is not
    /// `rows * cols`.
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self> {
        let expected = element_count(rows, cols)?;
        let buffer = Buffer::from_bytes(bytes)?;
        if buffer.len() != expected {
            return Err(DenseError::InvalidLiteral {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self::packed(buffer, rows, cols))
    }

    /// View an existing buffer as a column-major matrix. No data is copied.
    ///
    /// # Errors
    /// Returns [`DenseError::LeadingDimension`] if `ld < max(rows, 1)` and
    /// [`DenseError::OffsetOverflow`] if any element falls outside the buffer
    /// or the view cannot be addressed without overflow.
    pub fn from_buffer(
        buffer: Buffer<T>,
        offset: usize,
        rows: usize,
        cols: usize,
        ld: usize,
    ) -> Result<Self> {
        if ld < rows.max(1) {
            return Err(DenseError::LeadingDimension { ld, rows });
        }
        let m = Self {
            buffer,
            offset,
            rows,
            cols,
            ld,
            transposed: false,
        };
        m.layout().validate(m.buffer.len())?;
        Ok(m)
    }

    fn packed(buffer: Buffer<T>, rows: usize, cols: usize) -> Self {
        Self {
            buffer,
            offset: 0,
            rows,
            cols,
            ld: rows.max(1),
            transposed: false,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Leading dimension: buffer distance between successive stored columns.
    #[inline]
    pub fn ld(&self) -> usize {
        self.ld
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Buffer strides of the logical row and column indices.
    #[inline]
    fn strides(&self) -> (isize, isize) {
        if self.transposed {
            (self.ld as isize, 1)
        } else {
            (1, self.ld as isize)
        }
    }

    #[inline]
    fn position(&self, r: usize, c: usize) -> usize {
        let (rs, cs) = self.strides();
        (self.offset as isize + r as isize * rs + c as isize * cs) as usize
    }

    fn check_index(&self, r: usize, c: usize) -> Result<usize> {
        if r >= self.rows || c >= self.cols {
            return Err(DenseError::IndexOutOfBounds {
                index: vec![r, c],
                dims: vec![self.rows, self.cols],
            });
        }
        Ok(self.position(r, c))
    }

    /// Read element `(r, c)`.
    pub fn entry(&self, r: usize, c: usize) -> Result<T> {
        Ok(self.buffer.get(self.check_index(r, c)?))
    }

    /// Write element `(r, c)` in place and return the matrix for chaining.
    pub fn set_entry(&mut self, r: usize, c: usize, value: T) -> Result<&mut Self> {
        let pos = self.check_index(r, c)?;
        self.buffer.set(pos, value);
        Ok(self)
    }

    /// Aliasing `rows x cols` view whose top-left corner is `(row0, col0)`.
    ///
    /// # Errors
    /// Returns [`DenseError::OutOfRange`] if the block does not fit.
    pub fn submatrix(&self, row0: usize, col0: usize, rows: usize, cols: usize) -> Result<Matrix<T>> {
        check_range(row0, rows, self.rows)?;
        check_range(col0, cols, self.cols)?;
        let offset = if rows == 0 || cols == 0 {
            self.offset
        } else {
            self.position(row0, col0)
        };
        Ok(Matrix {
            buffer: self.buffer.clone(),
            offset,
            rows,
            cols,
            ld: self.ld,
            transposed: self.transposed,
        })
    }

    /// Zero-copy transpose. The result aliases this matrix.
    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            buffer: self.buffer.clone(),
            offset: self.offset,
            rows: self.cols,
            cols: self.rows,
            ld: self.ld,
            transposed: !self.transposed,
        }
    }

    /// Aliasing view of the whole matrix.
    pub fn view(&self) -> Matrix<T> {
        Matrix {
            buffer: self.buffer.clone(),
            offset: self.offset,
            rows: self.rows,
            cols: self.cols,
            ld: self.ld,
            transposed: self.transposed,
        }
    }

    /// Aliasing view of row `i`.
    pub fn row(&self, i: usize) -> Result<Vector<T>> {
        check_range(i, 1, self.rows)?;
        let (_, cs) = self.strides();
        self.line(self.position(i, 0), cs, self.cols)
    }

    /// Aliasing view of column `j`.
    pub fn col(&self, j: usize) -> Result<Vector<T>> {
        check_range(j, 1, self.cols)?;
        let (rs, _) = self.strides();
        self.line(self.position(0, j), rs, self.rows)
    }

    fn line(&self, offset: usize, stride: isize, len: usize) -> Result<Vector<T>> {
        if len == 0 {
            return Vector::from_buffer(self.buffer.clone(), 0, 1, 0);
        }
        Vector::from_buffer(self.buffer.clone(), offset, stride, len)
    }

    /// Elements in column-major index order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.layout().positions().map(move |pos| self.buffer.get(pos))
    }

    /// Copy the elements out in column-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Native-endian raw bytes of the elements in column-major order.
    pub fn to_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.to_vec()).to_vec()
    }

    /// Overwrite `dst` with this matrix's values and return it.
    ///
    /// # Errors
    /// Returns [`DenseError::DimensionMismatch`] if the shapes differ.
    pub fn copy_into<'d>(&self, dst: &'d mut Matrix<T>) -> Result<&'d mut Matrix<T>> {
        ensure_same_shape(&[self.rows, self.cols], &[dst.rows, dst.cols])?;
        let values = self.to_vec();
        for (pos, value) in dst.layout().positions().zip(values) {
            dst.buffer.set(pos, value);
        }
        Ok(dst)
    }

    /// Returns true if the elements occupy one unbroken run in column-major
    /// order.
    pub fn is_contiguous(&self) -> bool {
        self.layout().contiguous_start().is_some()
    }
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(DenseError::ShapeOverflow { rows, cols })
}

fn packed_len(rows: usize, cols: usize) -> usize {
    match rows.checked_mul(cols) {
        Some(len) => len,
        None => panic!("matrix shape {rows} x {cols} overflows usize"),
    }
}

fn check_range(start: usize, len: usize, extent: usize) -> Result<()> {
    match start.checked_add(len) {
        Some(end) if end <= extent => Ok(()),
        _ => Err(DenseError::OutOfRange { start, len, extent }),
    }
}

impl<T: Scalar> Container<T> for Matrix<T> {
    fn shape(&self) -> Vec<usize> {
        vec![self.rows, self.cols]
    }

    fn layout(&self) -> Layout {
        let (rs, cs) = self.strides();
        Layout {
            dims: [self.rows, self.cols],
            strides: [rs, cs],
            offset: self.offset,
        }
    }

    fn buffer(&self) -> &Buffer<T> {
        &self.buffer
    }

    /// Zero-filled matrix of the same shape over a fresh buffer.
    fn zeros_like(&self) -> Self {
        Matrix::zeros(self.rows, self.cols)
    }

    /// A new packed, non-transposed matrix with the same values.
    fn copy(&self) -> Self {
        Self::packed(Buffer::from_vec(self.to_vec()), self.rows, self.cols)
    }
}

impl<T: Scalar> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.iter().eq(other.iter())
    }
}
