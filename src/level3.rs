//! BLAS Level 3: matrix-matrix product.
//!
//! `A` and `B` are packed into column-major scratch up front. `C` is then
//! produced in panels of [`MM_BLOCK`] columns: each column of `A` is loaded
//! once per panel and applied to every column in it, and the finished panel
//! is scaled into `C`. Since packing precedes every write, `C` may alias `A`
//! or `B`.

use dense_view::{Container, DenseError, Matrix, Result, Scalar};

use crate::level2::pack;
use crate::MM_BLOCK;

/// `A B` as a new `rows(a) x cols(b)` matrix.
///
/// # Errors
/// Returns `DimensionMismatch` unless `cols(a) == rows(b)`.
pub fn mm<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>) -> Result<Matrix<T>> {
    let mut c = Matrix::zeros(a.rows(), b.cols());
    mm_inplace(T::one(), a, b, T::zero(), &mut c)?;
    Ok(c)
}

/// `C := alpha * A B + beta * C` in place, returning `c`.
///
/// When `beta` is zero, `C` is overwritten without being read.
///
/// # Errors
/// Returns `DimensionMismatch` unless `cols(a) == rows(b)` and `c` is
/// `rows(a) x cols(b)`.
pub fn mm_inplace<'c, T: Scalar>(
    alpha: T,
    a: &Matrix<T>,
    b: &Matrix<T>,
    beta: T,
    c: &'c mut Matrix<T>,
) -> Result<&'c mut Matrix<T>> {
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    if b.rows() != k {
        return Err(DenseError::DimensionMismatch {
            expected: vec![k, n],
            actual: vec![b.rows(), n],
        });
    }
    if c.rows() != m || c.cols() != n {
        return Err(DenseError::DimensionMismatch {
            expected: vec![m, n],
            actual: vec![c.rows(), c.cols()],
        });
    }

    let pa = pack(a);
    let pb = pack(b);
    log::trace!("mm: {}x{} * {}x{} in panels of {}", m, k, k, n, MM_BLOCK);

    let layout = c.layout();
    let buf = c.buffer();
    let mut acc = vec![T::zero(); m * MM_BLOCK.min(n)];
    for j0 in (0..n).step_by(MM_BLOCK) {
        let width = MM_BLOCK.min(n - j0);
        let panel = &mut acc[..m * width];
        panel.iter_mut().for_each(|v| *v = T::zero());

        for l in 0..k {
            let a_col = &pa[l * m..(l + 1) * m];
            for (jj, c_col) in panel.chunks_exact_mut(m.max(1)).enumerate() {
                let blj = pb[(j0 + jj) * k + l];
                for (ci, &ail) in c_col.iter_mut().zip(a_col) {
                    *ci = *ci + ail * blj;
                }
            }
        }

        for (jj, c_col) in panel.chunks_exact(m.max(1)).enumerate() {
            for (i, &s) in c_col.iter().enumerate() {
                let pos = layout.position(i, j0 + jj);
                let value = if beta == T::zero() {
                    alpha * s
                } else {
                    alpha * s + beta * buf.get(pos)
                };
                buf.set(pos, value);
            }
        }
    }
    Ok(c)
}
