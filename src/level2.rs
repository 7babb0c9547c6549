//! BLAS Level 2: matrix-vector product and rank-1 update.
//!
//! Inputs are gathered into contiguous scratch before the destination is
//! touched, so the destination may alias an input (for example `y` may be a
//! column of `a`).

use dense_view::{ensure_same_shape, Container, DenseError, Matrix, Result, Scalar, Vector};

/// Gather `a` into a column-major `rows * cols` vector.
pub(crate) fn pack<T: Scalar>(a: &Matrix<T>) -> Vec<T> {
    log::trace!(
        "pack: {}x{} (ld {}, transposed {})",
        a.rows(),
        a.cols(),
        a.ld(),
        a.is_transposed()
    );
    a.to_vec()
}

/// `y = A x` as a new vector of length `rows(a)`.
///
/// # Errors
/// Returns `DimensionMismatch` unless `cols(a) == len(x)`.
pub fn mv<T: Scalar>(a: &Matrix<T>, x: &Vector<T>) -> Result<Vector<T>> {
    let mut y = Vector::zeros(a.rows());
    mv_inplace(T::one(), a, x, T::zero(), &mut y)?;
    Ok(y)
}

/// `y := alpha * A x + beta * y` in place, returning `y`.
///
/// When `beta` is zero, `y` is overwritten without being read, so NaNs in
/// the old contents do not propagate.
///
/// # Errors
/// Returns `DimensionMismatch` unless `cols(a) == len(x)` and
/// `rows(a) == len(y)`.
pub fn mv_inplace<'y, T: Scalar>(
    alpha: T,
    a: &Matrix<T>,
    x: &Vector<T>,
    beta: T,
    y: &'y mut Vector<T>,
) -> Result<&'y mut Vector<T>> {
    let (m, n) = (a.rows(), a.cols());
    if x.len() != n {
        return Err(DenseError::DimensionMismatch {
            expected: vec![n],
            actual: vec![x.len()],
        });
    }
    if y.len() != m {
        return Err(DenseError::DimensionMismatch {
            expected: vec![m],
            actual: vec![y.len()],
        });
    }

    let pa = pack(a);
    let px = x.to_vec();

    // Column sweep: acc += A[:, j] * x[j].
    let mut acc = vec![T::zero(); m];
    for (col, &xj) in pa.chunks_exact(m.max(1)).zip(px.iter()) {
        for (ai, &aij) in acc.iter_mut().zip(col) {
            *ai = *ai + aij * xj;
        }
    }

    let buf = y.buffer();
    for (pos, s) in y.layout().positions().zip(acc) {
        let value = if beta == T::zero() {
            alpha * s
        } else {
            alpha * s + beta * buf.get(pos)
        };
        buf.set(pos, value);
    }
    Ok(y)
}

/// Outer product `x y^T` as a new `len(x) x len(y)` matrix.
pub fn rk<T: Scalar>(x: &Vector<T>, y: &Vector<T>) -> Matrix<T> {
    let (px, py) = (x.to_vec(), y.to_vec());
    log::debug!("rk: allocating {}x{}", px.len(), py.len());
    Matrix::from_fn(px.len(), py.len(), |r, c| px[r] * py[c])
}

/// `A := alpha * x y^T + A` in place, returning `a`.
///
/// # Errors
/// Returns `DimensionMismatch` unless `a` is `len(x) x len(y)`.
pub fn rk_inplace<'a, T: Scalar>(
    alpha: T,
    x: &Vector<T>,
    y: &Vector<T>,
    a: &'a mut Matrix<T>,
) -> Result<&'a mut Matrix<T>> {
    ensure_same_shape(&[x.len(), y.len()], &a.shape())?;
    let (px, py) = (x.to_vec(), y.to_vec());
    let layout = a.layout();
    let buf = a.buffer();
    for (c, &yc) in py.iter().enumerate() {
        for (r, &xr) in px.iter().enumerate() {
            let pos = layout.position(r, c);
            buf.set(pos, alpha * xr * yc + buf.get(pos));
        }
    }
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dense_view::ErrorKind;

    fn dge(rows: usize, cols: usize, values: &[f64]) -> Matrix<f64> {
        Matrix::from_col_major(rows, cols, values).unwrap()
    }

    #[test]
    fn test_mv() {
        let a = dge(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let x = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(mv(&a, &x).unwrap(), Vector::from_slice(&[16.0, 22.0]));
    }

    #[test]
    fn test_mv_transposed() {
        let a = dge(2, 3, &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        let x = Vector::from_slice(&[1.0, -1.0]);
        // A^T = [[0, 1], [2, 3], [4, 5]]
        assert_eq!(mv(&a.transpose(), &x).unwrap().to_vec(), vec![-1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_mv_inplace_alpha_beta() {
        let a = dge(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let x = Vector::from_slice(&[1.0, 2.0]);
        let mut y = Vector::from_slice(&[10.0, 20.0]);
        mv_inplace(2.0, &a, &x, 0.5, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![7.0, 14.0]);
    }

    #[test]
    fn test_mv_inplace_beta_zero_ignores_nan() {
        let a = dge(1, 1, &[3.0]);
        let x = Vector::from_slice(&[2.0]);
        let mut y = Vector::from_slice(&[f64::NAN]);
        mv_inplace(1.0, &a, &x, 0.0, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![6.0]);
    }

    #[test]
    fn test_mv_inplace_output_aliases_input() {
        // y is column 0 of a; the product must use a's entries as they were.
        let a = dge(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let x = Vector::from_slice(&[1.0, 1.0]);
        let mut y = a.col(0).unwrap();
        mv_inplace(1.0, &a, &x, 0.0, &mut y).unwrap();
        assert_eq!(a.to_vec(), vec![4.0, 6.0, 3.0, 4.0]);
    }

    #[test]
    fn test_mv_dimension_errors() {
        let a = Matrix::<f64>::zeros(2, 3);
        let err = mv(&a, &Vector::zeros(2)).unwrap_err();
        assert_eq!(
            err,
            DenseError::DimensionMismatch {
                expected: vec![3],
                actual: vec![2]
            }
        );
        let mut y = Vector::zeros(3);
        let err = mv_inplace(1.0, &a, &Vector::zeros(3), 0.0, &mut y).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_mv_empty_columns() {
        let a = Matrix::<f64>::zeros(2, 0);
        let y = mv(&a, &Vector::zeros(0)).unwrap();
        assert_eq!(y.to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_rk() {
        let x = Vector::from_slice(&[1.0, 2.0]);
        let y = Vector::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(rk(&x, &y), dge(2, 3, &[1.0, 2.0, 2.0, 4.0, 3.0, 6.0]));
    }

    #[test]
    fn test_rk_inplace() {
        let x = Vector::from_slice(&[1.0, 2.0]);
        let y = Vector::from_slice(&[3.0, 4.0]);
        let mut a = dge(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        rk_inplace(0.5, &x, &y, &mut a).unwrap();
        assert_relative_eq!(a.entry(0, 0).unwrap(), 2.5);
        assert_relative_eq!(a.entry(1, 0).unwrap(), 4.0);
        assert_relative_eq!(a.entry(0, 1).unwrap(), 3.0);
        assert_relative_eq!(a.entry(1, 1).unwrap(), 5.0);

        let mut wrong = Matrix::zeros(2, 3);
        assert!(rk_inplace(1.0, &x, &y, &mut wrong).is_err());
    }

    #[test]
    fn test_rk_inplace_through_submatrix() {
        let big = Matrix::<f64>::zeros(3, 3);
        let mut block = big.submatrix(1, 1, 2, 2).unwrap();
        let x = Vector::from_slice(&[1.0, 1.0]);
        rk_inplace(1.0, &x, &x, &mut block).unwrap();
        assert_eq!(big.to_vec(), vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]);
    }
}
