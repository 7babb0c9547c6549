//! Element-wise map operations.
//!
//! Pure forms allocate a fresh container of the operands' shape; `_inplace`
//! forms write into (and return) their first argument. Callbacks take and
//! return plain `T` values.

use dense_view::{ensure_same_shape, Container, Result, Scalar};

use crate::kernel::{for_each_position, Operand};

/// `out[i] = f(a[i])` into a new container.
pub fn fmap<T: Scalar, C: Container<T>, F>(a: &C, f: F) -> C
where
    F: Fn(T) -> T,
{
    let out = a.zeros_like();
    let (dst, src) = (out.buffer(), a.buffer());
    for_each_position([out.layout(), a.layout()], |[o, p]| {
        dst.set(o, f(src.get(p)));
    });
    out
}

/// `out[i] = f(a[i], b[i])` into a new container.
pub fn fmap2<T: Scalar, C: Container<T>, F>(a: &C, b: &C, f: F) -> Result<C>
where
    F: Fn(T, T) -> T,
{
    ensure_same_shape(&a.shape(), &b.shape())?;
    let out = a.zeros_like();
    let (dst, ab, bb) = (out.buffer(), a.buffer(), b.buffer());
    for_each_position([out.layout(), a.layout(), b.layout()], |[o, p, q]| {
        dst.set(o, f(ab.get(p), bb.get(q)));
    });
    Ok(out)
}

/// `out[i] = f(a[i], b[i], c[i])` into a new container.
pub fn fmap3<T: Scalar, C: Container<T>, F>(a: &C, b: &C, c: &C, f: F) -> Result<C>
where
    F: Fn(T, T, T) -> T,
{
    ensure_same_shape(&a.shape(), &b.shape())?;
    ensure_same_shape(&a.shape(), &c.shape())?;
    let out = a.zeros_like();
    let (dst, ab, bb, cb) = (out.buffer(), a.buffer(), b.buffer(), c.buffer());
    for_each_position(
        [out.layout(), a.layout(), b.layout(), c.layout()],
        |[o, p, q, r]| {
            dst.set(o, f(ab.get(p), bb.get(q), cb.get(r)));
        },
    );
    Ok(out)
}

/// `a[i] = f(a[i])` in place.
pub fn fmap_inplace<T: Scalar, C: Container<T>, F>(a: &mut C, f: F) -> &mut C
where
    F: Fn(T) -> T,
{
    let buf = a.buffer();
    for_each_position([a.layout()], |[p]| buf.set(p, f(buf.get(p))));
    a
}

/// `a[i] = f(a[i], b[i])` in place.
///
/// # Errors
/// Returns `DimensionMismatch` unless `b` has the shape of `a`.
pub fn fmap2_inplace<'a, T: Scalar, C: Container<T>, F>(a: &'a mut C, b: &C, f: F) -> Result<&'a mut C>
where
    F: Fn(T, T) -> T,
{
    ensure_same_shape(&a.shape(), &b.shape())?;
    let b = Operand::new(a, b);
    let (ab, bb) = (a.buffer(), b.buffer());
    for_each_position([a.layout(), b.layout()], |[p, q]| {
        ab.set(p, f(ab.get(p), bb.get(q)));
    });
    Ok(a)
}

/// `a[i] = f(a[i], b[i], c[i])` in place.
///
/// # Errors
/// Returns `DimensionMismatch` unless `b` and `c` have the shape of `a`.
pub fn fmap3_inplace<'a, T: Scalar, C: Container<T>, F>(
    a: &'a mut C,
    b: &C,
    c: &C,
    f: F,
) -> Result<&'a mut C>
where
    F: Fn(T, T, T) -> T,
{
    ensure_same_shape(&a.shape(), &b.shape())?;
    ensure_same_shape(&a.shape(), &c.shape())?;
    let b = Operand::new(a, b);
    let c = Operand::new(a, c);
    let (ab, bb, cb) = (a.buffer(), b.buffer(), c.buffer());
    for_each_position([a.layout(), b.layout(), c.layout()], |[p, q, r]| {
        ab.set(p, f(ab.get(p), bb.get(q), cb.get(r)));
    });
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dense_view::{DenseError, Matrix, Vector};

    #[test]
    fn test_fmap_vector() {
        let v = Vector::from_slice(&[1.0, -2.0, 3.0]);
        let w = fmap(&v, |x| x * x);
        assert_eq!(w.to_vec(), vec![1.0, 4.0, 9.0]);
        assert_eq!(v.to_vec(), vec![1.0, -2.0, 3.0]);
        assert!(!w.shares_buffer(&v));
    }

    #[test]
    fn test_fmap_strided_source() {
        let m = Matrix::from_fn(3, 4, |r, c| (r * 10 + c) as f64);
        let s = m.submatrix(1, 1, 2, 2).unwrap().transpose();
        let out = fmap(&s, |x| x + 0.5);
        assert_eq!(out, Matrix::from_col_major(2, 2, &[11.5, 12.5, 21.5, 22.5]).unwrap());
    }

    #[test]
    fn test_fmap2_and_fmap3() {
        let a = Vector::from_slice(&[1.0, 2.0]);
        let b = Vector::from_slice(&[10.0, 20.0]);
        let c = Vector::from_slice(&[100.0, 200.0]);
        assert_eq!(fmap2(&a, &b, |x, y| x + y).unwrap().to_vec(), vec![11.0, 22.0]);
        assert_eq!(
            fmap3(&a, &b, &c, |x, y, z| x * y + z).unwrap().to_vec(),
            vec![110.0, 240.0]
        );
    }

    #[test]
    fn test_fmap2_shape_mismatch() {
        let a = Matrix::<f64>::zeros(2, 3);
        let b = Matrix::<f64>::zeros(3, 2);
        assert_eq!(
            fmap2(&a, &b, |x, y| x + y).unwrap_err(),
            DenseError::DimensionMismatch {
                expected: vec![2, 3],
                actual: vec![3, 2]
            }
        );
        let mut a = a;
        assert!(fmap2_inplace(&mut a, &b, |x, y| x + y).is_err());
    }

    #[test]
    fn test_fmap3_shape_mismatch() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let short = Vector::from_slice(&[1.0, 2.0]);
        let err = fmap3(&a, &short, &a, |x, y, z| x + y + z).unwrap_err();
        assert_eq!(
            err,
            DenseError::DimensionMismatch {
                expected: vec![3],
                actual: vec![2]
            }
        );
        assert!(fmap3(&a, &a, &short, |x, y, z| x + y + z).is_err());
    }

    #[test]
    fn test_fmap3_inplace_shape_mismatch_leaves_target() {
        let mut a = Matrix::from_col_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let ok = Matrix::<f64>::zeros(2, 2);
        let wide = Matrix::<f64>::zeros(2, 3);
        let err = fmap3_inplace(&mut a, &ok, &wide, |x, y, z| x + y + z).unwrap_err();
        assert_eq!(
            err,
            DenseError::DimensionMismatch {
                expected: vec![2, 2],
                actual: vec![2, 3]
            }
        );
        assert!(fmap3_inplace(&mut a, &wide, &ok, |x, y, z| x + y + z).is_err());
        assert_eq!(a.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_fmap_inplace_through_view() {
        let m = Matrix::from_col_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut r = m.row(0).unwrap();
        fmap_inplace(&mut r, |x| -x);
        assert_eq!(m.to_vec(), vec![-1.0, 2.0, -3.0, 4.0]);
    }

    #[test]
    fn test_fmap2_inplace_returns_first() {
        let mut a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[1.0, 1.0, 1.0]);
        let out = fmap2_inplace(&mut a, &b, |x, y| x - y).unwrap();
        out.set_entry(0, 7.0).unwrap();
        assert_eq!(a.to_vec(), vec![7.0, 1.0, 2.0]);
    }

    #[test]
    fn test_fmap2_inplace_overlapping_operand() {
        // b is a shifted view of a; results must use b's values before the write.
        let base = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let mut a = base.subvector(1, 3).unwrap();
        let b = base.subvector(0, 3).unwrap();
        fmap2_inplace(&mut a, &b, |x, y| x + y).unwrap();
        assert_eq!(base.to_vec(), vec![1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_fmap3_inplace() {
        let mut a = Matrix::from_col_major(1, 2, &[1.0, 2.0]).unwrap();
        let b = Matrix::from_col_major(1, 2, &[3.0, 4.0]).unwrap();
        let c = Matrix::from_col_major(1, 2, &[5.0, 6.0]).unwrap();
        fmap3_inplace(&mut a, &b, &c, |x, y, z| x + y + z).unwrap();
        assert_eq!(a.to_vec(), vec![9.0, 12.0]);
    }
}
