//! Left-to-right reductions: fold and fused fold-map.

use std::cell::Cell;

use dense_view::{ensure_same_shape, Container, Result, Scalar};

use crate::kernel::{contiguous_cells, Walk};

/// Reduce `a` in index order: `f(...f(f(init, a[0]), a[1])..., a[n-1])`.
pub fn fold<T: Scalar, C: Container<T>, U, F>(a: &C, init: U, f: F) -> U
where
    F: Fn(U, T) -> U,
{
    if let Some(cells) = contiguous_cells(a) {
        log::trace!("fold: contiguous run of {}", cells.len());
        return cells.iter().map(Cell::get).fold(init, f);
    }
    let buf = a.buffer();
    Walk::new([a.layout()]).fold(init, |acc, [p]| f(acc, buf.get(p)))
}

/// Reduce two same-shaped containers together:
/// `acc = f(acc, a[i], b[i])` in index order.
///
/// # Errors
/// Returns `DimensionMismatch` if the shapes differ.
pub fn fold2<T: Scalar, C: Container<T>, U, F>(a: &C, b: &C, init: U, f: F) -> Result<U>
where
    F: Fn(U, T, T) -> U,
{
    ensure_same_shape(&a.shape(), &b.shape())?;
    let (ab, bb) = (a.buffer(), b.buffer());
    Ok(Walk::new([a.layout(), b.layout()]).fold(init, |acc, [p, q]| f(acc, ab.get(p), bb.get(q))))
}

/// Sum of all elements; `fold(a, 0, +)`.
pub fn fold_sum<T: Scalar, C: Container<T>>(a: &C) -> T {
    fold(a, T::zero(), |acc, x| acc + x)
}

/// `fold(fmap(a, map), init, fold_fn)` in one traversal, without
/// materializing the mapped container.
pub fn foldmap<T: Scalar, C: Container<T>, U, M, F>(a: &C, init: U, map: M, fold_fn: F) -> U
where
    M: Fn(T) -> T,
    F: Fn(U, T) -> U,
{
    fold(a, init, |acc, x| fold_fn(acc, map(x)))
}

/// `fold(fmap2(a, b, map), init, fold_fn)` in one traversal, without
/// materializing the mapped container.
///
/// # Errors
/// Returns `DimensionMismatch` if the shapes differ.
pub fn foldmap2<T: Scalar, C: Container<T>, U, M, F>(
    a: &C,
    b: &C,
    init: U,
    map: M,
    fold_fn: F,
) -> Result<U>
where
    M: Fn(T, T) -> T,
    F: Fn(U, T) -> U,
{
    fold2(a, b, init, |acc, x, y| fold_fn(acc, map(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::fmap2;
    use approx::assert_relative_eq;
    use dense_view::{Buffer, Matrix, Vector};

    #[test]
    fn test_fold_order_is_index_order() {
        let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let digits = fold(&v, 0.0, |acc, x| acc * 10.0 + x);
        assert_eq!(digits, 123.0);

        let buf = Buffer::from_vec(vec![1.0, 2.0, 3.0]);
        let reversed = Vector::from_buffer(buf, 2, -1, 3).unwrap();
        assert_eq!(fold(&reversed, 0.0, |acc, x| acc * 10.0 + x), 321.0);
    }

    #[test]
    fn test_fold_matrix_column_major() {
        let m = Matrix::from_col_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(fold(&m, 0.0, |acc, x| acc * 10.0 + x), 1234.0);
        assert_eq!(fold(&m.transpose(), 0.0, |acc, x| acc * 10.0 + x), 1324.0);
    }

    #[test]
    fn test_fold_accumulator_type() {
        let v = Vector::from_slice(&[1.0, -2.0, 3.0, -4.0]);
        let negatives = fold(&v, 0usize, |n, x| if x < 0.0 { n + 1 } else { n });
        assert_eq!(negatives, 2);
    }

    #[test]
    fn test_fold_sum() {
        let m = Matrix::from_fn(3, 3, |r, c| (r + 3 * c) as f64);
        assert_relative_eq!(fold_sum(&m), 36.0);
        assert_relative_eq!(fold_sum(&m.submatrix(1, 1, 2, 2).unwrap()), 4.0 + 5.0 + 7.0 + 8.0);
    }

    #[test]
    fn test_fold2() {
        let a = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let b = Vector::from_slice(&[4.0, 5.0, 6.0]);
        let r = fold2(&a, &b, 0.0, |acc, x, y| acc + x * y).unwrap();
        assert_relative_eq!(r, 32.0);
        assert!(fold2(&a, &Vector::zeros(2), 0.0, |acc, x, y| acc + x * y).is_err());
    }

    #[test]
    fn test_foldmap_matches_fold_of_fmap() {
        let a = Matrix::from_fn(4, 3, |r, c| r as f64 - c as f64 * 0.5);
        let b = Matrix::from_fn(4, 3, |r, c| (r * c) as f64 + 1.0).transpose().transpose();
        let map = |x: f64, y: f64| x * y - 1.0;
        let fold_fn = |acc: f64, z: f64| acc.max(z) + 0.25;

        let fused = foldmap2(&a, &b, -1.0, map, fold_fn).unwrap();
        let composed = fold(&fmap2(&a, &b, map).unwrap(), -1.0, fold_fn);
        assert_eq!(fused, composed);
    }

    #[test]
    fn test_foldmap_single() {
        let v = Vector::from_slice(&[1.0, -2.0, 3.0]);
        assert_relative_eq!(foldmap(&v, 0.0, |x: f64| x.abs(), |acc, x| acc + x), 6.0);
    }
}
