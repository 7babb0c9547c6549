//! BLAS Level 1: reductions and element-wise updates.
//!
//! Everything here is generic over [`Container`], so the same routine serves
//! vectors, matrices and any of their views. Element order is index order.

use dense_kernel::{fmap, fmap2, fmap2_inplace, fmap_inplace, fold, fold_sum, foldmap, foldmap2};
use dense_view::{ensure_same_shape, Container, DenseError, Result, Scalar};

// ============================================================================
// Reductions
// ============================================================================

/// Sum of absolute values.
pub fn asum<T: Scalar, C: Container<T>>(x: &C) -> T {
    foldmap(x, T::zero(), |v| v.abs(), |acc, v| acc + v)
}

/// Sum of entries.
pub fn sum<T: Scalar, C: Container<T>>(x: &C) -> T {
    fold_sum(x)
}

/// Inner product `sum(x[i] * y[i])`.
///
/// # Errors
/// Returns `DimensionMismatch` unless `x` and `y` have the same shape.
pub fn dot<T: Scalar, C: Container<T>>(x: &C, y: &C) -> Result<T> {
    foldmap2(x, y, T::zero(), |a, b| a * b, |acc, v| acc + v)
}

/// Euclidean norm.
///
/// Accumulates a running scale and scaled sum of squares so that
/// intermediate squares neither overflow nor underflow.
pub fn nrm2<T: Scalar, C: Container<T>>(x: &C) -> T {
    let (scale, ssq) = fold(x, (T::zero(), T::one()), |(scale, ssq), v: T| {
        if v == T::zero() {
            return (scale, ssq);
        }
        let a = v.abs();
        if scale < a {
            let r = scale / a;
            (a, T::one() + ssq * r * r)
        } else {
            let r = a / scale;
            (scale, ssq + r * r)
        }
    });
    scale * ssq.sqrt()
}

/// Largest absolute value, zero for an empty container.
pub fn amax<T: Scalar, C: Container<T>>(x: &C) -> T {
    fold(x, T::zero(), |m, v| m.max(v.abs()))
}

/// Index (in index order) of the first entry with the largest absolute
/// value, or `None` if `x` is empty.
pub fn iamax<T: Scalar, C: Container<T>>(x: &C) -> Option<usize> {
    let (best, _) = fold(
        x,
        (None, 0usize),
        |(best, i): (Option<(usize, T)>, usize), v: T| {
            let a = v.abs();
            let best = match best {
                None => Some((i, a)),
                Some((_, m)) if a > m => Some((i, a)),
                kept => kept,
            };
            (best, i + 1)
        },
    );
    best.map(|(i, _)| i)
}

// ============================================================================
// Scaling and accumulation
// ============================================================================

/// `x := alpha * x` in place.
pub fn scal<T: Scalar, C: Container<T>>(alpha: T, x: &mut C) -> &mut C {
    fmap_inplace(x, |v| alpha * v)
}

/// `alpha * x` into a new container; `x` is unchanged.
pub fn ax<T: Scalar, C: Container<T>>(alpha: T, x: &C) -> C {
    fmap(x, |v| alpha * v)
}

/// `alpha * x + y` into a new container; `y` is unchanged.
///
/// # Errors
/// Returns `DimensionMismatch` unless `x` and `y` have the same shape.
pub fn axpy<T: Scalar, C: Container<T>>(alpha: T, x: &C, y: &C) -> Result<C> {
    fmap2(x, y, |a, b| alpha * a + b)
}

/// `y := alpha * x + y` in place.
///
/// `x` may alias `y`; it is read as it was before the call.
///
/// # Errors
/// Returns `DimensionMismatch` unless `x` has the shape of `y`.
pub fn axpy_inplace<'a, T: Scalar, C: Container<T>>(
    alpha: T,
    x: &C,
    y: &'a mut C,
) -> Result<&'a mut C> {
    fmap2_inplace(y, x, |b, a| alpha * a + b)
}

/// `x + y` into a new container.
///
/// # Errors
/// Returns `DimensionMismatch` unless `x` and `y` have the same shape.
pub fn xpy<T: Scalar, C: Container<T>>(x: &C, y: &C) -> Result<C> {
    fmap2(x, y, |a, b| a + b)
}

/// Exchange all entries of `a` and `b`. Returns `a`, which now holds the
/// former contents of `b`.
///
/// # Errors
/// Returns `DimensionMismatch` unless `a` and `b` have the same shape.
pub fn swp<'a, T: Scalar, C: Container<T>>(a: &'a mut C, b: &mut C) -> Result<&'a mut C> {
    ensure_same_shape(&a.shape(), &b.shape())?;
    let saved = a.copy();
    fmap2_inplace(&mut *a, b, |_, y| y)?;
    fmap2_inplace(b, &saved, |_, x| x)?;
    Ok(a)
}

// ============================================================================
// Variadic axpy
// ============================================================================

/// A linear combination `x0 + ... + alpha1 * x1 + alpha2 * x2 + ...`,
/// summed left to right.
///
/// Built from optional unscaled leading terms ([`plus`](Self::plus)) and
/// `(alpha, x)` pairs ([`scaled`](Self::scaled)). [`eval`](Self::eval)
/// allocates the sum; [`accumulate_into`](Self::accumulate_into) adds it to a
/// trailing accumulator in place.
///
/// ```rust
/// use dense_blas::{Combination, Vector};
///
/// let x = Vector::from_slice(&[1.0, 2.0]);
/// let y = Vector::from_slice(&[10.0, 20.0]);
/// let mut acc = Vector::from_slice(&[100.0, 200.0]);
///
/// Combination::new()
///     .plus(&x)
///     .scaled(2.0, &y)
///     .accumulate_into(&mut acc)
///     .unwrap();
/// assert_eq!(acc.to_vec(), vec![121.0, 242.0]);
/// ```
#[derive(Debug)]
pub struct Combination<'a, T: Scalar, C: Container<T>> {
    terms: Vec<(T, &'a C)>,
}

impl<'a, T: Scalar, C: Container<T>> Default for Combination<'a, T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Scalar, C: Container<T>> Combination<'a, T, C> {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append an unscaled term.
    pub fn plus(self, x: &'a C) -> Self {
        self.scaled(T::one(), x)
    }

    /// Append `alpha * x`.
    pub fn scaled(mut self, alpha: T, x: &'a C) -> Self {
        self.terms.push((alpha, x));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The combined sum as a new container.
    ///
    /// # Errors
    /// Returns `EmptyCombination` if no terms were added, or
    /// `DimensionMismatch` if a term's shape differs from the first term's.
    pub fn eval(&self) -> Result<C> {
        let ((alpha, first), rest) = self
            .terms
            .split_first()
            .ok_or(DenseError::EmptyCombination)?;
        for (_, x) in rest {
            ensure_same_shape(&first.shape(), &x.shape())?;
        }
        log::trace!("combination: {} terms of {:?}", self.terms.len(), first.shape());
        let mut out = ax(*alpha, *first);
        for &(alpha, x) in rest {
            axpy_inplace(alpha, x, &mut out)?;
        }
        Ok(out)
    }

    /// `acc := sum + acc` in place, returning `acc`.
    ///
    /// # Errors
    /// As [`eval`](Self::eval), plus `DimensionMismatch` if `acc` does not
    /// have the terms' shape.
    pub fn accumulate_into<'d>(&self, acc: &'d mut C) -> Result<&'d mut C> {
        if let Some((_, first)) = self.terms.first() {
            ensure_same_shape(&acc.shape(), &first.shape())?;
        }
        let total = self.eval()?;
        fmap2_inplace(acc, &total, |a, s| s + a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dense_view::{ErrorKind, Matrix, Vector};

    fn dv(values: &[f64]) -> Vector<f64> {
        Vector::from_slice(values)
    }

    #[test]
    fn test_asum_and_sum() {
        let x = dv(&[1.0, 2.0, -5.0]);
        assert_eq!(asum(&x), 8.0);
        assert_eq!(sum(&x), -2.0);
        assert_eq!(asum(&Vector::<f64>::zeros(0)), 0.0);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&dv(&[1.0, 2.0, 3.0]), &dv(&[1.0, 3.0, 5.0])).unwrap(), 22.0);
        let err = dot(&dv(&[1.0, 2.0]), &dv(&[1.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn test_dot_on_matrix_rows() {
        let m = Matrix::from_fn(3, 3, |r, c| (r * 3 + c) as f64);
        let d = dot(&m.row(0).unwrap(), &m.col(2).unwrap()).unwrap();
        // row 0 = [0, 1, 2], col 2 = [2, 5, 8]
        assert_relative_eq!(d, 21.0);
    }

    #[test]
    fn test_nrm2() {
        assert_relative_eq!(nrm2(&dv(&[3.0, 4.0])), 5.0);
        assert_relative_eq!(nrm2(&dv(&[0.0, -3.0, 0.0, 4.0])), 5.0);
        assert_eq!(nrm2(&Vector::<f64>::zeros(3)), 0.0);
        // Squares of these overflow f64; the scaled sum does not.
        let big = dv(&[3e200, 4e200]);
        assert_relative_eq!(nrm2(&big), 5e200, max_relative = 1e-12);
    }

    #[test]
    fn test_amax_iamax() {
        let x = dv(&[1.0, -7.0, 3.0, 7.0]);
        assert_eq!(amax(&x), 7.0);
        assert_eq!(iamax(&x), Some(1));
        assert_eq!(iamax(&Vector::<f64>::zeros(0)), None);
        assert_eq!(iamax(&Vector::<f64>::zeros(2)), Some(0));
    }

    #[test]
    fn test_scal_and_ax() {
        let mut x = dv(&[1.0, 2.0]);
        let y = ax(3.0, &x);
        assert_eq!(y.to_vec(), vec![3.0, 6.0]);
        assert_eq!(x.to_vec(), vec![1.0, 2.0]);

        scal(-1.0, &mut x).set_entry(0, 9.0).unwrap();
        assert_eq!(x.to_vec(), vec![9.0, -2.0]);
    }

    #[test]
    fn test_axpy_pure_and_inplace() {
        let x = dv(&[1.0, 2.0, 3.0]);
        let mut y = dv(&[10.0, 20.0, 30.0]);
        let z = axpy(2.0, &x, &y).unwrap();
        assert_eq!(z.to_vec(), vec![12.0, 24.0, 36.0]);
        assert_eq!(y.to_vec(), vec![10.0, 20.0, 30.0]);

        axpy_inplace(-1.0, &x, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![9.0, 18.0, 27.0]);

        assert!(axpy(1.0, &x, &dv(&[1.0])).is_err());
    }

    #[test]
    fn test_axpy_inplace_with_aliased_source() {
        let base = dv(&[1.0, 2.0, 3.0, 4.0]);
        let x = base.subvector(0, 3).unwrap();
        let mut y = base.subvector(1, 3).unwrap();
        axpy_inplace(1.0, &x, &mut y).unwrap();
        assert_eq!(base.to_vec(), vec![1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_negation_via_axpy() {
        let x = dv(&[1.0, -2.0]);
        let y = dv(&[5.0, 5.0]);
        let mut d = y.copy();
        axpy_inplace(-1.0, &x, &mut d).unwrap();
        assert_eq!(xpy(&d, &x).unwrap(), y);
    }

    #[test]
    fn test_swp() {
        let mut a = dv(&[1.0, 2.0]);
        let mut b = dv(&[3.0, 4.0]);
        let r = swp(&mut a, &mut b).unwrap();
        assert_eq!(r.to_vec(), vec![3.0, 4.0]);
        assert_eq!(b.to_vec(), vec![1.0, 2.0]);
        assert_eq!(a.to_vec(), vec![3.0, 4.0]);

        let mut c = dv(&[1.0]);
        assert!(swp(&mut a, &mut c).is_err());
    }

    #[test]
    fn test_swp_matrix_columns() {
        let m = Matrix::from_col_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let mut c0 = m.col(0).unwrap();
        let mut c1 = m.col(1).unwrap();
        swp(&mut c0, &mut c1).unwrap();
        assert_eq!(m.to_vec(), vec![3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_combination() {
        let x = dv(&[1.0, 1.0]);
        let y = dv(&[2.0, 3.0]);
        let z = Combination::new()
            .plus(&x)
            .scaled(2.0, &y)
            .scaled(-1.0, &x)
            .eval()
            .unwrap();
        assert_eq!(z.to_vec(), vec![4.0, 6.0]);
        assert_eq!(x.to_vec(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_combination_errors() {
        let x = dv(&[1.0, 1.0]);
        let empty: Combination<'_, f64, Vector<f64>> = Combination::new();
        assert!(empty.is_empty());
        let err = empty.eval().unwrap_err();
        assert_eq!(err, DenseError::EmptyCombination);
        assert_eq!(err.kind(), ErrorKind::Construction);

        let short = dv(&[1.0]);
        assert!(Combination::new().plus(&x).plus(&short).eval().is_err());

        let mut acc = dv(&[0.0, 0.0, 0.0]);
        assert!(Combination::new().plus(&x).accumulate_into(&mut acc).is_err());
        assert_eq!(acc.to_vec(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_level1_on_matrices() {
        let a = Matrix::from_col_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = a.transpose();
        assert_eq!(xpy(&a, &b).unwrap().to_vec(), vec![2.0, 5.0, 5.0, 8.0]);
        assert_relative_eq!(dot(&a, &a).unwrap(), 30.0);
    }
}
