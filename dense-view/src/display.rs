//! Human-readable rendering for debugging.
//!
//! ```text
//! [f64, n:3, offset:0, stride:1]
//! [   1.00    2.00   -5.00]
//! ```

use std::fmt;

use crate::{Container, Matrix, Scalar, Vector, PRINT_LIMIT};

const ELISION: &str = "⋯";

/// Indices to print for an axis of length `n`, with `None` marking the gap.
fn shown(n: usize) -> Vec<Option<usize>> {
    if n <= PRINT_LIMIT {
        return (0..n).map(Some).collect();
    }
    let head = PRINT_LIMIT / 2;
    let tail = PRINT_LIMIT - head;
    (0..head)
        .map(Some)
        .chain(std::iter::once(None))
        .chain((n - tail..n).map(Some))
        .collect()
}

fn write_line<T: Scalar>(
    f: &mut fmt::Formatter<'_>,
    n: usize,
    at: impl Fn(usize) -> T,
) -> fmt::Result {
    f.write_str("[")?;
    for (k, idx) in shown(n).into_iter().enumerate() {
        if k > 0 {
            f.write_str(" ")?;
        }
        match idx {
            Some(i) => write!(f, "{:>7.2}", at(i))?,
            None => write!(f, "{:>7}", ELISION)?,
        }
    }
    f.write_str("]")
}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}, n:{}, offset:{}, stride:{}]",
            T::NAME,
            self.len(),
            self.offset(),
            self.stride()
        )?;
        let values = self.to_vec();
        write_line(f, values.len(), |i| values[i])
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = if self.is_transposed() { "row" } else { "column" };
        write!(
            f,
            "[{}, mxn:{}x{}, layout:{}, offset:{}, ld:{}]",
            T::NAME,
            self.rows(),
            self.cols(),
            order,
            self.offset(),
            self.ld()
        )?;
        let layout = self.layout();
        let buffer = self.buffer();
        for idx in shown(self.rows()) {
            f.write_str("\n")?;
            match idx {
                Some(r) => write_line(f, self.cols(), |c| buffer.get(layout.position(r, c)))?,
                None => write!(f, "{:>8}", ELISION)?,
            }
        }
        Ok(())
    }
}
