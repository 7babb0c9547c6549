//! Layout fusion.
//!
//! Operands walked together share their extents. When every operand's
//! second stride continues its first (`s1 == d0 * s0`), the two extents
//! merge into one and the walk becomes a single strided run. A leading
//! extent of 1 is dropped the same way. Neither step changes the order in
//! which elements are visited.

use dense_view::Layout;

/// Fuse the extents of layouts that are walked together.
///
/// All layouts must have the same `dims`.
pub fn fuse_layouts<const N: usize>(layouts: [Layout; N]) -> [Layout; N] {
    let Some(first) = layouts.first() else {
        return layouts;
    };
    let [d0, d1] = first.dims;
    if d1 <= 1 {
        return layouts;
    }

    if d0 == 1 {
        return layouts.map(|l| Layout {
            dims: [d1, 1],
            strides: [l.strides[1], 0],
            offset: l.offset,
        });
    }

    let can_merge = layouts
        .iter()
        .all(|l| l.strides[1] == d0 as isize * l.strides[0]);
    if !can_merge {
        return layouts;
    }
    layouts.map(|l| Layout {
        dims: [d0 * d1, 1],
        strides: [l.strides[0], 0],
        offset: l.offset,
    })
}
