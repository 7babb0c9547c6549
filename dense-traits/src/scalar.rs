//! Scalar type bounds for dense storage and kernels.

use std::fmt::{Debug, Display};

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Primitive real element type a dense buffer can hold.
///
/// The set is closed: only `f32` and `f64` implement it, and every kernel is
/// monomorphized for the element type at compile time. Values are handled by
/// copy, so callbacks in the functional layer see plain numbers rather than
/// boxed wrappers.
///
/// `bytemuck::Pod` is required so that raw byte storage can be cast to and
/// from element runs.
pub trait Scalar:
    sealed::Sealed
    + num_traits::Float
    + num_traits::FromPrimitive
    + bytemuck::Pod
    + Default
    + Debug
    + Display
    + 'static
{
    /// Short type name used in display headers (`f64`, `f32`).
    const NAME: &'static str;
}

impl Scalar for f32 {
    const NAME: &'static str = "f32";
}

impl Scalar for f64 {
    const NAME: &'static str = "f64";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_scalar<T: Scalar>() {}

    #[test]
    fn test_standard_types() {
        assert_scalar::<f32>();
        assert_scalar::<f64>();
    }

    #[test]
    fn test_names() {
        assert_eq!(<f64 as Scalar>::NAME, "f64");
        assert_eq!(<f32 as Scalar>::NAME, "f32");
    }

    #[test]
    fn test_byte_width_matches_pod_layout() {
        let bytes = bytemuck::bytes_of(&1.5f64);
        assert_eq!(bytes.len(), std::mem::size_of::<f64>());
        let back: f64 = bytemuck::pod_read_unaligned(bytes);
        assert_eq!(back, 1.5);
    }
}
