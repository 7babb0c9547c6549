//! Shared traits for the dense-blas crates.
//!
//! This crate holds the element type bounds used by `dense-view`,
//! `dense-kernel` and the `dense-blas` facade, so that every layer agrees on
//! which primitive numbers a buffer may hold.

pub mod scalar;

pub use scalar::Scalar;
