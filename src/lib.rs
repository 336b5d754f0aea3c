//! Wall-clock comparison of 4-lane SIMD f32 addition against a scalar loop.
//!
//! [`simd`] holds the register type and the addition kernels, [`bench`] the
//! two timed cases the `simd-delta` binary prints.

pub mod bench;
pub mod error;
pub mod simd;

pub use error::{Result, SimdDeltaError};
pub use simd::traits::SimdAdd;
