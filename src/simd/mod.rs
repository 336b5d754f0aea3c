//! 4-lane f32 registers and the addition kernels built on them.
//!
//! Exactly one backend is compiled in, chosen by `build.rs` from the target's
//! features. There is no runtime dispatch.

#[cfg(neon)]
pub mod neon;

#[cfg(sse)]
pub mod sse;

#[cfg(fallback)]
pub mod fallback;

pub mod add;
pub mod traits;

#[cfg(neon)]
pub use neon::f32x4::{F32x4, LANE_COUNT};

#[cfg(sse)]
pub use sse::f32x4::{F32x4, LANE_COUNT};

#[cfg(fallback)]
pub use fallback::f32x4::{F32x4, LANE_COUNT};

/// Name of the instruction set backing [`F32x4`].
#[cfg(neon)]
pub const BACKEND: &str = "neon";

#[cfg(sse)]
pub const BACKEND: &str = "sse";

#[cfg(fallback)]
pub const BACKEND: &str = "fallback";
