//! x86 SSE backend: 128-bit `__m128` registers, 4 × f32.
//!
//! Same lane count as NEON, so timings stay comparable across hosts.
//! `_mm_add_ps` performs the 4-lane add in one instruction.

pub mod f32x4;
