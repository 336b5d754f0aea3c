//! ARM NEON backend: 128-bit registers, 4 × f32.
//!
//! NEON is mandatory on AArch64, so this backend is selected for every
//! `aarch64` target. `vaddq_f32` performs the 4-lane add in one instruction.

pub mod f32x4;
