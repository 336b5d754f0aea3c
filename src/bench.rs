//! The two benchmark cases: a single 4-lane add and a 10M-element buffer add.
//!
//! Each case times the SIMD path, then the scalar path, once each with a pair
//! of [`Instant`]s. Single-run wall-clock numbers are informational only.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::error::{validation_error, Result};
use crate::simd::add::{scalar_add4, scalar_add_into, simd_add4, simd_add_into};
use crate::simd::LANE_COUNT;

/// Left operand of the small case.
pub const SMALL_LHS: [f32; LANE_COUNT] = [1.0, 2.0, 3.0, 4.0];

/// Right operand of the small case.
pub const SMALL_RHS: [f32; LANE_COUNT] = [2.0, 4.0, 6.0, 8.0];

/// Element count of the big case buffers.
pub const BIG_SIZE: usize = 10_000_000;

/// Wall-clock time of the SIMD path and of the scalar path of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub simd: Duration,
    pub scalar: Duration,
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "With SIMD {:?} Without SIMD {:?}", self.simd, self.scalar)
    }
}

#[derive(Debug, Clone)]
pub struct SmallReport {
    pub timing: Timing,
    pub simd_result: [f32; LANE_COUNT],
    pub scalar_result: [f32; LANE_COUNT],
}

#[derive(Debug, Clone)]
pub struct BigReport {
    pub timing: Timing,
    pub simd_result: Vec<f32>,
    pub scalar_result: Vec<f32>,
}

/// Returns `[0.0, 1.0, 2.0, ...]` of length `n`.
///
/// Exact for every index up to 2^24; [`BIG_SIZE`] stays below that.
pub fn fill_ascending(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32).collect()
}

/// Times one register add against a 4-iteration scalar loop on
/// [`SMALL_LHS`] and [`SMALL_RHS`].
pub fn benchmark_small_size() -> SmallReport {
    let a = SMALL_LHS;
    let b = SMALL_RHS;

    let single_simd = Instant::now();
    let simd_result = black_box(simd_add4(black_box(&a), black_box(&b)));
    let simd = single_simd.elapsed();

    debug!("simd result {simd_result:?}");

    let single_scalar = Instant::now();
    let scalar_result = black_box(scalar_add4(black_box(&a), black_box(&b)));
    let scalar = single_scalar.elapsed();

    let timing = Timing { simd, scalar };
    trace!("small case: {timing}");

    SmallReport {
        timing,
        simd_result,
        scalar_result,
    }
}

/// Times the strided SIMD loop against a plain scalar loop on two ascending
/// buffers of `n` elements. Each path writes its own output buffer.
///
/// # Errors
///
/// Returns a validation error when `n` is zero.
pub fn benchmark_big_size(n: usize) -> Result<BigReport> {
    if n == 0 {
        return Err(validation_error("buffer size must be non-zero"));
    }

    let a = fill_ascending(n);
    let b = fill_ascending(n);
    let mut simd_result = vec![0.0f32; n];
    let mut scalar_result = vec![0.0f32; n];

    debug!(
        "big case: {n} elements, {} full strides, {} trailing",
        n / LANE_COUNT,
        n % LANE_COUNT
    );

    let big_simd = Instant::now();
    simd_add_into(black_box(&a), black_box(&b), black_box(&mut simd_result))?;
    let simd = big_simd.elapsed();

    let big_scalar = Instant::now();
    scalar_add_into(black_box(&a), black_box(&b), black_box(&mut scalar_result))?;
    let scalar = big_scalar.elapsed();

    let timing = Timing { simd, scalar };
    trace!("big case: {timing}");

    Ok(BigReport {
        timing,
        simd_result,
        scalar_result,
    })
}
