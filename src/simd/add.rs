//! Element-wise f32 addition, vectorized and scalar.
//!
//! Slice kernels walk the input in strides of [`LANE_COUNT`] and issue one
//! register add per stride. When the length is not a multiple of the lane
//! count, the trailing elements go through a zero-padded partial register, so
//! every output element is written whatever the length.

use rayon::prelude::*;

use crate::error::{length_mismatch, Result};
use crate::simd::traits::{SimdAdd, SimdVec};
use crate::simd::{F32x4, LANE_COUNT};

/// Elements handed to one rayon task. A multiple of [`LANE_COUNT`], so only
/// the last chunk of a slice can end in a partial register.
pub const PAR_BLOCK: usize = LANE_COUNT * 4096;

#[inline(always)]
fn check_lengths(a: &[f32], b: &[f32], out: &[f32]) -> Result<()> {
    if a.len() != b.len() || a.len() != out.len() {
        return Err(length_mismatch(a.len(), b.len(), out.len()));
    }
    Ok(())
}

/// Adds two 4-element vectors with a single register add.
#[inline(always)]
pub fn simd_add4(a: &[f32; LANE_COUNT], b: &[f32; LANE_COUNT]) -> [f32; LANE_COUNT] {
    (F32x4::new(a) + F32x4::new(b)).to_array()
}

/// Adds two 4-element vectors one lane at a time.
#[inline(always)]
#[allow(clippy::needless_range_loop)]
pub fn scalar_add4(a: &[f32; LANE_COUNT], b: &[f32; LANE_COUNT]) -> [f32; LANE_COUNT] {
    let mut result = [0.0f32; LANE_COUNT];
    for i in 0..LANE_COUNT {
        result[i] = a[i] + b[i];
    }
    result
}

// Lengths are checked by the callers.
#[inline(always)]
fn simd_add_block(a: &[f32], b: &[f32], c: &mut [f32]) {
    let size = c.len();
    let nb_lanes = size - (size % LANE_COUNT);
    let rem_lanes = size - nb_lanes;

    for ((a_chunk, b_chunk), c_chunk) in a[..nb_lanes]
        .chunks_exact(LANE_COUNT)
        .zip(b[..nb_lanes].chunks_exact(LANE_COUNT))
        .zip(c[..nb_lanes].chunks_exact_mut(LANE_COUNT))
    {
        let sum = F32x4::new(a_chunk) + F32x4::new(b_chunk);
        // SAFETY: c_chunk holds exactly LANE_COUNT elements.
        unsafe { sum.store_at(c_chunk.as_mut_ptr()) };
    }

    if rem_lanes > 0 {
        let sum = F32x4::new(&a[nb_lanes..]) + F32x4::new(&b[nb_lanes..]);
        // SAFETY: c[nb_lanes..] holds exactly rem_lanes elements, the size of sum.
        unsafe { sum.store_at_partial(c[nb_lanes..].as_mut_ptr()) };
    }
}

#[inline(always)]
#[allow(clippy::needless_range_loop)]
fn scalar_add_block(a: &[f32], b: &[f32], c: &mut [f32]) {
    for i in 0..c.len() {
        c[i] = a[i] + b[i];
    }
}

/// Writes `a[i] + b[i]` into `out[i]`, one register add per [`LANE_COUNT`] elements.
///
/// Trailing elements past the last full stride are added through a partial
/// register rather than skipped.
///
/// # Errors
///
/// Returns [`crate::error::SimdDeltaError::LengthMismatch`] if the three
/// slices do not have the same length. `out` is left untouched in that case.
pub fn simd_add_into(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
    check_lengths(a, b, out)?;
    simd_add_block(a, b, out);
    Ok(())
}

/// Writes `a[i] + b[i]` into `out[i]` with a plain loop over every index.
///
/// # Errors
///
/// Same length contract as [`simd_add_into`].
pub fn scalar_add_into(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
    check_lengths(a, b, out)?;
    scalar_add_block(a, b, out);
    Ok(())
}

/// [`simd_add_into`] spread over the rayon pool in [`PAR_BLOCK`] chunks.
pub fn par_simd_add_into(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
    check_lengths(a, b, out)?;

    out.par_chunks_mut(PAR_BLOCK)
        .zip(a.par_chunks(PAR_BLOCK))
        .zip(b.par_chunks(PAR_BLOCK))
        .for_each(|((c_chunk, a_chunk), b_chunk)| {
            simd_add_block(a_chunk, b_chunk, c_chunk);
        });

    Ok(())
}

/// [`scalar_add_into`] spread over the rayon pool in [`PAR_BLOCK`] chunks.
pub fn par_scalar_add_into(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
    check_lengths(a, b, out)?;

    out.par_chunks_mut(PAR_BLOCK)
        .zip(a.par_chunks(PAR_BLOCK))
        .zip(b.par_chunks(PAR_BLOCK))
        .for_each(|((c_chunk, a_chunk), b_chunk)| {
            scalar_add_block(a_chunk, b_chunk, c_chunk);
        });

    Ok(())
}

impl<'b> SimdAdd<&'b [f32]> for &[f32] {
    type Output = Result<Vec<f32>>;

    #[inline(always)]
    fn simd_add(self, rhs: &'b [f32]) -> Self::Output {
        let mut c = vec![0.0f32; self.len()];
        simd_add_into(self, rhs, &mut c)?;
        Ok(c)
    }

    #[inline(always)]
    fn par_simd_add(self, rhs: &'b [f32]) -> Self::Output {
        let mut c = vec![0.0f32; self.len()];
        par_simd_add_into(self, rhs, &mut c)?;
        Ok(c)
    }

    #[inline(always)]
    fn scalar_add(self, rhs: &'b [f32]) -> Self::Output {
        let mut c = vec![0.0f32; self.len()];
        scalar_add_into(self, rhs, &mut c)?;
        Ok(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimdDeltaError;

    fn ascending(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32).collect()
    }

    #[test]
    fn test_add4_paths_agree() {
        let a = [1.0f32, 2.0, 3.0, 4.0];
        let b = [2.0f32, 4.0, 6.0, 8.0];

        assert_eq!(simd_add4(&a, &b), [3.0, 6.0, 9.0, 12.0]);
        assert_eq!(simd_add4(&a, &b), scalar_add4(&a, &b));
    }

    #[test]
    fn test_add4_special_values() {
        let a = [f32::INFINITY, -0.0, f32::MAX, 0.1];
        let b = [1.0f32, 0.0, f32::MAX, 0.2];

        let simd = simd_add4(&a, &b);
        let scalar = scalar_add4(&a, &b);
        for (s, r) in simd.iter().zip(scalar.iter()) {
            assert_eq!(s.to_bits(), r.to_bits());
        }
        assert_eq!(simd[2], f32::INFINITY);
    }

    #[test]
    fn test_simd_add_into_exact_multiple() {
        let a = ascending(64);
        let mut out = vec![0.0f32; 64];
        simd_add_into(&a, &a, &mut out).unwrap();

        for (i, &v) in out.iter().enumerate() {
            assert_eq!(v, 2.0 * i as f32, "mismatch at index {i}");
        }
    }

    #[test]
    fn test_simd_add_into_handles_remainder() {
        // Every length mod LANE_COUNT, the trailing elements must be written
        for n in [1usize, 2, 3, 5, 6, 7, 10, 4099] {
            let a = ascending(n);
            let mut out = vec![f32::NAN; n];
            simd_add_into(&a, &a, &mut out).unwrap();

            for (i, &v) in out.iter().enumerate() {
                assert_eq!(v, 2.0 * i as f32, "n = {n}, index {i}");
            }
        }
    }

    #[test]
    fn test_empty_inputs_are_valid() {
        let mut out: Vec<f32> = Vec::new();
        assert!(simd_add_into(&[], &[], &mut out).is_ok());
        assert!(scalar_add_into(&[], &[], &mut out).is_ok());
        assert!(par_simd_add_into(&[], &[], &mut out).is_ok());
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let a = ascending(8);
        let b = ascending(7);
        let mut out = vec![-1.0f32; 8];

        let err = simd_add_into(&a, &b, &mut out).unwrap_err();
        assert_eq!(
            err,
            SimdDeltaError::LengthMismatch {
                left: 8,
                right: 7,
                output: 8
            }
        );
        assert!(out.iter().all(|&v| v == -1.0));

        let mut short = vec![0.0f32; 4];
        assert!(scalar_add_into(&a, &a, &mut short).is_err());
        assert!(par_scalar_add_into(&a, &a, &mut short).is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = PAR_BLOCK * 3 + 5;
        let a = ascending(n);
        let b: Vec<f32> = (0..n).map(|i| (n - i) as f32 * 0.5).collect();

        let simd = a.as_slice().simd_add(b.as_slice()).unwrap();
        let par_simd = a.as_slice().par_simd_add(b.as_slice()).unwrap();
        let scalar = a.as_slice().scalar_add(b.as_slice()).unwrap();

        let mut par_scalar = vec![0.0f32; n];
        par_scalar_add_into(&a, &b, &mut par_scalar).unwrap();

        assert_eq!(simd, scalar);
        assert_eq!(par_simd, scalar);
        assert_eq!(par_scalar, scalar);
    }
}
