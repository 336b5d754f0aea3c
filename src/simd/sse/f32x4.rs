//! SSE 4-lane f32 SIMD vector implementation.
//!
//! Wraps the 128-bit `__m128` register. SSE is part of the x86_64 baseline, so
//! no runtime detection is needed once `build.rs` has selected this backend.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, AddAssign};

use crate::simd::traits::SimdVec;

/// Number of f32 elements in a 128-bit SSE register.
pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    size: usize,
    elements: __m128,
}

impl F32x4 {
    /// Number of meaningful lanes (4 unless partially loaded).
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All 4 lanes, including zero padding of a partial load.
    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        let mut out = [0.0f32; LANE_COUNT];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), self.elements) };
        out
    }
}

impl SimdVec<f32> for F32x4 {
    #[inline(always)]
    fn new(slice: &[f32]) -> Self {
        match slice.len().cmp(&LANE_COUNT) {
            std::cmp::Ordering::Less => unsafe { Self::load_partial(slice.as_ptr(), slice.len()) },
            std::cmp::Ordering::Equal | std::cmp::Ordering::Greater => unsafe {
                Self::load(slice.as_ptr(), LANE_COUNT)
            },
        }
    }

    #[inline(always)]
    fn splat(value: f32) -> Self {
        Self {
            elements: unsafe { _mm_set1_ps(value) },
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self {
        assert!(!ptr.is_null(), "Pointer must not be null");
        assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");

        // Vec<f32> only guarantees 4-byte alignment
        Self {
            elements: unsafe { _mm_loadu_ps(ptr) },
            size,
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let elements = match size {
            0 => unsafe { _mm_setzero_ps() },
            1 => unsafe { _mm_set_ps(0.0, 0.0, 0.0, *ptr) },
            2 => unsafe { _mm_set_ps(0.0, 0.0, *ptr.add(1), *ptr) },
            3 => unsafe { _mm_set_ps(0.0, *ptr.add(2), *ptr.add(1), *ptr) },
            _ => unreachable!("Size must be < {}", LANE_COUNT),
        };

        Self { elements, size }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        assert!(
            self.size == LANE_COUNT,
            "Size must be == {LANE_COUNT}, use store_at_partial for {} lanes",
            self.size
        );
        assert!(!ptr.is_null(), "Pointer must not be null");

        unsafe { _mm_storeu_ps(ptr, self.elements) };
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32) {
        assert!(self.size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        assert!(!ptr.is_null(), "Pointer must not be null");

        let lanes = self.to_array();
        unsafe { std::ptr::copy_nonoverlapping(lanes.as_ptr(), ptr, self.size) };
    }

    #[inline(always)]
    fn to_vec(self) -> Vec<f32> {
        self.to_array()[..self.size].to_vec()
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        assert!(
            self.size == rhs.size,
            "Operands must have the same size (expected {} lanes, got {} and {})",
            LANE_COUNT,
            self.size,
            rhs.size
        );

        Self {
            size: self.size,
            elements: unsafe { _mm_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl AddAssign for F32x4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_full_register() {
        let a = F32x4::new(&[1.0, 2.0, 3.0, 4.0]);
        let b = F32x4::new(&[2.0, 4.0, 6.0, 8.0]);

        assert_eq!((a + b).to_array(), [3.0, 6.0, 9.0, 12.0]);
    }

    #[test]
    fn test_partial_load_lane_order() {
        // _mm_set_ps takes lanes high to low
        let v = F32x4::new(&[7.0, 8.0, 9.0]);

        assert_eq!(v.size(), 3);
        assert_eq!(v.to_array(), [7.0, 8.0, 9.0, 0.0]);
    }

    #[test]
    fn test_add_assign_accumulates() {
        let mut acc = F32x4::splat(0.5);
        acc += F32x4::splat(1.5);
        acc += F32x4::new(&[1.0, 2.0, 3.0, 4.0]);

        assert_eq!(acc.to_array(), [3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    #[should_panic(expected = "Operands must have the same size")]
    fn test_add_rejects_mismatched_sizes() {
        let _ = F32x4::new(&[1.0, 2.0]) + F32x4::splat(1.0);
    }

    #[test]
    fn test_store_at_partial_leaves_tail_untouched() {
        let sum = F32x4::new(&[1.0, 2.0]) + F32x4::new(&[10.0, 20.0]);
        let mut out = [-1.0f32; 4];
        unsafe { sum.store_at_partial(out.as_mut_ptr()) };

        assert_eq!(out, [11.0, 22.0, -1.0, -1.0]);
    }
}
