use std::arch::aarch64::*;
use std::ops::{Add, AddAssign};

use crate::simd::traits::SimdVec;

pub const LANE_COUNT: usize = 4;

/// A SIMD vector of 4 32-bit floating point values
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    size: usize,
    elements: float32x4_t,
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
        unsafe { vst1q_f32(out.as_mut_ptr(), self.elements) };
        out
    }
}

impl SimdVec<f32> for F32x4 {
    #[inline(always)]
    fn new(slice: &[f32]) -> Self {
        // Short slices are zero padded so the add still runs on a full register
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
            elements: unsafe { vdupq_n_f32(value) },
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self {
        assert!(!ptr.is_null(), "Pointer must not be null");
        assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");

        Self {
            elements: unsafe { vld1q_f32(ptr) },
            size,
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let mut padded = [0.0f32; LANE_COUNT];
        if size > 0 {
            assert!(!ptr.is_null(), "Pointer must not be null");
            unsafe { std::ptr::copy_nonoverlapping(ptr, padded.as_mut_ptr(), size) };
        }

        Self {
            elements: unsafe { vld1q_f32(padded.as_ptr()) },
            size,
        }
    }

    #[inline(always)]
    unsafe fn store_at(&self, ptr: *mut f32) {
        assert!(
            self.size == LANE_COUNT,
            "Size must be == {LANE_COUNT}, use store_at_partial for {} lanes",
            self.size
        );
        assert!(!ptr.is_null(), "Pointer must not be null");

        unsafe { vst1q_f32(ptr, self.elements) };
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32) {
        assert!(self.size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        assert!(!ptr.is_null(), "Pointer must not be null");

        match self.size {
            3 => {
                vst1_f32(ptr, vget_low_f32(self.elements));
                *ptr.add(2) = vgetq_lane_f32::<2>(self.elements);
            }
            2 => vst1_f32(ptr, vget_low_f32(self.elements)),
            1 => *ptr = vgetq_lane_f32::<0>(self.elements),
            _ => {}
        }
    }

    #[inline(always)]
    fn to_vec(self) -> Vec<f32> {
        self.to_array()[..self.size].to_vec()
    }
}

/// Implementing the `Add` and `AddAssign` traits for F32x4
/// This allows for using the `+` operator and `+=` operator with F32x4 vectors.
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
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
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
    fn test_partial_load_is_zero_padded() {
        let v = F32x4::new(&[7.0, 8.0]);

        assert_eq!(v.size(), 2);
        assert_eq!(v.to_array(), [7.0, 8.0, 0.0, 0.0]);
        assert_eq!(v.to_vec(), vec![7.0, 8.0]);
    }

    #[test]
    fn test_store_at_partial_leaves_tail_untouched() {
        let sum = F32x4::new(&[1.0, 2.0, 3.0]) + F32x4::new(&[1.0, 1.0, 1.0]);
        let mut out = [-1.0f32; 4];
        unsafe { sum.store_at_partial(out.as_mut_ptr()) };

        assert_eq!(out, [2.0, 3.0, 4.0, -1.0]);
    }
}
