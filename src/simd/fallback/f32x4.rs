//! Portable 4-lane stand-in for targets without a supported vector unit.
//!
//! Lanes are a plain `[f32; 4]`; the compiler may or may not vectorize the
//! per-lane add. Timings from this backend do not measure hardware SIMD.

use std::ops::{Add, AddAssign};

use crate::simd::traits::SimdVec;

pub const LANE_COUNT: usize = 4;

/// Four f32 lanes held in a plain array
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    size: usize,
    elements: [f32; LANE_COUNT],
}

impl F32x4 {
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn to_array(self) -> [f32; LANE_COUNT] {
        self.elements
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
            elements: [value; LANE_COUNT],
            size: LANE_COUNT,
        }
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32, size: usize) -> Self {
        assert!(!ptr.is_null(), "Pointer must not be null");
        assert!(size == LANE_COUNT, "Size must be == {LANE_COUNT}");

        Self {
            elements: unsafe { std::ptr::read_unaligned(ptr as *const [f32; LANE_COUNT]) },
            size,
        }
    }

    #[inline(always)]
    unsafe fn load_partial(ptr: *const f32, size: usize) -> Self {
        assert!(size < LANE_COUNT, "Size must be < {LANE_COUNT}");

        let mut elements = [0.0f32; LANE_COUNT];
        if size > 0 {
            assert!(!ptr.is_null(), "Pointer must not be null");
            unsafe { std::ptr::copy_nonoverlapping(ptr, elements.as_mut_ptr(), size) };
        }

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

        unsafe { std::ptr::copy_nonoverlapping(self.elements.as_ptr(), ptr, LANE_COUNT) };
    }

    #[inline(always)]
    unsafe fn store_at_partial(&self, ptr: *mut f32) {
        assert!(self.size < LANE_COUNT, "Size must be < {LANE_COUNT}");
        assert!(!ptr.is_null(), "Pointer must not be null");

        unsafe { std::ptr::copy_nonoverlapping(self.elements.as_ptr(), ptr, self.size) };
    }

    #[inline(always)]
    fn to_vec(self) -> Vec<f32> {
        self.elements[..self.size].to_vec()
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

        let mut elements = self.elements;
        for (lane, rhs_lane) in elements.iter_mut().zip(rhs.elements) {
            *lane += rhs_lane;
        }

        Self {
            size: self.size,
            elements,
        }
    }
}

impl AddAssign for F32x4 {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
