/// A fixed-width register of packed lanes.
///
/// Every backend (`neon`, `sse`, `fallback`) implements this for its own
/// `F32x4`, so the slice kernels in [`crate::simd::add`] are written once.
pub trait SimdVec<T>: Sized {
    /// Loads a full register from `slice`, or a zero-padded partial register
    /// when the slice is shorter than the lane count.
    fn new(slice: &[T]) -> Self;

    /// Creates a register with every lane set to `value`.
    fn splat(value: T) -> Self;

    /// Loads exactly `size` lanes from `ptr`.
    ///
    /// # Safety
    ///
    /// `size` must equal the lane count and `ptr` must be valid for reads of
    /// that many elements.
    unsafe fn load(ptr: *const T, size: usize) -> Self;

    /// Loads `size` lanes from `ptr` and zeroes the rest.
    ///
    /// # Safety
    ///
    /// `size` must be less than the lane count and `ptr` must be valid for
    /// reads of `size` elements.
    unsafe fn load_partial(ptr: *const T, size: usize) -> Self;

    /// Stores every lane at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of the full lane count.
    unsafe fn store_at(&self, ptr: *mut T);

    /// Stores only the meaningful lanes at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of as many elements as the register was
    /// loaded with.
    unsafe fn store_at_partial(&self, ptr: *mut T);

    /// Returns the meaningful lanes.
    fn to_vec(self) -> Vec<T>;
}

/// Element-wise addition of two slices, in the three flavours the benchmark
/// compares.
pub trait SimdAdd<Rhs = Self> {
    type Output;

    fn simd_add(self, rhs: Rhs) -> Self::Output;
    fn par_simd_add(self, rhs: Rhs) -> Self::Output;
    fn scalar_add(self, rhs: Rhs) -> Self::Output;
}
