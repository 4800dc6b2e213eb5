use std::marker::PhantomData;

/// Shared view of a mutable slice for disjoint parallel writes.
///
/// `parallel_for` bodies only receive a shared reference to their
/// environment, while transform kernels hand every loop index its own
/// disjoint set of slice elements. `SyncSlice` bridges the two: it is `Sync`
/// and hands out `&mut` element access, leaving the disjointness obligation
/// with the caller.
pub struct SyncSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _lifetime: PhantomData<&'a mut [T]>,
}

// Safety: access is handed out per index; the `get_mut` contract makes
// concurrent accesses to one index mutually exclusive.
unsafe impl<T: Send> Send for SyncSlice<'_, T> {}
unsafe impl<T: Send> Sync for SyncSlice<'_, T> {}

impl<'a, T> SyncSlice<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _lifetime: PhantomData,
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive access to the element at `index`.
    ///
    /// # Safety
    ///
    /// No two threads may touch the same `index` concurrently, and `index`
    /// must be within bounds. Kernels uphold this by assigning each loop
    /// iteration a disjoint index range.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn get_mut(&self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.ptr.add(index)
    }
}
