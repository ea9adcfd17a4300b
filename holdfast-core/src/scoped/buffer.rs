//! Scoped Buffer - Exclusive Ownership of an Allocator-Provided Pointer
//!
//! [`ScopedBuffer`] owns a single raw pointer handed out by an external
//! allocator and guarantees it is freed exactly once, on every exit path.
//! The type is move-only: ownership transfers with the value and the
//! borrow checker makes double release unreachable, the same way the rest
//! of the crate treats config and lookup handles.

use std::fmt;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr;

use crate::ffi::BufferAllocator;

/// Exclusive owner of a buffer pointer allocated by `A`.
///
/// A null pointer means "no resource held"; dropping an empty instance
/// performs no release call. The wrapper never reads or writes the buffer
/// contents, it only controls when the pointer goes back to the allocator.
pub struct ScopedBuffer<T, A: BufferAllocator> {
    ptr: *mut T,
    _alloc: PhantomData<A>,
}

impl<T, A: BufferAllocator> ScopedBuffer<T, A> {
    /// Create an empty wrapper holding no resource.
    pub const fn empty() -> Self {
        Self {
            ptr: ptr::null_mut(),
            _alloc: PhantomData,
        }
    }

    /// Take ownership of `ptr`.
    ///
    /// # Safety
    /// `ptr` must be null or a live allocation owned by `A`, not owned by
    /// any other wrapper. The allocation will be released through
    /// [`BufferAllocator::free`] when this wrapper drops.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr,
            _alloc: PhantomData,
        }
    }

    /// Read-only view of the held pointer, for APIs expecting the raw
    /// handle. Ownership does not transfer.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Returns `true` when no resource is held.
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Release the currently held pointer (if any), then store and return
    /// `ptr`.
    ///
    /// # Safety
    /// Same contract as [`from_raw`](Self::from_raw). Additionally, `ptr`
    /// must not be the pointer this wrapper already holds: the old pointer
    /// is released before the new one is stored, so self-assignment frees
    /// the buffer and then continues to own the dangling pointer.
    pub unsafe fn reset(&mut self, ptr: *mut T) -> *mut T {
        self.release();
        self.ptr = ptr;
        ptr
    }

    /// Release the currently held pointer and expose the internal slot for
    /// an out-parameter API to fill.
    ///
    /// Any previously held resource is discarded before the slot is handed
    /// out; the slot is null when this returns.
    ///
    /// # Safety
    /// Whatever pointer the caller (or the called API) writes into the slot
    /// must satisfy the [`from_raw`](Self::from_raw) contract.
    pub unsafe fn reset_for_out(&mut self) -> &mut *mut T {
        self.release();
        &mut self.ptr
    }

    /// Relinquish ownership of the held pointer without releasing it,
    /// leaving the wrapper empty. The caller becomes responsible for the
    /// allocation.
    pub fn take(&mut self) -> *mut T {
        std::mem::replace(&mut self.ptr, ptr::null_mut())
    }

    /// Consume the wrapper, relinquishing ownership without releasing.
    pub fn into_raw(self) -> *mut T {
        let this = ManuallyDrop::new(self);
        this.ptr
    }

    fn release(&mut self) {
        if !self.ptr.is_null() {
            unsafe { A::free(self.ptr.cast()) };
            self.ptr = ptr::null_mut();
        }
    }
}

impl<T, A: BufferAllocator> Drop for ScopedBuffer<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T, A: BufferAllocator> Default for ScopedBuffer<T, A> {
    fn default() -> Self {
        Self::empty()
    }
}

// Pointer-value comparisons; ownership is unaffected.
impl<T, A: BufferAllocator> PartialEq<*mut T> for ScopedBuffer<T, A> {
    fn eq(&self, other: &*mut T) -> bool {
        self.ptr == *other
    }
}

impl<T, A: BufferAllocator> fmt::Debug for ScopedBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedBuffer").field(&self.ptr).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::raw::c_void;

    /// Allocator double whose free is a no-op; the pointers below are
    /// sentinels and never dereferenced.
    struct NoopAlloc;

    impl BufferAllocator for NoopAlloc {
        unsafe fn free(_ptr: *mut c_void) {}
    }

    #[test]
    fn test_empty_buffer_is_null() {
        let buf: ScopedBuffer<u8, NoopAlloc> = ScopedBuffer::empty();
        assert!(buf.is_null());
        assert!(buf.as_ptr().is_null());
    }

    #[test]
    fn test_from_raw_exposes_pointer() {
        let sentinel = 0x1000 as *mut u8;
        let buf: ScopedBuffer<u8, NoopAlloc> = unsafe { ScopedBuffer::from_raw(sentinel) };
        assert!(!buf.is_null());
        assert_eq!(buf.as_ptr(), sentinel);
    }

    #[test]
    fn test_pointer_comparisons() {
        let sentinel = 0x2000 as *mut u8;
        let other = 0x3000 as *mut u8;
        let buf: ScopedBuffer<u8, NoopAlloc> = unsafe { ScopedBuffer::from_raw(sentinel) };
        assert!(buf == sentinel);
        assert!(buf != other);
    }

    #[test]
    fn test_take_leaves_wrapper_empty() {
        let sentinel = 0x4000 as *mut u8;
        let mut buf: ScopedBuffer<u8, NoopAlloc> = unsafe { ScopedBuffer::from_raw(sentinel) };
        assert_eq!(buf.take(), sentinel);
        assert!(buf.is_null());
    }

    #[test]
    fn test_into_raw_relinquishes_ownership() {
        let sentinel = 0x5000 as *mut u8;
        let buf: ScopedBuffer<u8, NoopAlloc> = unsafe { ScopedBuffer::from_raw(sentinel) };
        assert_eq!(buf.into_raw(), sentinel);
    }
}
