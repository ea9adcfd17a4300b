//! Scoped Lookup - Ownership of a Localized-String Table Handle
//!
//! [`ScopedLookup`] owns one lookup table handle and resolves string keys
//! through it. A key the table cannot resolve comes back unchanged (the
//! identity fallback), so callers always have a displayable string even
//! with no table loaded at all.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use tracing::trace;

use crate::ffi::{LookupHandle, LookupService};

/// Exclusive owner of a lookup table handle serviced by `S`.
pub struct ScopedLookup<S: LookupService> {
    handle: LookupHandle,
    _service: PhantomData<S>,
}

impl<S: LookupService> ScopedLookup<S> {
    /// Create an empty wrapper holding no table.
    pub const fn new() -> Self {
        Self {
            handle: ptr::null_mut(),
            _service: PhantomData,
        }
    }

    /// Take ownership of `handle`.
    ///
    /// # Safety
    /// `handle` must be null or a live table handle owned by `S`, not owned
    /// by any other wrapper. It will be released through
    /// [`LookupService::destroy`] when this wrapper drops.
    pub unsafe fn from_raw(handle: LookupHandle) -> Self {
        Self {
            handle,
            _service: PhantomData,
        }
    }

    /// Release the currently held table (if any) and store `handle`.
    ///
    /// # Safety
    /// Same contract as [`from_raw`](Self::from_raw); `handle` must not be
    /// the handle this wrapper already holds.
    pub unsafe fn reset(&mut self, handle: LookupHandle) {
        self.release();
        self.handle = handle;
        trace!(?handle, "lookup table replaced");
    }

    /// Read-only view of the held handle. Ownership does not transfer.
    pub fn as_handle(&self) -> LookupHandle {
        self.handle
    }

    /// Returns `true` when no table is held.
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Resolve `key` through the table.
    ///
    /// Returns the table's string when the key resolves, and `key` itself
    /// otherwise (absent key, or no table loaded). A key that legitimately
    /// resolves to its own spelling is indistinguishable from a miss by
    /// return value alone; that ambiguity is part of the contract.
    pub fn resolve<'k>(&self, key: &'k str) -> Cow<'k, str> {
        match S::resolve(self.handle, key) {
            Some(text) => Cow::Owned(text),
            None => Cow::Borrowed(key),
        }
    }

    fn release(&mut self) {
        if !self.handle.is_null() {
            unsafe { S::destroy(self.handle) };
            self.handle = ptr::null_mut();
        }
    }
}

impl<S: LookupService> Drop for ScopedLookup<S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<S: LookupService> Default for ScopedLookup<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LookupService> fmt::Debug for ScopedLookup<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLookup")
            .field("handle", &self.handle)
            .finish()
    }
}
