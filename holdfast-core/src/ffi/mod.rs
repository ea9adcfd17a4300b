//! External Call Contracts - Allocator, Config Store and Lookup Table
//!
//! This module defines the fixed call contract between the ownership wrappers
//! and the three external services they manage handles for:
//! - Allocator: raw buffer allocation, released with a single free call
//! - Config store: create/open/save/close lifecycle over an opaque handle
//! - Lookup table: localized-string resolution over an opaque handle
//!
//! The services themselves are black boxes. Each contract is a trait with
//! associated functions so the wrappers stay exactly one pointer wide and the
//! contract can be satisfied either by the native bindings (behind the
//! `native-store` feature) or by test doubles.

use std::os::raw::{c_int, c_void};

use thiserror::Error;

#[cfg(feature = "native-store")]
use std::ffi::CString;
#[cfg(feature = "native-store")]
use std::os::raw::c_char;

/// Opaque configuration store instance owned by the external service.
#[repr(C)]
pub struct ConfigStore {
    _opaque: [u8; 0],
}

/// Opaque lookup table instance owned by the external service.
#[repr(C)]
pub struct LookupTable {
    _opaque: [u8; 0],
}

/// Handle to a configuration store. Null means "no store".
pub type ConfigHandle = *mut ConfigStore;

/// Handle to a lookup table. Null means "no table".
pub type LookupHandle = *mut LookupTable;

/// How the config store should treat a missing file on open.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Fail with [`CONFIG_FILE_NOT_FOUND`] if the file does not exist.
    Existing = 0,
    /// Create an empty store if the file does not exist.
    Always = 1,
}

/// Status code: operation succeeded.
pub const CONFIG_SUCCESS: c_int = 0;
/// Status code: the requested file does not exist.
pub const CONFIG_FILE_NOT_FOUND: c_int = -1;
/// Status code: any other store failure.
pub const CONFIG_ERROR: c_int = -2;

/// Typed view of a config store status code.
///
/// The store reports failure through `c_int` status codes which
/// [`ScopedConfig`](crate::ScopedConfig) propagates verbatim; this error maps
/// them for callers who want `?`-style handling instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreStatusError {
    #[error("configuration file not found")]
    FileNotFound,
    #[error("configuration store failed (status {0})")]
    Failed(c_int),
}

/// Map a store status code to a `Result`.
pub fn status_result(status: c_int) -> Result<(), StoreStatusError> {
    match status {
        CONFIG_SUCCESS => Ok(()),
        CONFIG_FILE_NOT_FOUND => Err(StoreStatusError::FileNotFound),
        other => Err(StoreStatusError::Failed(other)),
    }
}

/// Call contract required from the external allocator.
pub trait BufferAllocator {
    /// Release a buffer previously handed out by this allocator.
    ///
    /// # Safety
    /// `ptr` must be a pointer this allocator owns, released at most once.
    /// The wrappers never call this with null.
    unsafe fn free(ptr: *mut c_void);
}

/// Call contract required from the external configuration store.
pub trait ConfigService {
    /// Create a new store backed by `path`. Returns null on failure.
    fn create(path: &str) -> ConfigHandle;

    /// Open `path` with `mode`, writing the produced handle into `slot`.
    ///
    /// Returns the store's status code verbatim. On failure the service must
    /// leave `slot` null.
    fn open(slot: &mut ConfigHandle, path: &str, mode: OpenMode) -> c_int;

    /// Persist the store behind `handle`.
    ///
    /// Must accept a null handle and report failure through the status code.
    fn save(handle: ConfigHandle) -> c_int;

    /// Release the store behind `handle`.
    ///
    /// # Safety
    /// `handle` must have been produced by `create` or `open` and not yet
    /// closed. The wrappers never call this with null.
    unsafe fn close(handle: ConfigHandle);
}

/// Call contract required from the external lookup table.
pub trait LookupService {
    /// Release the table behind `handle`.
    ///
    /// # Safety
    /// `handle` must be a live table handle, destroyed at most once. The
    /// wrappers never call this with null.
    unsafe fn destroy(handle: LookupHandle);

    /// Resolve `key` through the table behind `handle`.
    ///
    /// Must accept a null handle and return `None`; `None` is also the
    /// answer for an absent key.
    fn resolve(handle: LookupHandle, key: &str) -> Option<String>;
}

// Native service library bindings.
//
// These symbols come from the platform's service library and are only
// declared when the `native-store` feature links it in; everything above
// stays usable without it.
#[cfg(feature = "native-store")]
#[link(name = "holdfast_native")]
extern "C" {
    fn hf_bfree(ptr: *mut c_void);

    fn hf_config_create(path: *const c_char) -> ConfigHandle;
    fn hf_config_open(slot: *mut ConfigHandle, path: *const c_char, mode: OpenMode) -> c_int;
    fn hf_config_save(handle: ConfigHandle) -> c_int;
    fn hf_config_close(handle: ConfigHandle);

    fn hf_lookup_destroy(handle: LookupHandle);
    fn hf_lookup_getstr(handle: LookupHandle, key: *const c_char, out: *mut *const c_char)
        -> bool;
}

/// The native allocator.
#[cfg(feature = "native-store")]
pub struct NativeAlloc;

#[cfg(feature = "native-store")]
impl BufferAllocator for NativeAlloc {
    unsafe fn free(ptr: *mut c_void) {
        hf_bfree(ptr);
    }
}

/// The native configuration store.
#[cfg(feature = "native-store")]
pub struct NativeConfig;

#[cfg(feature = "native-store")]
impl ConfigService for NativeConfig {
    fn create(path: &str) -> ConfigHandle {
        match CString::new(path) {
            Ok(c_path) => unsafe { hf_config_create(c_path.as_ptr()) },
            Err(_) => std::ptr::null_mut(),
        }
    }

    fn open(slot: &mut ConfigHandle, path: &str, mode: OpenMode) -> c_int {
        match CString::new(path) {
            Ok(c_path) => unsafe {
                hf_config_open(slot as *mut ConfigHandle, c_path.as_ptr(), mode)
            },
            Err(_) => CONFIG_ERROR,
        }
    }

    fn save(handle: ConfigHandle) -> c_int {
        unsafe { hf_config_save(handle) }
    }

    unsafe fn close(handle: ConfigHandle) {
        hf_config_close(handle);
    }
}

/// The native lookup table.
#[cfg(feature = "native-store")]
pub struct NativeLookup;

#[cfg(feature = "native-store")]
impl LookupService for NativeLookup {
    unsafe fn destroy(handle: LookupHandle) {
        hf_lookup_destroy(handle);
    }

    fn resolve(handle: LookupHandle, key: &str) -> Option<String> {
        let c_key = CString::new(key).ok()?;
        let mut out: *const c_char = std::ptr::null();
        let found = unsafe { hf_lookup_getstr(handle, c_key.as_ptr(), &mut out) };
        if !found || out.is_null() {
            return None;
        }
        // The table owns the resolved string; copy it out before the handle
        // can be released.
        let resolved = unsafe { std::ffi::CStr::from_ptr(out) };
        Some(resolved.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_constants() {
        assert_eq!(CONFIG_SUCCESS, 0);
        assert_eq!(CONFIG_FILE_NOT_FOUND, -1);
        assert_eq!(CONFIG_ERROR, -2);
    }

    #[test]
    fn test_status_result_mapping() {
        assert_eq!(status_result(CONFIG_SUCCESS), Ok(()));
        assert_eq!(
            status_result(CONFIG_FILE_NOT_FOUND),
            Err(StoreStatusError::FileNotFound)
        );
        assert_eq!(status_result(CONFIG_ERROR), Err(StoreStatusError::Failed(-2)));
        assert_eq!(status_result(7), Err(StoreStatusError::Failed(7)));
    }

    #[test]
    fn test_handles_are_pointer_sized() {
        // The wrappers rely on handles being plain pointers
        assert_eq!(
            std::mem::size_of::<ConfigHandle>(),
            std::mem::size_of::<usize>()
        );
        assert_eq!(
            std::mem::size_of::<LookupHandle>(),
            std::mem::size_of::<usize>()
        );
    }

    #[test]
    fn test_open_mode_values() {
        assert_eq!(OpenMode::Existing as c_int, 0);
        assert_eq!(OpenMode::Always as c_int, 1);
    }
}
