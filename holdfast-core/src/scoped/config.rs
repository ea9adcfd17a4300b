//! Scoped Config - Ownership of a Configuration Store Handle
//!
//! [`ScopedConfig`] owns one config store handle through an explicit
//! create/open/save/close lifecycle. The instance is either Empty (null
//! handle) or Open; every path that acquires a new handle closes the old
//! one first, and destruction is equivalent to [`ScopedConfig::close`].

use std::fmt;
use std::marker::PhantomData;
use std::os::raw::c_int;
use std::ptr;

use tracing::{debug, warn};

use crate::ffi::{status_result, ConfigHandle, ConfigService, OpenMode, StoreStatusError};

/// Exclusive owner of a configuration store handle serviced by `S`.
///
/// Failure never panics: `create` reports it as `false`, `open` and `save`
/// return the store's status code verbatim (see
/// [`try_open`](Self::try_open) / [`try_save`](Self::try_save) for the
/// typed view).
pub struct ScopedConfig<S: ConfigService> {
    handle: ConfigHandle,
    _service: PhantomData<S>,
}

impl<S: ConfigService> ScopedConfig<S> {
    /// Create an empty instance holding no store.
    pub const fn new() -> Self {
        Self {
            handle: ptr::null_mut(),
            _service: PhantomData,
        }
    }

    /// Create a new store at `path`, replacing any store currently held.
    ///
    /// Returns `true` when the service produced a valid handle. On failure
    /// the instance is left empty.
    pub fn create(&mut self, path: &str) -> bool {
        self.close();
        self.handle = S::create(path);
        if self.handle.is_null() {
            warn!(path, "config store creation failed");
            return false;
        }
        debug!(path, "config store created");
        true
    }

    /// Open the store at `path` with `mode`, replacing any store currently
    /// held. The service writes the produced handle into this instance and
    /// its status code is returned verbatim.
    pub fn open(&mut self, path: &str, mode: OpenMode) -> c_int {
        self.close();
        let status = S::open(&mut self.handle, path, mode);
        debug!(path, status, "config store opened");
        status
    }

    /// [`open`](Self::open) with the status mapped to a typed error.
    pub fn try_open(&mut self, path: &str, mode: OpenMode) -> Result<(), StoreStatusError> {
        status_result(self.open(path, mode))
    }

    /// Persist the store. Forwarded to the service with the current handle
    /// (null included); the status code is returned verbatim.
    pub fn save(&self) -> c_int {
        S::save(self.handle)
    }

    /// [`save`](Self::save) with the status mapped to a typed error.
    pub fn try_save(&self) -> Result<(), StoreStatusError> {
        status_result(self.save())
    }

    /// Release the held store and leave the instance empty.
    ///
    /// Idempotent: closing an already-empty instance performs no release
    /// call.
    pub fn close(&mut self) {
        if !self.handle.is_null() {
            unsafe { S::close(self.handle) };
            debug!("config store closed");
        }
        self.handle = ptr::null_mut();
    }

    /// Read-only view of the current handle, for APIs expecting the raw
    /// handle type. Ownership does not transfer.
    pub fn as_handle(&self) -> ConfigHandle {
        self.handle
    }

    /// Returns `true` while a store is held.
    pub fn is_open(&self) -> bool {
        !self.handle.is_null()
    }
}

impl<S: ConfigService> Drop for ScopedConfig<S> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<S: ConfigService> Default for ScopedConfig<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ConfigService> fmt::Debug for ScopedConfig<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedConfig")
            .field("handle", &self.handle)
            .finish()
    }
}
