//! Holdfast Core - Scoped Ownership for Externally-Managed Handles
//!
//! This crate provides deterministic, move-only ownership wrappers around
//! three kinds of resources managed by external services: a raw
//! allocator-owned buffer, a configuration store, and a localized-string
//! lookup table. Each wrapper guarantees its handle is released exactly
//! once, on every exit path, without the caller remembering to release it.
//!
//! # Ownership Model:
//! - At most one wrapper instance owns a given handle at a time
//! - No copying; moving a wrapper transfers the handle with it
//! - A released handle is never touched again by the releasing instance
//! - Release functions are never invoked with null
//!
//! The allocator, store and table engines are black boxes reached through
//! the call contracts in [`ffi`]; the wrappers forward to them and
//! implement nothing of their own parsing or I/O. Wrapper instances hold
//! raw handles and are deliberately not `Send` or `Sync` - sharing one
//! across threads needs external synchronization.

pub mod ffi;
pub mod scoped;

pub use ffi::{BufferAllocator, ConfigHandle, ConfigService, LookupHandle, LookupService};
pub use ffi::{OpenMode, StoreStatusError};
pub use scoped::{ScopedBuffer, ScopedConfig, ScopedLookup};
