//! Scoped module - The three ownership wrappers
//!
//! Each wrapper owns exactly one external resource handle and releases it
//! exactly once, on drop or on explicit replacement.

pub mod buffer;
pub mod config;
pub mod lookup;

pub use buffer::ScopedBuffer;
pub use config::ScopedConfig;
pub use lookup::ScopedLookup;
