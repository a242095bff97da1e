//! Context management for replicate execution.
//!
//! A [`FrozenContext`] holds the key-value state visible to one replicate
//! of a pipeline. Keys are write-once: inserting an existing key fails,
//! and the only sanctioned replacement path is the explicit override
//! surface.

#[cfg(test)]
mod context_tests;
mod frozen;

pub use frozen::FrozenContext;
