//! Filesystem utilities for nsprep.
//!
//! The generated file is only ever replaced whole, never written in place.

pub mod atomic;

pub use atomic::atomic_write;
