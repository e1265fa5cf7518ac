//! Shared leaf types for the spindle crates.
//!
//! Everything here is host-agnostic: the error taxonomy of the named
//! synchronization layer, the rights carried by open handles, and the
//! value/instance types a script host hands across the boundary.

#![warn(missing_docs)]

pub mod error;
pub mod rights;
pub mod value;
