//! Common types and constants shared across the harness.

/// Bit-field helpers for register words.
pub mod bits;
/// VDEV register layout and simulation constants.
pub mod constants;
/// Harness error type.
pub mod error;
