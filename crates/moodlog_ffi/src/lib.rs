//! Mobile FFI surface for the mood journal core.

pub mod api;
