//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations with their persistence side effect.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod log_service;
