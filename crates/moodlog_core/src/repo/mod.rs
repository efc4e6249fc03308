//! Persistence collaborator for the log store.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract the store depends on.
//! - Isolate SQLite query details from store and session orchestration.
//!
//! # Invariants
//! - Save-then-load reproduces an equivalent collection (round-trip
//!   fidelity is the only contract the store relies on).
//! - Read paths reject invalid persisted state instead of masking it.

pub mod log_repo;
