//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the overlay store contract consumed by resolution logic.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Upserts are atomic per date; a reader never observes cards from one
//!   write and a message from another.
//! - Read paths return semantic errors (`InvalidData`) for malformed
//!   persisted rows instead of masking them.

pub mod reading_repo;
