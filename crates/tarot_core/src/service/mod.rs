//! Core use-case services.
//!
//! # Responsibility
//! - Compose the deterministic generator with the overlay store into the
//!   two caller-facing operations.
//! - Keep CLI/HTTP layers decoupled from storage details.

pub mod reading_service;
