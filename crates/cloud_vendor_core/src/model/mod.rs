//! Domain model for cloud vendor records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every vendor is identified by a stable, caller-supplied `VendorId`.
//! - Deletion is a hard delete; no tombstones are kept.

pub mod cloud_vendor;
