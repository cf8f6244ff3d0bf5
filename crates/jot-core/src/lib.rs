//! # jot-core
//!
//! Core types shared across all jot crates:
//! - Task and draft record structs for the remote database
//! - Status and category enums with their database option names
//! - The canonical topic table used by parent resolution
//! - Strict parsing and validation of extractor output
//! - The `RecordStore` and `Extractor` seams implemented by the remote clients
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod extraction;
pub mod extractor;
pub mod ids;
pub mod store;
pub mod topics;
