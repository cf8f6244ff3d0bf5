//! Record structs exchanged between extraction, resolution and persistence.

mod draft;
mod task;

pub use draft::{PARENT_LOG_TYPE, RecordDraft};
pub use task::{TaskRecord, parse_tools};
