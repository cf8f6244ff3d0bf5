//! # jot-ledger
//!
//! Everything between an extractor reply and a persisted task log:
//!
//! - [`similarity`]: case-insensitive 0-100 string similarity
//! - [`resolver`]: three-tier parent-task resolution over a [`RecordStore`]
//! - [`writer`]: remote-first record creation plus the markdown mirror
//! - [`session`]: the bounded clarification loop tying it together
//! - [`console`]: the operator I/O seam
//!
//! [`memory`] and [`scripted`] provide an in-memory store and a replaying
//! extractor for driving a [`Session`] without network access.
//!
//! [`RecordStore`]: jot_core::store::RecordStore

pub mod console;
pub mod memory;
pub mod resolver;
pub mod scripted;
pub mod session;
pub mod similarity;
pub mod writer;

pub use console::Console;
pub use resolver::{ParentResolver, Resolution, ResolutionTier};
pub use session::{AbandonReason, LogOutcome, LoggedTask, Session, SessionError};
pub use writer::{MarkdownMirror, MirrorStatus, WriteReport, write_log};
