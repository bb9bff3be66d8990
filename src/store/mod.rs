//! In-memory record storage.
//!
//! Two independent append-only logs (chemo sessions and medicine reminders)
//! hold client-supplied JSON values verbatim, in arrival order.

pub mod log;
pub mod types;

pub use log::{RecordLog, RecordStore};
pub use types::{LogKind, Record};
