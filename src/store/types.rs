//! Store types.

use strum::Display;

/// A stored record: any JSON value, kept exactly as submitted.
pub type Record = serde_json::Value;

/// Which log a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LogKind {
    /// Chemotherapy sessions.
    ChemoSession,
    /// Medicine reminders.
    MedicineReminder,
}

impl LogKind {
    /// Confirmation message returned after a successful append.
    pub fn added_message(self) -> &'static str {
        match self {
            LogKind::ChemoSession => "Chemo session added",
            LogKind::MedicineReminder => "Medicine reminder added",
        }
    }
}
