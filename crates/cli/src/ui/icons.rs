//! Status markers for terminal output
//!
//! Plain ASCII so output stays readable in logs and CI.

/// Status icon type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    /// Operation completed
    Success,
    /// Completed with something worth a look
    Warning,
    /// Failed check
    Error,
    /// Neutral note
    Info,
}

impl StatusIcon {
    /// Text marker for this status
    pub fn get(self) -> &'static str {
        match self {
            Self::Success => "[OK]",
            Self::Warning => "[!]",
            Self::Error => "[X]",
            Self::Info => "[i]",
        }
    }
}
