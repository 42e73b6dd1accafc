/// Severity or category for user-visible notices.
///
/// This enum classifies notices by their intent, allowing the driver to
/// present them appropriately.
#[derive(Debug, Clone)]
pub enum NoticeKind {
    /// Neutral informational message that does not indicate success or failure.
    Info,
    /// Indicates a successful operation or positive outcome.
    Success,
    /// Indicates a non-critical issue that the user should be aware of, but
    /// does not prevent normal operation.
    Warning,
    /// Indicates an error or failure that may affect functionality.
    Error,
}

/// A notice payload intended for the user interface.
#[derive(Debug, Clone)]
pub struct Notice {
    /// The kind/severity of the notice, determining how it is presented.
    pub kind: NoticeKind,
    /// The text content to display to the user.
    pub message: String,
}
