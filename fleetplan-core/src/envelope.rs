//! Structured error document written in place of a solution.

/// Code carried by every error envelope.
pub const ERROR_CODE: u8 = 1;

/// `{"code": 1, "message": ...}` document describing a failed invocation.
///
/// # Examples
/// ```
/// use fleetplan_core::ErrorEnvelope;
///
/// let envelope = ErrorEnvelope::new("Wrong numerical value.");
/// assert_eq!(envelope.code, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorEnvelope {
    /// Always [`ERROR_CODE`].
    pub code: u8,
    /// Human-readable failure description.
    pub message: String,
}

impl ErrorEnvelope {
    /// Wrap `message` in an envelope.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: ERROR_CODE,
            message: message.into(),
        }
    }
}
