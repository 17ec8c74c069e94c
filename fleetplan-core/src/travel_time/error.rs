use thiserror::Error;

/// Errors from [`crate::travel_time::TravelTimeProvider::get_travel_time_matrix`]
/// and [`crate::travel_time::TravelTimeProviderFactory::build`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// No coordinates were provided.
    #[error("at least one location is required")]
    EmptyInput,
    /// The routing service could not be reached.
    #[error("failed to reach routing service at {url}: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The routing service did not answer in time.
    #[error("routing request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The routing service answered with a non-success HTTP status.
    #[error("routing service at {url} returned HTTP {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The routing service rejected the request.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `InvalidQuery`.
        code: String,
        /// Service message.
        message: String,
    },
    /// The routing service answer could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The routing client could not be constructed.
    #[error("failed to set up routing client: {message}")]
    Setup {
        /// Construction error description.
        message: String,
    },
    /// An embedded routing engine was requested but none is linked.
    #[error("Embedded routing engine is not available in this build.")]
    EmbeddedUnavailable,
}
