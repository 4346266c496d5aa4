use thiserror::Error;

/// Boxed error produced by the HTTP layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Cannot build DNS query: {0}")]
    QueryBuild(String),

    #[error("Failed to serialize DNS message: {0}")]
    Serialization(String),

    #[error("Cannot construct HTTP request: {0}")]
    RequestConstruction(String),

    /// Error returned by the HTTP client, kept as-is.
    #[error(transparent)]
    RoundTrip(BoxError),

    #[error("Server misbehaving")]
    ServerMisbehaving,

    #[error("Server temporarily misbehaving (SERVFAIL)")]
    ServerTemporarilyMisbehaving,

    #[error("No such host (NXDOMAIN)")]
    NoName,

    #[error("No answer for the requested record type")]
    NoData,

    #[error("Invalid DNS response")]
    InvalidResponse,

    #[error("Exchange canceled")]
    Canceled,

    #[error("Exchange deadline exceeded")]
    DeadlineExceeded,
}

impl DomainError {
    /// True when the exchange ended because its context did.
    pub fn is_context_error(&self) -> bool {
        matches!(self, Self::Canceled | Self::DeadlineExceeded)
    }

    /// The HTTP client error, when this is a round-trip failure.
    pub fn round_trip_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::RoundTrip(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
