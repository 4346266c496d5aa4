use ferrous_doh_domain::DomainError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
struct ConnectFailed;

impl fmt::Display for ConnectFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "connect failed")
    }
}

impl Error for ConnectFailed {}

#[test]
fn test_round_trip_error_is_transparent() {
    let err = DomainError::RoundTrip(Box::new(ConnectFailed));

    assert_eq!(err.to_string(), "connect failed");
    let inner = err.round_trip_error().unwrap();
    assert!(inner.downcast_ref::<ConnectFailed>().is_some());
}

#[test]
fn test_context_errors() {
    assert!(DomainError::Canceled.is_context_error());
    assert!(DomainError::DeadlineExceeded.is_context_error());
    assert!(!DomainError::ServerMisbehaving.is_context_error());
    assert!(DomainError::InvalidResponse.round_trip_error().is_none());
}
