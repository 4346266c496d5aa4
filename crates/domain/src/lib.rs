//! Ferrous DoH Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, UpstreamConfig};
pub use dns_query::{
    DnsQuery, QueryFlags, QUERY_MAX_RESPONSE_SIZE_TCP, QUERY_MAX_RESPONSE_SIZE_UDP,
};
pub use dns_record::RecordType;
pub use errors::{BoxError, DomainError};
