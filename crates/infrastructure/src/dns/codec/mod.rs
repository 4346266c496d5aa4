//! DNS wire codec built on `hickory-proto`.
//!
//! `hickory-proto` handles names, questions and message emit/parse. This
//! module adds the pieces a DoH client needs on top: EDNS0 shaping of the
//! outgoing query and validation of the response against the query that
//! was actually sent.

pub mod edns;
pub mod message_builder;
pub mod response_parser;

pub use edns::{EdnsShape, PADDING_BLOCK_SIZE};
pub use message_builder::{serialize_message, QueryMessage};
pub use response_parser::{validate_response, DnsResponse};
