#![allow(dead_code, unused_imports)]
pub mod dns_messages;
pub mod mock_http;

pub use dns_messages::{answer, answer_a, opt_record};
pub use mock_http::{
    ConnectionRefused, FailingHttpClient, MockHttpClient, MockReply, StalledHttpClient,
    DNS_MESSAGE,
};
