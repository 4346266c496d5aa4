use super::message_builder::QueryMessage;
use ferrous_doh_domain::DomainError;
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// A response that passed validation against the query it answers.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    question: Query,
    message: Message,
}

impl DnsResponse {
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn rcode(&self) -> ResponseCode {
        self.message.response_code()
    }

    /// IPv4 addresses answering the question, following CNAMEs.
    pub fn records_a(&self) -> Result<Vec<Ipv4Addr>, DomainError> {
        let addrs: Vec<Ipv4Addr> = self
            .valid_answers()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect();

        if addrs.is_empty() {
            return Err(DomainError::NoData);
        }
        Ok(addrs)
    }

    /// IPv6 addresses answering the question, following CNAMEs.
    pub fn records_aaaa(&self) -> Result<Vec<Ipv6Addr>, DomainError> {
        let addrs: Vec<Ipv6Addr> = self
            .valid_answers()
            .filter_map(|record| match record.data() {
                RData::AAAA(aaaa) => Some(aaaa.0),
                _ => None,
            })
            .collect();

        if addrs.is_empty() {
            return Err(DomainError::NoData);
        }
        Ok(addrs)
    }

    /// Last name of the CNAME chain starting at the queried name.
    pub fn records_cname(&self) -> Result<String, DomainError> {
        let chain = self.cname_chain();
        if chain.len() < 2 {
            return Err(DomainError::NoData);
        }
        Ok(chain[chain.len() - 1].to_utf8())
    }

    /// Answers owned by the queried name or by a name it aliases to.
    fn valid_answers(&self) -> impl Iterator<Item = &Record> {
        let chain = self.cname_chain();
        self.message.answers().iter().filter(move |record| {
            record.dns_class() == DNSClass::IN
                && chain.iter().any(|name| names_equal(name, record.name()))
        })
    }

    fn cname_chain(&self) -> Vec<Name> {
        let mut chain = vec![self.question.name().clone()];

        // A chain cannot be longer than the answer section.
        for _ in 0..self.message.answers().len() {
            let current = &chain[chain.len() - 1];
            let next = self.message.answers().iter().find_map(|record| {
                match record.data() {
                    RData::CNAME(cname) if names_equal(current, record.name()) => {
                        Some(cname.0.clone())
                    }
                    _ => None,
                }
            });

            match next {
                Some(target) if !chain.iter().any(|name| names_equal(name, &target)) => {
                    chain.push(target)
                }
                _ => break,
            }
        }

        chain
    }
}

/// Check that `response` answers `query` and map its RCODE.
///
/// Well-formed messages that do not correspond to the query (not a
/// response, different ID or opcode, different question) are
/// [`DomainError::InvalidResponse`].
pub fn validate_response(query: &QueryMessage, response: Message) -> Result<DnsResponse, DomainError> {
    let sent = query.message();

    if response.message_type() != MessageType::Response {
        debug!("DNS message is not a response");
        return Err(DomainError::InvalidResponse);
    }

    if response.id() != sent.id() {
        debug!(expected = sent.id(), got = response.id(), "DNS response ID mismatch");
        return Err(DomainError::InvalidResponse);
    }

    if response.op_code() != sent.op_code() {
        debug!(op_code = ?response.op_code(), "DNS response opcode mismatch");
        return Err(DomainError::InvalidResponse);
    }

    let question = match (sent.queries(), response.queries()) {
        ([expected], [got]) if questions_equal(expected, got) => expected.clone(),
        (_, got) => {
            debug!(questions = got.len(), "DNS response question mismatch");
            return Err(DomainError::InvalidResponse);
        }
    };

    match response.response_code() {
        ResponseCode::NoError => {}
        ResponseCode::NXDomain => return Err(DomainError::NoName),
        ResponseCode::ServFail => return Err(DomainError::ServerTemporarilyMisbehaving),
        rcode => {
            debug!(rcode = ?rcode, "DNS response error code");
            return Err(DomainError::ServerMisbehaving);
        }
    }

    debug!(
        answers = response.answers().len(),
        truncated = response.truncated(),
        "DNS response validated"
    );

    Ok(DnsResponse {
        question,
        message: response,
    })
}

fn questions_equal(expected: &Query, got: &Query) -> bool {
    names_equal(expected.name(), got.name())
        && expected.query_type() == got.query_type()
        && expected.query_class() == got.query_class()
}

fn names_equal(a: &Name, b: &Name) -> bool {
    a.to_ascii()
        .trim_end_matches('.')
        .eq_ignore_ascii_case(b.to_ascii().trim_end_matches('.'))
}
