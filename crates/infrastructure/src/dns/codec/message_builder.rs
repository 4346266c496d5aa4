//! DNS Message Builder
//!
//! Constructs DNS query messages in wire format using `hickory-proto`,
//! with the EDNS0 shape derived from the query descriptor.

use super::edns::EdnsShape;
use ferrous_doh_domain::{DnsQuery, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType as HickoryRecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// A query message ready to be packed, plus what is needed to check the reply.
#[derive(Debug, Clone)]
pub struct QueryMessage {
    message: Message,
    edns: Option<EdnsShape>,
}

impl QueryMessage {
    /// Build the message for `query`.
    ///
    /// The question is a single IN-class entry with RD set. Names that cannot
    /// be represented (labels over 63 octets, names over 255 octets, empty
    /// labels) are rejected with [`DomainError::QueryBuild`].
    pub fn from_query(query: &DnsQuery) -> Result<Self, DomainError> {
        let fqdn = if query.domain.ends_with('.') {
            query.domain.to_string()
        } else {
            format!("{}.", query.domain)
        };

        let name = Name::from_str(&fqdn).map_err(|e| {
            DomainError::QueryBuild(format!("Invalid domain '{}': {}", query.domain, e))
        })?;

        let mut question = Query::new();
        question.set_name(name);
        question.set_query_type(HickoryRecordType::from(query.record_type.to_u16()));
        question.set_query_class(DNSClass::IN);

        let mut message = Message::new(query.id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(question);

        Ok(Self {
            message,
            edns: EdnsShape::from_query(query),
        })
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn id(&self) -> u16 {
        self.message.id()
    }

    /// Serialize to wire format.
    ///
    /// Fails with [`DomainError::Serialization`] when emitting fails or the
    /// result does not fit in a DNS message (65535 octets).
    pub fn pack(&self) -> Result<Vec<u8>, DomainError> {
        let mut buf = serialize_message(&self.message)?;

        if let Some(edns) = &self.edns {
            edns.append_to(&mut buf)?;
        }

        if buf.len() > usize::from(u16::MAX) {
            return Err(DomainError::Serialization(format!(
                "DNS message too large: {} bytes",
                buf.len()
            )));
        }

        Ok(buf)
    }
}

/// Serialize a Message to wire format bytes
pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message
        .emit(&mut encoder)
        .map_err(|e| DomainError::Serialization(format!("Failed to serialize DNS message: {}", e)))?;

    Ok(buf)
}
