//! EDNS0 OPT pseudo-record (RFC 6891) appended in wire format.
//!
//! The record is written after `hickory-proto` has emitted the rest of the
//! message so that the padding option (RFC 7830) can be sized against the
//! final message length, as RFC 8467 block padding requires.

use ferrous_doh_domain::{DnsQuery, DomainError, QueryFlags};

/// Queries are padded to a multiple of this many octets (RFC 8467 §4.1).
pub const PADDING_BLOCK_SIZE: usize = 128;

const OPT_TYPE: u16 = 41;
const OPTION_CODE_PADDING: u16 = 12;
const FLAG_DNSSEC_OK: u16 = 0x8000;

/// Root owner + TYPE + CLASS + TTL + RDLENGTH
const OPT_FIXED_LEN: usize = 11;
const OPTION_HEADER_LEN: usize = 4;
const HEADER_LEN: usize = 12;
const LEGACY_UDP_PAYLOAD: u16 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdnsShape {
    pub max_payload: u16,
    pub dnssec_ok: bool,
    pub padding: bool,
}

impl EdnsShape {
    /// Returns `None` when the query needs nothing beyond plain DNS.
    pub fn from_query(query: &DnsQuery) -> Option<Self> {
        if query.flags.is_empty() && query.max_size <= LEGACY_UDP_PAYLOAD {
            return None;
        }

        Some(Self {
            max_payload: query.max_size.max(LEGACY_UDP_PAYLOAD),
            dnssec_ok: query.flags.contains(QueryFlags::DNSSEC),
            padding: query.flags.contains(QueryFlags::BLOCK_LENGTH_PADDING),
        })
    }

    /// Appends the OPT record to a serialized message and bumps ARCOUNT.
    pub fn append_to(&self, buf: &mut Vec<u8>) -> Result<(), DomainError> {
        if buf.len() < HEADER_LEN {
            return Err(DomainError::Serialization(format!(
                "message too short for a DNS header: {} bytes",
                buf.len()
            )));
        }

        let arcount = u16::from_be_bytes([buf[10], buf[11]])
            .checked_add(1)
            .ok_or_else(|| DomainError::Serialization("additional section full".to_string()))?;
        buf[10..12].copy_from_slice(&arcount.to_be_bytes());

        let padding_len = if self.padding {
            let unpadded = buf.len() + OPT_FIXED_LEN + OPTION_HEADER_LEN;
            (PADDING_BLOCK_SIZE - unpadded % PADDING_BLOCK_SIZE) % PADDING_BLOCK_SIZE
        } else {
            0
        };
        let rdlen = if self.padding {
            OPTION_HEADER_LEN + padding_len
        } else {
            0
        };

        let flags = if self.dnssec_ok { FLAG_DNSSEC_OK } else { 0 };

        buf.reserve(OPT_FIXED_LEN + rdlen);
        buf.push(0x00);
        buf.extend_from_slice(&OPT_TYPE.to_be_bytes());
        buf.extend_from_slice(&self.max_payload.to_be_bytes());
        // extended RCODE, version 0
        buf.extend_from_slice(&[0x00, 0x00]);
        buf.extend_from_slice(&flags.to_be_bytes());
        buf.extend_from_slice(&(rdlen as u16).to_be_bytes());

        if self.padding {
            buf.extend_from_slice(&OPTION_CODE_PADDING.to_be_bytes());
            buf.extend_from_slice(&(padding_len as u16).to_be_bytes());
            buf.resize(buf.len() + padding_len, 0x00);
        }

        Ok(())
    }
}
