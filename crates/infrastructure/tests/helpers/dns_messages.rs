#![allow(dead_code)]
use ferrous_doh_infrastructure::dns::codec::serialize_message;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::Ipv4Addr;

/// Build a response echoing the question of `raw_query`.
pub fn answer(raw_query: &[u8], id: u16, rcode: ResponseCode, addrs: &[Ipv4Addr]) -> Vec<u8> {
    let query = Message::from_vec(raw_query).unwrap();

    let mut response = Message::new(id, MessageType::Response, OpCode::Query);
    response.set_recursion_desired(true);
    response.set_recursion_available(true);
    response.set_response_code(rcode);

    let question = query.queries()[0].clone();
    for addr in addrs {
        response.add_answer(Record::from_rdata(
            question.name().clone(),
            300,
            RData::A(A(*addr)),
        ));
    }
    response.add_query(question);

    serialize_message(&response).unwrap()
}

pub fn answer_a(raw_query: &[u8], addrs: &[Ipv4Addr]) -> Vec<u8> {
    let id = u16::from_be_bytes([raw_query[0], raw_query[1]]);
    answer(raw_query, id, ResponseCode::NoError, addrs)
}

/// EDNS0 OPT record of a query with a single question and no other records.
#[derive(Debug)]
pub struct OptRecord {
    pub udp_payload: u16,
    pub flags: u16,
    /// (option code, option length)
    pub options: Vec<(u16, u16)>,
}

pub fn opt_record(raw_query: &[u8]) -> Option<OptRecord> {
    let arcount = u16::from_be_bytes([raw_query[10], raw_query[11]]);
    if arcount != 1 {
        return None;
    }

    let mut pos = 12;
    while raw_query[pos] != 0 {
        pos += 1 + raw_query[pos] as usize;
    }
    // root label + QTYPE + QCLASS
    pos += 1 + 4;

    let read_u16 = |at: usize| u16::from_be_bytes([raw_query[at], raw_query[at + 1]]);
    if raw_query[pos] != 0 || read_u16(pos + 1) != 41 {
        return None;
    }

    let udp_payload = read_u16(pos + 3);
    let flags = read_u16(pos + 7);
    let rdlen = read_u16(pos + 9) as usize;

    let mut options = Vec::new();
    let mut opt = pos + 11;
    let end = opt + rdlen;
    while opt + 4 <= end {
        let code = read_u16(opt);
        let len = read_u16(opt + 2);
        options.push((code, len));
        opt += 4 + len as usize;
    }

    Some(OptRecord {
        udp_payload,
        flags,
        options,
    })
}
