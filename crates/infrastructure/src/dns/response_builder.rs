//! Synthetic positive answers for rewritten queries.
//!
//! One `A` record in the answer section, authoritative flag set, nothing in
//! the authority or additional sections and no EDNS echo.

use hickory_proto::op::{Header, Message, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use std::net::Ipv4Addr;

const DEFAULT_ANSWER_TTL: u32 = 60;

#[derive(Debug, Clone)]
pub struct SyntheticReply {
    pub header: Header,
    pub answer: Record,
}

impl SyntheticReply {
    /// Full message form, used where the reply is not written through a
    /// hickory `ResponseHandler`.
    pub fn into_message(self, query: Query) -> Message {
        let mut message = Message::new();
        message.set_header(self.header);
        message.add_query(query);
        message.add_answer(self.answer);
        message
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseBuilder {
    ttl: u32,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER_TTL)
    }
}

impl ResponseBuilder {
    pub fn new(ttl: u32) -> Self {
        Self { ttl }
    }

    pub fn build(&self, request_header: &Header, name: Name, address: Ipv4Addr) -> SyntheticReply {
        let mut header = Header::response_from_request(request_header);
        header
            .set_authoritative(true)
            .set_response_code(ResponseCode::NoError);

        let mut answer = Record::from_rdata(name, self.ttl, RData::A(A(address)));
        answer.set_dns_class(DNSClass::IN);

        SyntheticReply { header, answer }
    }
}
