//! DNS Message Builder
//!
//! Re-encodes a client request so it can be relayed to an upstream server
//! unchanged: same id, opcode, flags, question and EDNS options.

use hairpin_dns_domain::DomainError;
use hickory_proto::op::{Edns, Header, Message, MessageType, Query};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable, BinEncoder};

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build the upstream copy of a request and serialize to wire format bytes
    pub fn build_relay(
        header: &Header,
        queries: &[Query],
        edns: Option<&Edns>,
    ) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new();
        message
            .set_id(header.id())
            .set_message_type(MessageType::Query)
            .set_op_code(header.op_code())
            .set_recursion_desired(header.recursion_desired())
            .set_checking_disabled(header.checking_disabled());

        for query in queries {
            message.add_query(query.clone());
        }

        if let Some(edns) = edns {
            message.set_edns(edns.clone());
        }

        Self::serialize_message(&message)
    }

    pub fn parse_response(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_bytes(bytes).map_err(|e| {
            DomainError::ForwardingFailed(format!("Malformed upstream response: {}", e))
        })
    }

    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::ForwardingFailed(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
