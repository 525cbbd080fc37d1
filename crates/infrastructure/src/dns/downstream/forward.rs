use super::failure::send_error_response;
use crate::dns::forwarding::{DnsForwarder, MessageBuilder};
use hickory_proto::op::{Query, ResponseCode};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Relays the original request to upstream resolvers and writes their
/// response back verbatim. SERVFAIL when every upstream fails.
#[derive(Clone)]
pub struct ForwardingHandler {
    forwarder: Arc<DnsForwarder>,
}

impl ForwardingHandler {
    pub fn new(forwarder: Arc<DnsForwarder>) -> Self {
        Self { forwarder }
    }
}

#[async_trait::async_trait]
impl RequestHandler for ForwardingHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let queries: Vec<Query> = request
            .queries()
            .iter()
            .map(|q| q.original().clone())
            .collect();

        let request_bytes =
            match MessageBuilder::build_relay(request.header(), &queries, request.edns()) {
                Ok(bytes) => bytes,
                Err(e) => {
                    error!(error = %e, "Failed to encode request for upstream");
                    return send_error_response(
                        request,
                        &mut response_handle,
                        ResponseCode::ServFail,
                    )
                    .await;
                }
            };

        let upstream = match self.forwarder.forward(&request_bytes, request.id()).await {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "All upstream servers failed");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        debug!(
            code = ?upstream.response_code(),
            answers = upstream.answers().len(),
            "Relaying upstream response"
        );

        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.build(
            *upstream.header(),
            upstream.answers().iter(),
            upstream.name_servers().iter(),
            &[],
            upstream.additionals().iter(),
        );

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send relayed response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}
