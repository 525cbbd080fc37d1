use crate::dns::downstream::send_error_response;
use crate::dns::forwarding::RecordTypeMapper;
use crate::dns::response_builder::ResponseBuilder;
use hairpin_dns_application::use_cases::{HandleDnsQueryUseCase, QueryDecision};
use hairpin_dns_domain::DnsQuery;
use hickory_proto::op::{MessageType, OpCode, ResponseCode};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error};

/// Front of the chain: answers `A` queries for hairpinned names and passes
/// everything else to `next` untouched.
pub struct HairpinRequestHandler<N> {
    use_case: Arc<HandleDnsQueryUseCase>,
    responses: ResponseBuilder,
    next: Arc<N>,
}

impl<N> Clone for HairpinRequestHandler<N> {
    fn clone(&self) -> Self {
        Self {
            use_case: Arc::clone(&self.use_case),
            responses: self.responses,
            next: Arc::clone(&self.next),
        }
    }
}

impl<N: RequestHandler> HairpinRequestHandler<N> {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>, responses: ResponseBuilder, next: N) -> Self {
        Self {
            use_case,
            responses,
            next: Arc::new(next),
        }
    }
}

#[async_trait::async_trait]
impl<N: RequestHandler> RequestHandler for HairpinRequestHandler<N> {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        if request.message_type() != MessageType::Query || request.op_code() != OpCode::Query {
            return self.next.handle_request(request, response_handle).await;
        }

        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = request_info.query.original();
        let record_type = RecordTypeMapper::from_hickory(query.query_type());
        let dns_query = DnsQuery::new(query.name().to_utf8(), record_type);

        debug!(
            domain = %dns_query.domain,
            record_type = %record_type,
            client = %request.src().ip(),
            "DNS query received"
        );

        let outcome = match self.use_case.execute(&dns_query).await {
            QueryDecision::Answer(outcome) => outcome,
            QueryDecision::Delegate(reason) => {
                debug!(domain = %dns_query.domain, reason = ?reason, "Delegating query");
                return self.next.handle_request(request, response_handle).await;
            }
        };

        let reply = self
            .responses
            .build(request.header(), query.name().clone(), outcome.answer);

        debug!(
            domain = %dns_query.domain,
            answer = %outcome.answer,
            rewritten = outcome.is_rewritten(),
            "Sending response"
        );

        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.build(reply.header, std::iter::once(&reply.answer), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}
