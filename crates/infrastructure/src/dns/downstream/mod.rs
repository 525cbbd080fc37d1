//! Handlers that receive the queries the hairpin pipeline declines.

pub mod failure;
pub mod forward;

pub use failure::{send_error_response, FailureHandler};
pub use forward::ForwardingHandler;

use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};

/// Downstream selected at startup from configuration.
#[derive(Clone)]
pub enum Downstream {
    Forward(ForwardingHandler),
    Fail(FailureHandler),
}

#[async_trait::async_trait]
impl RequestHandler for Downstream {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: R,
    ) -> ResponseInfo {
        match self {
            Self::Forward(handler) => handler.handle_request(request, response_handle).await,
            Self::Fail(handler) => handler.handle_request(request, response_handle).await,
        }
    }
}
