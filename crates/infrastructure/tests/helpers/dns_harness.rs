#![allow(dead_code)]

use hickory_proto::op::{Header, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use hickory_server::ServerFuture;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;

/// Serves `handler` on an ephemeral loopback UDP port for the lifetime of
/// the test runtime.
pub async fn spawn_server<H: RequestHandler>(handler: H) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    let mut server = ServerFuture::new(handler);
    server.register_socket(socket);
    tokio::spawn(async move {
        let _ = server.block_until_done().await;
    });

    addr
}

pub fn build_query(name: &str, record_type: RecordType) -> Message {
    let mut request = Message::new();
    request
        .set_id(fastid())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    request
}

pub async fn query_udp(server: SocketAddr, name: &str, record_type: RecordType) -> Message {
    send_query(server, build_query(name, record_type)).await
}

pub async fn send_query(server: SocketAddr, request: Message) -> Message {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket
        .send_to(&request.to_vec().unwrap(), server)
        .await
        .unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
        .await
        .expect("no response from server")
        .unwrap();

    let response = Message::from_vec(&buf[..len]).unwrap();
    assert_eq!(response.id(), request.id());
    response
}

fn fastid() -> u16 {
    static NEXT: AtomicUsize = AtomicUsize::new(1000);
    NEXT.fetch_add(1, Ordering::SeqCst) as u16
}

/// What a downstream handler saw of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedRequest {
    pub id: u16,
    pub recursion_desired: bool,
    pub name: String,
    pub record_type: RecordType,
    pub edns_max_payload: Option<u16>,
}

/// Downstream that records what it was handed and answers REFUSED so tests
/// can tell delegated replies apart.
#[derive(Clone, Default)]
pub struct RecordingDownstream {
    calls: Arc<AtomicUsize>,
    names: Arc<Mutex<Vec<(String, RecordType)>>>,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl RecordingDownstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<(String, RecordType)> {
        self.names.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RequestHandler for RecordingDownstream {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(query) = request.queries().first() {
            self.names
                .lock()
                .unwrap()
                .push((query.name().to_string(), query.query_type()));
            self.requests.lock().unwrap().push(ReceivedRequest {
                id: request.header().id(),
                recursion_desired: request.header().recursion_desired(),
                name: query.name().to_string(),
                record_type: query.query_type(),
                edns_max_payload: request.edns().map(|edns| edns.max_payload()),
            });
        }

        let mut header = Header::response_from_request(request.header());
        header.set_response_code(ResponseCode::Refused);
        let response = MessageResponseBuilder::from_message_request(request)
            .build(header, &[], &[], &[], &[]);

        response_handle
            .send_response(response)
            .await
            .unwrap_or_else(|_| ResponseInfo::from(*request.header()))
    }
}

/// Minimal upstream resolver on loopback UDP answering every question with
/// one fixed `A` record.
pub struct StubUpstream {
    pub addr: SocketAddr,
    pub calls: Arc<AtomicUsize>,
}

impl StubUpstream {
    pub async fn spawn(answer: Ipv4Addr) -> Self {
        Self::spawn_with(answer, false).await
    }

    /// Replies with a different id than the request carried.
    pub async fn spawn_mismatched(answer: Ipv4Addr) -> Self {
        Self::spawn_with(answer, true).await
    }

    async fn spawn_with(answer: Ipv4Addr, wrong_id: bool) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let Ok(request) = Message::from_vec(&buf[..len]) else {
                    continue;
                };

                let mut response = Message::new();
                let id = if wrong_id {
                    request.id().wrapping_add(1)
                } else {
                    request.id()
                };
                response
                    .set_id(id)
                    .set_message_type(MessageType::Response)
                    .set_op_code(OpCode::Query)
                    .set_recursion_desired(request.recursion_desired())
                    .set_recursion_available(true)
                    .set_response_code(ResponseCode::NoError);

                for query in request.queries() {
                    response.add_query(query.clone());
                    response.add_answer(Record::from_rdata(
                        query.name().clone(),
                        300,
                        RData::A(A(answer)),
                    ));
                }

                let _ = socket.send_to(&response.to_vec().unwrap(), peer).await;
            }
        });

        Self { addr, calls }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
