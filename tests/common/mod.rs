//! Shared utilities for integration tests.

use std::net::SocketAddr;

use json_server::config::{parse_route_tree, ServerConfig};
use json_server::http::MockServer;
use json_server::lifecycle::Shutdown;
use json_server::routing::RouteCompiler;
use tokio::net::TcpListener;

/// A mock server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger graceful shutdown and wait for the server task.
    pub async fn stop(self) {
        self.shutdown.trigger();
        self.handle.await.unwrap().unwrap();
    }
}

/// Compile `routes_json` and serve it on 127.0.0.1 with an OS-assigned port.
pub async fn start_server(routes_json: &str) -> TestServer {
    let tree = parse_route_tree(routes_json.as_bytes()).unwrap();
    let routes = RouteCompiler::new().compile(&tree).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = MockServer::new(ServerConfig::default(), routes);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer { addr, shutdown, handle }
}

/// Client that never reuses connections, so shutdown is not held open.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
