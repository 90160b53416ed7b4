use std::net::TcpListener;

use wiremock::MockServer;

/// Starts a mock marketplace, or returns `None` (and says why) when the
/// sandbox forbids binding a localhost socket.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_err() {
        eprintln!("[socket-bound-test] cannot bind a localhost socket; skipping wiremock test");
        return None;
    }
    Some(MockServer::start().await)
}
