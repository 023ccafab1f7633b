//! Shared fixtures for the integration tests.
#![allow(dead_code)]

pub mod test_server {
    use devops_roster::app::build_default_service;
    use devops_roster::server::{HttpServer, ServerHandle};
    use std::net::{SocketAddr, TcpListener};
    use std::sync::Once;

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Seeded roster service on a random local port, stopped on drop.
    pub struct RosterTestServer {
        handle: Option<ServerHandle>,
        addr: SocketAddr,
    }

    impl RosterTestServer {
        pub fn start() -> Self {
            setup_may_runtime();
            let service = build_default_service().unwrap();

            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let handle = HttpServer(service).start(addr).unwrap();
            handle.wait_ready().unwrap();

            Self {
                handle: Some(handle),
                addr,
            }
        }

        pub fn addr(&self) -> SocketAddr {
            self.addr
        }
    }

    impl Drop for RosterTestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod http {
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Write a raw HTTP/1.1 request and read until the peer goes quiet.
    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream
            .set_read_timeout(Some(Duration::from_millis(200)))
            .unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 1024];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => buf.extend_from_slice(&tmp[..n]),
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {e:?}"),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// `POST` with a body and the matching `Content-Length`.
    pub fn post(addr: &SocketAddr, path: &str, body: &str) -> String {
        send_request(
            addr,
            &format!(
                "POST {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
                body.len()
            ),
        )
    }

    pub fn get(addr: &SocketAddr, path: &str) -> String {
        send_request(addr, &format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n"))
    }

    /// Split a raw response into status, content type and body.
    pub fn parse_response_parts(resp: &str) -> (u16, String, String) {
        let mut parts = resp.splitn(2, "\r\n\r\n");
        let headers = parts.next().unwrap_or("");
        let body = parts.next().unwrap_or("").to_string();
        let mut status = 0;
        let mut content_type = String::new();
        for line in headers.lines() {
            if line.starts_with("HTTP/1.1") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap();
            } else if let Some((name, val)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-type") {
                    content_type = val.trim().to_string();
                }
            }
        }
        (status, content_type, body)
    }

    /// Status and JSON body; a non-JSON body parses as `Null`.
    pub fn parse_response(resp: &str) -> (u16, serde_json::Value) {
        let (status, _, body) = parse_response_parts(resp);
        (status, serde_json::from_str(&body).unwrap_or_default())
    }
}
