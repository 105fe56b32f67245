//! Bare HTTP/1.1 client: one request per connection, `Connection: close`.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Sends `method target` and returns (status, body).
pub async fn request(addr: SocketAddr, method: &str, target: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    let req = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        method, target, addr
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let text = String::from_utf8(raw).expect("utf-8 response");

    let (head, body) = text.split_once("\r\n\r\n").expect("header terminator");
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status code");
    (status, body.to_string())
}

/// GET `target` and parse the body as JSON.
pub async fn get_json(addr: SocketAddr, target: &str) -> (u16, serde_json::Value) {
    let (status, body) = request(addr, "GET", target).await;
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("body {:?} is not JSON: {}", body, e));
    (status, json)
}
