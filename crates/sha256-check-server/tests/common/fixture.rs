//! On-disk fixtures and a server started on an ephemeral port.

use sha2::{Digest, Sha256};
use sha256_check_core::{Checksummer, ErrorLog, HostProfile};
use std::fs::{self, File};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::net::TcpListener;

/// Starts the router for `profiles` in a background task. The server runs
/// until the test runtime shuts down.
pub async fn start(profiles: Vec<HostProfile>, log: Arc<dyn ErrorLog>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().unwrap();
    let app = sha256_check_server::router(profiles, Checksummer::new(log));
    tokio::spawn(sha256_check_server::serve(
        listener,
        app,
        std::future::pending(),
    ));
    addr
}

/// Writes `body` to `dir/name` (creating `dir`) with mtime `secs` after the epoch.
pub fn put(dir: &Path, name: &str, body: &[u8], secs: u64) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
    path
}

pub fn sha(body: &[u8]) -> String {
    hex::encode(Sha256::digest(body))
}
