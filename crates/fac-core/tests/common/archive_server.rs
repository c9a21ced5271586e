//! Minimal HTTP/1.1 server for fetch tests: HEAD and GET over a fixed set
//! of paths.
//!
//! Serves a map of absolute paths to bodies. HEAD answers 200 with
//! Content-Length (no body) or 404; GET answers the body or 404. Every
//! response carries `Connection: close` so each request uses its own
//! connection and the request counter stays exact.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArchiveServerOptions {
    /// If true, every GET answers 500 (HEAD still reports files as present).
    pub fail_downloads: bool,
}

/// Handle to a running test server.
pub struct ArchiveServer {
    base_url: String,
    requests: Arc<AtomicUsize>,
}

impl ArchiveServer {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:12345`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Total number of requests (HEAD and GET) served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `files` (absolute path ->
/// body). The server runs until the process exits.
pub fn start(files: HashMap<String, Vec<u8>>) -> ArchiveServer {
    start_with_options(files, ArchiveServerOptions::default())
}

/// Like `start` but allows customizing server behavior.
pub fn start_with_options(
    files: HashMap<String, Vec<u8>>,
    opts: ArchiveServerOptions,
) -> ArchiveServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files = Arc::new(files);
    let requests = Arc::new(AtomicUsize::new(0));
    let count = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let count = Arc::clone(&count);
            thread::spawn(move || handle(stream, &files, opts, &count));
        }
    });
    ArchiveServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    files: &HashMap<String, Vec<u8>>,
    opts: ArchiveServerOptions,
    count: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = match parse_request_line(request) {
        Some(p) => p,
        None => return,
    };
    count.fetch_add(1, Ordering::SeqCst);

    let body = files.get(path);
    if method.eq_ignore_ascii_case("HEAD") {
        match body {
            Some(b) => {
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    b.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
            None => {
                let _ = stream.write_all(
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                );
            }
        }
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        match body {
            Some(b) if !opts.fail_downloads => {
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    b.len()
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.write_all(b);
            }
            Some(_) => {
                let _ = stream.write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                );
            }
            None => {
                let _ = stream.write_all(
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                );
            }
        }
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
}

/// Returns (method, path) from the request line.
fn parse_request_line(request: &str) -> Option<(&str, &str)> {
    let line = request.lines().next()?;
    let mut it = line.split_whitespace();
    let method = it.next()?;
    let path = it.next()?;
    Some((method, path))
}
