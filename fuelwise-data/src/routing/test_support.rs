//! Test utilities for routing providers.
//!
//! [`CannedHttpServer`] answers exactly one HTTP request on a loopback port
//! with a fixed status and body, so [`HttpRouteProvider`](super::HttpRouteProvider)
//! can be exercised end to end without a MapQuest account.

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Single-shot HTTP server bound to `127.0.0.1`.
///
/// # Example
///
/// ```
/// use fuelwise_data::routing::test_support::CannedHttpServer;
///
/// let server = CannedHttpServer::respond(200, "{}")?;
/// assert!(server.url().starts_with("http://127.0.0.1:"));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct CannedHttpServer {
    url: String,
    handle: JoinHandle<io::Result<String>>,
}

impl CannedHttpServer {
    /// Serve one request with `status` and a JSON `body`.
    ///
    /// # Errors
    /// Returns an error if no loopback port can be bound.
    pub fn respond(status: u16, body: impl Into<String>) -> io::Result<Self> {
        let payload = body.into();
        Self::spawn(move |mut stream| {
            write!(
                stream,
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
                reason(status),
                payload.len()
            )?;
            stream.flush()
        })
    }

    /// Accept one request and stay silent for `delay` before hanging up.
    ///
    /// # Errors
    /// Returns an error if no loopback port can be bound.
    pub fn silent(delay: Duration) -> io::Result<Self> {
        Self::spawn(move |_stream| {
            thread::sleep(delay);
            Ok(())
        })
    }

    fn spawn<F>(reply: F) -> io::Result<Self>
    where
        F: FnOnce(TcpStream) -> io::Result<()> + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let url = format!("http://{}/directions/v2/route", listener.local_addr()?);
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept()?;
            let request_line = read_request(&stream)?;
            reply(stream)?;
            Ok(request_line)
        });
        Ok(Self { url, handle })
    }

    /// Endpoint URL to configure as the provider's base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for the request to be served and return its request line.
    ///
    /// Returns `None` if the server failed or never saw a request.
    #[must_use]
    pub fn request_line(self) -> Option<String> {
        self.handle.join().ok()?.ok()
    }
}

/// URL of a loopback port with nothing listening.
///
/// # Errors
/// Returns an error if no loopback port can be bound.
pub fn unused_local_url() -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/directions/v2/route"))
}

fn read_request(stream: &TcpStream) -> io::Result<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header)? == 0 || header == "\r\n" {
            break;
        }
    }
    Ok(request_line.trim_end().to_owned())
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        403 => "Forbidden",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
