//! Canned-response HTTP server for driving the binary without the internet.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

pub struct Route {
    prefix: &'static str,
    status: u16,
    body: &'static str,
    required_header: Option<(&'static str, &'static str)>,
}

impl Route {
    pub fn new(prefix: &'static str, status: u16, body: &'static str) -> Self {
        Self {
            prefix,
            status,
            body,
            required_header: None,
        }
    }

    /// Answer 401 unless the request carries this header value.
    pub fn requiring_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.required_header = Some((name, value));
        self
    }
}

pub struct FixtureServer {
    pub base_url: String,
}

impl FixtureServer {
    /// Serves `routes` on an ephemeral port for the rest of the test process.
    /// Unmatched paths get a 404.
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fixture server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                handle(stream, &routes);
            }
        });

        Self { base_url }
    }
}

fn handle(mut stream: TcpStream, routes: &[Route]) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {
                if let Some((name, value)) = line.split_once(':') {
                    headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
                }
            }
        }
    }

    let (status, body) = match routes.iter().find(|r| path.starts_with(r.prefix)) {
        None => (404, "not found"),
        Some(route) => match route.required_header {
            Some((name, value))
                if !headers
                    .iter()
                    .any(|(n, v)| n.as_str() == name.to_ascii_lowercase() && v == value) =>
            {
                (401, "unauthorized")
            }
            _ => (route.status, route.body),
        },
    };

    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Internal Server Error",
    }
}
