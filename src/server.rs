//! Minimal JSON-over-HTTP surface for the dashboard front end.
//!
//! Endpoints:
//!   GET /api/health       - liveness
//!   GET /api/summary      - headline metrics
//!   GET /api/overview     - system overview content
//!   GET /api/snapshot     - full dashboard snapshot
//!   GET /api/records      - all records
//!   GET /api/case/{index} - case analysis for one record

use serde_json::json;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use crate::cases::CaseView;
use crate::config::DashboardConfig;
use crate::data::overview;
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::report::{DashboardSnapshot, HeadlineMetrics};
use crate::table::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl Response {
    fn json(body: String) -> Self {
        Self {
            status: "200 OK",
            content_type: "application/json",
            body,
        }
    }

    fn error(status: &'static str, msg: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: json!({ "error": msg }).to_string(),
        }
    }

    fn to_http(&self) -> String {
        format!(
            "HTTP/1.1 {}\r\n\
             Content-Type: {}\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Content-Length: {}\r\n\r\n{}",
            self.status,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

/// Answer one request line, e.g. `GET /api/case/3 HTTP/1.1`.
pub fn route(table: &Table, cfg: &DashboardConfig, request_line: &str) -> Response {
    let mut parts = request_line.split_whitespace();
    let (method, path) = match (parts.next(), parts.next()) {
        (Some(method), Some(path)) => (method, path),
        _ => return Response::error("400 BAD REQUEST", "malformed request line"),
    };
    if method != "GET" {
        return Response::error("405 METHOD NOT ALLOWED", "only GET is supported");
    }

    match path {
        "/api/health" => Response::json(json!({ "status": "ok" }).to_string()),
        "/api/summary" => match HeadlineMetrics::compute(table, cfg) {
            Ok(headline) => Response::json(json!(headline).to_string()),
            Err(err) => Response::error("422 UNPROCESSABLE ENTITY", &err.to_string()),
        },
        "/api/snapshot" => match DashboardSnapshot::build(table, cfg) {
            Ok(snapshot) => Response::json(snapshot.to_json()),
            Err(err) => Response::error("422 UNPROCESSABLE ENTITY", &err.to_string()),
        },
        "/api/overview" => Response::json(json!(overview::overview()).to_string()),
        "/api/records" => Response::json(json!(table.records()).to_string()),
        _ => match path.strip_prefix("/api/case/") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(index) => match CaseView::build(table, index, cfg.example_fallback_index) {
                    Ok(case) => Response::json(json!(case).to_string()),
                    Err(err) => Response::error("404 NOT FOUND", &err.to_string()),
                },
                Err(_) => Response::error("400 BAD REQUEST", "case index must be a number"),
            },
            None => Response::error("404 NOT FOUND", "not found"),
        },
    }
}

/// Longest request line accepted, newline included.
pub const MAX_REQUEST_LINE: u64 = 8 * 1024;

#[derive(Debug, Clone, PartialEq)]
enum ReadOutcome {
    Line(String),
    Closed,
    TimedOut,
    TooLong,
}

/// Read one request line, never buffering more than `MAX_REQUEST_LINE` bytes.
fn read_request_line<R: Read>(source: R) -> ReadOutcome {
    let mut reader = BufReader::new(source).take(MAX_REQUEST_LINE);
    let mut buf = Vec::new();
    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => ReadOutcome::Closed,
        Ok(_) if buf.last() == Some(&b'\n') => {
            ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned())
        }
        Ok(n) if n as u64 >= MAX_REQUEST_LINE => ReadOutcome::TooLong,
        // Peer closed after a line without a newline.
        Ok(_) => ReadOutcome::Line(String::from_utf8_lossy(&buf).into_owned()),
        Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
            ReadOutcome::TimedOut
        }
        Err(_) => ReadOutcome::Closed,
    }
}

fn respond(stream: &mut TcpStream, response: &Response) {
    if let Err(err) = stream.write_all(response.to_http().as_bytes()) {
        log(
            Level::Debug,
            Domain::Server,
            "write_failed",
            obj(&[
                ("msg", v_str(&err.to_string())),
                ("status", v_str(response.status)),
            ]),
        );
    }
}

fn handle(mut stream: TcpStream, table: &Table, cfg: &DashboardConfig) {
    let timeout = Duration::from_millis(cfg.read_timeout_ms);
    if let Err(err) = stream.set_read_timeout(Some(timeout)) {
        log(
            Level::Debug,
            Domain::Server,
            "set_timeout_failed",
            obj(&[("msg", v_str(&err.to_string()))]),
        );
        return;
    }

    let response = match read_request_line(&stream) {
        ReadOutcome::Line(request) => {
            let response = route(table, cfg, request.trim_end());
            log(
                Level::Debug,
                Domain::Server,
                "request",
                obj(&[
                    ("line", v_str(request.trim_end())),
                    ("status", v_str(response.status)),
                ]),
            );
            response
        }
        ReadOutcome::TimedOut => {
            Response::error("408 REQUEST TIMEOUT", "request line not received")
        }
        ReadOutcome::TooLong => Response::error("400 BAD REQUEST", "request line too long"),
        ReadOutcome::Closed => return,
    };
    respond(&mut stream, &response);
}

/// Accept connections forever, one thread per connection, all sharing `table`.
pub fn serve(listener: TcpListener, table: &'static Table, cfg: DashboardConfig) {
    let cfg = Arc::new(cfg);
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                let cfg = Arc::clone(&cfg);
                std::thread::spawn(move || handle(stream, table, &cfg));
            }
            Err(err) => log(
                Level::Warn,
                Domain::Server,
                "accept_failed",
                obj(&[("msg", v_str(&err.to_string()))]),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> Response {
        let table = Table::load().unwrap();
        route(&table, &DashboardConfig::default(), &format!("GET {} HTTP/1.1", path))
    }

    #[test]
    fn health_and_summary() {
        assert_eq!(get("/api/health").status, "200 OK");
        let summary = get("/api/summary");
        let v: serde_json::Value = serde_json::from_str(&summary.body).unwrap();
        assert_eq!(v["records"], 26);
        let overview: serde_json::Value = serde_json::from_str(&get("/api/overview").body).unwrap();
        assert_eq!(overview["process_steps"][1], "AI risk analysis");
    }

    #[test]
    fn case_endpoint_bounds() {
        let ok = get("/api/case/25");
        assert_eq!(ok.status, "200 OK");
        let missing = get("/api/case/26");
        assert_eq!(missing.status, "404 NOT FOUND");
        assert!(missing.body.contains("out of range"));
        assert_eq!(get("/api/case/abc").status, "400 BAD REQUEST");
    }

    #[test]
    fn rejects_other_methods_and_paths() {
        let table = Table::load().unwrap();
        let cfg = DashboardConfig::default();
        assert_eq!(
            route(&table, &cfg, "POST /api/health HTTP/1.1").status,
            "405 METHOD NOT ALLOWED"
        );
        assert_eq!(route(&table, &cfg, "").status, "400 BAD REQUEST");
        assert_eq!(get("/nope").status, "404 NOT FOUND");
    }

    #[test]
    fn request_line_is_bounded() {
        let long = vec![b'a'; MAX_REQUEST_LINE as usize + 100];
        assert_eq!(read_request_line(&long[..]), ReadOutcome::TooLong);

        let ok = read_request_line(&b"GET /api/health HTTP/1.1\r\n\r\n"[..]);
        assert_eq!(ok, ReadOutcome::Line("GET /api/health HTTP/1.1\r\n".to_string()));
        assert_eq!(read_request_line(&b""[..]), ReadOutcome::Closed);
    }

    fn spawn_server(read_timeout_ms: u64) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let table = crate::table::shared().unwrap();
        let cfg = DashboardConfig {
            read_timeout_ms,
            ..DashboardConfig::default()
        };
        std::thread::spawn(move || serve(listener, table, cfg));
        addr
    }

    #[test]
    fn idle_connection_is_closed_with_timeout() {
        let addr = spawn_server(200);
        let mut idle = TcpStream::connect(addr).unwrap();
        idle.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        let mut reply = String::new();
        idle.read_to_string(&mut reply).unwrap();
        assert!(reply.starts_with("HTTP/1.1 408 REQUEST TIMEOUT\r\n"), "{}", reply);
    }

    #[test]
    fn served_request_over_socket() {
        let addr = spawn_server(2_000);
        let mut client = TcpStream::connect(addr).unwrap();
        client.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        client.write_all(b"GET /api/health HTTP/1.1\n").unwrap();
        let mut reply = String::new();
        client.read_to_string(&mut reply).unwrap();
        assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"), "{}", reply);
        assert!(reply.ends_with(r#"{"status":"ok"}"#));
    }

    #[test]
    fn http_framing_counts_body_bytes() {
        let raw = get("/api/health").to_http();
        assert!(raw.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(raw.contains("Content-Length: 15\r\n"));
    }
}
