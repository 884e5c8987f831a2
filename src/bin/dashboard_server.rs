//! Dashboard JSON server.
//!
//! Run with: cargo run --bin dashboard_server

use anyhow::{Context, Result};
use serde_json::json;
use std::net::TcpListener;

use riskeval::config::DashboardConfig;
use riskeval::logging::{log, obj, v_str, Domain, Level};
use riskeval::{server, table};

fn main() -> Result<()> {
    let cfg = DashboardConfig::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("bin", v_str("dashboard_server")),
            ("read_timeout_ms", json!(cfg.read_timeout_ms)),
        ]),
    );
    let table = table::shared()?;
    let addr = cfg.addr();
    let listener = TcpListener::bind(&addr).with_context(|| format!("failed to bind {}", addr))?;

    log(
        Level::Info,
        Domain::Server,
        "listening",
        obj(&[("addr", v_str(&addr))]),
    );
    println!("Dashboard server running at http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  GET /api/health       - Health check");
    println!("  GET /api/summary      - Headline metrics");
    println!("  GET /api/overview     - System overview content");
    println!("  GET /api/snapshot     - Full dashboard snapshot");
    println!("  GET /api/records      - All records");
    println!("  GET /api/case/{{index}} - Case analysis for one record");

    server::serve(listener, table, cfg);
    Ok(())
}
