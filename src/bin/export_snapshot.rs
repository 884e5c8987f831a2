//! Print the dashboard snapshot as JSON, or write it to a file.
//!
//! Usage: export_snapshot [PATH]

use anyhow::Result;
use std::path::PathBuf;

use riskeval::config::DashboardConfig;
use riskeval::logging::{log, obj, v_str, Domain, Level};
use riskeval::report::DashboardSnapshot;
use riskeval::table;

fn main() -> Result<()> {
    let cfg = DashboardConfig::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[("bin", v_str("export_snapshot"))]),
    );
    let table = table::shared()?;
    let snapshot = DashboardSnapshot::build(table, &cfg)?;

    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => snapshot.write_to(&path)?,
        None => println!("{}", snapshot.to_json()),
    }
    Ok(())
}
