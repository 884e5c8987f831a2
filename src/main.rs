use anyhow::Result;
use serde_json::json;

use riskeval::config::DashboardConfig;
use riskeval::data::DatasetManifest;
use riskeval::logging::{log, obj, v_num, v_str, Domain, Level};
use riskeval::report::HeadlineMetrics;
use riskeval::table;

fn main() -> Result<()> {
    let cfg = DashboardConfig::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[("bin", v_str("riskeval")), ("top_n", json!(cfg.top_n))]),
    );
    let table = table::shared()?;

    let manifest = DatasetManifest::from_table(table)?;
    log(
        Level::Info,
        Domain::Data,
        "manifest",
        obj(&[
            ("rows", json!(manifest.row_count)),
            ("activities", json!(manifest.distinct_activities)),
            ("hash_sha256", v_str(&manifest.hash_sha256)),
        ]),
    );

    let headline = HeadlineMetrics::compute(table, &cfg)?;
    log(
        Level::Info,
        Domain::Report,
        "headline",
        obj(&[
            ("mean_risk_reduction_rate", v_num(headline.mean_risk_reduction_rate)),
            ("mean_similarity", v_num(headline.mean_similarity)),
            ("improved_pct", v_num(headline.improved_pct)),
            ("t_accuracy_pct", v_num(headline.t_accuracy_pct)),
        ]),
    );

    println!("Records:                 {}", headline.records);
    println!("Mean risk reduction:     {:.2}%", headline.mean_risk_reduction_rate);
    println!("Mean similarity:         {:.2}", headline.mean_similarity);
    println!("Improved vs original:    {:.2}%", headline.improved_pct);
    println!("Exact T prediction rate: {:.2}%", headline.t_accuracy_pct);
    Ok(())
}
