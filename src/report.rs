//! Dashboard snapshot: every value the rendering layer needs, in one
//! serialisable structure.

use serde::Serialize;
use serde_json::json;
use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::overview::{self, Overview};
use crate::data::DatasetManifest;
use crate::error::QueryResult;
use crate::logging::{log, obj, v_num, v_str, Domain, Level, ProfileScope};
use crate::query::{top_n, CorrelationMatrix, GroupRow, ValueCount};
use crate::stats::{Describe, HistogramBucket};
use crate::table::{Column, Record, Table};

pub const CORRELATION_COLUMNS: [Column; 4] = [
    Column::PreRisk,
    Column::PostRiskModel,
    Column::RiskReductionRate,
    Column::Similarity,
];

/// Disagreement between supplied and computed T accuracy worth a warning.
const T_ACCURACY_WARN_PCT: f64 = 0.01;

#[derive(Debug, Clone, Serialize)]
pub struct HeadlineMetrics {
    pub records: usize,
    pub mean_risk_reduction_rate: f64,
    pub mean_similarity: f64,
    pub improved_pct: f64,
    /// Displayed value, taken from configuration.
    pub t_accuracy_pct: f64,
    /// Computed from the table, for cross-checking only.
    pub exact_t_match_pct: f64,
}

impl HeadlineMetrics {
    pub fn compute(table: &Table, cfg: &DashboardConfig) -> QueryResult<Self> {
        let metrics = Self {
            records: table.len(),
            mean_risk_reduction_rate: table.mean(Column::RiskReductionRate)?,
            mean_similarity: table.mean(Column::Similarity)?,
            improved_pct: table.mean(Column::ImprovedVsOriginal)? * 100.0,
            t_accuracy_pct: cfg.t_accuracy_pct,
            exact_t_match_pct: table.exact_t_match_percentage()?,
        };
        if (metrics.exact_t_match_pct - metrics.t_accuracy_pct).abs() > T_ACCURACY_WARN_PCT {
            log(
                Level::Warn,
                Domain::Report,
                "t_accuracy_mismatch",
                obj(&[
                    ("msg", v_str("supplied T accuracy differs from table")),
                    ("supplied_pct", v_num(metrics.t_accuracy_pct)),
                    ("computed_pct", v_num(metrics.exact_t_match_pct)),
                ]),
            );
        }
        Ok(metrics)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSection {
    pub headline: HeadlineMetrics,
    pub risk_reduction_rate: Describe,
    pub similarity: Describe,
    pub risk_reduction_histogram: Vec<HistogramBucket>,
    pub similarity_histogram: Vec<HistogramBucket>,
    pub top_activities: Vec<GroupRow>,
    pub correlation: CorrelationMatrix,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplorationSection {
    pub activity_counts: Vec<ValueCount>,
    pub activity_averages: Vec<GroupRow>,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub manifest: DatasetManifest,
    pub overview: Overview,
    pub config: DashboardConfig,
    pub performance: PerformanceSection,
    pub exploration: ExplorationSection,
    pub example_indices: Vec<usize>,
}

impl DashboardSnapshot {
    pub fn build(table: &Table, cfg: &DashboardConfig) -> anyhow::Result<Self> {
        let _scope =
            ProfileScope::with_context("snapshot_build", &[("rows", json!(table.len()))]);

        let averages = table.group_average(
            Column::Activity,
            &[Column::RiskReductionRate, Column::Similarity],
        )?;
        let performance = PerformanceSection {
            headline: HeadlineMetrics::compute(table, cfg)?,
            risk_reduction_rate: table.describe(Column::RiskReductionRate)?,
            similarity: table.describe(Column::Similarity)?,
            risk_reduction_histogram: table
                .histogram(Column::RiskReductionRate, cfg.histogram_buckets)?,
            similarity_histogram: table.histogram(Column::Similarity, cfg.histogram_buckets)?,
            top_activities: top_n(&averages, Column::RiskReductionRate, cfg.top_n, true)?,
            correlation: table.correlation_matrix(&CORRELATION_COLUMNS)?,
        };
        let exploration = ExplorationSection {
            activity_counts: table.value_counts(Column::Activity)?,
            activity_averages: averages,
            records: table.records().to_vec(),
        };

        Ok(Self {
            manifest: DatasetManifest::from_table(table)?,
            overview: overview::overview(),
            config: cfg.clone(),
            performance,
            exploration,
            example_indices: crate::data::improvements::indices().collect(),
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json())?;
        log(
            Level::Info,
            Domain::Report,
            "snapshot_written",
            obj(&[("path", v_str(&path.display().to_string()))]),
        );
        Ok(())
    }
}
