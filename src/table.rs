//! The evaluation table: typed records, column identifiers and the loader.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::data::{RawColumns, REFERENCE};
use crate::error::{DataIntegrityError, QueryError, QueryResult};
use crate::logging::{log, obj, v_str, Domain, Level, ProfileScope};
use serde_json::json;

const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
const RATE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    No,
    Activity,
    Hazard,
    PreFrequency,
    PreSeverity,
    PreRisk,
    PostFrequencyReference,
    PostSeverityReference,
    PostRiskReference,
    PostFrequencyModel,
    PostSeverityModel,
    PostRiskModel,
    RiskReductionRate,
    Similarity,
    ImprovedVsOriginal,
}

impl Column {
    pub const ALL: [Column; 15] = [
        Column::No,
        Column::Activity,
        Column::Hazard,
        Column::PreFrequency,
        Column::PreSeverity,
        Column::PreRisk,
        Column::PostFrequencyReference,
        Column::PostSeverityReference,
        Column::PostRiskReference,
        Column::PostFrequencyModel,
        Column::PostSeverityModel,
        Column::PostRiskModel,
        Column::RiskReductionRate,
        Column::Similarity,
        Column::ImprovedVsOriginal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::No => "no",
            Column::Activity => "activity",
            Column::Hazard => "hazard",
            Column::PreFrequency => "pre_frequency",
            Column::PreSeverity => "pre_severity",
            Column::PreRisk => "pre_risk",
            Column::PostFrequencyReference => "post_frequency_reference",
            Column::PostSeverityReference => "post_severity_reference",
            Column::PostRiskReference => "post_risk_reference",
            Column::PostFrequencyModel => "post_frequency_model",
            Column::PostSeverityModel => "post_severity_model",
            Column::PostRiskModel => "post_risk_model",
            Column::RiskReductionRate => "risk_reduction_rate",
            Column::Similarity => "similarity",
            Column::ImprovedVsOriginal => "improved_vs_original",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Column::Activity | Column::Hazard)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| QueryError::UnknownColumn(s.to_string()))
    }
}

/// One evaluated hazard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub no: u16,
    pub activity: String,
    pub hazard: String,
    pub pre_frequency: u8,
    pub pre_severity: u8,
    pub pre_risk: u8,
    pub post_frequency_reference: u8,
    pub post_severity_reference: u8,
    pub post_risk_reference: u8,
    pub post_frequency_model: u8,
    pub post_severity_model: u8,
    pub post_risk_model: u8,
    pub risk_reduction_rate: f64,
    pub similarity: f64,
    pub improved_vs_original: bool,
}

impl Record {
    /// Value of a numeric column. Booleans read as 0/1.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        let v = match column {
            Column::No => self.no as f64,
            Column::Activity | Column::Hazard => return None,
            Column::PreFrequency => self.pre_frequency as f64,
            Column::PreSeverity => self.pre_severity as f64,
            Column::PreRisk => self.pre_risk as f64,
            Column::PostFrequencyReference => self.post_frequency_reference as f64,
            Column::PostSeverityReference => self.post_severity_reference as f64,
            Column::PostRiskReference => self.post_risk_reference as f64,
            Column::PostFrequencyModel => self.post_frequency_model as f64,
            Column::PostSeverityModel => self.post_severity_model as f64,
            Column::PostRiskModel => self.post_risk_model as f64,
            Column::RiskReductionRate => self.risk_reduction_rate,
            Column::Similarity => self.similarity,
            Column::ImprovedVsOriginal => {
                if self.improved_vs_original {
                    1.0
                } else {
                    0.0
                }
            }
        };
        Some(v)
    }

    /// Display label of any column, used as a grouping and counting key.
    pub fn label(&self, column: Column) -> String {
        match column {
            Column::Activity => self.activity.clone(),
            Column::Hazard => self.hazard.clone(),
            Column::ImprovedVsOriginal => self.improved_vs_original.to_string(),
            Column::RiskReductionRate => format!("{:.2}", self.risk_reduction_rate),
            Column::Similarity => format!("{:.2}", self.similarity),
            other => match self.numeric(other) {
                Some(v) => format!("{}", v as i64),
                None => String::new(),
            },
        }
    }

    /// True when the model's post-improvement T value equals the reference one.
    pub fn exact_t_match(&self) -> bool {
        self.post_risk_model == self.post_risk_reference
    }
}

/// Immutable table of evaluation records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    records: Vec<Record>,
}

static SHARED: OnceLock<Result<Table, DataIntegrityError>> = OnceLock::new();

/// Process-wide table, loaded and validated exactly once.
///
/// An integrity error here means the embedded data is broken and the caller
/// should abort startup. The error is cached, so later calls see it too.
pub fn shared() -> Result<&'static Table, DataIntegrityError> {
    SHARED.get_or_init(load_logged).as_ref().map_err(Clone::clone)
}

fn load_logged() -> Result<Table, DataIntegrityError> {
    let _scope = ProfileScope::new("table_load");
    match Table::load() {
        Ok(table) => {
            log(
                Level::Info,
                Domain::Data,
                "table_loaded",
                obj(&[("rows", json!(table.len()))]),
            );
            Ok(table)
        }
        Err(err) => {
            log(
                Level::Fatal,
                Domain::Data,
                "integrity_error",
                obj(&[("msg", v_str(&err.to_string()))]),
            );
            Err(err)
        }
    }
}

impl Table {
    /// Build the table from the embedded reference data.
    pub fn load() -> Result<Self, DataIntegrityError> {
        Self::from_columns(&REFERENCE)
    }

    pub fn from_columns(raw: &RawColumns<'_>) -> Result<Self, DataIntegrityError> {
        let lengths = raw.lengths();
        let expected = lengths[0].1;
        for (column, found) in lengths {
            if found != expected {
                return Err(DataIntegrityError::ColumnLengthMismatch {
                    column,
                    expected,
                    found,
                });
            }
        }
        if expected == 0 {
            return Err(DataIntegrityError::Empty);
        }

        let mut records = Vec::with_capacity(expected);
        for row in 0..expected {
            let record = Record {
                no: raw.no[row],
                activity: raw.activity[row].to_string(),
                hazard: raw.hazard[row].to_string(),
                pre_frequency: raw.pre_frequency[row],
                pre_severity: raw.pre_severity[row],
                pre_risk: raw.pre_risk[row],
                post_frequency_reference: raw.post_frequency_reference[row],
                post_severity_reference: raw.post_severity_reference[row],
                post_risk_reference: raw.post_risk_reference[row],
                post_frequency_model: raw.post_frequency_model[row],
                post_severity_model: raw.post_severity_model[row],
                post_risk_model: raw.post_risk_model[row],
                risk_reduction_rate: raw.risk_reduction_rate[row],
                similarity: raw.similarity[row],
                improved_vs_original: raw.improved_vs_original[row],
            };
            validate_record(row, &record)?;
            records.push(record);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at 0-based `index`.
    pub fn lookup(&self, index: usize) -> QueryResult<&Record> {
        self.records.get(index).ok_or(QueryError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// All values of a numeric column, in row order.
    pub fn values(&self, column: Column) -> QueryResult<Vec<f64>> {
        if !column.is_numeric() {
            return Err(QueryError::NonNumericColumn(column));
        }
        Ok(self
            .records
            .iter()
            .filter_map(|r| r.numeric(column))
            .collect())
    }

    /// Sub-table of rows whose activity is in `activities`, order preserved.
    /// May be empty.
    pub fn filter_activities(&self, activities: &[&str]) -> Table {
        Table {
            records: self
                .records
                .iter()
                .filter(|r| activities.contains(&r.activity.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Distinct activities in first-appearance order.
    pub fn activities(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.activity.as_str()) {
                seen.push(&record.activity);
            }
        }
        seen
    }
}

fn validate_record(row: usize, r: &Record) -> Result<(), DataIntegrityError> {
    for (field, value) in [
        ("pre_frequency", r.pre_frequency),
        ("pre_severity", r.pre_severity),
        ("post_frequency_reference", r.post_frequency_reference),
        ("post_severity_reference", r.post_severity_reference),
        ("post_frequency_model", r.post_frequency_model),
        ("post_severity_model", r.post_severity_model),
    ] {
        if !RATING_RANGE.contains(&value) {
            return Err(DataIntegrityError::RatingOutOfRange { row, field, value });
        }
    }

    for (field, a, b, found) in [
        ("pre_risk", r.pre_frequency, r.pre_severity, r.pre_risk),
        (
            "post_risk_reference",
            r.post_frequency_reference,
            r.post_severity_reference,
            r.post_risk_reference,
        ),
        (
            "post_risk_model",
            r.post_frequency_model,
            r.post_severity_model,
            r.post_risk_model,
        ),
    ] {
        // Ratings are at most 5, so the product fits in u8.
        let expected = a * b;
        if expected != found {
            return Err(DataIntegrityError::RiskProductMismatch {
                row,
                field,
                expected,
                found,
            });
        }
    }

    let expected = reduction_rate(r.pre_risk, r.post_risk_model);
    if (expected - r.risk_reduction_rate).abs() > RATE_TOLERANCE {
        return Err(DataIntegrityError::ReductionRateMismatch {
            row,
            expected,
            found: r.risk_reduction_rate,
        });
    }

    if !(0.0..=1.0).contains(&r.similarity) {
        return Err(DataIntegrityError::SimilarityOutOfRange {
            row,
            value: r.similarity,
        });
    }

    if r.improved_vs_original != (r.post_risk_model < r.pre_risk) {
        return Err(DataIntegrityError::ImprovementFlagMismatch {
            row,
            found: r.improved_vs_original,
        });
    }
    Ok(())
}

/// `(pre - post) / pre * 100`, rounded to 2 decimals. Negative when the
/// model predicts a higher risk than before.
pub fn reduction_rate(pre_risk: u8, post_risk: u8) -> f64 {
    let pre = pre_risk as f64;
    let raw = (pre - post_risk as f64) / pre * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(column.as_str().parse::<Column>().unwrap(), column);
        }
        assert_eq!(
            "severity".parse::<Column>(),
            Err(QueryError::UnknownColumn("severity".into()))
        );
    }

    #[test]
    fn reduction_rate_keeps_regressions() {
        assert_eq!(reduction_rate(6, 4), 33.33);
        assert_eq!(reduction_rate(2, 4), -100.0);
        assert_eq!(reduction_rate(4, 1), 75.0);
    }

    #[test]
    fn labels_follow_column_kind() {
        let table = Table::load().unwrap();
        let r = table.lookup(16).unwrap();
        assert_eq!(r.label(Column::Activity), "Demolition");
        assert_eq!(r.label(Column::PreRisk), "2");
        assert_eq!(r.label(Column::RiskReductionRate), "-100.00");
        assert_eq!(r.label(Column::ImprovedVsOriginal), "false");
    }

    #[test]
    fn text_columns_have_no_numeric_values() {
        let table = Table::load().unwrap();
        assert_eq!(
            table.values(Column::Hazard),
            Err(QueryError::NonNumericColumn(Column::Hazard))
        );
        assert_eq!(table.values(Column::ImprovedVsOriginal).unwrap().iter().sum::<f64>(), 25.0);
    }

    #[test]
    fn filter_can_produce_empty_table() {
        let table = Table::load().unwrap();
        let sub = table.filter_activities(&["Tunnelling"]);
        assert!(sub.is_empty());
        let sub = table.filter_activities(&["Painting", "Demolition"]);
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.records()[0].no, 15);
    }

    #[test]
    fn shared_table_is_loaded_once() {
        let a = shared().unwrap();
        let b = shared().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn concurrent_first_use_sees_one_table() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| shared().unwrap() as *const Table as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(addrs[0], shared().unwrap() as *const Table as usize);
    }
}
