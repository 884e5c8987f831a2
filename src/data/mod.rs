use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::table::{Column, Table};

pub mod improvements;
pub mod overview;
pub mod reference;

pub use reference::REFERENCE;

/// Column-major view of the evaluation results, as embedded in source.
#[derive(Debug, Clone, Copy)]
pub struct RawColumns<'a> {
    pub no: &'a [u16],
    pub activity: &'a [&'a str],
    pub hazard: &'a [&'a str],
    pub pre_frequency: &'a [u8],
    pub pre_severity: &'a [u8],
    pub pre_risk: &'a [u8],
    pub post_frequency_reference: &'a [u8],
    pub post_severity_reference: &'a [u8],
    pub post_risk_reference: &'a [u8],
    pub post_frequency_model: &'a [u8],
    pub post_severity_model: &'a [u8],
    pub post_risk_model: &'a [u8],
    pub risk_reduction_rate: &'a [f64],
    pub similarity: &'a [f64],
    pub improved_vs_original: &'a [bool],
}

impl RawColumns<'_> {
    /// (column name, length) for every column, in table order.
    pub fn lengths(&self) -> [(&'static str, usize); 15] {
        [
            (Column::No.as_str(), self.no.len()),
            (Column::Activity.as_str(), self.activity.len()),
            (Column::Hazard.as_str(), self.hazard.len()),
            (Column::PreFrequency.as_str(), self.pre_frequency.len()),
            (Column::PreSeverity.as_str(), self.pre_severity.len()),
            (Column::PreRisk.as_str(), self.pre_risk.len()),
            (
                Column::PostFrequencyReference.as_str(),
                self.post_frequency_reference.len(),
            ),
            (
                Column::PostSeverityReference.as_str(),
                self.post_severity_reference.len(),
            ),
            (Column::PostRiskReference.as_str(), self.post_risk_reference.len()),
            (Column::PostFrequencyModel.as_str(), self.post_frequency_model.len()),
            (Column::PostSeverityModel.as_str(), self.post_severity_model.len()),
            (Column::PostRiskModel.as_str(), self.post_risk_model.len()),
            (Column::RiskReductionRate.as_str(), self.risk_reduction_rate.len()),
            (Column::Similarity.as_str(), self.similarity.len()),
            (Column::ImprovedVsOriginal.as_str(), self.improved_vs_original.len()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub row_count: u64,
    pub columns: Vec<String>,
    pub distinct_activities: u64,
    pub hash_sha256: String,
    pub generated_at: String,
}

impl DatasetManifest {
    pub fn from_table(table: &Table) -> serde_json::Result<Self> {
        Ok(Self {
            row_count: table.len() as u64,
            columns: Column::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            distinct_activities: table.activities().len() as u64,
            hash_sha256: table_sha256(table)?,
            generated_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        })
    }
}

/// SHA-256 over the canonical JSON encoding of the records, one per line.
pub fn table_sha256(table: &Table) -> serde_json::Result<String> {
    let mut hasher = Sha256::new();
    for record in table.records() {
        hasher.update(serde_json::to_vec(record)?);
        hasher.update(b"\n");
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_columns_are_aligned() {
        let lengths = REFERENCE.lengths();
        assert!(lengths.iter().all(|(_, len)| *len == 26), "{:?}", lengths);
    }

    #[test]
    fn manifest_counts_reference_table() {
        let table = Table::load().unwrap();
        let manifest = DatasetManifest::from_table(&table).unwrap();
        assert_eq!(manifest.row_count, 26);
        assert_eq!(manifest.distinct_activities, 11);
        assert_eq!(manifest.columns.len(), 15);
        assert_eq!(manifest.hash_sha256.len(), 64);
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = Table::load().unwrap();
        let b = Table::load().unwrap();
        assert_eq!(table_sha256(&a).unwrap(), table_sha256(&b).unwrap());
    }

    #[test]
    fn fingerprint_covers_every_record() {
        let table = Table::load().unwrap();
        let sub = table.filter_activities(&["Painting", "Demolition"]);
        let full = table_sha256(&table).unwrap();
        assert_eq!(full.len(), 64);
        assert_ne!(full, table_sha256(&sub).unwrap());

        let mut hasher = Sha256::new();
        for record in sub.records() {
            hasher.update(serde_json::to_vec(record).unwrap());
            hasher.update(b"\n");
        }
        assert_eq!(table_sha256(&sub).unwrap(), hex::encode(hasher.finalize()));
    }
}
