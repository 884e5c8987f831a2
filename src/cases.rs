//! Case analysis: one record with its risk grades and improvement texts.

use serde::Serialize;

use crate::data::improvements::{self, ImprovementExample};
use crate::error::QueryResult;
use crate::table::{Record, Table};

/// Grade of a T value (frequency × severity, 1..=25).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskGrade {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskGrade {
    pub fn from_t(t: u8) -> Self {
        match t {
            0..=4 => Self::Low,
            5..=9 => Self::Medium,
            10..=15 => Self::High,
            _ => Self::Critical,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#4CAF50",
            Self::Medium => "#FFEB3B",
            Self::High => "#FF9800",
            Self::Critical => "#F44336",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseView {
    pub index: usize,
    pub record: Record,
    pub pre_grade: RiskGrade,
    pub model_grade: RiskGrade,
    pub reference_grade: RiskGrade,
    /// Row the example text was taken from; differs from `index` on fallback.
    pub example_source: Option<usize>,
    pub example: Option<ImprovementExample>,
}

impl CaseView {
    pub fn build(table: &Table, index: usize, fallback_index: usize) -> QueryResult<Self> {
        let record = table.lookup(index)?;
        let resolved = improvements::resolve(index, fallback_index);
        Ok(Self {
            index,
            pre_grade: RiskGrade::from_t(record.pre_risk),
            model_grade: RiskGrade::from_t(record.post_risk_model),
            reference_grade: RiskGrade::from_t(record.post_risk_reference),
            example_source: resolved.map(|(source, _)| source),
            example: resolved.map(|(_, example)| *example),
            record: record.clone(),
        })
    }

    pub fn used_fallback(&self) -> bool {
        self.example_source.is_some_and(|source| source != self.index)
    }
}
