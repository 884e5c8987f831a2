//! Integrity of the embedded reference dataset and of the loader's checks.

use riskeval::data::{RawColumns, REFERENCE};
use riskeval::error::{DataIntegrityError, QueryError};
use riskeval::table::{Column, Table};

#[test]
fn loads_twenty_six_rows() {
    let table = Table::load().unwrap();
    assert_eq!(table.len(), 26);
    assert_eq!(table.records()[0].no, 1);
    assert_eq!(table.records()[25].no, 26);
}

#[test]
fn risk_products_hold_for_every_row() {
    let table = Table::load().unwrap();
    for r in table.records() {
        assert_eq!(r.pre_risk, r.pre_frequency * r.pre_severity, "row {}", r.no);
        assert_eq!(
            r.post_risk_model,
            r.post_frequency_model * r.post_severity_model,
            "row {}",
            r.no
        );
        assert_eq!(r.post_risk_reference, 1, "row {}", r.no);
    }
}

#[test]
fn regression_row_is_not_clamped() {
    let table = Table::load().unwrap();
    let regressions: Vec<_> = table
        .records()
        .iter()
        .filter(|r| r.risk_reduction_rate < 0.0)
        .collect();
    assert_eq!(regressions.len(), 1);
    assert_eq!(regressions[0].risk_reduction_rate, -100.0);
    assert!(!regressions[0].improved_vs_original);
}

#[test]
fn lookup_bounds() {
    let table = Table::load().unwrap();
    assert_eq!(table.lookup(25).unwrap().activity, "Scaffolding Erection");
    assert_eq!(
        table.lookup(26).unwrap_err(),
        QueryError::IndexOutOfRange { index: 26, len: 26 }
    );
}

#[test]
fn rejects_mismatched_column_lengths() {
    let raw = RawColumns {
        similarity: &REFERENCE.similarity[..25],
        ..REFERENCE
    };
    assert_eq!(
        Table::from_columns(&raw).unwrap_err(),
        DataIntegrityError::ColumnLengthMismatch {
            column: Column::Similarity.as_str(),
            expected: 26,
            found: 25,
        }
    );
}

#[test]
fn rejects_empty_dataset() {
    let raw = RawColumns {
        no: &[],
        activity: &[],
        hazard: &[],
        pre_frequency: &[],
        pre_severity: &[],
        pre_risk: &[],
        post_frequency_reference: &[],
        post_severity_reference: &[],
        post_risk_reference: &[],
        post_frequency_model: &[],
        post_severity_model: &[],
        post_risk_model: &[],
        risk_reduction_rate: &[],
        similarity: &[],
        improved_vs_original: &[],
    };
    assert_eq!(Table::from_columns(&raw).unwrap_err(), DataIntegrityError::Empty);
}

/// One consistent row: pre 2×3 = 6, model 1×2 = 2, RRR 66.67.
fn valid_row() -> RawColumns<'static> {
    RawColumns {
        no: &[1],
        activity: &["Excavation"],
        hazard: &["Cave-in of trench wall"],
        pre_frequency: &[2],
        pre_severity: &[3],
        pre_risk: &[6],
        post_frequency_reference: &[1],
        post_severity_reference: &[1],
        post_risk_reference: &[1],
        post_frequency_model: &[1],
        post_severity_model: &[2],
        post_risk_model: &[2],
        risk_reduction_rate: &[66.67],
        similarity: &[0.5],
        improved_vs_original: &[true],
    }
}

#[test]
fn valid_row_loads() {
    assert_eq!(Table::from_columns(&valid_row()).unwrap().len(), 1);
}

#[test]
fn rejects_broken_product() {
    let raw = RawColumns {
        pre_risk: &[7],
        ..valid_row()
    };
    assert_eq!(
        Table::from_columns(&raw).unwrap_err(),
        DataIntegrityError::RiskProductMismatch {
            row: 0,
            field: "pre_risk",
            expected: 6,
            found: 7,
        }
    );

    let raw = RawColumns {
        post_risk_model: &[3],
        ..valid_row()
    };
    assert!(matches!(
        Table::from_columns(&raw).unwrap_err(),
        DataIntegrityError::RiskProductMismatch { field: "post_risk_model", .. }
    ));
}

#[test]
fn rejects_rating_out_of_range() {
    let raw = RawColumns {
        pre_frequency: &[6],
        pre_risk: &[18],
        ..valid_row()
    };
    assert!(matches!(
        Table::from_columns(&raw).unwrap_err(),
        DataIntegrityError::RatingOutOfRange { field: "pre_frequency", value: 6, .. }
    ));
}

#[test]
fn rejects_wrong_reduction_rate() {
    let raw = RawColumns {
        risk_reduction_rate: &[50.0],
        ..valid_row()
    };
    assert!(matches!(
        Table::from_columns(&raw).unwrap_err(),
        DataIntegrityError::ReductionRateMismatch { row: 0, .. }
    ));
}

#[test]
fn rejects_similarity_out_of_range() {
    let raw = RawColumns {
        similarity: &[1.2],
        ..valid_row()
    };
    assert!(matches!(
        Table::from_columns(&raw).unwrap_err(),
        DataIntegrityError::SimilarityOutOfRange { row: 0, .. }
    ));
}

#[test]
fn rejects_inconsistent_improvement_flag() {
    let raw = RawColumns {
        improved_vs_original: &[false],
        ..valid_row()
    };
    assert_eq!(
        Table::from_columns(&raw).unwrap_err(),
        DataIntegrityError::ImprovementFlagMismatch { row: 0, found: false }
    );
}
