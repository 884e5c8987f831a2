//! Embedded evaluation results, one slice per column.
//!
//! Rows are aligned by position. `Table::load` zips the slices back into
//! records and rejects any inconsistency.

use super::RawColumns;

pub static REFERENCE: RawColumns<'static> = RawColumns {
    no: NO,
    activity: ACTIVITY,
    hazard: HAZARD,
    pre_frequency: PRE_FREQUENCY,
    pre_severity: PRE_SEVERITY,
    pre_risk: PRE_RISK,
    post_frequency_reference: POST_FREQUENCY_REFERENCE,
    post_severity_reference: POST_SEVERITY_REFERENCE,
    post_risk_reference: POST_RISK_REFERENCE,
    post_frequency_model: POST_FREQUENCY_MODEL,
    post_severity_model: POST_SEVERITY_MODEL,
    post_risk_model: POST_RISK_MODEL,
    risk_reduction_rate: RISK_REDUCTION_RATE,
    similarity: SIMILARITY,
    improved_vs_original: IMPROVED_VS_ORIGINAL,
};

const NO: &[u16] = &[
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13,
    14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
];

const ACTIVITY: &[&str] = &[
    "Shoring Installation",
    "Excavation",
    "Rebar Placement",
    "Shoring Installation",
    "Formwork Assembly",
    "Concrete Pouring",
    "Scaffolding Erection",
    "Excavation",
    "Steel Beam Lifting",
    "Welding Work",
    "Shoring Installation",
    "Electrical Wiring",
    "Rebar Placement",
    "Formwork Assembly",
    "Painting",
    "Scaffolding Erection",
    "Demolition",
    "Welding Work",
    "Shoring Installation",
    "Concrete Pouring",
    "Excavation",
    "Steel Beam Lifting",
    "Electrical Wiring",
    "Rebar Placement",
    "Formwork Assembly",
    "Scaffolding Erection",
];

const HAZARD: &[&str] = &[
    "Collapse of shoring during installation",
    "Fall into unprotected excavation edge",
    "Puncture injury from exposed rebar ends",
    "Worker struck by falling shoring member",
    "Fall from formwork platform",
    "Pump boom failure during pour",
    "Fall from height while erecting scaffold",
    "Cave-in of trench wall",
    "Suspended load drop during lifting",
    "Fire from welding spatter on combustibles",
    "Shoring overload from stacked materials",
    "Electric shock from live temporary panel",
    "Back strain from manual rebar handling",
    "Hand caught between form panels",
    "Inhalation of solvent vapours in enclosed area",
    "Scaffold collapse from missing ties",
    "Struck by debris from partial demolition",
    "Eye injury from arc flash",
    "Shore tilting on soft ground",
    "Formwork blowout under concrete pressure",
    "Contact with buried utility line",
    "Worker caught under swinging beam",
    "Arc burn while connecting feeder cables",
    "Trip over rebar bundles on deck",
    "Formwork panel blown over by wind",
    "Dropped tools from scaffold deck",
];

const PRE_FREQUENCY: &[u8] = &[
    2, 4, 5, 3, 3, 2, 4, 3, 3, 3, 2, 2, 4,
    3, 2, 2, 1, 2, 2, 3, 2, 3, 3, 4, 3, 4,
];

const PRE_SEVERITY: &[u8] = &[
    3, 2, 5, 3, 5, 5, 5, 5, 5, 4, 3, 5, 2,
    3, 2, 5, 2, 3, 4, 4, 5, 4, 4, 2, 4, 3,
];

const PRE_RISK: &[u8] = &[
    6, 8, 25, 9, 15, 10, 20, 15, 15, 12, 6, 10, 8,
    9, 4, 10, 2, 6, 8, 12, 10, 12, 12, 8, 12, 12,
];

const POST_FREQUENCY_REFERENCE: &[u8] = &[
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

const POST_SEVERITY_REFERENCE: &[u8] = &[
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

const POST_RISK_REFERENCE: &[u8] = &[
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

const POST_FREQUENCY_MODEL: &[u8] = &[
    2, 1, 2, 2, 2, 1, 2, 1, 1, 2, 1, 1, 2,
    1, 1, 1, 2, 1, 2, 1, 1, 2, 1, 1, 2, 1,
];

const POST_SEVERITY_MODEL: &[u8] = &[
    2, 3, 3, 3, 3, 2, 5, 3, 5, 2, 4, 5, 2,
    3, 1, 5, 2, 3, 3, 3, 5, 2, 4, 2, 3, 3,
];

const POST_RISK_MODEL: &[u8] = &[
    4, 3, 6, 6, 6, 2, 10, 3, 5, 4, 4, 5, 4,
    3, 1, 5, 4, 3, 6, 3, 5, 4, 4, 2, 6, 3,
];

const RISK_REDUCTION_RATE: &[f64] = &[
    33.33, 62.50, 76.00, 33.33, 60.00, 80.00, 50.00, 80.00, 66.67,
    66.67, 33.33, 50.00, 50.00, 66.67, 75.00, 50.00, -100.00, 50.00,
    25.00, 75.00, 50.00, 66.67, 66.67, 75.00, 50.00, 75.00,
];

const SIMILARITY: &[f64] = &[
    0.78, 0.71, 0.64, 0.69, 0.82, 0.58, 0.86, 0.77, 0.66,
    0.73, 0.55, 0.61, 0.49, 0.68, 0.81, 0.59, 0.34, 0.62,
    0.57, 0.74, 0.52, 0.79, 0.67, 0.70, 0.88, 0.63,
];

const IMPROVED_VS_ORIGINAL: &[bool] = &[
    true, true, true, true, true, true, true, true,
    true, true, true, true, true, true, true, true,
    false, true, true, true, true, true, true, true,
    true, true,
];
