//! Static content of the system overview tab.

use serde::Serialize;

pub const TITLE: &str = "LLM-based risk assessment auto-generation and accident prediction";

pub const CAPABILITIES: &[&str] = &[
    "Work description input produces hazards and risk grades through generative AI",
    "Existing site risk assessments are split by process and their hazards learned",
    "After training, the model derives the expected hazards of each process on its own",
    "Risk-based accident likelihood and image analysis drive accident prediction",
];

pub const PROCESS_STEPS: &[&str] = &[
    "Work description input",
    "AI risk analysis",
    "Hazard identification",
    "Risk grade calculation",
    "Automatic improvement measures",
    "Safety measure application",
];

pub const CURRENT_FEATURES: &[&str] = &[
    "Risk assessment samples from three Saudi projects and one Egypt project",
    "Risk assessment learning process",
    "LLM-based refinement of risk level measurement",
    "Generative AI risk assessment system",
    "Automatic risk level generation platform",
];

pub const PLANNED_FEATURES: &[&str] = &[
    "Integration of generated risk data with construction EHS and external sources",
    "Image analysis of site CCTV and inspection photos",
    "Integrated AI accident prediction program for construction sites",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub title: &'static str,
    pub capabilities: &'static [&'static str],
    pub process_steps: &'static [&'static str],
    pub current_features: &'static [&'static str],
    pub planned_features: &'static [&'static str],
}

pub fn overview() -> Overview {
    Overview {
        title: TITLE,
        capabilities: CAPABILITIES,
        process_steps: PROCESS_STEPS,
        current_features: CURRENT_FEATURES,
        planned_features: PLANNED_FEATURES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_runs_from_input_to_measures() {
        let o = overview();
        assert_eq!(o.process_steps.len(), 6);
        assert_eq!(o.process_steps[0], "Work description input");
        assert_eq!(o.process_steps[5], "Safety measure application");
        assert_eq!(o.current_features.len(), 5);
        assert_eq!(o.planned_features.len(), 3);
    }
}
