//! Improvement texts shown in case analysis.
//!
//! Only a handful of rows carry a written example. Every other row resolves
//! to the configured fallback index.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImprovementExample {
    pub reference: &'static str,
    pub model: &'static str,
}

const EXAMPLES: &[(usize, ImprovementExample)] = &[
    (
        0,
        ImprovementExample {
            reference: "Install shoring to the engineered layout, inspect each prop before loading \
                        and keep workers out of the collapse zone until bracing is complete.",
            model: "Follow the shoring design drawing, check props and bracing before use and \
                    restrict access beneath the shoring while it is being installed.",
        },
    ),
    (
        4,
        ImprovementExample {
            reference: "Provide guardrails and toe boards on all formwork platforms and require \
                        full-body harnesses tied off to certified anchors.",
            model: "Fit guardrails to the formwork working platform and have workers wear \
                    safety harnesses attached to anchor points.",
        },
    ),
    (
        6,
        ImprovementExample {
            reference: "Erect scaffolding only under a competent supervisor, using advance \
                        guardrails and continuous fall arrest during erection.",
            model: "Assign a scaffold supervisor, install guardrails progressively and make \
                    workers use harnesses while erecting.",
        },
    ),
    (
        16,
        ImprovementExample {
            reference: "Establish an exclusion zone around the demolition area, sequence removal \
                        top-down and use debris netting on exposed faces.",
            model: "Wear hard hats and high-visibility vests near demolition work and keep \
                    a spotter on site.",
        },
    ),
];

/// Indices that carry a written example, in ascending order.
pub fn indices() -> impl Iterator<Item = usize> {
    EXAMPLES.iter().map(|(index, _)| *index)
}

/// The example written for `index`, if any.
pub fn get(index: usize) -> Option<&'static ImprovementExample> {
    EXAMPLES
        .iter()
        .find(|(i, _)| *i == index)
        .map(|(_, example)| example)
}

/// Example for `index`, falling back to `fallback_index`.
///
/// Returns the index the text was actually taken from alongside it. `None`
/// only when neither index has an example.
pub fn resolve(
    index: usize,
    fallback_index: usize,
) -> Option<(usize, &'static ImprovementExample)> {
    get(index)
        .map(|example| (index, example))
        .or_else(|| get(fallback_index).map(|example| (fallback_index, example)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_hit_uses_own_text() {
        let (source, example) = resolve(4, 0).unwrap();
        assert_eq!(source, 4);
        assert!(example.reference.contains("guardrails"));
    }

    #[test]
    fn missing_index_falls_back() {
        let (source, _) = resolve(3, 0).unwrap();
        assert_eq!(source, 0);
    }

    #[test]
    fn fallback_without_text_yields_none() {
        assert!(resolve(3, 5).is_none());
    }

    #[test]
    fn indices_are_sorted() {
        let idx: Vec<usize> = indices().collect();
        let mut sorted = idx.clone();
        sorted.sort_unstable();
        assert_eq!(idx, sorted);
    }
}
