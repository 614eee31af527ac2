//! Ordered feature initialization with per-feature isolation.

use crate::error::SetupError;
use serde_json::json;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeatureOutcome {
    Ready,
    /// Required markup is absent; the page simply lacks this feature.
    Skipped { selector: &'static str },
    Failed(SetupError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureReport {
    pub name: &'static str,
    pub outcome: FeatureOutcome,
}

impl FeatureReport {
    pub fn from_result(name: &'static str, result: Result<(), SetupError>) -> Self {
        let outcome = match result {
            Ok(()) => FeatureOutcome::Ready,
            Err(SetupError::Missing { selector }) => FeatureOutcome::Skipped { selector },
            Err(error) => FeatureOutcome::Failed(error),
        };
        Self { name, outcome }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FeatureOutcome::Failed(_))
    }

    pub fn log_fields(&self) -> serde_json::Value {
        match &self.outcome {
            FeatureOutcome::Ready => json!({ "feature": self.name, "outcome": "ready" }),
            FeatureOutcome::Skipped { selector } => {
                json!({ "feature": self.name, "outcome": "skipped", "missing": selector })
            }
            FeatureOutcome::Failed(error) => {
                json!({ "feature": self.name, "outcome": "failed", "error": error.to_string() })
            }
        }
    }
}

pub type FeatureInit<'a, C> = Box<dyn FnOnce(&mut C) -> Result<(), SetupError> + 'a>;

/// Runs each initializer in order. A failing feature never stops the rest.
pub fn run_features<C>(ctx: &mut C, features: Vec<(&'static str, FeatureInit<'_, C>)>) -> Vec<FeatureReport> {
    features
        .into_iter()
        .map(|(name, init)| FeatureReport::from_result(name, init(&mut *ctx)))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetupSummary {
    pub ready: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub fn summarize(reports: &[FeatureReport]) -> SetupSummary {
    reports
        .iter()
        .fold(SetupSummary::default(), |mut summary, report| {
            match report.outcome {
                FeatureOutcome::Ready => summary.ready += 1,
                FeatureOutcome::Skipped { .. } => summary.skipped += 1,
                FeatureOutcome::Failed(_) => summary.failed += 1,
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_isolated_and_order_is_kept() {
        let mut ran: Vec<&'static str> = Vec::new();
        let features: Vec<(&'static str, FeatureInit<'_, Vec<&'static str>>)> = vec![
            (
                "loading",
                Box::new(|ran: &mut Vec<&'static str>| -> Result<(), SetupError> {
                    ran.push("loading");
                    Ok(())
                }),
            ),
            (
                "navigation",
                Box::new(|ran: &mut Vec<&'static str>| -> Result<(), SetupError> {
                    ran.push("navigation");
                    Err(SetupError::js("addEventListener", "TypeError"))
                }),
            ),
            (
                "typing",
                Box::new(|ran: &mut Vec<&'static str>| -> Result<(), SetupError> {
                    ran.push("typing");
                    Err(SetupError::missing(".typing-text"))
                }),
            ),
            (
                "contact",
                Box::new(|ran: &mut Vec<&'static str>| -> Result<(), SetupError> {
                    ran.push("contact");
                    Ok(())
                }),
            ),
        ];

        let reports = run_features(&mut ran, features);

        assert_eq!(ran, vec!["loading", "navigation", "typing", "contact"]);
        assert_eq!(
            reports.iter().map(|report| report.name).collect::<Vec<_>>(),
            vec!["loading", "navigation", "typing", "contact"]
        );
        assert_eq!(reports[0].outcome, FeatureOutcome::Ready);
        assert!(reports[1].is_failed());
        assert_eq!(
            reports[2].outcome,
            FeatureOutcome::Skipped {
                selector: ".typing-text"
            }
        );
        assert_eq!(reports[3].outcome, FeatureOutcome::Ready);
        assert_eq!(
            summarize(&reports),
            SetupSummary {
                ready: 2,
                skipped: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn log_fields_name_the_outcome() {
        let skipped = FeatureReport::from_result("menu", Err(SetupError::missing(".hamburger")));
        assert_eq!(skipped.log_fields()["outcome"], "skipped");
        assert_eq!(skipped.log_fields()["missing"], ".hamburger");

        let failed = FeatureReport::from_result("theme", Err(SetupError::js("matchMedia", "denied")));
        assert_eq!(failed.log_fields()["error"], "matchMedia: denied");
    }
}
