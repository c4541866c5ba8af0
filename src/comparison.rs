//! Comparison of two audits of the same page.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::result::AuditResult;

/// Movement of one score between two audits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreChange {
    /// Score in the earlier audit.
    pub previous: u8,
    /// Score in the later audit.
    pub current: u8,
    /// `current - previous`.
    pub delta: i16,
    /// `(current - previous) / previous × 100`; `None` when `previous` is 0.
    pub percent_change: Option<f64>,
}

impl ScoreChange {
    /// Compare two scores.
    #[must_use]
    pub fn new(previous: u8, current: u8) -> Self {
        let delta = i16::from(current) - i16::from(previous);
        let percent_change = (previous != 0).then(|| f64::from(delta) / f64::from(previous) * 100.0);

        Self {
            previous,
            current,
            delta,
            percent_change,
        }
    }

    /// The score went up.
    #[must_use]
    pub fn improved(&self) -> bool {
        self.delta > 0
    }
}

/// Differences between an earlier and a later audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditComparison {
    /// Overall score movement.
    pub overall: ScoreChange,
    /// Structured data score movement.
    pub schema: ScoreChange,
    /// Meta tag score movement.
    pub meta: ScoreChange,
    /// Content score movement.
    pub content: ScoreChange,
    /// Technical score movement.
    pub technical: ScoreChange,
    /// Recommendation issues present now but not before, in current order.
    pub new_issues: Vec<String>,
    /// Recommendation issues present before but not now, in previous order.
    pub resolved_issues: Vec<String>,
}

impl AuditComparison {
    /// Compare `previous` with `current`.
    #[must_use]
    pub fn between(previous: &AuditResult, current: &AuditResult) -> Self {
        let (p, c) = (&previous.component_scores, &current.component_scores);

        let before: BTreeSet<&str> = previous.recommendations.iter().map(|r| r.issue.as_str()).collect();
        let after: BTreeSet<&str> = current.recommendations.iter().map(|r| r.issue.as_str()).collect();

        Self {
            overall: ScoreChange::new(previous.overall_score, current.overall_score),
            schema: ScoreChange::new(p.schema, c.schema),
            meta: ScoreChange::new(p.meta, c.meta),
            content: ScoreChange::new(p.content, c.content),
            technical: ScoreChange::new(p.technical, c.technical),
            new_issues: current
                .recommendations
                .iter()
                .filter(|r| !before.contains(r.issue.as_str()))
                .map(|r| r.issue.clone())
                .collect(),
            resolved_issues: previous
                .recommendations
                .iter()
                .filter(|r| !after.contains(r.issue.as_str()))
                .map(|r| r.issue.clone())
                .collect(),
        }
    }
}
