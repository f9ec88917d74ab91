//! Completion threshold gate.
//!
//! Decides whether an analysis passes a minimum completion percentage. The
//! CLI maps the outcome to its exit code.

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisResult;

/// Lowest and highest accepted threshold values.
pub const MIN_THRESHOLD: f64 = 0.0;
pub const MAX_THRESHOLD: f64 = 100.0;

/// Result of comparing an analysis against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateOutcome {
    /// Whether the check passed (completion >= threshold)
    pub passed: bool,
    /// The threshold used
    pub threshold: f64,
    pub completion_percentage: f64,
}

impl GateOutcome {
    /// Human-readable one-line verdict.
    pub fn message(&self) -> String {
        if self.passed {
            format!(
                "Completion {:.1}% meets threshold {:.1}%",
                self.completion_percentage, self.threshold
            )
        } else {
            format!(
                "Completion {:.1}% is below threshold {:.1}%",
                self.completion_percentage, self.threshold
            )
        }
    }

    /// Percentage points still missing to reach the threshold.
    pub fn shortfall(&self) -> f64 {
        (self.threshold - self.completion_percentage).max(0.0)
    }
}

/// Check that a threshold is a percentage.
pub fn validate_threshold(threshold: f64) -> anyhow::Result<()> {
    if !threshold.is_finite() || !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
        anyhow::bail!(
            "invalid threshold {}, must be between {} and {}",
            threshold,
            MIN_THRESHOLD,
            MAX_THRESHOLD
        );
    }
    Ok(())
}

/// Compare the completion percentage of `result` against `threshold`.
pub fn evaluate(result: &AnalysisResult, threshold: f64) -> GateOutcome {
    GateOutcome {
        passed: result.completion_percentage >= threshold,
        threshold,
        completion_percentage: result.completion_percentage,
    }
}
