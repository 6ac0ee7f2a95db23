//! Optional savings goal tracked independently of the month ledger.

use serde::{Deserialize, Serialize};

/// The single savings goal. Disabling only clears `enabled`, so progress
/// survives a disable/enable cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsGoal {
    pub enabled: bool,
    pub name: String,
    pub goal: f64,
    pub current: f64,
}

impl SavingsGoal {
    pub fn progress(&self) -> SavingsProgress {
        let fraction = if self.goal > 0.0 {
            (self.current / self.goal).clamp(0.0, 1.0)
        } else {
            0.0
        };
        SavingsProgress {
            enabled: self.enabled,
            name: self.name.clone(),
            goal: self.goal,
            current: self.current,
            fraction,
        }
    }
}

/// Read-only view of the goal for display.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsProgress {
    pub enabled: bool,
    pub name: String,
    pub goal: f64,
    pub current: f64,
    /// `current / goal`, clamped to `[0, 1]`.
    pub fraction: f64,
}

impl SavingsProgress {
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }

    pub fn remaining(&self) -> f64 {
        (self.goal - self.current).max(0.0)
    }
}
