//! Savings goal mutations. Progress is only ever zeroed by an explicit reset.

use crate::{input::parse_name, savings::SavingsGoal};

/// Operations on the single savings goal.
pub struct SavingsService;

impl SavingsService {
    /// Enables the goal with a new name and target. Accumulated progress is kept.
    pub fn enable_goal(goal: &mut SavingsGoal, name: &str, target: f64) -> bool {
        let name = match parse_name(name) {
            Some(name) if target.is_finite() && target > 0.0 => name,
            _ => {
                tracing::debug!("ignoring invalid savings goal");
                return false;
            }
        };
        goal.enabled = true;
        goal.goal = target;
        goal.name = name;
        tracing::info!(name = %goal.name, target, current = goal.current, "savings goal enabled");
        true
    }

    /// Soft-disables the goal; name, target and progress stay stored.
    pub fn disable_goal(goal: &mut SavingsGoal) -> bool {
        if !goal.enabled {
            return false;
        }
        goal.enabled = false;
        tracing::info!(name = %goal.name, "savings goal disabled");
        true
    }

    /// Adds a positive deposit to an enabled goal. The stored total is not
    /// capped at the target.
    pub fn deposit(goal: &mut SavingsGoal, amount: f64) -> bool {
        if !goal.enabled || !amount.is_finite() || amount <= 0.0 {
            return false;
        }
        goal.current += amount;
        tracing::debug!(amount, current = goal.current, "savings deposit");
        true
    }

    /// Explicitly zeroes accumulated progress.
    pub fn reset_goal(goal: &mut SavingsGoal) -> bool {
        if goal.current == 0.0 {
            return false;
        }
        goal.current = 0.0;
        tracing::info!(name = %goal.name, "savings progress reset");
        true
    }
}
