//! Budget status formatting

use crate::services::BudgetStatus;

use super::report::{format_bar, format_percentage};

pub fn format_budget_status(status: &BudgetStatus) -> String {
    let mut output = format!("Budget for {}-{:02}\n", status.year, status.month);

    match (status.budget, status.remaining) {
        (Some(budget), Some(remaining)) => {
            output.push_str(&format!("  Budget:    {:>12}\n", budget));
            output.push_str(&format!("  Spent:     {:>12}\n", status.spent));
            output.push_str(&format!("  Remaining: {:>12}\n", remaining));
            output.push_str(&format!(
                "  [{}] {} ({})\n",
                format_bar(status.percentage.min(100.0), 100.0, 20),
                format_percentage(status.percentage),
                status.state
            ));
        }
        _ => {
            output.push_str(&format!("  Spent:     {:>12}\n", status.spent));
            output.push_str(&format!("  {}\n", status.state));
        }
    }

    output
}
