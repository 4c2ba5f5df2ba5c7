use serde::Serialize;

use super::format::{format_money, format_pct, format_rate};
use crate::core::{PlanInputs, ProjectionResult};

pub const GOAL_ACHIEVED_LABEL: &str = "Achieved";
pub const GOAL_MISSED_LABEL: &str = "Insufficient";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub years: u32,
    pub months: u32,
    pub required_capital: f64,
    pub final_nominal_capital: f64,
    pub final_real_capital: f64,
    pub total_contributions: f64,
    pub plan_completion_pct: f64,
    pub goal_achieved: bool,
    pub goal_reached_month: Option<u32>,
    pub status_label: &'static str,
    pub lines: Vec<String>,
}

impl PlanSummary {
    pub fn new(inputs: &PlanInputs, result: &ProjectionResult) -> Self {
        Self {
            years: result.years,
            months: result.months.len() as u32,
            required_capital: result.required_capital,
            final_nominal_capital: result.final_nominal_capital,
            final_real_capital: result.final_real_capital,
            total_contributions: result.total_contributions,
            plan_completion_pct: result.plan_completion_pct,
            goal_achieved: result.goal_achieved,
            goal_reached_month: result.goal_reached_month,
            status_label: status_label(result.goal_achieved),
            lines: summary_lines(inputs, result),
        }
    }
}

pub fn status_label(goal_achieved: bool) -> &'static str {
    if goal_achieved {
        GOAL_ACHIEVED_LABEL
    } else {
        GOAL_MISSED_LABEL
    }
}

pub fn summary_lines(inputs: &PlanInputs, result: &ProjectionResult) -> Vec<String> {
    let retirement_age = inputs.retirement_age;
    let mut lines = vec![
        format!("Age: {} - {}", inputs.current_age, retirement_age),
        format!("Starting capital: {}", format_money(inputs.starting_capital)),
        format!(
            "Initial monthly contribution: {}",
            format_money(inputs.monthly_contribution_start)
        ),
        format!(
            "Monthly income (today): {}",
            format_money(inputs.monthly_target_income_today)
        ),
        format!("Inflation: {}", format_rate(inputs.inflation_rate)),
        format!(
            "Return until {retirement_age}: {}",
            format_rate(inputs.accumulation_rate)
        ),
        format!(
            "Deposit rate after {retirement_age}: {}",
            format_rate(inputs.retirement_rate)
        ),
        format!(
            "Contribution growth: {} per year",
            format_rate(inputs.contribution_growth_rate)
        ),
        format!(
            "Monthly income at retirement: {}",
            format_money(result.future_monthly_income)
        ),
        format!("Target capital: {}", format_money(result.required_capital)),
        format!("Final capital: {}", format_money(result.final_nominal_capital)),
        format!(
            "Final capital (today's money): {}",
            format_money(result.final_real_capital)
        ),
        format!(
            "Total contributions: {}",
            format_money(result.total_contributions)
        ),
        format!("Plan completion: {}", format_pct(result.plan_completion_pct)),
    ];
    if let Some(month) = result.goal_reached_month {
        lines.push(format!("Target first reached in month {month}"));
    }
    lines.push(if result.goal_achieved {
        "Goal achieved".to_string()
    } else {
        "Goal not achieved".to_string()
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project;

    fn sample_inputs() -> PlanInputs {
        PlanInputs {
            current_age: 24,
            retirement_age: 45,
            starting_capital: 0.0,
            monthly_contribution_start: 100_000.0,
            accumulation_rate: 0.15,
            monthly_target_income_today: 600_000.0,
            inflation_rate: 0.094,
            retirement_rate: 0.15,
            contribution_growth_rate: 0.067,
        }
    }

    #[test]
    fn summary_restates_inputs_and_headline_results() {
        let inputs = sample_inputs();
        let result = project(&inputs).expect("valid plan");
        let summary = PlanSummary::new(&inputs, &result);

        assert_eq!(summary.months, 252);
        assert_eq!(summary.status_label, GOAL_MISSED_LABEL);
        assert!(summary.lines.contains(&"Age: 24 - 45".to_string()));
        assert!(summary.lines.contains(&"Inflation: 9.40%".to_string()));
        assert!(summary.lines.contains(&"Target capital: 316 668 598".to_string()));
        assert!(summary.lines.contains(&"Plan completion: 82.22%".to_string()));
        assert_eq!(summary.lines.last().map(String::as_str), Some("Goal not achieved"));
    }

    #[test]
    fn summary_mentions_the_month_the_goal_was_reached() {
        let mut inputs = sample_inputs();
        inputs.starting_capital = 400_000_000.0;
        let result = project(&inputs).expect("valid plan");
        let summary = PlanSummary::new(&inputs, &result);

        assert_eq!(summary.status_label, GOAL_ACHIEVED_LABEL);
        assert!(
            summary
                .lines
                .contains(&"Target first reached in month 1".to_string())
        );
        assert_eq!(summary.lines.last().map(String::as_str), Some("Goal achieved"));
    }
}
