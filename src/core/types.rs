use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub starting_capital: f64,
    pub monthly_contribution_start: f64,
    pub accumulation_rate: f64,
    pub monthly_target_income_today: f64,
    pub inflation_rate: f64,
    pub retirement_rate: f64,
    pub contribution_growth_rate: f64,
}

impl PlanInputs {
    pub fn years(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }

    pub fn months(&self) -> u32 {
        self.years() * 12
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    pub month_index: u32,
    pub contribution: f64,
    pub cumulative_contribution: f64,
    pub capital: f64,
    pub goal_completion_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub years: u32,
    pub months: Vec<MonthRecord>,
    pub future_monthly_income: f64,
    pub required_capital: f64,
    pub total_contributions: f64,
    pub final_nominal_capital: f64,
    pub final_real_capital: f64,
    pub goal_achieved: bool,
    pub plan_completion_pct: f64,
    /// First month whose closing capital covers `required_capital`.
    pub goal_reached_month: Option<u32>,
}
