use std::ops::RangeInclusive;

use super::error::ProjectionError;
use super::types::PlanInputs;

/// Declared input ranges of the plan form. Rates are fractions.
#[derive(Debug, Clone)]
pub struct InputLimits {
    pub current_age: RangeInclusive<u32>,
    pub max_retirement_age: u32,
    pub accumulation_rate: RangeInclusive<f64>,
    pub inflation_rate: RangeInclusive<f64>,
    pub retirement_rate: RangeInclusive<f64>,
    pub contribution_growth_rate: RangeInclusive<f64>,
}

pub const LIMITS: InputLimits = InputLimits {
    current_age: 18..=100,
    max_retirement_age: 100,
    accumulation_rate: 0.0..=0.30,
    inflation_rate: 0.0..=0.20,
    retirement_rate: 0.0..=0.30,
    contribution_growth_rate: 0.0..=0.30,
};

pub fn validate_inputs(inputs: &PlanInputs) -> Result<(), ProjectionError> {
    check_age_range("currentAge", inputs.current_age, &LIMITS.current_age)?;

    if inputs.retirement_age <= inputs.current_age {
        return Err(ProjectionError::InvalidInput(format!(
            "retirementAge ({}) must be greater than currentAge ({})",
            inputs.retirement_age, inputs.current_age
        )));
    }
    let retirement_ages = (inputs.current_age + 1)..=LIMITS.max_retirement_age;
    check_age_range("retirementAge", inputs.retirement_age, &retirement_ages)?;

    for (field, value) in [
        ("startingCapital", inputs.starting_capital),
        ("monthlyContributionStart", inputs.monthly_contribution_start),
        ("monthlyTargetIncomeToday", inputs.monthly_target_income_today),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ProjectionError::InvalidInput(format!(
                "{field} must be a finite amount >= 0, got {value}"
            )));
        }
    }
    // The income target scales the required capital, which divides every completion ratio.
    if inputs.monthly_target_income_today == 0.0 {
        return Err(ProjectionError::DivisionByZero {
            field: "monthlyTargetIncomeToday",
        });
    }

    check_rate_range(
        "accumulationRate",
        inputs.accumulation_rate,
        &LIMITS.accumulation_rate,
    )?;
    check_rate_range("inflationRate", inputs.inflation_rate, &LIMITS.inflation_rate)?;
    check_rate_range(
        "retirementRate",
        inputs.retirement_rate,
        &LIMITS.retirement_rate,
    )?;
    if inputs.retirement_rate == 0.0 {
        return Err(ProjectionError::DivisionByZero {
            field: "retirementRate",
        });
    }
    check_rate_range(
        "contributionGrowthRate",
        inputs.contribution_growth_rate,
        &LIMITS.contribution_growth_rate,
    )?;

    Ok(())
}

fn check_age_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), ProjectionError> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ProjectionError::OutOfRange {
        field,
        min: f64::from(*range.start()),
        max: f64::from(*range.end()),
        value: f64::from(value),
    })
}

fn check_rate_range(
    field: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), ProjectionError> {
    // NaN fails `contains`, so non-finite rates land here too.
    if range.contains(&value) {
        return Ok(());
    }
    Err(ProjectionError::OutOfRange {
        field,
        min: *range.start(),
        max: *range.end(),
        value,
    })
}
