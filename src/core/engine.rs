use super::error::ProjectionError;
use super::types::{MonthRecord, PlanInputs, ProjectionResult};
use super::validation::validate_inputs;

const MONTHS_PER_YEAR: u32 = 12;

pub fn project(inputs: &PlanInputs) -> Result<ProjectionResult, ProjectionError> {
    validate_inputs(inputs)?;

    let years = inputs.years();
    if years == 0 {
        return Err(ProjectionError::InvalidInput(
            "retirement age must be after current age".to_string(),
        ));
    }
    let required_capital = required_capital(inputs, years)?;
    let future_monthly_income = inflated_monthly_income(inputs, years);

    let monthly_rate = inputs.accumulation_rate / f64::from(MONTHS_PER_YEAR);
    let mut capital = inputs.starting_capital;
    let mut cumulative_contribution = 0.0;
    let mut months = Vec::with_capacity((years * MONTHS_PER_YEAR) as usize);
    let mut goal_reached_month = None;

    for year in 0..years {
        let contribution = yearly_contribution(inputs, year);
        for month in 0..MONTHS_PER_YEAR {
            let month_index = year * MONTHS_PER_YEAR + month + 1;
            // Interest accrues on the opening balance; the contribution lands after.
            capital *= 1.0 + monthly_rate;
            capital += contribution;
            cumulative_contribution += contribution;

            if goal_reached_month.is_none() && capital >= required_capital {
                goal_reached_month = Some(month_index);
            }
            months.push(MonthRecord {
                month_index,
                contribution,
                cumulative_contribution,
                capital,
                goal_completion_pct: capital / required_capital * 100.0,
            });
        }
    }

    let final_nominal_capital = months.last().map_or(inputs.starting_capital, |m| m.capital);
    let final_real_capital = final_nominal_capital / inflation_factor(inputs, years);

    Ok(ProjectionResult {
        years,
        months,
        future_monthly_income,
        required_capital,
        total_contributions: cumulative_contribution,
        final_nominal_capital,
        final_real_capital,
        goal_achieved: final_nominal_capital >= required_capital,
        plan_completion_pct: final_nominal_capital / required_capital * 100.0,
        goal_reached_month,
    })
}

fn inflation_factor(inputs: &PlanInputs, years: u32) -> f64 {
    (1.0 + inputs.inflation_rate).powi(years as i32)
}

fn inflated_monthly_income(inputs: &PlanInputs, years: u32) -> f64 {
    inputs.monthly_target_income_today * inflation_factor(inputs, years)
}

fn required_capital(inputs: &PlanInputs, years: u32) -> Result<f64, ProjectionError> {
    if inputs.retirement_rate == 0.0 {
        return Err(ProjectionError::DivisionByZero {
            field: "retirementRate",
        });
    }
    let annual_income = inflated_monthly_income(inputs, years) * f64::from(MONTHS_PER_YEAR);
    let required = annual_income / inputs.retirement_rate;
    if required == 0.0 {
        return Err(ProjectionError::DivisionByZero {
            field: "monthlyTargetIncomeToday",
        });
    }
    if !required.is_normal() {
        return Err(ProjectionError::InvalidInput(format!(
            "required capital is not a usable divisor ({required})"
        )));
    }
    Ok(required)
}

fn yearly_contribution(inputs: &PlanInputs, year: u32) -> f64 {
    inputs.monthly_contribution_start * (1.0 + inputs.contribution_growth_rate).powi(year as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

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

    fn zero_rate_inputs() -> PlanInputs {
        PlanInputs {
            current_age: 30,
            retirement_age: 40,
            starting_capital: 0.0,
            monthly_contribution_start: 1_000.0,
            accumulation_rate: 0.0,
            monthly_target_income_today: 2_000.0,
            inflation_rate: 0.0,
            // Non-zero so the target stays defined; it does not touch the capital path.
            retirement_rate: 0.04,
            contribution_growth_rate: 0.0,
        }
    }

    #[test]
    fn default_plan_produces_252_months_and_expected_target() {
        let inputs = sample_inputs();
        let result = project(&inputs).expect("valid plan");

        assert_eq!(result.years, 21);
        assert_eq!(result.months.len(), 252);

        let expected_income = 600_000.0 * 1.094f64.powi(21);
        let expected_required = expected_income * 12.0 / 0.15;
        assert_relative_eq!(result.future_monthly_income, expected_income, max_relative = 1e-12);
        assert_relative_eq!(result.required_capital, expected_required, max_relative = 1e-12);
        assert_relative_eq!(result.required_capital, 316_668_598.015_271_2, max_relative = 1e-9);

        // Hand-checked against an independent run of the same recurrence.
        assert_relative_eq!(result.final_nominal_capital, 260_368_420.241_823_67, max_relative = 1e-9);
        assert_relative_eq!(result.final_real_capital, 39_466_130.364_479_154, max_relative = 1e-9);
        assert_relative_eq!(result.plan_completion_pct, 82.221_104_925_998_23, max_relative = 1e-9);
        assert!(!result.goal_achieved);
        assert_eq!(result.goal_reached_month, None);
    }

    #[test]
    fn interest_compounds_before_the_contribution() {
        let result = project(&sample_inputs()).expect("valid plan");
        // Month 1: 0 * (1 + 0.0125) + 100k; month 2: 100k * 1.0125 + 100k.
        assert_approx(result.months[0].capital, 100_000.0);
        assert_approx(result.months[1].capital, 201_250.0);
    }

    #[test]
    fn starting_capital_grows_in_the_first_month() {
        let mut inputs = sample_inputs();
        inputs.starting_capital = 1_000_000.0;
        let result = project(&inputs).expect("valid plan");
        assert_approx(result.months[0].capital, 1_000_000.0 * 1.0125 + 100_000.0);
    }

    #[test]
    fn one_year_horizon_produces_twelve_months() {
        let mut inputs = sample_inputs();
        inputs.current_age = 99;
        inputs.retirement_age = 100;
        let result = project(&inputs).expect("valid plan");
        assert_eq!(result.months.len(), 12);
        assert_eq!(result.months.last().map(|m| m.month_index), Some(12));
    }

    #[test]
    fn zero_rates_reduce_to_plain_summation() {
        let inputs = zero_rate_inputs();
        let result = project(&inputs).expect("valid plan");
        let months = inputs.months() as f64;

        assert_approx(result.final_nominal_capital, 1_000.0 * months);
        assert_approx(result.total_contributions, 1_000.0 * months);
        assert_approx(result.final_real_capital, result.final_nominal_capital);
        assert_approx(result.required_capital, 2_000.0 * 12.0 / 0.04);
    }

    #[test]
    fn zero_retirement_rate_fails_explicitly() {
        let mut inputs = sample_inputs();
        inputs.retirement_rate = 0.0;
        let err = project(&inputs).expect_err("zero divisor must be rejected");
        assert_eq!(
            err,
            ProjectionError::DivisionByZero {
                field: "retirementRate"
            }
        );
    }

    #[test]
    fn zero_income_target_fails_instead_of_producing_nan() {
        let mut inputs = sample_inputs();
        inputs.monthly_target_income_today = 0.0;
        inputs.monthly_contribution_start = 0.0;
        assert_eq!(
            project(&inputs),
            Err(ProjectionError::DivisionByZero {
                field: "monthlyTargetIncomeToday"
            })
        );

        inputs.monthly_contribution_start = 10.0;
        assert!(project(&inputs).is_err());
    }

    #[test]
    fn retirement_not_after_current_age_is_rejected() {
        let mut inputs = sample_inputs();
        inputs.retirement_age = inputs.current_age;
        assert!(matches!(
            project(&inputs),
            Err(ProjectionError::InvalidInput(_))
        ));
    }

    #[test]
    fn goal_tie_counts_as_achieved() {
        // 12 months of 1000 with no growth -> 12_000 of capital.
        // Target 100/month * 12 / 0.1 = 12_000.
        let inputs = PlanInputs {
            current_age: 40,
            retirement_age: 41,
            starting_capital: 0.0,
            monthly_contribution_start: 1_000.0,
            accumulation_rate: 0.0,
            monthly_target_income_today: 100.0,
            inflation_rate: 0.0,
            retirement_rate: 0.1,
            contribution_growth_rate: 0.0,
        };
        let result = project(&inputs).expect("valid plan");
        assert_eq!(result.final_nominal_capital, 12_000.0);
        assert_eq!(result.required_capital, 12_000.0);
        assert!(result.goal_achieved);
        assert_eq!(result.goal_reached_month, Some(12));
        assert_approx(result.plan_completion_pct, 100.0);
    }

    #[test]
    fn goal_completion_is_not_clamped() {
        let mut inputs = sample_inputs();
        inputs.starting_capital = 1_000_000_000.0;
        let result = project(&inputs).expect("valid plan");
        assert!(result.goal_achieved);
        assert_eq!(result.goal_reached_month, Some(1));
        assert!(result.months[0].goal_completion_pct > 100.0);
        assert!(result.plan_completion_pct > 100.0);
    }

    #[test]
    fn contribution_steps_up_once_per_year() {
        let result = project(&sample_inputs()).expect("valid plan");
        assert_approx(result.months[11].contribution, 100_000.0);
        assert_approx(result.months[12].contribution, 106_700.0);
        assert_approx(result.months[23].contribution, 106_700.0);
        assert_approx(result.months[24].contribution, 100_000.0 * 1.067 * 1.067);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let inputs = sample_inputs();
        let first = project(&inputs).expect("valid plan");
        let second = project(&inputs).expect("valid plan");
        assert_eq!(first, second);
        for (a, b) in first.months.iter().zip(&second.months) {
            assert_eq!(a.capital.to_bits(), b.capital.to_bits());
        }
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_projection_invariants_hold(
            current_age in 18u32..100,
            span in 1u32..83,
            starting_capital in 0u32..5_000_000,
            contribution in 0u32..500_000,
            target_income in 1u32..1_000_000,
            accumulation_bp in 0u32..3001,
            inflation_bp in 0u32..2001,
            retirement_bp in 1u32..3001,
            growth_bp in 0u32..3001
        ) {
            let retirement_age = (current_age + span).min(100);

            let inputs = PlanInputs {
                current_age,
                retirement_age,
                starting_capital: starting_capital as f64,
                monthly_contribution_start: contribution as f64,
                accumulation_rate: accumulation_bp as f64 / 10_000.0,
                monthly_target_income_today: target_income as f64,
                inflation_rate: inflation_bp as f64 / 10_000.0,
                retirement_rate: retirement_bp as f64 / 10_000.0,
                contribution_growth_rate: growth_bp as f64 / 10_000.0,
            };
            let result = project(&inputs).expect("generated inputs are in range");
            let years = retirement_age - current_age;

            prop_assert_eq!(result.months.len(), (years * 12) as usize);

            let mut previous_capital = inputs.starting_capital;
            for (i, record) in result.months.iter().enumerate() {
                prop_assert_eq!(record.month_index, i as u32 + 1);
                prop_assert!(record.capital >= previous_capital);
                prop_assert!(record.goal_completion_pct.is_finite());
                previous_capital = record.capital;

                let year = (i / 12) as i32;
                let expected = inputs.monthly_contribution_start
                    * (1.0 + inputs.contribution_growth_rate).powi(year);
                prop_assert_eq!(record.contribution, expected);
            }

            let last = result.months.last().expect("at least one month");
            prop_assert_eq!(result.final_nominal_capital, last.capital);
            prop_assert_eq!(
                result.goal_achieved,
                result.final_nominal_capital >= result.required_capital
            );
            prop_assert!(result.required_capital.is_finite());
            prop_assert!(result.plan_completion_pct.is_finite());
        }
    }
}
