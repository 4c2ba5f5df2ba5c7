use super::ReportError;
use crate::core::ProjectionResult;

pub const CSV_HEADER: [&str; 4] = ["Month", "Contribution", "Capital", "GoalCompletionPct"];
pub const CSV_FILE_NAME: &str = "financial_model.csv";

/// One row per month; numbers use the shortest round-trip `f64` form, ungrouped.
pub fn export_months_csv(result: &ProjectionResult) -> Result<String, ReportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for m in &result.months {
        wtr.write_record([
            m.month_index.to_string(),
            m.contribution.to_string(),
            m.capital.to_string(),
            m.goal_completion_pct.to_string(),
        ])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}
