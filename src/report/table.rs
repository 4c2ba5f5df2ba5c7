use serde::Serialize;

use super::format::{format_money, format_pct};
use crate::core::{MonthRecord, ProjectionResult};

pub const TABLE_HEADERS: [&str; 4] = ["Month", "Contribution", "Capital", "Goal completion"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub month: String,
    pub contribution: String,
    pub capital: String,
    pub goal_completion: String,
}

impl From<&MonthRecord> for TableRow {
    fn from(record: &MonthRecord) -> Self {
        Self {
            month: record.month_index.to_string(),
            contribution: format_money(record.contribution),
            capital: format_money(record.capital),
            goal_completion: format_pct(record.goal_completion_pct),
        }
    }
}

impl TableRow {
    pub fn cells(&self) -> [&str; 4] {
        [
            &self.month,
            &self.contribution,
            &self.capital,
            &self.goal_completion,
        ]
    }
}

pub fn build_table(result: &ProjectionResult) -> Vec<TableRow> {
    result.months.iter().map(TableRow::from).collect()
}
