//! Presentation of a finished projection: table, CSV, SVG chart and PDF report.

pub mod chart;
pub mod export;
pub mod format;
pub mod pdf;
pub mod summary;
pub mod table;

use thiserror::Error;

pub use chart::render_chart_svg;
pub use export::export_months_csv;
pub use pdf::render_pdf;
pub use summary::PlanSummary;
pub use table::{TableRow, build_table};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
