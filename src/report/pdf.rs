//! Minimal PDF 1.4 writer for the plan report.
//!
//! Only what the report needs: A4 pages, the built-in Helvetica font with
//! WinAnsi encoding, single-line text and stroked rectangles for table cells.
//! Page 1 restates the plan; the month table follows at [`ROWS_PER_PAGE`]
//! rows per page with the column header repeated on each page.

use super::summary::summary_lines;
use super::table::{TABLE_HEADERS, build_table};
use crate::core::{PlanInputs, ProjectionResult};

pub const ROWS_PER_PAGE: usize = 40;
pub const PDF_FILE_NAME: &str = "financial_report.pdf";

const PAGE_WIDTH: f64 = 595.28;
const PAGE_HEIGHT: f64 = 841.89;
const MARGIN: f64 = 28.35;

const TITLE: &str = "Financial report";
const TABLE_CAPTION: &str = "Payment schedule";

const TITLE_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 12.0;
const CAPTION_SIZE: f64 = 10.0;
const CELL_SIZE: f64 = 8.0;
const LINE_HEIGHT: f64 = 28.35;
const CELL_HEIGHT: f64 = 17.0;
const CELL_PADDING: f64 = 3.0;

struct Page {
    content: String,
    cursor: f64,
}

impl Page {
    fn new() -> Self {
        let mut page = Self {
            content: String::new(),
            cursor: MARGIN,
        };
        page.content.push_str("0.5 w\n");
        let title_x = (PAGE_WIDTH - approx_text_width(TITLE, TITLE_SIZE)) / 2.0;
        page.text(title_x, TITLE_SIZE, TITLE);
        page.cursor += LINE_HEIGHT;
        page
    }

    /// Writes `text` with its top edge at the cursor.
    fn text(&mut self, x: f64, size: f64, text: &str) {
        let baseline = PAGE_HEIGHT - self.cursor - size;
        self.content.push_str(&format!(
            "BT /F1 {size:.1} Tf {x:.2} {baseline:.2} Td ({}) Tj ET\n",
            encode_text(text)
        ));
    }

    fn line(&mut self, size: f64, text: &str) {
        self.text(MARGIN, size, text);
        self.cursor += LINE_HEIGHT;
    }

    fn table_row(&mut self, cells: [&str; 4]) {
        let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / cells.len() as f64;
        let bottom = PAGE_HEIGHT - self.cursor - CELL_HEIGHT;
        for (i, cell) in cells.into_iter().enumerate() {
            let x = MARGIN + col_width * i as f64;
            self.content.push_str(&format!(
                "{x:.2} {bottom:.2} {col_width:.2} {CELL_HEIGHT:.2} re S\n"
            ));
            let baseline = bottom + (CELL_HEIGHT - CELL_SIZE) / 2.0 + 1.0;
            self.content.push_str(&format!(
                "BT /F1 {CELL_SIZE:.1} Tf {:.2} {baseline:.2} Td ({}) Tj ET\n",
                x + CELL_PADDING,
                encode_text(cell)
            ));
        }
        self.cursor += CELL_HEIGHT;
    }
}

pub fn render_pdf(inputs: &PlanInputs, result: &ProjectionResult) -> Vec<u8> {
    let mut pages = Vec::new();

    let mut summary = Page::new();
    for line in summary_lines(inputs, result) {
        summary.line(BODY_SIZE, &line);
    }
    pages.push(summary);

    let rows = build_table(result);
    for (i, chunk) in rows.chunks(ROWS_PER_PAGE).enumerate() {
        let mut page = Page::new();
        if i == 0 {
            page.line(CAPTION_SIZE, TABLE_CAPTION);
        }
        page.table_row(TABLE_HEADERS);
        for row in chunk {
            page.table_row(row.cells());
        }
        pages.push(page);
    }

    write_document(&pages).into_bytes()
}

fn write_document(pages: &[Page]) -> String {
    // Objects: 1 catalog, 2 page tree, 3 font, then (page, contents) pairs.
    let page_obj = |i: usize| 4 + 2 * i;
    let object_count = 3 + 2 * pages.len();

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(object_count);

    let mut push_object = |out: &mut String, id: usize, body: &str| {
        offsets.push(out.len());
        out.push_str(&format!("{id} 0 obj\n{body}\nendobj\n"));
    };

    push_object(&mut out, 1, "<< /Type /Catalog /Pages 2 0 R >>");
    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", page_obj(i)))
        .collect::<Vec<_>>()
        .join(" ");
    push_object(
        &mut out,
        2,
        &format!("<< /Type /Pages /Kids [{kids}] /Count {} >>", pages.len()),
    );
    push_object(
        &mut out,
        3,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );

    for (i, page) in pages.iter().enumerate() {
        let id = page_obj(i);
        push_object(
            &mut out,
            id,
            &format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                id + 1
            ),
        );
        push_object(
            &mut out,
            id + 1,
            &format!(
                "<< /Length {} >>\nstream\n{}endstream",
                page.content.len(),
                page.content
            ),
        );
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", object_count + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        object_count + 1
    ));
    out
}

/// Escapes a string for a PDF literal in WinAnsi encoding. Characters outside
/// Latin-1 become `?`.
fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ' '..='~' => out.push(ch),
            '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", ch as u32)),
            _ => out.push('?'),
        }
    }
    out
}

// Helvetica averages a little over half an em per glyph; close enough to centre a title.
fn approx_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.52
}
