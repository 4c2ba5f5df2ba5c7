use super::format::format_money;
use crate::core::ProjectionResult;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;
const Y_TICKS: u32 = 5;
const X_TICKS: u32 = 6;

const CAPITAL_COLOR: &str = "green";
const CONTRIBUTIONS_COLOR: &str = "blue";
const TARGET_COLOR: &str = "red";

struct Plot {
    months: usize,
    y_max: f64,
}

impl Plot {
    fn new(result: &ProjectionResult) -> Self {
        let series_max = result
            .months
            .iter()
            .map(|m| m.capital.max(m.cumulative_contribution))
            .fold(result.required_capital, f64::max);
        let y_max = if series_max > 0.0 { series_max * 1.05 } else { 1.0 };
        Self {
            months: result.months.len(),
            y_max,
        }
    }

    fn x(&self, month_index: u32) -> f64 {
        let span = (self.months.max(2) - 1) as f64;
        MARGIN_LEFT + (f64::from(month_index) - 1.0) / span * plot_width()
    }

    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + plot_height() * (1.0 - value / self.y_max)
    }
}

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Capital and cumulative contributions over time, with the target capital as a
/// horizontal reference line.
pub fn render_chart_svg(result: &ProjectionResult) -> String {
    let plot = Plot::new(result);
    let mut svg = String::with_capacity(16 * 1024);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" width="{WIDTH}" height="{HEIGHT}" font-family="sans-serif" font-size="11">"#
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="22" text-anchor="middle" font-size="15">Capital growth and accumulated contributions</text>"#,
        WIDTH / 2.0
    ));

    push_axes(&mut svg, &plot);

    let capital_points = polyline_points(
        &plot,
        result.months.iter().map(|m| (m.month_index, m.capital)),
    );
    let contribution_points = polyline_points(
        &plot,
        result
            .months
            .iter()
            .map(|m| (m.month_index, m.cumulative_contribution)),
    );
    svg.push_str(&format!(
        r#"<polyline class="series-capital" fill="none" stroke="{CAPITAL_COLOR}" stroke-width="2" points="{capital_points}"/>"#
    ));
    svg.push_str(&format!(
        r#"<polyline class="series-contributions" fill="none" stroke="{CONTRIBUTIONS_COLOR}" stroke-width="2" stroke-dasharray="8 4" points="{contribution_points}"/>"#
    ));

    let target_y = plot.y(result.required_capital);
    svg.push_str(&format!(
        r#"<line class="target-capital" x1="{MARGIN_LEFT}" y1="{target_y:.1}" x2="{:.1}" y2="{target_y:.1}" stroke="{TARGET_COLOR}" stroke-width="1.5" stroke-dasharray="2 3"/>"#,
        WIDTH - MARGIN_RIGHT
    ));

    push_legend(&mut svg);
    svg.push_str("</svg>");
    svg
}

fn polyline_points(plot: &Plot, values: impl Iterator<Item = (u32, f64)>) -> String {
    values
        .map(|(month, value)| format!("{:.1},{:.1}", plot.x(month), plot.y(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_axes(svg: &mut String, plot: &Plot) {
    let bottom = HEIGHT - MARGIN_BOTTOM;
    let right = WIDTH - MARGIN_RIGHT;

    for tick in 0..=Y_TICKS {
        let value = plot.y_max * f64::from(tick) / f64::from(Y_TICKS);
        let y = plot.y(value);
        svg.push_str(&format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{right}" y2="{y:.1}" stroke="#e0e0e0"/>"##
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 6.0,
            y + 4.0,
            format_money(value)
        ));
    }

    if plot.months > 0 {
        let last = plot.months as u32;
        let mut previous = 0;
        for tick in 0..=X_TICKS {
            let month = 1 + (last - 1) * tick / X_TICKS;
            if month == previous {
                continue;
            }
            previous = month;
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{month}</text>"#,
                plot.x(month),
                bottom + 16.0
            ));
        }
    }

    svg.push_str(&format!(
        r#"<line x1="{MARGIN_LEFT}" y1="{bottom}" x2="{right}" y2="{bottom}" stroke="black"/>"#
    ));
    svg.push_str(&format!(
        r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{bottom}" stroke="black"/>"#
    ));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">Month</text>"#,
        MARGIN_LEFT + plot_width() / 2.0,
        HEIGHT - 12.0
    ));
    svg.push_str(&format!(
        r#"<text x="14" y="{:.1}" text-anchor="middle" transform="rotate(-90 14 {:.1})">Amount</text>"#,
        MARGIN_TOP + plot_height() / 2.0,
        MARGIN_TOP + plot_height() / 2.0
    ));
}

fn push_legend(svg: &mut String) {
    let x = MARGIN_LEFT + 12.0;
    let entries = [
        ("Capital", CAPITAL_COLOR, ""),
        ("Accumulated contributions", CONTRIBUTIONS_COLOR, "8 4"),
        ("Target capital", TARGET_COLOR, "2 3"),
    ];
    for (i, (label, color, dash)) in entries.into_iter().enumerate() {
        let y = MARGIN_TOP + 14.0 + 16.0 * i as f64;
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="{y}" x2="{}" y2="{y}" stroke="{color}" stroke-width="2" stroke-dasharray="{dash}"/>"#,
            x + 24.0
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}">{label}</text>"#,
            x + 30.0,
            y + 4.0
        ));
    }
}
