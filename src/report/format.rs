/// Whole currency units grouped in thousands with a space: `1 234 567`.
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = format!("{:.0}", value.abs());
    let grouped = group_thousands(&digits);
    if value < 0.0 && digits.bytes().any(|b| b != b'0') {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

/// Renders a fractional rate (`0.094`) as a percentage (`9.40%`).
pub fn format_rate(fraction: f64) -> String {
    format_pct(fraction * 100.0)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
