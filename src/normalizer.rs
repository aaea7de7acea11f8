//! Indonesian-locale numeric literals to canonical numbers.
//!
//! Articles write `16.100` for sixteen thousand one hundred and `0,43` for
//! zero point four three. Literals may carry currency or unit tokens
//! (`Rp`, `US$`, `/gram`, `%`) which are dropped before parsing. Any literal
//! that does not survive normalization is reported as `None`; callers treat it
//! exactly like a field that was never matched.

/// How a captured literal is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// `.` groups thousands, `,` is the decimal point.
    Grouped,
    /// Percent figure: no thousands grouping, `.` or `,` as decimal point.
    Percent,
}

impl NumberFormat {
    pub fn normalize(self, raw: &str) -> Option<f64> {
        match self {
            NumberFormat::Grouped => normalize_grouped(raw),
            NumberFormat::Percent => normalize_percent(raw),
        }
    }
}

/// Parses a grouped literal such as `Rp 1.000.000/gram` or `4.997,7`.
pub fn normalize_grouped(raw: &str) -> Option<f64> {
    let retained = retain_numeric(raw);
    let canonical: String = retained
        .chars()
        .filter(|&ch| ch != '.')
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    parse_finite(&canonical)
}

/// Parses a percent literal such as `-0.5%` or `0,43 %`.
pub fn normalize_percent(raw: &str) -> Option<f64> {
    let without_unit = raw.replace('%', "");
    let canonical = retain_numeric(&without_unit).replace(',', ".");
    parse_finite(&canonical)
}

/// Keeps digits, both separators and a sign written before the first digit.
fn retain_numeric(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '0'..='9' | '.' | ',' => out.push(ch),
            '-' | '+' if out.is_empty() => out.push(ch),
            _ => {}
        }
    }
    out
}

fn parse_finite(canonical: &str) -> Option<f64> {
    canonical
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
