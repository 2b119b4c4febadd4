//! Display formatting for statement values
//!
//! Amounts use the European convention: `.` groups thousands and `,`
//! marks decimals, so `1234.5` renders as `1.234,50`.

/// Format a monetary amount with exactly two decimals.
///
/// Absent and non-finite values format as zero.
pub fn format_amount(value: Option<f64>) -> String {
    let value = value.filter(|v| v.is_finite()).unwrap_or(0.0);

    let fixed = format!("{:.2}", value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some(parts) => parts,
        None => (unsigned, "00"),
    };

    format!("{}{},{}", sign, group_thousands(int_part), frac_part)
}

/// Format a 0–1 fraction as a whole percentage, e.g. `0.07` as `7%`.
///
/// Absent and non-finite values format as `0%`. A fractional percentage
/// would carry the `,` decimal marker, though whole-percent rounding
/// never produces one.
pub fn format_percentage(value: Option<f64>) -> String {
    let value = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    format!("{:.0}%", value * 100.0).replace('.', ",")
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*byte as char);
    }

    grouped
}
