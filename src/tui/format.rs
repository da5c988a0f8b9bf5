//! Number and text formatting for market data.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Formats a price with thousands separators. Sub-unit prices keep more
/// decimals so small coins don't render as `0.00`.
pub fn format_amount(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "-".to_string();
    };
    let decimals = if value.abs() >= 1.0 || value == 0.0 {
        2
    } else if value.abs() >= 0.01 {
        4
    } else {
        8
    };
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, ""));
    let sign = if value < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{}", group_thousands(int_part))
    } else {
        format!("{sign}{}.{frac_part}", group_thousands(int_part))
    }
}

/// Large totals (market cap, volume) as whole numbers.
pub fn format_total(value: Option<f64>) -> String {
    match value {
        Some(v) => group_thousands(&format!("{:.0}", v.max(0.0))),
        None => "-".to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.2}%"),
        None => "-".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Truncate to `max_width` display columns, adding "..." if needed.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width - 3 {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str("...");
    out
}
