//! Number formatting for table cells

/// `$1,234.56` style. Prices under a dollar keep more precision.
pub fn format_usd(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() >= 1.0 => format!("${}", group_thousands(&format!("{:.2}", v))),
        Some(v) if v == 0.0 => "$0.00".to_string(),
        Some(v) => format!("${:.6}", v),
        None => "-".to_string(),
    }
}

/// Signed percentage with two decimals, e.g. `-1.23%`
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => "-".to_string(),
    }
}

/// Plain amount with thousands separators, no decimals
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) => group_thousands(&format!("{:.0}", v)),
        None => "-".to_string(),
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
