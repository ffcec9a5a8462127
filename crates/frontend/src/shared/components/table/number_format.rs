//! Number formatting for table cells

/// Groups the integer part by thousands with `,` and keeps `decimals` digits
///
/// ```
/// use frontend::shared::components::table::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// Amount with two decimals and a currency symbol in front
pub fn format_money(value: f64, currency: &str) -> String {
    let body = format_number_with_decimals(value.abs(), 2);
    if value < 0.0 {
        format!("-{}{}", currency, body)
    } else {
        format!("{}{}", currency, body)
    }
}

pub fn format_optional_money(value: Option<f64>, currency: &str) -> String {
    value
        .map(|v| format_money(v, currency))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1,235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
        assert_eq!(format_number_with_decimals(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
        assert_eq!(format_number_with_decimals(-1234.0, 0), "-1,234");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0, "₹"), "₹0.00");
        assert_eq!(format_money(125000.5, "₹"), "₹125,000.50");
        assert_eq!(format_money(-42.0, "$"), "-$42.00");
        assert_eq!(format_optional_money(None, "₹"), "-");
    }
}
