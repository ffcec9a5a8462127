//! Date formatting for list cells.
//!
//! The API sends ISO strings (`2026-11-02` or `2026-11-02T09:30:00.000Z`).
//! Tables sort on the raw ISO value and only format for display.

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn split_date(date_part: &str) -> Option<(&str, &'static str, &str)> {
    let mut parts = date_part.splitn(3, '-');
    let year = parts.next()?;
    let month: usize = parts.next()?.parse().ok()?;
    let day = parts.next()?;
    let month_name = MONTHS.get(month.checked_sub(1)?)?;
    if year.len() != 4 || day.is_empty() || day.len() > 2 {
        return None;
    }
    Some((year, month_name, day))
}

/// "2026-11-02" or "2026-11-02T09:30:00Z" -> "02 Nov 2026"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match split_date(date_part) {
        Some((year, month, day)) => format!("{:0>2} {} {}", day, month, year),
        None => date_str.to_string(),
    }
}

/// "2026-11-02T09:30:15.123Z" -> "02 Nov 2026 09:30"
pub fn format_datetime(datetime_str: &str) -> String {
    match datetime_str.split_once('T') {
        Some((date_part, time_part)) if split_date(date_part).is_some() => {
            let time: String = time_part.chars().take(5).collect();
            format!("{} {}", format_date(date_part), time)
        }
        _ => datetime_str.to_string(),
    }
}

/// Formats an optional date, "-" when absent
pub fn format_optional_date(date: Option<&str>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-11-02"), "02 Nov 2026");
        assert_eq!(format_date("2026-03-15T14:02:26.123Z"), "15 Mar 2026");
        assert_eq!(format_date("2026-1-5"), "05 Jan 2026");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2026-12-31T23:59:59Z"),
            "31 Dec 2026 23:59"
        );
    }

    #[test]
    fn test_invalid_input_is_returned_as_is() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date("2026-13-01"), "2026-13-01");
        assert_eq!(format_datetime("soon"), "soon");
        assert_eq!(format_optional_date(None), "-");
    }
}
