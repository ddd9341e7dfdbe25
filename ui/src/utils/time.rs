use jiff::{Zoned, civil::Date};

/// Today's date in the browser's timezone.
pub fn today() -> Date {
    Zoned::now().date()
}

/// Parse the value of an `<input type="date">`. Blank or malformed input
/// yields None.
pub fn parse_date_input(raw: &str) -> Option<Date> {
    raw.trim().parse::<Date>().ok()
}

/// Render a number of minutes as e.g. `7h 30m`, `45m` or `2h`.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.unsigned_abs();
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{sign}{m}m"),
        (h, 0) => format!("{sign}{h}h"),
        (h, m) => format!("{sign}{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(450), "7h 30m");
        assert_eq!(format_minutes(-20), "-20m");
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(
            parse_date_input("2026-10-19"),
            Some(jiff::civil::date(2026, 10, 19))
        );
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("19/10/2026"), None);
    }
}
