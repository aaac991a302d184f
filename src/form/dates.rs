use chrono::NaiveDate;

/// Parse the date part of `YYYY-MM-DD`, an ISO timestamp, or `dd.mm.yyyy`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Some(head) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(s, "%d.%m.%Y").ok()
}

/// Value for `<input type="date">`: `YYYY-MM-DD`, or the raw text if unparseable.
pub fn input_value(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Turkish display form `dd.mm.yyyy`, or the raw text if unparseable.
pub fn display(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Rewrite `dd.mm.yyyy` to `YYYY-MM-DD`; anything else passes through.
pub fn normalize_dotted(raw: &str) -> String {
    let s = raw.trim();
    match NaiveDate::parse_from_str(s, "%d.%m.%Y") {
        Ok(d) => d.format("%Y-%m-%d").to_string(),
        Err(_) => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_timestamp_and_dotted() {
        let d = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(parse_date("2025-05-01T10:30:00"), Some(d));
        assert_eq!(parse_date("2025-05-01"), Some(d));
        assert_eq!(parse_date("01.05.2025"), Some(d));
        assert_eq!(parse_date("yarın"), None);
    }

    #[test]
    fn display_and_input_forms() {
        assert_eq!(display("2025-05-01T10:30:00"), "01.05.2025");
        assert_eq!(input_value("01.05.2025"), "2025-05-01");
        assert_eq!(display(""), "");
        assert_eq!(normalize_dotted("01.05.2025"), "2025-05-01");
        assert_eq!(normalize_dotted("2025-05-01T10:30:00"), "2025-05-01T10:30:00");
    }
}
