//! Display-only formatting helpers

use chrono::{DateTime, Local, Utc};

/// Format a timestamp as a local calendar date
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date_shape() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let formatted = format_date(ts);
        // local offset can shift the day, but not the shape
        assert_eq!(formatted.len(), 10);
        assert!(formatted.starts_with("2024-03-"));
    }
}
