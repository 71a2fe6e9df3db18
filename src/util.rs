// Formatting helpers shared by the panels.

use chrono::{DateTime, Utc};

/// Integer with comma thousands separators, e.g. `2,450`.
pub fn format_points(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole hours until `expires_at`, rounded up and never negative.
pub fn hours_left(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (expires_at - now).num_milliseconds();
    if ms <= 0 {
        return 0;
    }
    (ms as f64 / 3_600_000.0).ceil() as i64
}

pub fn now_secs() -> f64 {
    js_sys::Date::now() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(999), "999");
        assert_eq!(format_points(2450), "2,450");
        assert_eq!(format_points(1_234_567), "1,234,567");
    }

    #[test]
    fn test_hours_left_rounds_up() {
        let now = Utc::now();
        assert_eq!(hours_left(now + Duration::hours(18), now), 18);
        assert_eq!(hours_left(now + Duration::minutes(61), now), 2);
        assert_eq!(hours_left(now + Duration::minutes(1), now), 1);
    }

    #[test]
    fn test_hours_left_never_negative() {
        let now = Utc::now();
        assert_eq!(hours_left(now - Duration::hours(3), now), 0);
        assert_eq!(hours_left(now, now), 0);
    }
}
