use chrono::{DateTime, NaiveDate, Utc};

/// Reference point for launches whose date is `null`
pub const UNIX_EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

const UNITS: [(&str, &str); 6] = [
    ("year", "in a year"),
    ("month", "in a month"),
    ("day", "in a day"),
    ("hour", "in an hour"),
    ("minute", "in a minute"),
    ("second", "in a second"),
];

fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Date-only values are taken as UTC midnight
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coarse relative time of `timestamp` as seen from `now`.
///
/// Months are 30 days and years 12 months. A magnitude of one is phrased as
/// "in a minute" (etc.) whether the date is past or not; future or
/// unparseable timestamps give "just now".
pub fn time_ago(timestamp: &str, now: DateTime<Utc>) -> String {
    let Some(date) = parse_timestamp(timestamp) else {
        return "just now".to_string();
    };

    let seconds = (now - date).num_milliseconds().div_euclid(1000);
    let minutes = seconds.div_euclid(60);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);
    let months = days.div_euclid(30);
    let years = months.div_euclid(12);

    let buckets = [years, months, days, hours, minutes, seconds];
    for (value, (unit, singular)) in buckets.into_iter().zip(UNITS) {
        if value > 0 {
            return if value == 1 {
                singular.to_string()
            } else {
                format!("{} {}s ago", value, unit)
            };
        }
    }

    "just now".to_string()
}
