use chrono::{DateTime, NaiveDateTime, Utc};

pub const NORM_DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const NORM_DATETIME_MICROS_FMT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const PARSE_DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[inline]
pub fn from_timestamp_micros_utc(micros: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
}

pub fn format_timestamp_micros(micros: i64) -> Option<String> {
    from_timestamp_micros_utc(micros).map(|datetime| datetime.format(NORM_DATETIME_MICROS_FMT).to_string())
}

/// Accepts `%Y-%m-%d %H:%M:%S` with an optional fraction, or RFC 3339.
pub fn parse_timestamp_micros(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, PARSE_DATETIME_FMT) {
        return Some(datetime.and_utc().timestamp_micros());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|datetime| datetime.timestamp_micros())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_micros() {
        assert_eq!(format_timestamp_micros(0).unwrap(), "1970-01-01 00:00:00.000000");
        assert_eq!(format_timestamp_micros(3_600_000_001).unwrap(), "1970-01-01 01:00:00.000001");
    }

    #[test]
    fn test_parse_timestamp_micros() {
        assert_eq!(parse_timestamp_micros("1970-01-01 01:00:00.000001"), Some(3_600_000_001));
        assert_eq!(parse_timestamp_micros("1970-01-01 01:00:00"), Some(3_600_000_000));
        assert_eq!(parse_timestamp_micros("1970-01-01T01:00:00+01:00"), Some(0));
        assert_eq!(parse_timestamp_micros("yesterday"), None);
    }
}
