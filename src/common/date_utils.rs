use chrono::{Datelike, NaiveDate};

pub const NORM_DATE_FMT: &str = "%Y-%m-%d";

// NaiveDate::num_days_from_ce() of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Days since 1970-01-01 to a calendar date, `None` when out of chrono's range.
pub fn num_days_to_date(days: i32) -> Option<NaiveDate> {
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE).and_then(NaiveDate::from_num_days_from_ce_opt)
}

pub fn date_to_num_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn format_date(days: i32) -> Option<String> {
    num_days_to_date(days).map(|date| date.format(NORM_DATE_FMT).to_string())
}

pub fn parse_date(s: &str) -> Option<i32> {
    NaiveDate::parse_from_str(s.trim(), NORM_DATE_FMT).ok().map(date_to_num_days)
}
