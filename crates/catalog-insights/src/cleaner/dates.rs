//! Release date parsing.

use chrono::{NaiveDate, NaiveDateTime};

/// Date-only layouts, tried in order.
const DATE_FORMATS: [&str; 8] = [
    "%m/%d/%y", // 1/1/20, must precede %Y which would read "20" as year 20
    "%m/%d/%Y", // 1/1/2020
    "%B %d, %Y", // August 14, 2020 (also Aug 14, 2020)
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%d-%b-%y", // 14-Aug-20
    "%d-%b-%Y",
];

/// Date-time layouts; only the date part is kept.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Parse a raw release date. Surrounding whitespace is ignored; anything
/// unrecognised yields `None`. A bare year or year-month reads as the first
/// day of that period.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| parse_partial(value))
}

/// `2020` or `2020-03`. The year must have four digits.
fn parse_partial(value: &str) -> Option<NaiveDate> {
    let (year, month) = match value.split_once('-') {
        Some((year, month)) => (year, month.parse().ok()?),
        None => (value, 1),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_month_day_year() {
        assert_eq!(parse_release_date("1/1/2020"), ymd(2020, 1, 1));
        assert_eq!(parse_release_date("1/1/20"), ymd(2020, 1, 1));
        assert_eq!(parse_release_date("12/31/2019"), ymd(2019, 12, 31));
    }

    #[test]
    fn test_month_name_forms() {
        assert_eq!(parse_release_date("August 14, 2020"), ymd(2020, 8, 14));
        assert_eq!(parse_release_date(" September 25, 2021"), ymd(2021, 9, 25));
        assert_eq!(parse_release_date("Aug 4, 2017"), ymd(2017, 8, 4));
        assert_eq!(parse_release_date("14-Aug-20"), ymd(2020, 8, 14));
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(parse_release_date("2019-03-08"), ymd(2019, 3, 8));
        assert_eq!(parse_release_date("2019-03-08 00:00:00"), ymd(2019, 3, 8));
        assert_eq!(parse_release_date("2019-03-08T10:30:00"), ymd(2019, 3, 8));
    }

    #[test]
    fn test_partial_dates_start_of_period() {
        assert_eq!(parse_release_date("2020"), ymd(2020, 1, 1));
        assert_eq!(parse_release_date(" 2020-01 "), ymd(2020, 1, 1));
        assert_eq!(parse_release_date("2019-11"), ymd(2019, 11, 1));
        assert_eq!(parse_release_date("2019-13"), None);
        assert_eq!(parse_release_date("20-01"), None);
        assert_eq!(parse_release_date("120"), None);
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_release_date("bad-date"), None);
        assert_eq!(parse_release_date(""), None);
        assert_eq!(parse_release_date("   "), None);
        assert_eq!(parse_release_date("2/30/2020"), None);
    }
}
