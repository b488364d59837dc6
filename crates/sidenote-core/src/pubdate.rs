//! Publication date parsing and long-form formatting.
//!
//! Metadata dates come in as `YYYY-MM-DD` or `YYYY-MM-DD HH:MM` and are shown
//! as e.g. `Saturday, December 19th, 2015`.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CoreError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A parsed publication date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PubDate {
    date: NaiveDate,
    time: Option<NaiveTime>,
}

impl PubDate {
    /// Parse one of the two accepted layouts.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, DATE_TIME_FORMAT) {
            return Ok(Self {
                date: dt.date(),
                time: Some(dt.time()),
            });
        }

        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(|date| Self { date, time: None })
            .map_err(|e| CoreError::date(input, format!("expected YYYY-MM-DD or YYYY-MM-DD HH:MM ({e})")))
    }

    /// The calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The time of day, when one was given.
    pub fn time(&self) -> Option<NaiveTime> {
        self.time
    }

    /// Date and time, midnight when no time was given.
    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Long-form English date, e.g. `Saturday, December 19th, 2015`.
    ///
    /// The time component never appears in the output.
    pub fn english(&self) -> String {
        let day = self.date.day();
        format!(
            "{}, {} {day}{}, {}",
            self.date.format("%A"),
            self.date.format("%B"),
            ordinal_suffix(day),
            self.date.year()
        )
    }
}

impl fmt::Display for PubDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{} {}", self.date.format(DATE_FORMAT), time.format("%H:%M")),
            None => write!(f, "{}", self.date.format(DATE_FORMAT)),
        }
    }
}

/// Convert a metadata date string straight to its long English form.
pub fn pubdate_to_english(input: &str) -> Result<String> {
    PubDate::parse(input).map(|d| d.english())
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_only() {
        assert_eq!(
            pubdate_to_english("2015-12-19").unwrap(),
            "Saturday, December 19th, 2015"
        );
    }

    #[test]
    fn test_time_does_not_change_date() {
        let plain = PubDate::parse("2015-12-19").unwrap();
        let timed = PubDate::parse("2015-12-19 23:45").unwrap();

        assert_eq!(plain.english(), timed.english());
        assert_eq!(plain.date(), timed.date());
        assert!(plain.time().is_none());
        assert_eq!(timed.time().map(|t| t.format("%H:%M").to_string()).as_deref(), Some("23:45"));
        assert_eq!(timed.to_string(), "2015-12-19 23:45");
        assert!(plain.datetime() < timed.datetime());
    }

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(pubdate_to_english("2016-02-01").unwrap(), "Monday, February 1st, 2016");
        assert_eq!(pubdate_to_english("2016-02-02").unwrap(), "Tuesday, February 2nd, 2016");
        assert_eq!(pubdate_to_english("2016-02-03").unwrap(), "Wednesday, February 3rd, 2016");
        assert_eq!(pubdate_to_english("2016-02-11").unwrap(), "Thursday, February 11th, 2016");
        assert_eq!(pubdate_to_english("2016-02-12").unwrap(), "Friday, February 12th, 2016");
        assert_eq!(pubdate_to_english("2016-02-13").unwrap(), "Saturday, February 13th, 2016");
        assert_eq!(pubdate_to_english("2016-02-22").unwrap(), "Monday, February 22nd, 2016");
    }

    #[test]
    fn test_malformed_dates_fail() {
        for bad in ["2015/12/19", "December 19, 2015", "2015-13-01", "2015-12-19T10:00", ""] {
            let err = PubDate::parse(bad).unwrap_err();
            assert!(matches!(err, CoreError::Date { .. }), "{bad}");
        }
    }
}
