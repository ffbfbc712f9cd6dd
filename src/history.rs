use chrono::{DateTime, Duration, Months, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static HISTORY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+) (hours?|days?|weeks?|months?|years?)$").expect("valid history pattern")
});

/// Message shown for any rejected `--history` value
pub const HISTORY_USAGE: &str = "Argument --history not valid. Valid argument contains a positive \
    number and a unit. For example '1 month' or '2 days'. Supported units are: hour, day, week, \
    month, year";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryUnit {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl HistoryUnit {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "hour" | "hours" => Some(HistoryUnit::Hour),
            "day" | "days" => Some(HistoryUnit::Day),
            "week" | "weeks" => Some(HistoryUnit::Week),
            "month" | "months" => Some(HistoryUnit::Month),
            "year" | "years" => Some(HistoryUnit::Year),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    Malformed(String),
    ZeroCount,
    UnknownUnit(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Malformed(input) => write!(f, "'{}' is not of the form '<N> <unit>'", input),
            HistoryError::ZeroCount => write!(f, "count must be greater than zero"),
            HistoryError::UnknownUnit(unit) => write!(f, "history unit '{}' is not supported", unit),
        }
    }
}

impl std::error::Error for HistoryError {}

/// How far back into pull request history a report looks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub count: u32,
    pub unit: HistoryUnit,
}

impl HistoryWindow {
    /// Parse a window such as "1 day", "2 weeks" or "6 months".
    ///
    /// The shape is checked first, then the count and unit, so each failure
    /// gets its own error.
    pub fn parse(s: &str) -> Result<Self, HistoryError> {
        let captures = HISTORY_PATTERN
            .captures(s)
            .ok_or_else(|| HistoryError::Malformed(s.to_string()))?;

        let count: u32 = captures[1]
            .parse()
            .map_err(|_| HistoryError::Malformed(s.to_string()))?;
        if count == 0 {
            return Err(HistoryError::ZeroCount);
        }

        let unit = HistoryUnit::parse(&captures[2])
            .ok_or_else(|| HistoryError::UnknownUnit(captures[2].to_string()))?;

        Ok(HistoryWindow { count, unit })
    }

    /// The instant `now - window`. Months and years follow the calendar,
    /// clamping to the end of shorter months.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let count = self.count;
        let cutoff = match self.unit {
            HistoryUnit::Hour => now.checked_sub_signed(Duration::hours(count.into())),
            HistoryUnit::Day => now.checked_sub_signed(Duration::days(count.into())),
            HistoryUnit::Week => now.checked_sub_signed(Duration::weeks(count.into())),
            HistoryUnit::Month => now.checked_sub_months(Months::new(count)),
            HistoryUnit::Year => count
                .checked_mul(12)
                .and_then(|months| now.checked_sub_months(Months::new(months))),
        };
        cutoff.unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            HistoryUnit::Hour => "hour",
            HistoryUnit::Day => "day",
            HistoryUnit::Week => "week",
            HistoryUnit::Month => "month",
            HistoryUnit::Year => "year",
        };
        let plural = if self.count == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.count, unit, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_singular_and_plural_units() {
        let cases = [
            ("1 hour", 1, HistoryUnit::Hour),
            ("12 hours", 12, HistoryUnit::Hour),
            ("1 day", 1, HistoryUnit::Day),
            ("3 days", 3, HistoryUnit::Day),
            ("2 weeks", 2, HistoryUnit::Week),
            ("1 month", 1, HistoryUnit::Month),
            ("6 months", 6, HistoryUnit::Month),
            ("1 year", 1, HistoryUnit::Year),
        ];
        for (input, count, unit) in cases {
            let window = HistoryWindow::parse(input).unwrap();
            assert_eq!(window, HistoryWindow { count, unit }, "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_zero_count() {
        assert_eq!(HistoryWindow::parse("0 days"), Err(HistoryError::ZeroCount));
    }

    #[test]
    fn test_parse_malformed() {
        for input in ["", "day", "1day", "1  day", "-1 day", "1.5 days", "one day", "1 day ago", " 1 day"] {
            assert!(
                matches!(HistoryWindow::parse(input), Err(HistoryError::Malformed(_))),
                "expected {:?} to be malformed",
                input
            );
        }
    }

    #[test]
    fn test_parse_unknown_unit() {
        assert!(matches!(
            HistoryWindow::parse("3 fortnights"),
            Err(HistoryError::Malformed(_))
        ));
        assert_eq!(HistoryUnit::parse("fortnight"), None);
    }

    #[test]
    fn test_parse_count_overflow() {
        assert!(matches!(
            HistoryWindow::parse("99999999999 days"),
            Err(HistoryError::Malformed(_))
        ));
    }

    #[test]
    fn test_cutoff_fixed_units() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let hours = HistoryWindow::parse("5 hours").unwrap();
        assert_eq!(now - hours.cutoff(now), Duration::hours(5));
        let days = HistoryWindow::parse("2 days").unwrap();
        assert_eq!(now - days.cutoff(now), Duration::days(2));
        let weeks = HistoryWindow::parse("3 weeks").unwrap();
        assert_eq!(now - weeks.cutoff(now), Duration::weeks(3));
    }

    #[test]
    fn test_cutoff_calendar_units() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 8, 30, 0).unwrap();
        let month = HistoryWindow::parse("1 month").unwrap();
        assert_eq!(
            month.cutoff(now),
            Utc.with_ymd_and_hms(2024, 2, 29, 8, 30, 0).unwrap()
        );
        let years = HistoryWindow::parse("2 years").unwrap();
        assert_eq!(
            years.cutoff(now),
            Utc.with_ymd_and_hms(2022, 3, 31, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_cutoff_clamps_on_overflow() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let window = HistoryWindow { count: u32::MAX, unit: HistoryUnit::Year };
        assert_eq!(window.cutoff(now), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_display() {
        assert_eq!(HistoryWindow::parse("1 day").unwrap().to_string(), "1 day");
        assert_eq!(HistoryWindow::parse("4 weeks").unwrap().to_string(), "4 weeks");
    }
}
