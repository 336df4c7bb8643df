//! Sunday-based week keys and calendar math.
//!
//! Weeks run Sunday through Saturday and are numbered from the first
//! Sunday on or after January 1 (Jan 1 itself counts when it is a
//! Sunday). This deliberately differs from ISO-8601 numbering; the
//! server uses the same rule.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::model::CompletedDays;
use crate::time::Clock;

pub const DAYS_PER_WEEK: usize = 7;

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;
const MAX_WEEK: u32 = 53;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WeekKeyError {
    #[error("malformed week key: {0:?}")]
    Malformed(String),

    #[error("week key out of range: year {year}, week {week}")]
    OutOfRange { year: i32, week: u32 },
}

/// A `YYYY-W##` week identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

/// One calendar day of a week, with its display label (`"Sun 7"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub label: String,
}

impl WeekKey {
    /// Build a key from parts.
    ///
    /// # Errors
    ///
    /// Returns `WeekKeyError::OutOfRange` when the year falls outside
    /// 2000-2100 or the week outside 1-53.
    pub fn new(year: i32, week: u32) -> Result<Self, WeekKeyError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=MAX_WEEK).contains(&week) {
            return Err(WeekKeyError::OutOfRange { year, week });
        }
        Ok(Self { year, week })
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn week(&self) -> u32 {
        self.week
    }

    /// The week key containing `date`.
    ///
    /// Dates before the year's first Sunday belong to the previous
    /// year's final week.
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let start = first_sunday(date.year());
        if date < start {
            let dec31 = NaiveDate::from_ymd_opt(date.year() - 1, 12, 31)
                .expect("Dec 31 is always a valid date");
            return Self::for_date(dec31);
        }
        let week = u32::try_from((date - start).num_days() / 7).unwrap_or(0) + 1;
        Self {
            year: date.year(),
            week,
        }
    }

    /// The week containing "today" in the reference timezone.
    #[must_use]
    pub fn current(clock: &Clock) -> Self {
        Self::for_date(clock.today_reference())
    }

    /// The Sunday this week starts on.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        first_sunday(self.year) + Duration::days(i64::from(self.week - 1) * 7)
    }

    /// The seven calendar days of this week, Sunday through Saturday.
    #[must_use]
    pub fn week_dates(&self) -> Vec<WeekDay> {
        let start = self.start_date();
        (0..DAYS_PER_WEEK as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                WeekDay {
                    date,
                    label: format!("{} {}", date.format("%a"), date.day()),
                }
            })
            .collect()
    }

    /// Human label for the week span, e.g. `"Jan 7 - Jan 13, 2024"`.
    #[must_use]
    pub fn date_range_label(&self) -> String {
        let start = self.start_date();
        let end = start + Duration::days(6);
        format!(
            "{} {} - {} {}, {}",
            start.format("%b"),
            start.day(),
            end.format("%b"),
            end.day(),
            end.year()
        )
    }

    /// True when `date` falls inside this week's Sunday-Saturday range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        let start = self.start_date();
        date >= start && date < start + Duration::days(7)
    }

    /// The following week.
    ///
    /// Week numbers wrap at 53 into week 1 of the next year even for
    /// years without a 53rd week. That is a known approximation the
    /// server shares; do not "fix" it here alone.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.week >= MAX_WEEK {
            Self {
                year: self.year + 1,
                week: 1,
            }
        } else {
            Self {
                year: self.year,
                week: self.week + 1,
            }
        }
    }

    /// The preceding week, with the same 53-week wraparound rule.
    #[must_use]
    pub fn prev(&self) -> Self {
        if self.week <= 1 {
            Self {
                year: self.year - 1,
                week: MAX_WEEK,
            }
        } else {
            Self {
                year: self.year,
                week: self.week - 1,
            }
        }
    }

    /// Check the completed-days invariant for this week: at most seven
    /// entries, every date inside the Sunday-Saturday range.
    #[must_use]
    pub fn accepts_completed_days(&self, days: &CompletedDays) -> bool {
        days.len() <= DAYS_PER_WEEK && days.iter_days().all(|day| self.contains(day))
    }
}

/// First Sunday on or after January 1 of `year`.
fn first_sunday(year: i32) -> NaiveDate {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).expect("Jan 1 is always a valid date");
    let offset = (7 - jan1.weekday().num_days_from_sunday()) % 7;
    jan1 + Duration::days(i64::from(offset))
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = WeekKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || WeekKeyError::Malformed(s.to_string());
        let (year_str, week_str) = s.split_once("-W").ok_or_else(malformed)?;
        if year_str.len() != 4 || week_str.is_empty() || week_str.len() > 2 {
            return Err(malformed());
        }
        let year: i32 = year_str.parse().map_err(|_| malformed())?;
        let week: u32 = week_str.parse().map_err(|_| malformed())?;
        Self::new(year, week)
    }
}

impl Serialize for WeekKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_clock;

    fn key(s: &str) -> WeekKey {
        s.parse().expect("valid week key")
    }

    #[test]
    fn week_one_2024_starts_on_jan_7() {
        // Jan 1 2024 is a Monday, so the first Sunday is Jan 7.
        let days = key("2024-W01").week_dates();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(days[0].label, "Sun 7");
        assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2024, 1, 13).unwrap());
        assert_eq!(days[6].label, "Sat 13");
    }

    #[test]
    fn jan_1_counts_when_it_is_a_sunday() {
        // Jan 1 2023 is a Sunday.
        let days = key("2023-W01").week_dates();
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn dates_are_consecutive_and_start_on_sunday() {
        for raw in ["2023-W10", "2024-W01", "2025-W52"] {
            let days = key(raw).week_dates();
            assert_eq!(days[0].date.weekday(), chrono::Weekday::Sun);
            for pair in days.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            }
        }
    }

    #[test]
    fn date_range_label_spans_sunday_to_saturday() {
        assert_eq!(key("2024-W01").date_range_label(), "Jan 7 - Jan 13, 2024");
    }

    #[test]
    fn current_week_uses_reference_timezone() {
        // Fixed clock is 2024-01-11T00:00:00Z, i.e. Jan 10 in Los Angeles.
        assert_eq!(WeekKey::current(&fixed_clock()), key("2024-W01"));
    }

    #[test]
    fn dates_before_first_sunday_belong_to_previous_year() {
        // Jan 3 2024 precedes the first Sunday (Jan 7), so it falls in
        // the final week of 2023.
        let k = WeekKey::for_date(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(k.year(), 2023);
    }

    #[test]
    fn next_then_prev_round_trips_inside_a_year() {
        let k = key("2024-W10");
        assert_eq!(k.next().prev(), k);
        assert_eq!(k.prev().next(), k);
    }

    #[test]
    fn week_53_wraps_into_next_year() {
        assert_eq!(key("2024-W53").next(), key("2025-W01"));
        assert_eq!(key("2025-W01").prev(), key("2024-W53"));
    }

    #[test]
    fn rejects_malformed_keys() {
        for raw in ["", "2024", "2024-12", "2024-W", "2024-W00", "24-W05", "2024-W099"] {
            assert!(raw.parse::<WeekKey>().is_err(), "accepted {raw:?}");
        }
        assert!(matches!(
            "1999-W01".parse::<WeekKey>(),
            Err(WeekKeyError::OutOfRange { .. })
        ));
        assert!(matches!(
            "2024-W54".parse::<WeekKey>(),
            Err(WeekKeyError::OutOfRange { .. })
        ));
    }

    #[test]
    fn serde_round_trips_as_string() {
        let k = key("2024-W05");
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, "\"2024-W05\"");
        assert_eq!(serde_json::from_str::<WeekKey>(&json).unwrap(), k);
    }
}
