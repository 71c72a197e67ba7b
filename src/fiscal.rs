//! Fiscal calendar: maps calendar dates onto the 16th-to-15th reference month
//! used by every aggregation, and carries the date helpers for installment
//! projection and the calendar grid.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day of the fiscal cycle: the 16th of a month already belongs to the
/// next reference month.
pub const CYCLE_START_DAY: u32 = 16;

const MONTH_NAMES_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// A fiscal reference month, serialized as `"YYYY-MM"` to match the stored
/// transaction format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct RefMonth {
    year: i32,
    month: u32,
}

impl RefMonth {
    /// Builds a reference month from its components. `month` must be 1-12.
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Reference month containing `date`: from the 16th onward the date rolls
    /// into the next calendar month, rolling the year past December.
    pub fn for_date(date: NaiveDate) -> Self {
        let mut year = date.year();
        let mut month = date.month();
        if date.day() >= CYCLE_START_DAY {
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        Self { year, month }
    }

    /// Shifts the reference month by an arbitrary number of months, positive
    /// or negative, rolling the year as needed.
    pub fn navigate(&self, delta: i32) -> Self {
        let index = self.year * 12 + self.month as i32 - 1 + delta;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Calendar date on which a fixed expense with `due_day` falls inside this
    /// reference month. Exact inverse of [`RefMonth::for_date`]: due days from
    /// the 16th belong to the 16-31 window of the *previous* calendar month.
    ///
    /// Days past the end of the target month clamp to its last day; the
    /// clamped day is never below 28, so the round-trip law
    /// `RefMonth::for_date(m.due_date(d)) == m` holds for every day 1-31.
    pub fn due_date(&self, due_day: u32) -> NaiveDate {
        let (mut year, mut month) = (self.year, self.month);
        if due_day >= CYCLE_START_DAY {
            if month == 1 {
                month = 12;
                year -= 1;
            } else {
                month -= 1;
            }
        }
        clamped_ymd(year, month, due_day)
    }

    /// Localized "Month YYYY" label, e.g. `Março 2024`.
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES_PT[self.month as usize - 1], self.year)
    }
}

impl fmt::Display for RefMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<RefMonth> for String {
    fn from(value: RefMonth) -> Self {
        value.to_string()
    }
}

impl FromStr for RefMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid reference month `{s}`"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in `{s}`"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in `{s}`"))?;
        if !(1..=12).contains(&month) {
            return Err(format!("month out of range in `{s}`"));
        }
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for RefMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Shifts a date by whole calendar months, keeping the day-of-month and
/// clamping to the last day when the target month is shorter. Used to project
/// installment due dates.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month() as i32 - 1 + delta;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    clamped_ymd(year, month, date.day())
}

/// Number of days in the given calendar month, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// Weekday index of day 1 of the month, with 0 = Sunday, to drive a
/// 7-column calendar grid with leading blank cells.
pub fn first_weekday(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Formats a date as `DD/MM/YYYY`. The day-first ordering is a contract
/// consumed by the report views.
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn clamped_ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(days_in_month(year, month)).max(1);
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day is in range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_fifteen_stays_in_calendar_month() {
        assert_eq!(RefMonth::for_date(date(2024, 1, 15)).to_string(), "2024-01");
    }

    #[test]
    fn day_sixteen_rolls_into_next_month() {
        assert_eq!(RefMonth::for_date(date(2024, 1, 16)).to_string(), "2024-02");
    }

    #[test]
    fn december_rolls_the_year() {
        assert_eq!(RefMonth::for_date(date(2024, 12, 20)).to_string(), "2025-01");
    }

    #[test]
    fn navigate_handles_both_directions() {
        assert_eq!(RefMonth::new(2024, 1).navigate(-1).to_string(), "2023-12");
        assert_eq!(RefMonth::new(2024, 12).navigate(1).to_string(), "2025-01");
        assert_eq!(RefMonth::new(2024, 6).navigate(-18).to_string(), "2022-12");
        assert_eq!(RefMonth::new(2024, 6).navigate(30).to_string(), "2026-12");
    }

    #[test]
    fn due_date_round_trips_for_every_day() {
        for month in [RefMonth::new(2024, 1), RefMonth::new(2024, 3), RefMonth::new(2025, 12)] {
            for due_day in 1..=31 {
                let date = month.due_date(due_day);
                assert_eq!(
                    RefMonth::for_date(date),
                    month,
                    "due day {due_day} of {month} produced {date}"
                );
            }
        }
    }

    #[test]
    fn due_date_from_sixteenth_lands_in_previous_calendar_month() {
        assert_eq!(RefMonth::new(2024, 2).due_date(20), date(2024, 1, 20));
    }

    #[test]
    fn due_date_clamps_short_months() {
        // Due day 30 inside the March bucket maps to February.
        assert_eq!(RefMonth::new(2024, 3).due_date(30), date(2024, 2, 29));
    }

    #[test]
    fn add_months_preserves_day_and_clamps_overflow() {
        assert_eq!(add_months(date(2024, 1, 10), 2), date(2024, 3, 10));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 3, 15), -3), date(2023, 12, 15));
        assert_eq!(add_months(date(2024, 11, 20), 14), date(2026, 1, 20));
    }

    #[test]
    fn month_lengths_account_for_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
    }

    #[test]
    fn first_weekday_is_sunday_indexed() {
        // 2024-09-01 was a Sunday; 2024-10-01 a Tuesday.
        assert_eq!(first_weekday(2024, 9), 0);
        assert_eq!(first_weekday(2024, 10), 2);
    }

    #[test]
    fn labels_and_formats() {
        assert_eq!(RefMonth::new(2024, 3).label(), "Março 2024");
        assert_eq!(format_date_br(date(2024, 1, 5)), "05/01/2024");
    }

    #[test]
    fn parses_and_rejects_reference_strings() {
        let parsed: RefMonth = "2024-07".parse().unwrap();
        assert_eq!(parsed, RefMonth::new(2024, 7));
        assert!("2024-13".parse::<RefMonth>().is_err());
        assert!("garbage".parse::<RefMonth>().is_err());
    }
}
