use chrono::{Datelike, NaiveDate, Weekday};
use serde_with::DeserializeFromStr;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};
use crate::grid::{days_back_to, WeekRow};

/// Week numbering convention for the week-number column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, DeserializeFromStr)]
pub enum WeekNumberFormat {
    /// Monday based weeks, week 1 holds the first Thursday of the year.
    #[default]
    Iso8601,
    /// Week 1 holds January 1st, weeks start on the row's first weekday.
    UsCanada,
}

impl WeekNumberFormat {
    pub fn week_number(self, row: &WeekRow) -> u32 {
        match self {
            WeekNumberFormat::Iso8601 => iso8601(row),
            WeekNumberFormat::UsCanada => us_canada(row),
        }
    }
}

impl FromStr for WeekNumberFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "iso8601" | "iso" => Ok(WeekNumberFormat::Iso8601),
            "us_canada" | "us" => Ok(WeekNumberFormat::UsCanada),
            _ => Err(Error::new(
                ErrorKind::InvalidArgument,
                &format!("Week number format '{}' not recognized", s),
            )),
        }
    }
}

impl fmt::Display for WeekNumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekNumberFormat::Iso8601 => write!(f, "iso8601"),
            WeekNumberFormat::UsCanada => write!(f, "us_canada"),
        }
    }
}

/// ISO 8601 week of the row's Thursday.
pub fn iso8601(row: &WeekRow) -> u32 {
    let thursday = row
        .days
        .iter()
        .map(|cell| cell.date)
        .find(|date| date.weekday() == Weekday::Thu)
        .unwrap_or(row.first().date);

    thursday.iso_week().week()
}

pub fn us_canada(row: &WeekRow) -> u32 {
    let start = row.first().date;
    let year = row.last().date.year();

    let jan_first = match NaiveDate::from_ymd_opt(year, 1, 1) {
        Some(date) => date,
        None => return 1,
    };
    let anchor = jan_first - chrono::Duration::days(days_back_to(jan_first, start.weekday()));

    1 + ((start - anchor).num_days() / 7) as u32
}

/// Fills in the week number of every row.
pub fn assign(rows: &mut [WeekRow], format: WeekNumberFormat) {
    for row in rows.iter_mut() {
        row.week_number = Some(format.week_number(row));
    }
}
