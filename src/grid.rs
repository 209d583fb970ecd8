use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::options::MonthSpec;

pub type Attributes = BTreeMap<String, String>;

/// One table cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub content: String,
    pub attributes: Attributes,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        DayCell {
            date,
            in_current_month: true,
            is_today: false,
            content: String::new(),
            attributes: Attributes::new(),
        }
    }

    pub fn in_current_month(mut self, in_current_month: bool) -> Self {
        self.in_current_month = in_current_month;
        self
    }

    pub fn today(mut self, is_today: bool) -> Self {
        self.is_today = is_today;
        self
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Column of the weekday counted from Sunday.
    pub fn weekday_index(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }

    pub fn day_num(&self) -> u32 {
        self.date.day()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekRow {
    pub days: [DayCell; 7],
    pub week_number: Option<u32>,
}

impl WeekRow {
    pub fn first(&self) -> &DayCell {
        &self.days[0]
    }

    pub fn last(&self) -> &DayCell {
        &self.days[6]
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first().date <= date && date <= self.last().date
    }
}

/// Number of days to step back from `date` to reach `first_day`.
pub fn days_back_to(date: NaiveDate, first_day: Weekday) -> i64 {
    let from = date.weekday().num_days_from_sunday() as i64;
    let to = first_day.num_days_from_sunday() as i64;
    (from - to).rem_euclid(7)
}

/// Lays out the weeks covering `month`, starting every row on `first_day`.
///
/// `today` marks the cell of that date when it lies inside `month`.
pub fn build(month: &MonthSpec, first_day: Weekday, today: Option<NaiveDate>) -> Vec<WeekRow> {
    let first = month.first_day();
    let last = month.last_day();

    let mut rows = Vec::with_capacity(6);
    let mut row_start = first - Duration::days(days_back_to(first, first_day));

    while row_start <= last {
        let days: [DayCell; 7] = std::array::from_fn(|offset| {
            let date = row_start + Duration::days(offset as i64);
            let in_month = month.contains(date);

            DayCell::new(date)
                .in_current_month(in_month)
                .today(in_month && today == Some(date))
        });

        rows.push(WeekRow {
            days,
            week_number: None,
        });

        row_start = row_start + Duration::days(7);
    }

    rows
}
