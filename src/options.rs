use chrono::{Datelike, Duration, Local, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::locale::LocaleNames;
use crate::week::WeekNumberFormat;

/// A validated year and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpec {
    year: i32,
    month: Month,
}

impl MonthSpec {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let month = Month::from_u32(month).ok_or_else(|| {
            Error::invalid_argument(&format!("Month {} is not within 1..=12", month))
        })?;

        let spec = MonthSpec { year, month };

        // Leading and trailing weeks may reach up to six days beyond the month.
        let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
        let fits = first
            .and_then(|first| first.checked_sub_signed(Duration::days(6)))
            .and_then(|_| spec.next_first_day())
            .and_then(|next| next.checked_add_signed(Duration::days(6)))
            .is_some();

        if fits {
            Ok(spec)
        } else {
            Err(Error::invalid_argument(&format!(
                "Year {} is out of the supported range",
                year
            )))
        }
    }

    /// Validates possibly missing parts.
    pub fn from_parts(year: Option<i32>, month: Option<u32>) -> Result<Self> {
        let year = year.ok_or_else(|| Error::invalid_argument("No year given"))?;
        let month = month.ok_or_else(|| Error::invalid_argument("No month given"))?;
        MonthSpec::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month_number(&self) -> u32 {
        self.month.number_from_month()
    }

    fn next_first_day(&self) -> Option<NaiveDate> {
        if self.month == Month::December {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month_number() + 1, 1)
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month_number(), 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next_first_day()
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn num_days(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month_number()
    }

    /// The month before this one, if it is still renderable.
    pub fn prev(&self) -> Option<Self> {
        let prev = self.month.pred();
        let year = if prev == Month::December {
            self.year - 1
        } else {
            self.year
        };
        MonthSpec::new(year, prev.number_from_month()).ok()
    }

    /// The month after this one, if it is still renderable.
    pub fn next(&self) -> Option<Self> {
        let next = self.month.succ();
        let year = if next == Month::January {
            self.year + 1
        } else {
            self.year
        };
        MonthSpec::new(year, next.number_from_month()).ok()
    }
}

impl fmt::Display for MonthSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month_number())
    }
}

/// Overrides for the CSS class slots.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CssClassOptions {
    pub table: Option<String>,
    pub month_name: Option<String>,
    pub day_name: Option<String>,
    pub day: Option<String>,
    pub other_month: Option<String>,
    pub weekend_day: Option<String>,
    pub today: Option<String>,
    pub week_number: Option<String>,
}

impl CssClassOptions {
    fn merge(self, other: CssClassOptions) -> CssClassOptions {
        CssClassOptions {
            table: other.table.or(self.table),
            month_name: other.month_name.or(self.month_name),
            day_name: other.day_name.or(self.day_name),
            day: other.day.or(self.day),
            other_month: other.other_month.or(self.other_month),
            weekend_day: other.weekend_day.or(self.weekend_day),
            today: other.today.or(self.today),
            week_number: other.week_number.or(self.week_number),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CssClasses {
    pub table: String,
    pub month_name: String,
    pub day_name: String,
    pub day: String,
    pub other_month: String,
    pub weekend_day: String,
    pub today: String,
    pub week_number: String,
}

impl Default for CssClasses {
    fn default() -> Self {
        CssClasses {
            table: "calendar".to_owned(),
            month_name: "monthName".to_owned(),
            day_name: "dayName".to_owned(),
            day: "day".to_owned(),
            other_month: "otherMonth".to_owned(),
            weekend_day: "weekendDay".to_owned(),
            today: "today".to_owned(),
            week_number: "weekNumber".to_owned(),
        }
    }
}

impl CssClasses {
    fn apply(self, overrides: &CssClassOptions) -> CssClasses {
        let pick = |value: &Option<String>, default: String| value.clone().unwrap_or(default);
        CssClasses {
            table: pick(&overrides.table, self.table),
            month_name: pick(&overrides.month_name, self.month_name),
            day_name: pick(&overrides.day_name, self.day_name),
            day: pick(&overrides.day, self.day),
            other_month: pick(&overrides.other_month, self.other_month),
            weekend_day: pick(&overrides.weekend_day, self.weekend_day),
            today: pick(&overrides.today, self.today),
            week_number: pick(&overrides.week_number, self.week_number),
        }
    }
}

/// Partial render configuration. Unset fields fall back to defaults when
/// resolved; keys this crate does not know end up in `extra`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    pub first_day_of_week: Option<u32>,
    pub abbreviate_day_names: Option<bool>,
    pub show_today_marker: Option<bool>,
    pub today: Option<NaiveDate>,
    pub show_week_numbers: Option<bool>,
    pub week_number_format: Option<WeekNumberFormat>,
    pub css_classes: CssClassOptions,
    pub table_id: Option<String>,
    pub table_summary: Option<String>,
    pub calendar_title: Option<String>,
    pub show_month_header: Option<bool>,
    pub previous_month_text: Option<String>,
    pub next_month_text: Option<String>,
    pub week_number_title: Option<String>,
    pub accessible: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl RenderOptions {
    /// Lays `other` over `self`; every key set in `other` wins.
    pub fn merge(self, other: RenderOptions) -> RenderOptions {
        let mut extra = self.extra;
        extra.extend(other.extra);

        RenderOptions {
            first_day_of_week: other.first_day_of_week.or(self.first_day_of_week),
            abbreviate_day_names: other.abbreviate_day_names.or(self.abbreviate_day_names),
            show_today_marker: other.show_today_marker.or(self.show_today_marker),
            today: other.today.or(self.today),
            show_week_numbers: other.show_week_numbers.or(self.show_week_numbers),
            week_number_format: other.week_number_format.or(self.week_number_format),
            css_classes: self.css_classes.merge(other.css_classes),
            table_id: other.table_id.or(self.table_id),
            table_summary: other.table_summary.or(self.table_summary),
            calendar_title: other.calendar_title.or(self.calendar_title),
            show_month_header: other.show_month_header.or(self.show_month_header),
            previous_month_text: other.previous_month_text.or(self.previous_month_text),
            next_month_text: other.next_month_text.or(self.next_month_text),
            week_number_title: other.week_number_title.or(self.week_number_title),
            accessible: other.accessible.or(self.accessible),
            extra,
        }
    }

    pub fn resolve(
        &self,
        year: Option<i32>,
        month: Option<u32>,
        names: &LocaleNames,
    ) -> Result<ResolvedOptions> {
        let spec = MonthSpec::from_parts(year, month)?;
        let month_name = names.month_name(spec.month());

        let today = if self.show_today_marker.unwrap_or(true) {
            Some(self.today.unwrap_or_else(|| Local::now().date_naive()))
        } else {
            None
        };

        Ok(ResolvedOptions {
            month: spec,
            first_day_of_week: weekday_from_sunday(self.first_day_of_week.unwrap_or(0)),
            abbreviate_day_names: self.abbreviate_day_names.unwrap_or(true),
            today,
            show_week_numbers: self.show_week_numbers.unwrap_or(false),
            week_number_format: self.week_number_format.unwrap_or_default(),
            css: CssClasses::default().apply(&self.css_classes),
            table_id: self
                .table_id
                .clone()
                .unwrap_or_else(|| format!("calendar-{}", spec)),
            table_summary: self
                .table_summary
                .clone()
                .unwrap_or_else(|| format!("Calendar for {} {}", month_name, spec.year())),
            calendar_title: self
                .calendar_title
                .clone()
                .unwrap_or_else(|| format!("{} {}", month_name, spec.year())),
            show_month_header: self.show_month_header.unwrap_or(true),
            previous_month_text: self.previous_month_text.clone(),
            next_month_text: self.next_month_text.clone(),
            week_number_title: self
                .week_number_title
                .clone()
                .unwrap_or_else(|| "CW".to_owned()),
            accessible: self.accessible.unwrap_or(false),
            extra: self.extra.clone(),
        })
    }
}

/// `0` is Sunday; values past Saturday wrap around.
pub fn weekday_from_sunday(index: u32) -> Weekday {
    // chrono counts from Monday
    Weekday::from_u32((index % 7 + 6) % 7).unwrap_or(Weekday::Sun)
}

/// Fully defaulted options for a single render.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub month: MonthSpec,
    pub first_day_of_week: Weekday,
    pub abbreviate_day_names: bool,
    /// Date carrying the today marker, `None` when the marker is off.
    pub today: Option<NaiveDate>,
    pub show_week_numbers: bool,
    pub week_number_format: WeekNumberFormat,
    pub css: CssClasses,
    pub table_id: String,
    pub table_summary: String,
    pub calendar_title: String,
    pub show_month_header: bool,
    pub previous_month_text: Option<String>,
    pub next_month_text: Option<String>,
    pub week_number_title: String,
    pub accessible: bool,
    pub extra: BTreeMap<String, toml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(options: &RenderOptions, year: i32, month: u32) -> ResolvedOptions {
        options
            .resolve(Some(year), Some(month), &LocaleNames::default())
            .unwrap()
    }

    #[test]
    fn month_and_year_are_required() {
        let options = RenderOptions::default();
        let names = LocaleNames::default();

        for (year, month) in [(None, None), (Some(1), None), (None, Some(1))] {
            let err = options.resolve(year, month, &names).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn month_out_of_range() {
        assert!(MonthSpec::new(2011, 0).unwrap_err().is_invalid_argument());
        assert!(MonthSpec::new(2011, 13).unwrap_err().is_invalid_argument());
        assert!(MonthSpec::new(i32::MAX, 6).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn month_boundaries() {
        let feb = MonthSpec::new(2012, 2).unwrap();
        assert_eq!(feb.num_days(), 29);
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2012, 2, 29).unwrap());

        let dec = MonthSpec::new(2011, 12).unwrap();
        assert_eq!(dec.num_days(), 31);
        assert!(dec.contains(NaiveDate::from_ymd_opt(2011, 12, 31).unwrap()));
        assert!(!dec.contains(NaiveDate::from_ymd_opt(2012, 1, 1).unwrap()));
    }

    #[test]
    fn prev_and_next_cross_years() {
        let jan = MonthSpec::new(2011, 1).unwrap();
        assert_eq!(jan.prev(), Some(MonthSpec::new(2010, 12).unwrap()));
        assert_eq!(jan.next(), Some(MonthSpec::new(2011, 2).unwrap()));

        let dec = MonthSpec::new(2011, 12).unwrap();
        assert_eq!(dec.next(), Some(MonthSpec::new(2012, 1).unwrap()));
    }

    #[test]
    fn defaults() {
        let today = NaiveDate::from_ymd_opt(2006, 8, 15).unwrap();
        let options = RenderOptions {
            today: Some(today),
            ..Default::default()
        };
        let resolved = resolve(&options, 1967, 4);

        assert_eq!(resolved.table_id, "calendar-1967-04");
        assert_eq!(resolved.table_summary, "Calendar for April 1967");
        assert_eq!(resolved.calendar_title, "April 1967");
        assert_eq!(resolved.first_day_of_week, Weekday::Sun);
        assert_eq!(resolved.today, Some(today));
        assert_eq!(resolved.week_number_format, WeekNumberFormat::Iso8601);
        assert_eq!(resolved.css, CssClasses::default());
        assert!(resolved.abbreviate_day_names);
        assert!(!resolved.show_week_numbers);
        assert!(resolved.show_month_header);
        assert_eq!(resolved.week_number_title, "CW");
    }

    #[test]
    fn today_marker_off_drops_today() {
        let options = RenderOptions {
            show_today_marker: Some(false),
            today: NaiveDate::from_ymd_opt(2006, 8, 15),
            ..Default::default()
        };
        assert_eq!(resolve(&options, 2006, 8).today, None);
    }

    #[test]
    fn first_day_of_week_wraps() {
        assert_eq!(weekday_from_sunday(0), Weekday::Sun);
        assert_eq!(weekday_from_sunday(1), Weekday::Mon);
        assert_eq!(weekday_from_sunday(6), Weekday::Sat);
        assert_eq!(weekday_from_sunday(8), Weekday::Mon);
    }

    #[test]
    fn merge_last_write_wins() {
        let base = RenderOptions {
            first_day_of_week: Some(1),
            table_id: Some("base".to_owned()),
            css_classes: CssClassOptions {
                day: Some("d".to_owned()),
                table: Some("t".to_owned()),
                ..Default::default()
            },
            ..Default::default()
        };
        let top = RenderOptions {
            table_id: Some("top".to_owned()),
            css_classes: CssClassOptions {
                table: Some("cal".to_owned()),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(top);
        assert_eq!(merged.first_day_of_week, Some(1));
        assert_eq!(merged.table_id.as_deref(), Some("top"));
        assert_eq!(merged.css_classes.day.as_deref(), Some("d"));
        assert_eq!(merged.css_classes.table.as_deref(), Some("cal"));
    }

    #[test]
    fn unknown_keys_pass_through() {
        let options: RenderOptions = toml::from_str(
            r#"
            first_day_of_week = 1
            week_number_format = "us_canada"
            highlight = "events"
            "#,
        )
        .unwrap();

        assert_eq!(options.first_day_of_week, Some(1));
        assert_eq!(options.week_number_format, Some(WeekNumberFormat::UsCanada));
        assert_eq!(
            options.extra.get("highlight"),
            Some(&toml::Value::String("events".to_owned()))
        );

        let resolved = resolve(&options, 2011, 1);
        assert!(resolved.extra.contains_key("highlight"));
    }
}
