use chrono::{Month, Weekday};
use serde::Deserialize;

/// Source of translated day and month names.
///
/// Day names are ordered Sunday first. Month names hold either the twelve
/// names or thirteen with a leading placeholder, January at index 1.
pub trait Locale {
    fn day_names(&self) -> Vec<String>;
    fn abbreviated_day_names(&self) -> Vec<String>;
    fn month_names(&self) -> Vec<String>;
}

const ENGLISH_DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const ENGLISH_ABBR_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const ENGLISH_MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Built-in table used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Locale for English {
    fn day_names(&self) -> Vec<String> {
        ENGLISH_DAY_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn abbreviated_day_names(&self) -> Vec<String> {
        ENGLISH_ABBR_DAY_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn month_names(&self) -> Vec<String> {
        ENGLISH_MONTH_NAMES.iter().map(|s| s.to_string()).collect()
    }
}

/// A locale given as plain name tables, e.g. from the `[locale]` section of
/// the configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableLocale {
    pub day_names: Vec<String>,
    pub abbreviated_day_names: Vec<String>,
    pub month_names: Vec<String>,
}

impl Locale for TableLocale {
    fn day_names(&self) -> Vec<String> {
        self.day_names.clone()
    }

    fn abbreviated_day_names(&self) -> Vec<String> {
        self.abbreviated_day_names.clone()
    }

    fn month_names(&self) -> Vec<String> {
        self.month_names.clone()
    }
}

/// Validated names for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleNames {
    days: [String; 7],
    abbr_days: [String; 7],
    months: [String; 12],
}

impl Default for LocaleNames {
    fn default() -> Self {
        LocaleNames::from_locale(None)
    }
}

fn english<const N: usize>(table: [&str; N]) -> [String; N] {
    table.map(|s| s.to_owned())
}

fn table_or_english<const N: usize>(
    what: &str,
    names: Vec<String>,
    fallback: [&str; N],
) -> [String; N] {
    let len = names.len();
    <[String; N]>::try_from(names).unwrap_or_else(|_| {
        log::warn!(
            "Locale provides {} {} instead of {}, using English names",
            len,
            what,
            N
        );
        english(fallback)
    })
}

impl LocaleNames {
    /// Reads all tables from `locale`, replacing each malformed table with
    /// the English one.
    pub fn from_locale(locale: Option<&dyn Locale>) -> Self {
        let locale = match locale {
            Some(locale) => locale,
            None => {
                return LocaleNames {
                    days: english(ENGLISH_DAY_NAMES),
                    abbr_days: english(ENGLISH_ABBR_DAY_NAMES),
                    months: english(ENGLISH_MONTH_NAMES),
                }
            }
        };

        let mut months = locale.month_names();
        if months.len() == 13 {
            months.remove(0);
        }

        LocaleNames {
            days: table_or_english("day names", locale.day_names(), ENGLISH_DAY_NAMES),
            abbr_days: table_or_english(
                "abbreviated day names",
                locale.abbreviated_day_names(),
                ENGLISH_ABBR_DAY_NAMES,
            ),
            months: table_or_english("month names", months, ENGLISH_MONTH_NAMES),
        }
    }

    pub fn day_name(&self, weekday: Weekday) -> &str {
        &self.days[weekday.num_days_from_sunday() as usize]
    }

    /// The abbreviation of `weekday`, or `None` when it is identical to the
    /// full name.
    pub fn abbreviated_day_name(&self, weekday: Weekday) -> Option<&str> {
        let idx = weekday.num_days_from_sunday() as usize;
        if self.abbr_days[idx] == self.days[idx] {
            None
        } else {
            Some(&self.abbr_days[idx])
        }
    }

    pub fn month_name(&self, month: Month) -> &str {
        &self.months[month.number_from_month() as usize - 1]
    }
}
