use chrono::{Datelike, Month, NaiveDate, Weekday};
use derive_more::Constructor;
use itertools::Itertools;
use num_traits::FromPrimitive;

use crate::grid::{Attributes, DayCell};
use crate::locale::LocaleNames;
use crate::options::ResolvedOptions;

/// Caller supplied replacement for a day cell.
///
/// `content` is inserted as markup, unescaped. A `class` attribute is
/// appended to the computed classes; every other attribute replaces the
/// computed one of the same name.
#[derive(Debug, Clone, Default, PartialEq, Constructor)]
pub struct DayOverride {
    pub content: Option<String>,
    pub attributes: Attributes,
}

impl DayOverride {
    pub fn with_content<S: Into<String>>(content: S) -> Self {
        DayOverride::new(Some(content.into()), Attributes::new())
    }

    pub fn attr<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn class<S: Into<String>>(self, class: S) -> Self {
        self.attr("class", class)
    }
}

pub type DayCallback<'a> = dyn Fn(NaiveDate) -> Option<DayOverride> + 'a;

/// Id of the header column for `weekday`. Always uses the English
/// abbreviation so ids stay stable across locales.
pub fn header_id(table_id: &str, weekday: Weekday) -> String {
    format!("{}-{}", table_id, weekday.to_string().to_lowercase())
}

pub fn week_number_header_id(table_id: &str) -> String {
    format!("{}-week", table_id)
}

pub struct DayRenderer<'a> {
    options: &'a ResolvedOptions,
    names: &'a LocaleNames,
    callback: Option<&'a DayCallback<'a>>,
}

impl<'a> DayRenderer<'a> {
    pub fn new(options: &'a ResolvedOptions, names: &'a LocaleNames) -> Self {
        DayRenderer {
            options,
            names,
            callback: None,
        }
    }

    pub fn callback(mut self, callback: Option<&'a DayCallback<'a>>) -> Self {
        self.callback = callback;
        self
    }

    fn classes(&self, cell: &DayCell) -> Vec<String> {
        let css = &self.options.css;
        let mut classes = vec![css.day.clone()];

        if !cell.in_current_month {
            classes.push(css.other_month.clone());
        }
        if cell.is_weekend() {
            classes.push(css.weekend_day.clone());
        }
        if cell.is_today {
            classes.push(css.today.clone());
        }

        classes
    }

    fn default_content(&self, cell: &DayCell) -> String {
        let day = cell.day_num().to_string();

        if self.options.accessible && !cell.in_current_month {
            let month = Month::from_u32(cell.date.month()).unwrap_or(Month::January);
            format!(
                r#"{}<span class="hidden"> {}</span>"#,
                day,
                super::escape(self.names.month_name(month))
            )
        } else {
            day
        }
    }

    /// Fills in content and attributes of `cell`.
    pub fn render(&self, cell: &mut DayCell) {
        let table_id = &self.options.table_id;
        let mut headers = header_id(table_id, cell.weekday());
        if self.options.show_week_numbers {
            headers.push(' ');
            headers.push_str(&week_number_header_id(table_id));
        }

        let mut attributes = Attributes::new();
        attributes.insert("headers".to_owned(), headers);

        let mut classes = self.classes(cell);
        let mut content = self.default_content(cell);

        if let Some(over) = self.callback.and_then(|callback| callback(cell.date)) {
            if let Some(custom) = over.content {
                content = custom;
            }

            for (key, value) in over.attributes {
                if key == "class" {
                    if !value.trim().is_empty() {
                        classes.push(value.trim().to_owned());
                    }
                } else {
                    attributes.insert(key, value);
                }
            }
        }

        attributes.insert(
            "class".to_owned(),
            classes.iter().filter(|c| !c.is_empty()).join(" "),
        );

        cell.content = content;
        cell.attributes = attributes;
    }
}
