use chrono::NaiveDate;

use crate::error::Result;
use crate::grid::{self, WeekRow};
use crate::html::cell::{DayCallback, DayOverride, DayRenderer};
use crate::html::table;
use crate::locale::{Locale, LocaleNames};
use crate::options::{RenderOptions, ResolvedOptions};
use crate::week;

/// The laid out month before it is turned into markup.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub options: ResolvedOptions,
    pub names: LocaleNames,
    pub rows: Vec<WeekRow>,
}

impl MonthLayout {
    pub fn cells(&self) -> impl Iterator<Item = &grid::DayCell> {
        self.rows.iter().flat_map(|row| row.days.iter())
    }

    pub fn week_numbers(&self) -> Vec<u32> {
        self.rows.iter().filter_map(|row| row.week_number).collect()
    }
}

/// Renders one month as an HTML table.
///
/// ```
/// use calendar_helper::{Calendar, DayOverride, RenderOptions};
/// use chrono::Datelike;
///
/// let html = Calendar::new(2011, 8)
///     .options(RenderOptions {
///         first_day_of_week: Some(1),
///         ..Default::default()
///     })
///     .day_callback(|date| {
///         (date.day() == 15).then(|| DayOverride::with_content("<b>15</b>").class("payday"))
///     })
///     .render()
///     .unwrap();
///
/// assert!(html.contains(r#"id="calendar-2011-08""#));
/// ```
pub struct Calendar<'a> {
    year: Option<i32>,
    month: Option<u32>,
    options: RenderOptions,
    locale: Option<&'a dyn Locale>,
    day_callback: Option<Box<DayCallback<'a>>>,
}

impl<'a> Calendar<'a> {
    pub fn new(year: i32, month: u32) -> Self {
        Calendar::from_parts(Some(year), Some(month))
    }

    /// Starts from input that may lack the year or month; `render` reports
    /// the missing part.
    pub fn from_parts(year: Option<i32>, month: Option<u32>) -> Self {
        Calendar {
            year,
            month,
            options: RenderOptions::default(),
            locale: None,
            day_callback: None,
        }
    }

    /// Merges `options` over the ones set so far.
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = self.options.merge(options);
        self
    }

    pub fn locale(mut self, locale: &'a dyn Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.options.today = Some(today);
        self
    }

    pub fn day_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(NaiveDate) -> Option<DayOverride> + 'a,
    {
        self.day_callback = Some(Box::new(callback));
        self
    }

    /// Resolves options and builds the grid with every cell rendered.
    pub fn layout(&self) -> Result<MonthLayout> {
        let names = LocaleNames::from_locale(self.locale);
        let options = self.options.resolve(self.year, self.month, &names)?;

        let mut rows = grid::build(&options.month, options.first_day_of_week, options.today);
        if options.show_week_numbers {
            week::assign(&mut rows, options.week_number_format);
        }

        let renderer = DayRenderer::new(&options, &names).callback(self.day_callback.as_deref());
        for row in rows.iter_mut() {
            for cell in row.days.iter_mut() {
                renderer.render(cell);
            }
        }

        Ok(MonthLayout {
            options,
            names,
            rows,
        })
    }

    pub fn render(&self) -> Result<String> {
        let layout = self.layout()?;
        let html = table::assemble(&layout.rows, &layout.options, &layout.names)?;

        log::debug!(
            "Rendered {} with {} rows",
            layout.options.table_id,
            layout.rows.len()
        );

        Ok(html)
    }
}

/// Shorthand for `Calendar::new(year, month).options(options.clone()).render()`.
pub fn render(year: i32, month: u32, options: &RenderOptions) -> Result<String> {
    Calendar::new(year, month).options(options.clone()).render()
}
