//! Renders a calendar month as an HTML table.
//!
//! The month is laid out as complete weeks starting on a configurable
//! weekday, optionally numbered after ISO 8601 or the US/Canada convention.
//! Every day cell carries CSS classes and a `headers` reference to its
//! weekday column; a per-day callback can replace content and add
//! attributes.

pub mod calendar;
pub mod config;
pub mod error;
pub mod grid;
pub mod html;
pub mod locale;
pub mod options;
pub mod week;

pub use calendar::{render, Calendar, MonthLayout};
pub use error::{Error, ErrorKind, Result};
pub use html::cell::DayOverride;
pub use locale::{English, Locale, TableLocale};
pub use options::{CssClassOptions, MonthSpec, RenderOptions};
pub use week::WeekNumberFormat;
