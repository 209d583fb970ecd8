extern crate calendar_helper as lib;

use chrono::{Datelike, Local};
use flexi_logger::{FileSpec, Logger};
use lib::config::load_suitable_config;
use lib::locale::{Locale, LocaleNames};
use lib::{Calendar, MonthSpec, RenderOptions, WeekNumberFormat};
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calh",
    about = "Renders a calendar month as an HTML table."
)]
pub struct Args {
    #[structopt(help = "year to render, defaults to the current year")]
    pub year: Option<i32>,

    #[structopt(help = "month to render (1-12), defaults to the current month")]
    pub month: Option<u32>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "f",
        long = "first-day",
        help = "first day of the week, 0 = Sunday"
    )]
    pub first_day: Option<u32>,

    #[structopt(short = "w", long = "week-numbers", help = "show week numbers")]
    pub week_numbers: bool,

    #[structopt(long = "week-format", help = "week numbering: iso8601 or us_canada")]
    pub week_format: Option<WeekNumberFormat>,

    #[structopt(long = "no-today", help = "do not mark the current date")]
    pub no_today: bool,

    #[structopt(long = "no-abbrev", help = "use full day names in the header")]
    pub no_abbrev: bool,

    #[structopt(long = "nav", help = "add cells naming the previous and next month")]
    pub nav: bool,

    #[structopt(long = "table-id", help = "id of the table element")]
    pub table_id: Option<String>,

    #[structopt(
        short = "o",
        long = "output",
        help = "write the table to this file instead of stdout",
        parse(from_os_str)
    )]
    pub output: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            first_day_of_week: self.first_day,
            show_week_numbers: self.week_numbers.then(|| true),
            week_number_format: self.week_format,
            show_today_marker: self.no_today.then(|| false),
            abbreviate_day_names: self.no_abbrev.then(|| false),
            table_id: self.table_id.clone(),
            ..Default::default()
        }
    }
}

fn navigation(month: &MonthSpec, names: &LocaleNames) -> RenderOptions {
    RenderOptions {
        previous_month_text: month
            .prev()
            .map(|prev| format!("&laquo; {}", names.month_name(prev.month()))),
        next_month_text: month
            .next()
            .map(|next| format!("{} &raquo;", names.month_name(next.month()))),
        ..Default::default()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file.clone())?)
            .print_message();
    }

    let _logger = logger.start()?;

    let config = load_suitable_config(args.configfile.as_deref())?;

    let now = Local::now().date_naive();
    let month = MonthSpec::new(
        args.year.unwrap_or_else(|| now.year()),
        args.month.unwrap_or_else(|| now.month()),
    )?;

    let locale = config.locale.as_ref().map(|locale| locale as &dyn Locale);
    let mut options = config.calendar.clone().merge(args.render_options());
    if args.nav {
        options = options.merge(navigation(&month, &LocaleNames::from_locale(locale)));
    }

    let mut calendar = Calendar::new(month.year(), month.month_number()).options(options);
    if let Some(locale) = locale {
        calendar = calendar.locale(locale);
    }

    let html = calendar.render()?;

    match &args.output {
        Some(path) => {
            fs::write(path, &html)?;
            log::info!("Wrote {} to '{}'", month, path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
