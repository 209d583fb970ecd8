use chrono::Weekday;
use std::fmt::{self, Write};

use super::cell::{header_id, week_number_header_id};
use super::{escape, write_attributes};
use crate::grid::WeekRow;
use crate::locale::LocaleNames;
use crate::options::ResolvedOptions;

/// Weekdays in column order, starting at `first_day`.
pub fn columns(first_day: Weekday) -> [Weekday; 7] {
    let mut day = first_day;
    [(); 7].map(|_| {
        let current = day;
        day = day.succ();
        current
    })
}

fn write_month_header<W: Write>(out: &mut W, options: &ResolvedOptions) -> fmt::Result {
    let css = &options.css;

    out.write_str("<tr>")?;
    if options.show_week_numbers {
        write!(out, r#"<th class="{}"></th>"#, escape(&css.month_name))?;
    }

    let mut colspan = 7;
    if options.previous_month_text.is_some() {
        colspan -= 2;
    }
    if options.next_month_text.is_some() {
        colspan -= 2;
    }

    if let Some(text) = &options.previous_month_text {
        write!(out, r#"<th colspan="2">{}</th>"#, text)?;
    }
    write!(
        out,
        r#"<th colspan="{}" class="{}">{}</th>"#,
        colspan,
        escape(&css.month_name),
        escape(&options.calendar_title)
    )?;
    if let Some(text) = &options.next_month_text {
        write!(out, r#"<th colspan="2">{}</th>"#, text)?;
    }
    out.write_str("</tr>")
}

fn write_day_names<W: Write>(
    out: &mut W,
    options: &ResolvedOptions,
    names: &LocaleNames,
) -> fmt::Result {
    let css = &options.css;

    write!(out, r#"<tr class="{}">"#, escape(&css.day_name))?;
    if options.show_week_numbers {
        write!(
            out,
            r#"<th class="{}" id="{}" scope="col">{}</th>"#,
            escape(&css.week_number),
            escape(&week_number_header_id(&options.table_id)),
            escape(&options.week_number_title)
        )?;
    }

    for weekday in columns(options.first_day_of_week) {
        write!(
            out,
            r#"<th id="{}" scope="col">"#,
            escape(&header_id(&options.table_id, weekday))
        )?;

        let full = names.day_name(weekday);
        match names.abbreviated_day_name(weekday) {
            Some(abbr) if options.abbreviate_day_names => write!(
                out,
                r#"<abbr title="{}">{}</abbr>"#,
                escape(full),
                escape(abbr)
            )?,
            _ => out.write_str(&escape(full))?,
        }

        out.write_str("</th>")?;
    }
    out.write_str("</tr>")
}

fn write_row<W: Write>(out: &mut W, row: &WeekRow, options: &ResolvedOptions) -> fmt::Result {
    out.write_str("<tr>")?;
    if let Some(week_number) = row.week_number {
        write!(
            out,
            r#"<td class="{}">{}</td>"#,
            escape(&options.css.week_number),
            week_number
        )?;
    }

    for cell in row.days.iter() {
        out.write_str("<td")?;
        write_attributes(out, &cell.attributes)?;
        write!(out, ">{}</td>", cell.content)?;
    }
    out.write_str("</tr>")
}

/// Writes the complete table for rows whose cells are already rendered.
pub fn assemble(
    rows: &[WeekRow],
    options: &ResolvedOptions,
    names: &LocaleNames,
) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(4096);

    write!(
        out,
        r#"<table id="{}" class="{}" border="0" cellspacing="0" cellpadding="0" summary="{}">"#,
        escape(&options.table_id),
        escape(&options.css.table),
        escape(&options.table_summary)
    )?;

    out.push_str("<thead>");
    if options.show_month_header {
        write_month_header(&mut out, options)?;
    }
    write_day_names(&mut out, options, names)?;
    out.push_str("</thead><tbody>");

    for row in rows {
        write_row(&mut out, row, options)?;
    }

    out.push_str("</tbody></table>");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DayCell;
    use crate::options::RenderOptions;
    use chrono::NaiveDate;

    fn resolved(options: RenderOptions) -> ResolvedOptions {
        options
            .resolve(Some(2006), Some(8), &LocaleNames::default())
            .unwrap()
    }

    #[test]
    fn column_order() {
        assert_eq!(columns(Weekday::Sun)[0], Weekday::Sun);
        assert_eq!(columns(Weekday::Sun)[6], Weekday::Sat);
        assert_eq!(columns(Weekday::Mon)[6], Weekday::Sun);
        assert_eq!(columns(Weekday::Thu)[3], Weekday::Sun);
    }

    #[test]
    fn empty_body_keeps_headers() {
        let options = resolved(RenderOptions::default());
        let html = assemble(&[], &options, &LocaleNames::default()).unwrap();

        assert!(html.starts_with(
            r#"<table id="calendar-2006-08" class="calendar" border="0" cellspacing="0" cellpadding="0" summary="Calendar for August 2006"><thead><tr><th colspan="7" class="monthName">August 2006</th></tr>"#
        ));
        assert!(html.contains(
            r#"<tr class="dayName"><th id="calendar-2006-08-sun" scope="col"><abbr title="Sunday">Sun</abbr></th>"#
        ));
        assert!(html.ends_with("</tr></thead><tbody></tbody></table>"));
    }

    #[test]
    fn navigation_narrows_title() {
        let options = resolved(RenderOptions {
            previous_month_text: Some("<a href=\"?m=7\">PREV</a>".to_owned()),
            next_month_text: Some("NEXT".to_owned()),
            ..Default::default()
        });
        let html = assemble(&[], &options, &LocaleNames::default()).unwrap();
        assert!(html.contains(
            r#"<tr><th colspan="2"><a href="?m=7">PREV</a></th><th colspan="3" class="monthName">August 2006</th><th colspan="2">NEXT</th></tr>"#
        ));

        let options = resolved(RenderOptions {
            next_month_text: Some("NEXT".to_owned()),
            ..Default::default()
        });
        let html = assemble(&[], &options, &LocaleNames::default()).unwrap();
        assert!(html.contains(r#"<th colspan="5" class="monthName">"#));
    }

    #[test]
    fn month_header_can_be_hidden() {
        let options = resolved(RenderOptions {
            show_month_header: Some(false),
            previous_month_text: Some("PREV".to_owned()),
            ..Default::default()
        });
        let html = assemble(&[], &options, &LocaleNames::default()).unwrap();
        assert!(html.contains(r#"<thead><tr class="dayName">"#));
        assert!(!html.contains("PREV"));
    }

    #[test]
    fn full_names_without_abbreviation() {
        let options = resolved(RenderOptions {
            abbreviate_day_names: Some(false),
            first_day_of_week: Some(1),
            ..Default::default()
        });
        let html = assemble(&[], &options, &LocaleNames::default()).unwrap();
        assert!(html.contains(
            r#"<tr class="dayName"><th id="calendar-2006-08-mon" scope="col">Monday</th>"#
        ));
        assert!(!html.contains("<abbr"));
    }

    #[test]
    fn week_number_column() {
        let options = resolved(RenderOptions {
            show_week_numbers: Some(true),
            ..Default::default()
        });
        let start = NaiveDate::from_ymd_opt(2006, 7, 30).unwrap();
        let row = WeekRow {
            days: std::array::from_fn(|i| {
                let mut cell = DayCell::new(start + chrono::Duration::days(i as i64));
                cell.content = "x".to_owned();
                cell
            }),
            week_number: Some(31),
        };

        let html = assemble(&[row], &options, &LocaleNames::default()).unwrap();
        assert!(html.contains(r#"<tr><th class="monthName"></th><th colspan="7""#));
        assert!(html.contains(
            r#"<tr class="dayName"><th class="weekNumber" id="calendar-2006-08-week" scope="col">CW</th>"#
        ));
        assert!(html.contains(r#"<tbody><tr><td class="weekNumber">31</td><td>x</td>"#));
    }

    #[test]
    fn title_and_summary_are_escaped() {
        let options = resolved(RenderOptions {
            calendar_title: Some("Tom & Jerry".to_owned()),
            table_summary: Some("\"quoted\"".to_owned()),
            ..Default::default()
        });
        let html = assemble(&[], &options, &LocaleNames::default()).unwrap();
        assert!(html.contains(r#"summary="&quot;quoted&quot;">"#));
        assert!(html.contains(">Tom &amp; Jerry</th>"));
    }
}
