use std::borrow::Cow;
use std::fmt::{self, Write};

use crate::grid::Attributes;

pub mod cell;
pub mod table;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(|c| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn is_attribute_name(key: &str) -> bool {
    !key.is_empty()
        && !key.contains(|c: char| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// Writes ` key="value"` for every attribute, in key order. Keys that are
/// not valid attribute names are skipped.
pub fn write_attributes<W: Write>(out: &mut W, attributes: &Attributes) -> fmt::Result {
    for (key, value) in attributes {
        if !is_attribute_name(key) {
            log::warn!("Skipping invalid attribute name '{}'", key);
            continue;
        }
        write!(out, r#" {}="{}""#, key, escape(value))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_passes_plain_text() {
        assert!(matches!(escape("August 2006"), Cow::Borrowed(_)));
    }

    #[test]
    fn escape_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn attributes_in_key_order() {
        let mut attrs = Attributes::new();
        attrs.insert("headers".to_owned(), "calendar-2011-08-mon".to_owned());
        attrs.insert("class".to_owned(), "day".to_owned());
        attrs.insert("title".to_owned(), "\"quoted\"".to_owned());

        let mut out = String::new();
        write_attributes(&mut out, &attrs).unwrap();
        assert_eq!(
            out,
            r#" class="day" headers="calendar-2011-08-mon" title="&quot;quoted&quot;""#
        );
    }

    #[test]
    fn invalid_attribute_names_are_skipped() {
        let mut attrs = Attributes::new();
        attrs.insert("class".to_owned(), "day".to_owned());
        attrs.insert(r#"x"><b"#.to_owned(), "v".to_owned());
        attrs.insert("data day".to_owned(), "v".to_owned());
        attrs.insert(String::new(), "v".to_owned());
        attrs.insert("data-day".to_owned(), "9".to_owned());

        let mut out = String::new();
        write_attributes(&mut out, &attrs).unwrap();
        assert_eq!(out, r#" class="day" data-day="9""#);
    }
}
