//! Table and HTML projections of the corpus listing.

use std::fmt::Write as _;

use crate::registry::CorpusRecord;

/// Fixed-width text table over the listing projection.
pub fn text_table(records: &[&CorpusRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<40} {:<16} {:<24} {:<12}",
        "SHORTNAME", "TITLE", "CENTURIES", "CATEGORIES", "LANGUAGES"
    );
    let _ = writeln!(out, "{}", "-".repeat(110));

    for record in records {
        let _ = writeln!(
            out,
            "{:<24} {:<40} {:<16} {:<24} {:<12}",
            record.shortname,
            record.title,
            record.centuries.as_deref().unwrap_or(""),
            record.categories.as_deref().unwrap_or(""),
            record.languages.as_deref().unwrap_or(""),
        );
    }

    out
}

/// The same projection as an HTML table.
pub fn html_table(records: &[&CorpusRecord]) -> String {
    let mut out = String::from("<table>\n  <thead>\n    <tr>");
    for header in ["Shortname", "Title", "Centuries", "Categories", "Languages"] {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr>\n  </thead>\n  <tbody>\n");

    for record in records {
        out.push_str("    <tr>");
        for cell in [
            record.shortname.as_str(),
            record.title.as_str(),
            record.centuries.as_deref().unwrap_or(""),
            record.categories.as_deref().unwrap_or(""),
            record.languages.as_deref().unwrap_or(""),
        ] {
            let _ = write!(out, "<td>{}</td>", html_escape(cell));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("  </tbody>\n</table>");
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(shortname: &str, title: &str) -> CorpusRecord {
        serde_yaml::from_str(&format!(
            r#"
shortname: {shortname}
title: {title}
centuries: 19th
categories: literature
languages: en
text:
  markup: TEI
  file-format: zip
  url: http://example.org/c.zip
"#
        ))
        .unwrap()
    }

    #[test]
    fn text_table_lists_every_record() {
        let a = record("poe", "Poe");
        let b = record("dickinson", "Dickinson");
        let table = text_table(&[&a, &b]);

        assert!(table.contains("SHORTNAME"));
        assert!(table.contains("poe"));
        assert!(table.contains("dickinson"));
    }

    #[test]
    fn html_table_escapes_cells() {
        let rec = record("amp", "Poems <& more>");
        let html = html_table(&[&rec]);

        assert!(html.contains("<td>Poems &lt;&amp; more&gt;</td>"));
        assert!(html.starts_with("<table>"));
    }
}
