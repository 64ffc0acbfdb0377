//! Structured report document handed to the browsing surface.

use serde::{Deserialize, Serialize};

/// Placeholder shown for a section with no rows.
pub(crate) const EMPTY_SECTION: &str = "(none)";

/// One captioned table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub caption: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportSection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read-only report: titled tables plus usage hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<ReportSection>,
    pub instructions: Vec<String>,
}

impl ReportDocument {
    /// Render as an HTML fragment: one captioned table per section.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str("<table style=\"margin-left: auto; margin-right: auto;\">\n");
            out.push_str(&format!("<caption>{}</caption>\n", escape_html(&section.caption)));
            out.push_str("<tr>");
            for column in &section.columns {
                out.push_str(&format!("<th>{}</th>", escape_html(column)));
            }
            out.push_str("</tr>\n");
            if section.is_empty() {
                out.push_str(&format!(
                    "<tr><td colspan=\"{}\">{}</td></tr>\n",
                    section.columns.len().max(1),
                    EMPTY_SECTION
                ));
            }
            for row in &section.rows {
                out.push_str("<tr>");
                for cell in row {
                    out.push_str(&format!("<td>{}</td>", escape_html(cell)));
                }
                out.push_str("</tr>\n");
            }
            out.push_str("</table><br>\n");
        }
        for line in &self.instructions {
            out.push_str(&format!("<p>{}</p>\n", escape_html(line)));
        }
        out
    }

    /// Render as aligned plain-text tables for terminal surfaces.
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("{}\n", self.title);
        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.caption);
            out.push('\n');
            if section.is_empty() {
                out.push_str(EMPTY_SECTION);
                out.push('\n');
                continue;
            }

            let mut widths: Vec<usize> = section.columns.iter().map(|c| c.chars().count()).collect();
            for row in &section.rows {
                for (i, cell) in row.iter().enumerate() {
                    if let Some(width) = widths.get_mut(i) {
                        *width = (*width).max(cell.chars().count());
                    }
                }
            }

            push_row(&mut out, &section.columns, &widths);
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            push_row(&mut out, &rule, &widths);
            for row in &section.rows {
                push_row(&mut out, row, &widths);
            }
        }
        if !self.instructions.is_empty() {
            out.push('\n');
            for line in &self.instructions {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
