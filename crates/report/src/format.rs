//! Pure rendering of ledger snapshots.

use crate::document::{ReportDocument, ReportSection, EMPTY_SECTION};
use vercol_ledger::{LedgerEntry, LedgerSnapshot, UNKNOWN_VERSION_LABEL};

pub const REPORT_TITLE: &str = "Detected apps, add-ons, and versions";
pub const APPLICATIONS_CAPTION: &str = "Application information";
pub const EXTENSIONS_CAPTION: &str = "Installed extensions";

const APPLICATIONS_HEADING: &str = "Applications:";
const EXTENSIONS_HEADING: &str = "Extensions:";
const NAME_VERSION_DELIMITER: &str = ": ";

/// Renders snapshots as a table document or a flat text block.
///
/// Both renderings are deterministic functions of the snapshot.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    unknown_label: String,
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(UNKNOWN_VERSION_LABEL)
    }
}

impl ReportFormatter {
    /// `unknown_label` is printed wherever a version could not be determined.
    pub fn new(unknown_label: impl Into<String>) -> Self {
        Self {
            unknown_label: unknown_label.into(),
        }
    }

    pub fn unknown_label(&self) -> &str {
        &self.unknown_label
    }

    fn version_of<'a>(&'a self, entry: &'a LedgerEntry) -> &'a str {
        entry.version().display_with(&self.unknown_label)
    }

    /// Two tables: applications (name, version, bitness) and extensions
    /// (name, version).
    pub fn format_table(&self, snapshot: &LedgerSnapshot) -> ReportDocument {
        let applications = ReportSection {
            caption: APPLICATIONS_CAPTION.to_string(),
            columns: vec!["Name".into(), "Version".into(), "Bitness".into()],
            rows: snapshot
                .applications
                .iter()
                .map(|entry| {
                    vec![
                        entry.name().to_string(),
                        self.version_of(entry).to_string(),
                        entry
                            .record
                            .bitness
                            .map(|b| b.to_string())
                            .unwrap_or_else(|| self.unknown_label.clone()),
                    ]
                })
                .collect(),
        };

        let extensions = ReportSection {
            caption: EXTENSIONS_CAPTION.to_string(),
            columns: vec!["Name".into(), "Version".into()],
            rows: snapshot
                .extensions
                .iter()
                .map(|entry| vec![entry.name().to_string(), self.version_of(entry).to_string()])
                .collect(),
        };

        ReportDocument {
            title: REPORT_TITLE.to_string(),
            sections: vec![applications, extensions],
            instructions: vec![
                "Use shift+arrow keys to select, ctrl+c to copy to clipboard.".to_string(),
                "Press escape when done.".to_string(),
            ],
        }
    }

    /// Plain text for the clipboard:
    ///
    /// ```text
    /// Applications:
    /// Notepad: 10.1
    ///
    /// Extensions:
    /// (none)
    /// ```
    pub fn format_text(&self, snapshot: &LedgerSnapshot) -> String {
        let mut out = String::new();
        self.push_block(&mut out, APPLICATIONS_HEADING, &snapshot.applications);
        out.push('\n');
        self.push_block(&mut out, EXTENSIONS_HEADING, &snapshot.extensions);
        out
    }

    fn push_block(&self, out: &mut String, heading: &str, entries: &[LedgerEntry]) {
        out.push_str(heading);
        out.push('\n');
        if entries.is_empty() {
            out.push_str(EMPTY_SECTION);
            out.push('\n');
            return;
        }
        for entry in entries {
            out.push_str(entry.name());
            out.push_str(NAME_VERSION_DELIMITER);
            out.push_str(self.version_of(entry));
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vercol_ledger::{Bitness, CollectionId, Version, VersionLedger, VersionRecord};

    fn sample_snapshot() -> LedgerSnapshot {
        let ledger = VersionLedger::new();
        let apps = CollectionId::Applications;
        ledger.upsert(apps, VersionRecord::new("Notepad", "10.0")).unwrap();
        ledger.upsert(apps, VersionRecord::new("Notepad", "10.1")).unwrap();
        ledger
            .upsert(
                apps,
                VersionRecord::new("Calculator", "11.0").with_bitness(Some(Bitness::Bits64)),
            )
            .unwrap();
        ledger
            .extensions_loaded(vec![
                VersionRecord::new("Remote Support", "2.1"),
                VersionRecord::new("Clock", Version::Unknown),
            ])
            .unwrap();
        ledger.snapshot_all()
    }

    #[test]
    fn test_format_text_layout() {
        let text = ReportFormatter::default().format_text(&sample_snapshot());
        assert_eq!(
            text,
            "Applications:\n\
             Notepad: 10.1\n\
             Calculator: 11.0\n\
             \n\
             Extensions:\n\
             Remote Support: 2.1\n\
             Clock: unknown\n"
        );
    }

    #[test]
    fn test_format_text_is_idempotent() {
        let formatter = ReportFormatter::default();
        let snapshot = sample_snapshot();
        assert_eq!(formatter.format_text(&snapshot), formatter.format_text(&snapshot));
    }

    #[test]
    fn test_format_text_empty_sections() {
        let text = ReportFormatter::default().format_text(&LedgerSnapshot::default());
        assert_eq!(text, "Applications:\n(none)\n\nExtensions:\n(none)\n");
    }

    #[test]
    fn test_custom_unknown_label() {
        let text = ReportFormatter::new("n/a").format_text(&sample_snapshot());
        assert!(text.contains("Clock: n/a\n"));
    }

    #[test]
    fn test_format_table_sections() {
        let doc = ReportFormatter::default().format_table(&sample_snapshot());
        assert_eq!(doc.title, REPORT_TITLE);
        assert_eq!(doc.sections.len(), 2);

        let apps = &doc.sections[0];
        assert_eq!(apps.caption, APPLICATIONS_CAPTION);
        assert_eq!(apps.columns, vec!["Name", "Version", "Bitness"]);
        assert_eq!(
            apps.rows,
            vec![
                vec!["Notepad", "10.1", "unknown"],
                vec!["Calculator", "11.0", "64 bit"],
            ]
        );

        let extensions = &doc.sections[1];
        assert_eq!(extensions.caption, EXTENSIONS_CAPTION);
        assert_eq!(
            extensions.rows,
            vec![vec!["Remote Support", "2.1"], vec!["Clock", "unknown"]]
        );
        assert!(doc.instructions.iter().any(|l| l.contains("escape")));
    }

    #[test]
    fn test_format_table_is_deterministic() {
        let formatter = ReportFormatter::default();
        let snapshot = sample_snapshot();
        assert_eq!(formatter.format_table(&snapshot), formatter.format_table(&snapshot));
    }
}
