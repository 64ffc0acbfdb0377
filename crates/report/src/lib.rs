//! Reporting for the version collector.
//!
//! - [`ReportFormatter`] turns a ledger snapshot into a two-table
//!   [`ReportDocument`] or a flat text block. Both are pure.
//! - [`ReportPresenter`] sends the document to a [`BrowsingSurface`] or the
//!   text to a [`ClipboardService`], and announces the result on the event bus.

mod clipboard;
mod document;
mod error;
mod format;
mod presenter;

pub use clipboard::ArboardClipboard;
pub use document::{escape_html, ReportDocument, ReportSection};
pub use error::{PresentError, Result};
pub use format::{ReportFormatter, APPLICATIONS_CAPTION, EXTENSIONS_CAPTION, REPORT_TITLE};
pub use presenter::{BrowsingSurface, ClipboardService, ReportPresenter, COPIED_MESSAGE};
