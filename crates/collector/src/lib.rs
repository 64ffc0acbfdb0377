//! Passive version collection.
//!
//! Ties the pieces together for one session:
//!
//! ```text
//! host ──HostEvent──▶ HostDispatcher ──▶ VersionCollector
//!                                          ├─ FocusChanged   ─▶ CollectionTrigger ─▶ VersionLedger
//!                                          └─ GesturePressed ─▶ GestureDisambiguator
//!                                                                  ├─ single ─▶ ReportPresenter::show_report
//!                                                                  └─ double ─▶ ReportPresenter::copy_to_clipboard
//! ```
//!
//! The extension inventory is read once from an [`ExtensionRegistry`] when
//! the session starts.

mod config;
mod dispatcher;
mod error;
mod extensions;
mod session;
mod trigger;

pub use config::{default_config_path, CollectorConfig};
pub use dispatcher::{HostDispatcher, HostEventHandler, HostEventSubmitter};
pub use error::{CollectorError, Result};
pub use extensions::{ExtensionManifest, ExtensionRegistry, ManifestDirRegistry, StaticRegistry};
pub use session::{CollectorDeps, VersionCollector};
pub use trigger::CollectionTrigger;
