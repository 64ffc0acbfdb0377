//! Active application awareness for the version collector.
//!
//! This crate turns "whatever the user is working in right now" into a
//! canonical software identity. It provides:
//! - An opaque [`ActiveTarget`] handle for the focused application
//! - Provider traits for the OS inspection layer
//! - The [`IdentityExtractor`], which normalizes names and time-boxes inspection
//! - A [`FocusPoller`] for hosts that cannot push focus notifications
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                             │
//! │  normalize.rs - Name canonicalization (pure)                │
//! │  target.rs    - ActiveTarget handle                         │
//! │  provider.rs  - Traits for system state inspection          │
//! │  extract.rs   - Identity extraction with bounded wait       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Infrastructure Layer                        │
//! │  platform/inspect.rs - sysinfo process table                │
//! │  platform/macos.rs   - NSWorkspace + Info.plist             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Application Layer                          │
//! │  poller.rs - Background focus polling                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vercol_context::{platform, FocusPoller, IdentityExtractor};
//! use std::sync::Arc;
//!
//! let extractor = IdentityExtractor::new(Arc::new(platform::PlatformInspector::new()));
//! let mut poller = FocusPoller::new();
//!
//! poller.start(Arc::new(platform::PlatformFocusProvider::new()), Arc::new(move |target| {
//!     println!("{:?}", extractor.extract(&target));
//! }));
//! ```

mod error;
mod extract;
mod normalize;
mod poller;
mod provider;
mod target;

pub mod platform;

pub use error::ExtractionError;
pub use extract::{IdentityExtractor, RawIdentity, DEFAULT_EXTRACTION_TIMEOUT};
pub use normalize::{executable_stem, normalize_name, title_case};
pub use poller::{FocusCallback, FocusPoller, DEFAULT_POLL_INTERVAL};
pub use provider::{ActiveTargetProvider, NullProvider, ProcessInspector};
pub use target::ActiveTarget;
