//! One gesture, two intents.
//!
//! The report gesture opens the interactive report on a single press and
//! copies the text report on a quick double press. Distinguishing the two
//! needs a short timing window:
//!
//! - first press: arm, and schedule "open report" for when the window closes
//! - second press strictly inside the window: cancel the schedule, copy now
//! - window closes with no second press: open the report
//!
//! [`GestureMachine`] holds the pure state machine; [`GestureDisambiguator`]
//! drives it with a cancellable tokio timer.
//!
//! # Example
//!
//! ```ignore
//! use vercol_gesture::{GestureAction, GestureDisambiguator, DEFAULT_GESTURE_WINDOW};
//! use std::sync::Arc;
//!
//! let gestures = GestureDisambiguator::new(
//!     DEFAULT_GESTURE_WINDOW,
//!     Arc::new(|action| match action {
//!         GestureAction::OpenReport => println!("open"),
//!         GestureAction::CopyToClipboard => println!("copy"),
//!     }),
//! );
//! gestures.press();
//! ```

mod binding;
mod disambiguator;
mod machine;

pub use binding::{
    GestureBinding, DEFAULT_SHOW_REPORT_BINDING, SHOW_REPORT_GESTURE_ID, TOOLS_CATEGORY,
};
pub use disambiguator::{GestureAction, GestureCallback, GestureDisambiguator};
pub use machine::{GestureMachine, GestureState, PressOutcome, DEFAULT_GESTURE_WINDOW};
