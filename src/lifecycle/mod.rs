// SPDX-License-Identifier: MPL-2.0
//! Indicator lifecycle engine.
//!
//! This module owns everything that decides which indicators are visible and
//! for how long.
//!
//! # Components
//!
//! - [`engine`] - `Engine`: ordered record store and state transitions
//! - [`scheduler`] - `TimerScheduler`: one cancellable expiry timer per id
//! - [`depth`] - Stack depth metric used for presentation
//! - [`snapshot`] - Read-only state handed to the rendering layer
//! - [`handle`] - `Indicators`: mutex-protected handle plus timer driver
//!
//! # Usage
//!
//! ```ignore
//! use indicator_stack::{Indicator, Indicators};
//!
//! let indicators = Indicators::new(&config)?;
//! indicators.display(Indicator::new("upload", "Uploading…").manual());
//!
//! // Re-render whenever the stack changes
//! let mut changes = indicators.subscribe();
//! while changes.changed().await.is_ok() {
//!     render(&changes.borrow_and_update());
//! }
//! ```
//!
//! # Timer Safety
//!
//! Every display and expansion change assigns the record a new generation.
//! Timers carry the generation they were armed for, and a fire whose
//! generation no longer matches is discarded.

pub mod depth;
pub mod engine;
pub mod handle;
pub mod scheduler;
pub mod snapshot;

pub use depth::{depth_scale, DepthStep};
pub use engine::{Activation, Engine};
pub use handle::Indicators;
pub use scheduler::{TimerFired, TimerScheduler};
pub use snapshot::{Snapshot, VisibleIndicator};
