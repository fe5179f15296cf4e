// SPDX-License-Identifier: MPL-2.0
//! `indicator_stack` manages short-lived, stackable notification banners.
//!
//! It tracks which indicators are visible, expires them on their own timers,
//! and keeps expansion and ordering consistent while user interaction and
//! timer callbacks race each other. Rendering is left to the caller, which
//! consumes [`lifecycle::Snapshot`]s.

#![doc(html_root_url = "https://docs.rs/indicator_stack/0.1.0")]

pub mod config;
pub mod error;
pub mod indicator;
pub mod lifecycle;

#[cfg(test)]
mod test_utils;

pub use indicator::{
    ActionKind, DismissPolicy, Icon, IconStyle, Indicator, IndicatorId, Style, Tint,
};
pub use lifecycle::{Activation, Engine, Indicators, Snapshot, VisibleIndicator};
