// SPDX-License-Identifier: MPL-2.0
//! Core indicator data structures.
//!
//! An [`Indicator`] is the record handed to the lifecycle engine. Apart from
//! its identity, dismiss policy, action tag and whether it carries detail
//! text, its content is opaque to the engine and only meaningful to the
//! rendering layer.

use crate::config::DEFAULT_DISMISS_SECS;
use std::borrow::Borrow;
use std::fmt;
use std::time::Duration;

/// Stable identity of an indicator; the dedupe and merge key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndicatorId(String);

impl IndicatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for IndicatorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IndicatorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for IndicatorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Rule governing whether and when an indicator expires on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissPolicy {
    /// Stays until dismissed explicitly.
    Manual,
    /// Expires after the given delay once displayed (or collapsed).
    After(Duration),
}

impl DismissPolicy {
    /// The policy new indicators start with.
    #[must_use]
    pub fn automatic() -> Self {
        Self::After(Duration::from_secs(DEFAULT_DISMISS_SECS))
    }

    /// Builds an `After` policy. A zero delay yields `Manual`.
    #[must_use]
    pub fn after(delay: Duration) -> Self {
        if delay.is_zero() {
            Self::Manual
        } else {
            Self::After(delay)
        }
    }

    /// Builds a policy from fractional seconds.
    ///
    /// Zero, negative, NaN and infinite inputs yield `Manual` rather than an
    /// immediate or looping expiry.
    #[must_use]
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Duration::try_from_secs_f64(secs).map_or(Self::Manual, Self::after)
        } else {
            Self::Manual
        }
    }

    /// Returns the delay after which the indicator expires, if any.
    ///
    /// `After(Duration::ZERO)` built by hand is reported as no timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        match self {
            Self::After(delay) if !delay.is_zero() => Some(*delay),
            _ => None,
        }
    }
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self::automatic()
    }
}

/// What a tap on the indicator should do.
///
/// The engine only interprets `ToggleExpansion`; `Execute` is handed back to
/// the caller, which owns the code to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    ToggleExpansion,
    Execute,
}

/// Icon shown next to the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icon {
    /// Named bundled image.
    Image(String),
    /// Named platform symbol.
    SystemImage(String),
    /// Indeterminate spinner.
    ProgressIndicator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconStyle {
    Primary,
    #[default]
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Primary,
    Red,
    Rgb(u8, u8, u8),
}

/// Presentation hints for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub icon_style: IconStyle,
    pub tint: Option<Tint>,
}

impl Style {
    pub const DEFAULT: Self = Self {
        icon_style: IconStyle::Secondary,
        tint: Some(Tint::Primary),
    };

    pub const ERROR: Self = Self {
        icon_style: IconStyle::Primary,
        tint: Some(Tint::Red),
    };
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A notification banner to be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Indicator {
    id: IndicatorId,
    icon: Option<Icon>,
    title: String,
    subtitle: Option<String>,
    /// Detail text revealed when expanded.
    expanded_text: Option<String>,
    dismiss_policy: DismissPolicy,
    style: Style,
    action: Option<ActionKind>,
}

impl Indicator {
    /// Creates an indicator with the default automatic dismiss policy.
    pub fn new(id: impl Into<IndicatorId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: None,
            title: title.into(),
            subtitle: None,
            expanded_text: None,
            dismiss_policy: DismissPolicy::default(),
            style: Style::default(),
            action: None,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_expanded_text(mut self, text: impl Into<String>) -> Self {
        self.expanded_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_dismiss_policy(mut self, policy: DismissPolicy) -> Self {
        self.dismiss_policy = policy;
        self
    }

    /// Shorthand for `with_dismiss_policy(DismissPolicy::after(delay))`.
    #[must_use]
    pub fn dismiss_after(self, delay: Duration) -> Self {
        self.with_dismiss_policy(DismissPolicy::after(delay))
    }

    /// Shorthand for `with_dismiss_policy(DismissPolicy::Manual)`.
    #[must_use]
    pub fn manual(self) -> Self {
        self.with_dismiss_policy(DismissPolicy::Manual)
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionKind) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn id(&self) -> &IndicatorId {
        &self.id
    }

    #[must_use]
    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn expanded_text(&self) -> Option<&str> {
        self.expanded_text.as_deref()
    }

    #[must_use]
    pub fn dismiss_policy(&self) -> DismissPolicy {
        self.dismiss_policy
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    #[must_use]
    pub fn action(&self) -> Option<ActionKind> {
        self.action
    }

    /// Whether there is detail text to reveal; expansion requires it.
    #[must_use]
    pub fn has_detail(&self) -> bool {
        self.expanded_text
            .as_deref()
            .is_some_and(|text| !text.is_empty())
    }
}
