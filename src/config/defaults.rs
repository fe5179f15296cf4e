// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Dismissal**: Auto-dismiss timing for new indicators
//! - **Stack**: Depth de-emphasis applied to older stacked indicators
//! - **Interaction**: Advisory flags read by the rendering layer

// ==========================================================================
// Dismissal Defaults
// ==========================================================================

/// Auto-dismiss delay used by `DismissPolicy::automatic()` (in seconds).
pub const DEFAULT_DISMISS_SECS: u64 = 5;

// ==========================================================================
// Stack Defaults
// ==========================================================================

/// Scale reduction applied per level below the top of the stack.
pub const DEFAULT_DEPTH_STEP: f32 = 0.2;

/// Minimum depth step (no de-emphasis).
pub const MIN_DEPTH_STEP: f32 = 0.0;

/// Maximum depth step.
pub const MAX_DEPTH_STEP: f32 = 0.5;

// ==========================================================================
// Interaction Defaults
// ==========================================================================

/// Whether haptic feedback accompanies expansion toggles.
pub const DEFAULT_HAPTICS_ENABLED: bool = true;
