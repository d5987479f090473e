#![forbid(unsafe_code)]

//! Recognizer configuration.
//!
//! Each gesture has its own config struct with `with_*` setters and a
//! `validate` step that runs when a recognizer is built, so a recognizer
//! never exists with an impossible configuration.

use web_time::Duration;

use crate::error::{GestureError, Result};
use crate::input::Buttons;

/// Default gap allowed between qualifying clicks or taps (400ms).
pub const DEFAULT_MAX_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// Default drag interpretation distance.
pub const DEFAULT_DRAG_DISTANCE: f64 = 5.0;

/// Default pan interpretation distance.
pub const DEFAULT_PAN_DISTANCE: f64 = 20.0;

/// Longest accepted gap between qualifying presses.
pub const MAX_CLICK_INTERVAL_LIMIT: Duration = Duration::from_secs(u32::MAX as u64);

/// Qualification and interpretation thresholds shared by every gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Presses (clicks or taps) required before interpretation.
    pub number_of_clicks: u32,
    /// Displacement that must be exceeded before a decision is made.
    pub interpret_distance: f64,
    /// Maximum gap between qualifying presses.
    pub max_click_interval: Duration,
}

impl Thresholds {
    fn validate(&self, gesture: &'static str) -> Result<()> {
        if self.number_of_clicks == 0 {
            return Err(GestureError::invalid(
                gesture,
                "number of clicks must be at least 1",
            ));
        }
        if !self.interpret_distance.is_finite() || self.interpret_distance < 0.0 {
            return Err(GestureError::invalid(
                gesture,
                format!(
                    "interpret distance must be finite and non-negative, got {}",
                    self.interpret_distance
                ),
            ));
        }
        if self.max_click_interval > MAX_CLICK_INTERVAL_LIMIT {
            return Err(GestureError::invalid(
                gesture,
                format!(
                    "max click interval must not exceed {}s, got {:?}",
                    MAX_CLICK_INTERVAL_LIMIT.as_secs(),
                    self.max_click_interval
                ),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Drag
// ---------------------------------------------------------------------------

/// Configuration for the mouse drag gesture.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragConfig {
    /// Button that must be the only one held (default: 0, primary).
    pub button: u8,
    /// Clicks required before the drag may begin (default: 1).
    pub number_of_clicks: u32,
    /// Distance the pointer must travel before a decision (default: 5).
    pub interpret_distance: f64,
    /// Maximum gap between clicks (default: 400ms).
    pub max_click_interval: Duration,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            button: 0,
            number_of_clicks: 1,
            interpret_distance: DEFAULT_DRAG_DISTANCE,
            max_click_interval: DEFAULT_MAX_CLICK_INTERVAL,
        }
    }
}

impl DragConfig {
    #[must_use]
    pub const fn with_button(mut self, button: u8) -> Self {
        self.button = button;
        self
    }

    #[must_use]
    pub const fn with_clicks(mut self, number_of_clicks: u32) -> Self {
        self.number_of_clicks = number_of_clicks;
        self
    }

    #[must_use]
    pub const fn with_interpret_distance(mut self, distance: f64) -> Self {
        self.interpret_distance = distance;
        self
    }

    #[must_use]
    pub const fn with_max_click_interval(mut self, interval: Duration) -> Self {
        self.max_click_interval = interval;
        self
    }

    /// The shared thresholds of this config.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        Thresholds {
            number_of_clicks: self.number_of_clicks,
            interpret_distance: self.interpret_distance,
            max_click_interval: self.max_click_interval,
        }
    }

    /// Check the configuration for impossible values.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] when the button index does not
    /// fit the button mask or a threshold is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.button > Buttons::MAX_BUTTON {
            return Err(GestureError::invalid(
                "drag",
                format!(
                    "button {} exceeds the highest trackable button {}",
                    self.button,
                    Buttons::MAX_BUTTON
                ),
            ));
        }
        self.thresholds().validate("drag")
    }
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

/// Configuration for the multi-touch pan gesture.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanConfig {
    /// Fewest simultaneous touches that count as a pan (default: 1).
    pub min_touches: u32,
    /// Most simultaneous touches that count as a pan (default: unbounded).
    pub max_touches: u32,
    /// Taps required before the pan may begin (default: 1).
    pub number_of_taps: u32,
    /// Distance the touch centroid must travel before a decision (default: 20).
    pub interpret_distance: f64,
    /// Maximum gap between taps (default: 400ms).
    pub max_click_interval: Duration,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            min_touches: 1,
            max_touches: u32::MAX,
            number_of_taps: 1,
            interpret_distance: DEFAULT_PAN_DISTANCE,
            max_click_interval: DEFAULT_MAX_CLICK_INTERVAL,
        }
    }
}

impl PanConfig {
    #[must_use]
    pub const fn with_touches(mut self, min: u32, max: u32) -> Self {
        self.min_touches = min;
        self.max_touches = max;
        self
    }

    #[must_use]
    pub const fn with_min_touches(mut self, min: u32) -> Self {
        self.min_touches = min;
        self
    }

    #[must_use]
    pub const fn with_taps(mut self, number_of_taps: u32) -> Self {
        self.number_of_taps = number_of_taps;
        self
    }

    #[must_use]
    pub const fn with_interpret_distance(mut self, distance: f64) -> Self {
        self.interpret_distance = distance;
        self
    }

    #[must_use]
    pub const fn with_max_click_interval(mut self, interval: Duration) -> Self {
        self.max_click_interval = interval;
        self
    }

    /// The shared thresholds of this config.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        Thresholds {
            number_of_clicks: self.number_of_taps,
            interpret_distance: self.interpret_distance,
            max_click_interval: self.max_click_interval,
        }
    }

    /// Check the configuration for impossible values.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] when the touch bounds are
    /// empty or a threshold is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.min_touches == 0 {
            return Err(GestureError::invalid(
                "pan",
                "min touches must be at least 1",
            ));
        }
        if self.min_touches > self.max_touches {
            return Err(GestureError::invalid(
                "pan",
                format!(
                    "min touches {} exceeds max touches {}",
                    self.min_touches, self.max_touches
                ),
            ));
        }
        self.thresholds().validate("pan")
    }
}
