#![forbid(unsafe_code)]

//! Raw input events and the aggregate input state recognizers consult.
//!
//! # Design Notes
//!
//! - Coordinates are in input units (CSS pixels, device points, whatever the
//!   event source reports); recognizers only compare distances.
//! - Button `n` maps to bit `1 << n` of [`Buttons`], matching the DOM
//!   convention (0 = primary, 1 = middle, 2 = secondary).
//! - Recognizers never read global state: every hook receives an
//!   [`InputSnapshot`] taken after the event source applied the event.

use bitflags::bitflags;
use std::ops::{Add, AddAssign, Sub};

/// Identifier of a single touch point, stable from touch-start to touch-end.
pub type TouchId = u64;

/// Identifier of the input target (element, surface, viewport) a recognizer
/// observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u64);

/// A position in input units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Translation;

    fn sub(self, rhs: Self) -> Translation {
        Translation::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Translation> for Point {
    type Output = Point;

    fn add(self, rhs: Translation) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Cumulative displacement since interpretation began.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    /// No displacement.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new translation.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Translation {
    type Output = Translation;

    fn add(self, rhs: Self) -> Translation {
        Translation::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Translation {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

bitflags! {
    /// Mask of currently pressed pointer buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Buttons: u32 {
        /// No buttons.
        const NONE      = 0;
        /// Button 0 (usually left).
        const PRIMARY   = 1 << 0;
        /// Button 1 (usually the wheel).
        const MIDDLE    = 1 << 1;
        /// Button 2 (usually right).
        const SECONDARY = 1 << 2;
    }
}

impl Buttons {
    /// Highest button index representable in the mask.
    pub const MAX_BUTTON: u8 = 31;

    /// Mask with only `button` set; empty when `button` is out of range.
    #[must_use]
    pub const fn single(button: u8) -> Self {
        if button > Self::MAX_BUTTON {
            Self::NONE
        } else {
            Self::from_bits_retain(1 << button)
        }
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::NONE
    }
}

/// A raw pointer or touch event, as delivered by the event source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum InputEvent {
    /// A pointer button was pressed.
    ButtonDown { button: u8, pos: Point },
    /// A pointer button was released.
    ButtonUp { button: u8, pos: Point },
    /// The pointer moved.
    PointerMove { pos: Point },
    /// A touch point was placed.
    TouchStart { id: TouchId, pos: Point },
    /// A touch point moved.
    TouchMove { id: TouchId, pos: Point },
    /// A touch point was lifted.
    TouchEnd { id: TouchId, pos: Point },
    /// The platform aborted a touch point.
    TouchCancel { id: TouchId },
}

impl InputEvent {
    /// Stable lowercase name, used in logs and traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ButtonDown { .. } => "button_down",
            Self::ButtonUp { .. } => "button_up",
            Self::PointerMove { .. } => "pointer_move",
            Self::TouchStart { .. } => "touch_start",
            Self::TouchMove { .. } => "touch_move",
            Self::TouchEnd { .. } => "touch_end",
            Self::TouchCancel { .. } => "touch_cancel",
        }
    }
}

/// Read-only view of the aggregate input state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Buttons currently held down.
    pub buttons: Buttons,
    /// Number of active touch points.
    pub touch_count: u32,
}

impl InputSnapshot {
    /// No buttons, no touches.
    pub const IDLE: Self = Self {
        buttons: Buttons::NONE,
        touch_count: 0,
    };

    /// Snapshot with the given button mask and no touches.
    #[must_use]
    pub const fn with_buttons(buttons: Buttons) -> Self {
        Self {
            buttons,
            touch_count: 0,
        }
    }

    /// Snapshot with `touch_count` touches and no buttons.
    #[must_use]
    pub const fn with_touches(touch_count: u32) -> Self {
        Self {
            buttons: Buttons::NONE,
            touch_count,
        }
    }

    /// Whether nothing is pressed or touching.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.buttons.is_empty() && self.touch_count == 0
    }
}
