#![forbid(unsafe_code)]

//! Mouse drag, optionally qualified by a click sequence.
//!
//! A drag is recognized when exactly the configured button is held and the
//! pointer travels beyond the interpret distance after the configured number
//! of clicks. With two clicks configured this is a "click, then press and
//! drag" gesture; the first click must be followed by the second press
//! within the click interval or the recognizer fails.
//!
//! Touch input conclusively rules a mouse drag out: any touch-start while
//! the recognizer is still deciding fails it.

use crate::config::{DragConfig, Thresholds};
use crate::error::Result;
use crate::input::{Buttons, InputEvent, InputSnapshot};
use crate::recognizer::{EventRole, GestureKind, Recognizer};

/// Recognizer for mouse drags.
pub type DragRecognizer = Recognizer<Drag>;

/// Drag capability: tracks a single pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    button: u8,
}

impl Drag {
    /// The tracked button.
    #[inline]
    #[must_use]
    pub const fn button(&self) -> u8 {
        self.button
    }
}

impl GestureKind for Drag {
    const NAME: &'static str = "drag";
    type Config = DragConfig;

    fn from_config(config: &DragConfig) -> Result<(Self, Thresholds)> {
        config.validate()?;
        Ok((
            Self {
                button: config.button,
            },
            config.thresholds(),
        ))
    }

    fn classify(&self, event: &InputEvent) -> EventRole {
        match event {
            InputEvent::ButtonDown { .. } => EventRole::Press,
            InputEvent::ButtonUp { .. } => EventRole::Release,
            InputEvent::PointerMove { .. } => EventRole::Motion,
            InputEvent::TouchStart { .. } => EventRole::Reject,
            InputEvent::TouchMove { .. }
            | InputEvent::TouchEnd { .. }
            | InputEvent::TouchCancel { .. } => EventRole::Ignore,
        }
    }

    /// True when the tracked button is the only one held.
    fn should_recognize(&self, input: &InputSnapshot) -> bool {
        input.buttons == Buttons::single(self.button)
    }

    fn inputs_released(&self, input: &InputSnapshot) -> bool {
        input.buttons.is_empty()
    }
}
