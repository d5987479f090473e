#![forbid(unsafe_code)]

//! Multi-touch pan, optionally qualified by a tap sequence.
//!
//! A pan is recognized when the number of active touches lies within
//! `[min_touches, max_touches]` and the touch centroid travels beyond the
//! interpret distance after the configured number of taps. Only touch-starts
//! made while the touch count is already within bounds count as taps.
//!
//! Mouse input rules a pan out: a button press while the recognizer is still
//! deciding fails it. When the platform cancels the last touch of a running
//! pan the gesture ends as `Cancelled`, never `Ended`.

use crate::config::{PanConfig, Thresholds};
use crate::error::Result;
use crate::input::{InputEvent, InputSnapshot, Translation};
use crate::recognizer::{EventRole, GestureKind, Recognizer};

/// Recognizer for multi-touch pans.
pub type PanRecognizer = Recognizer<Pan>;

/// Pan capability: bounds on the simultaneous touch count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pan {
    min_touches: u32,
    max_touches: u32,
}

impl Pan {
    /// Fewest simultaneous touches accepted.
    #[inline]
    #[must_use]
    pub const fn min_touches(&self) -> u32 {
        self.min_touches
    }

    /// Most simultaneous touches accepted.
    #[inline]
    #[must_use]
    pub const fn max_touches(&self) -> u32 {
        self.max_touches
    }
}

impl GestureKind for Pan {
    const NAME: &'static str = "pan";
    type Config = PanConfig;

    fn from_config(config: &PanConfig) -> Result<(Self, Thresholds)> {
        config.validate()?;
        Ok((
            Self {
                min_touches: config.min_touches,
                max_touches: config.max_touches,
            },
            config.thresholds(),
        ))
    }

    fn classify(&self, event: &InputEvent) -> EventRole {
        match event {
            InputEvent::TouchStart { .. } => EventRole::Press,
            InputEvent::TouchMove { .. } => EventRole::Motion,
            InputEvent::TouchEnd { .. } => EventRole::Release,
            InputEvent::TouchCancel { .. } => EventRole::Interrupt,
            InputEvent::ButtonDown { .. } => EventRole::Reject,
            InputEvent::ButtonUp { .. } | InputEvent::PointerMove { .. } => EventRole::Ignore,
        }
    }

    fn should_recognize(&self, input: &InputSnapshot) -> bool {
        let count = input.touch_count;
        count != 0 && count >= self.min_touches && count <= self.max_touches
    }

    /// A touch-start only counts as a tap once the touch count is in bounds.
    fn press_qualifies(&self, input: &InputSnapshot) -> bool {
        self.should_recognize(input)
    }

    fn inputs_released(&self, input: &InputSnapshot) -> bool {
        input.touch_count == 0
    }

    fn begin_interpretation(&self, translation: &mut Translation) {
        // Pan deltas are measured from the moment the pan begins.
        *translation = Translation::ZERO;
    }
}
