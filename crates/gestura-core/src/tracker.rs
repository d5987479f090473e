#![forbid(unsafe_code)]

//! Reference input event source: aggregate state and translation deltas.
//!
//! [`InputTracker`] applies each raw event to the aggregate input state
//! *before* recognizers see it, which is the ordering recognizers rely on:
//! on the last button-up the mask is already empty, on the last touch-end
//! the touch count is already zero.
//!
//! # Translation
//!
//! - Pointer moves report the position delta since the previous pointer
//!   event, but only while at least one button is held.
//! - Touch moves report the delta of the centroid of all active touches.
//!   Touch start and end re-anchor the centroid, so adding or lifting a
//!   finger never produces a jump.
//! - Touch ids the tracker has not seen start are ignored.

use crate::input::{Buttons, InputEvent, InputSnapshot, Point, TouchId, Translation};

/// What the event source observed for one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observation {
    /// Aggregate input state after the event.
    pub snapshot: InputSnapshot,
    /// Displacement reported by a motion event.
    pub delta: Option<Translation>,
}

/// Maintains the aggregate pointer and touch state of one input target.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    buttons: Buttons,
    pointer: Option<Point>,
    touches: Vec<(TouchId, Point)>,
    centroid: Option<Point>,
}

impl InputTracker {
    /// Create a tracker with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current aggregate state.
    #[must_use]
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            buttons: self.buttons,
            touch_count: self.touch_count(),
        }
    }

    /// Buttons currently held.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Number of active touches.
    #[must_use]
    pub fn touch_count(&self) -> u32 {
        u32::try_from(self.touches.len()).unwrap_or(u32::MAX)
    }

    /// Centroid of the active touches.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        self.centroid
    }

    /// Last known pointer position.
    #[inline]
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Apply `event` and report what recognizers should see.
    pub fn apply(&mut self, event: &InputEvent) -> Observation {
        let delta = match *event {
            InputEvent::ButtonDown { button, pos } => {
                self.buttons.insert(Buttons::single(button));
                self.pointer = Some(pos);
                None
            }
            InputEvent::ButtonUp { button, pos } => {
                self.buttons.remove(Buttons::single(button));
                self.pointer = Some(pos);
                None
            }
            InputEvent::PointerMove { pos } => {
                let previous = self.pointer.replace(pos);
                if self.buttons.is_empty() {
                    None
                } else {
                    previous.map(|prev| pos - prev)
                }
            }
            InputEvent::TouchStart { id, pos } => {
                match self.touch_mut(id) {
                    Some(existing) => *existing = pos,
                    None => self.touches.push((id, pos)),
                }
                self.centroid = self.compute_centroid();
                None
            }
            InputEvent::TouchMove { id, pos } => match self.touch_mut(id) {
                Some(existing) => {
                    *existing = pos;
                    let previous = self.centroid;
                    self.centroid = self.compute_centroid();
                    match (previous, self.centroid) {
                        (Some(before), Some(after)) => Some(after - before),
                        _ => None,
                    }
                }
                None => None,
            },
            InputEvent::TouchEnd { id, .. } | InputEvent::TouchCancel { id } => {
                self.touches.retain(|(touch, _)| *touch != id);
                self.centroid = self.compute_centroid();
                None
            }
        };

        Observation {
            snapshot: self.snapshot(),
            delta,
        }
    }

    /// Forget all pressed buttons and touches.
    pub fn reset(&mut self) {
        self.buttons = Buttons::NONE;
        self.pointer = None;
        self.touches.clear();
        self.centroid = None;
    }

    fn touch_mut(&mut self, id: TouchId) -> Option<&mut Point> {
        self.touches
            .iter_mut()
            .find(|(touch, _)| *touch == id)
            .map(|(_, pos)| pos)
    }

    fn compute_centroid(&self) -> Option<Point> {
        if self.touches.is_empty() {
            return None;
        }
        let n = self.touches.len() as f64;
        let (sx, sy) = self
            .touches
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (_, p)| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }
}
