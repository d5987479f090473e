#![forbid(unsafe_code)]

//! Fan-out of one input stream to several recognizers.
//!
//! [`GestureSet`] plays the owning collaborator for a single input target:
//! it applies each raw event to its [`InputTracker`] once and delivers the
//! resulting [`Observation`] to every recognizer in insertion order. There is
//! no arbitration between recognizers: each one decides on its own, and
//! which recognized gesture wins is left to the caller.
//!
//! # Usage
//!
//! ```
//! use gestura_core::{DragRecognizer, GestureSet, InputEvent, PanRecognizer, Point, TargetId};
//! use web_time::Instant;
//!
//! let mut set = GestureSet::new();
//! let drag = set.push(DragRecognizer::builder().target(TargetId(1)).build().unwrap());
//! let pan = set.push(PanRecognizer::builder().target(TargetId(1)).build().unwrap());
//!
//! let t = Instant::now();
//! set.dispatch(&InputEvent::TouchStart { id: 1, pos: Point::new(0.0, 0.0) }, t);
//! assert!(set.state(drag).unwrap().is_terminal());
//! assert!(!set.state(pan).unwrap().is_terminal());
//!
//! // Sleep until the earliest failure deadline, then tick.
//! if let Some(deadline) = set.next_deadline() {
//!     set.tick(deadline);
//! }
//! ```

use web_time::Instant;

use crate::debug;
use crate::input::{InputEvent, InputSnapshot};
use crate::recognizer::Recognize;
use crate::state::GestureState;
use crate::tracker::{InputTracker, Observation};

/// Index of a recognizer inside a [`GestureSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecognizerId(pub usize);

/// An input tracker plus the recognizers observing its stream.
#[derive(Default)]
pub struct GestureSet {
    tracker: InputTracker,
    recognizers: Vec<Box<dyn Recognize>>,
}

impl std::fmt::Debug for GestureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureSet")
            .field("input", &self.tracker.snapshot())
            .field("states", &self.states())
            .finish()
    }
}

impl GestureSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recognizer; it observes every event dispatched from now on.
    pub fn push(&mut self, recognizer: impl Recognize + 'static) -> RecognizerId {
        self.push_boxed(Box::new(recognizer))
    }

    /// Add an already boxed recognizer.
    pub fn push_boxed(&mut self, recognizer: Box<dyn Recognize>) -> RecognizerId {
        self.recognizers.push(recognizer);
        RecognizerId(self.recognizers.len() - 1)
    }

    /// Number of recognizers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    /// Whether the set holds no recognizers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// The recognizer at `id`.
    #[must_use]
    pub fn get(&self, id: RecognizerId) -> Option<&dyn Recognize> {
        self.recognizers.get(id.0).map(|r| r.as_ref())
    }

    /// State of the recognizer at `id`.
    #[must_use]
    pub fn state(&self, id: RecognizerId) -> Option<GestureState> {
        self.get(id).map(|r| r.state())
    }

    /// States of all recognizers, in insertion order.
    #[must_use]
    pub fn states(&self) -> Vec<GestureState> {
        self.recognizers.iter().map(|r| r.state()).collect()
    }

    /// Iterate over the recognizers with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (RecognizerId, &dyn Recognize)> {
        self.recognizers
            .iter()
            .enumerate()
            .map(|(i, r)| (RecognizerId(i), r.as_ref()))
    }

    /// Aggregate input state.
    #[must_use]
    pub fn input(&self) -> InputSnapshot {
        self.tracker.snapshot()
    }

    /// The underlying input tracker.
    #[must_use]
    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    /// Apply `event` to the tracker and deliver it to every recognizer.
    ///
    /// Returns what the tracker observed.
    pub fn dispatch(&mut self, event: &InputEvent, now: Instant) -> Observation {
        let observation = self.tracker.apply(event);
        for recognizer in &mut self.recognizers {
            recognizer.feed(event, &observation, now);
        }
        observation
    }

    /// Fire every elapsed failure deadline.
    pub fn tick(&mut self, now: Instant) {
        for recognizer in &mut self.recognizers {
            recognizer.tick(now);
        }
    }

    /// Earliest pending failure deadline across all recognizers.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.recognizers
            .iter()
            .filter_map(|r| r.next_deadline())
            .min()
    }

    /// Reset every recognizer to `Possible`.
    pub fn reset_all(&mut self) {
        for recognizer in &mut self.recognizers {
            recognizer.reset();
        }
    }

    /// Reset the recognizers that reached a terminal state, once no button
    /// or touch is held any more.
    ///
    /// Returns how many recognizers were reset.
    pub fn reset_settled(&mut self) -> usize {
        if !self.tracker.snapshot().is_idle() {
            return 0;
        }
        let mut reset = 0;
        for recognizer in &mut self.recognizers {
            if recognizer.state().is_terminal() {
                recognizer.reset();
                reset += 1;
            }
        }
        if reset > 0 {
            debug!(count = reset, "settled recognizers reset");
        }
        reset
    }

    /// Forget all input and reset every recognizer.
    pub fn clear(&mut self) {
        self.tracker.reset();
        self.reset_all();
    }
}
