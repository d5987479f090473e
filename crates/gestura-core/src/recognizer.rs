#![forbid(unsafe_code)]

//! The generic recognizer: one fixed state machine, many gesture kinds.
//!
//! [`Recognizer`] owns everything the lifecycle needs (state, click
//! qualifier, delayed-failure timer, translation, completion callback). What
//! differs between gestures lives behind the small [`GestureKind`]
//! capability: how raw events map onto the machine's [`EventRole`]s and
//! whether the current input has the right *shape*.
//!
//! # State Machine
//!
//! ```text
//! Possible --(motion, should_interpret && should_recognize)--> Began --(motion)--> Changed
//! Possible --(motion, should_interpret && !should_recognize)-> Failed
//! Possible --(failure deadline elapses)-----------------------> Failed
//! Possible --(reject)-----------------------------------------> Failed
//! Began|Changed --(release, all inputs up)--------------------> Ended
//! Began|Changed --(interrupt, all inputs gone)----------------> Cancelled
//! any --(reset)-----------------------------------------------> Possible
//! ```
//!
//! # Invariants
//!
//! 1. Terminal states (`Ended`, `Cancelled`, `Failed`) are left only by `reset`.
//! 2. Interpretation is attempted only on motion; presses and releases only
//!    drive the click qualifier and the failure deadline, or finalize.
//! 3. At most one failure deadline is pending, and none once terminal.
//! 4. The failure deadline only ever moves `Possible` to `Failed`; a late
//!    firing never overwrites a decision already made.
//! 5. The completion callback runs exactly once per `Ended`, after the state
//!    is stored.

use std::fmt;

use web_time::{Duration, Instant};

use crate::config::Thresholds;
use crate::error::{GestureError, Result};
use crate::input::{InputEvent, InputSnapshot, Point, TargetId, TouchId, Translation};
use crate::qualifier::ClickQualifier;
use crate::state::GestureState;
use crate::timer::FailureTimer;
use crate::tracker::Observation;
use crate::{debug, trace};

// ---------------------------------------------------------------------------
// Capability interface
// ---------------------------------------------------------------------------

/// What a raw event means to a particular gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventRole {
    /// A press that may count toward click/tap qualification.
    Press,
    /// A release that may finalize the gesture.
    Release,
    /// Motion that may trigger interpretation or continue the gesture.
    Motion,
    /// The input source aborted input; may cancel the gesture.
    Interrupt,
    /// Input this gesture can never accept; fails a pending recognizer.
    Reject,
    /// Irrelevant to this gesture.
    Ignore,
}

/// Per-gesture capabilities plugged into the shared [`Recognizer`] core.
pub trait GestureKind: fmt::Debug + Sized {
    /// Stable lowercase gesture name, used in logs and errors.
    const NAME: &'static str;

    /// Configuration accepted by [`RecognizerBuilder::config`].
    type Config: Clone + fmt::Debug + Default;

    /// Validate `config` and split it into the capability and the shared thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] for impossible configurations.
    fn from_config(config: &Self::Config) -> Result<(Self, Thresholds)>;

    /// Map a raw event onto the state machine.
    fn classify(&self, event: &InputEvent) -> EventRole;

    /// Whether the current input has the shape of this gesture.
    fn should_recognize(&self, input: &InputSnapshot) -> bool;

    /// Whether a press counts toward qualification.
    fn press_qualifies(&self, _input: &InputSnapshot) -> bool {
        true
    }

    /// Whether every input this gesture tracks has been released.
    fn inputs_released(&self, input: &InputSnapshot) -> bool;

    /// Prepare the translation when the gesture begins.
    fn begin_interpretation(&self, translation: &mut Translation) {
        *translation = Translation::ZERO;
    }
}

/// Completion callback, invoked with the recognizer once it has ended.
pub type Callback<K> = Box<dyn FnMut(&Recognizer<K>)>;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builds a [`Recognizer`] bound to an input target.
pub struct RecognizerBuilder<K: GestureKind> {
    config: K::Config,
    target: Option<TargetId>,
    name: Option<String>,
    callback: Option<Callback<K>>,
}

impl<K: GestureKind> Default for RecognizerBuilder<K> {
    fn default() -> Self {
        Self {
            config: K::Config::default(),
            target: None,
            name: None,
            callback: None,
        }
    }
}

impl<K: GestureKind> fmt::Debug for RecognizerBuilder<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognizerBuilder")
            .field("gesture", &K::NAME)
            .field("config", &self.config)
            .field("target", &self.target)
            .field("name", &self.name)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl<K: GestureKind> RecognizerBuilder<K> {
    /// Use `config` instead of the gesture's default configuration.
    #[must_use]
    pub fn config(mut self, config: K::Config) -> Self {
        self.config = config;
        self
    }

    /// Bind the recognizer to `target`.
    #[must_use]
    pub fn target(mut self, target: TargetId) -> Self {
        self.target = Some(target);
        self
    }

    /// Bind the recognizer to `target`, or leave it unbound when `None`.
    #[must_use]
    pub fn maybe_target(mut self, target: Option<TargetId>) -> Self {
        self.target = target;
        self
    }

    /// Label the recognizer for logs.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label the recognizer, or leave it unlabeled when `None`.
    #[must_use]
    pub fn maybe_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Call `callback` each time the gesture ends successfully.
    #[must_use]
    pub fn on_recognized(mut self, callback: impl FnMut(&Recognizer<K>) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Validate the configuration and build the recognizer.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::MissingTarget`] if no target was bound and
    /// [`GestureError::InvalidConfig`] if the configuration is impossible.
    pub fn build(self) -> Result<Recognizer<K>> {
        let target = self
            .target
            .ok_or(GestureError::MissingTarget { gesture: K::NAME })?;
        let (kind, thresholds) = K::from_config(&self.config)?;
        Ok(Recognizer {
            kind,
            target,
            name: self.name,
            state: GestureState::Possible,
            translation: Translation::ZERO,
            qualifier: ClickQualifier::new(
                thresholds.number_of_clicks,
                thresholds.max_click_interval,
            ),
            interpret_distance: thresholds.interpret_distance,
            timer: FailureTimer::new(),
            callback: self.callback,
        })
    }
}

// ---------------------------------------------------------------------------
// Recognizer
// ---------------------------------------------------------------------------

/// A gesture recognizer bound to one input target.
///
/// Feed it events with [`handle`](Recognizer::handle) (or the `on_*` hooks),
/// passing the aggregate input state *after* the event source applied the
/// event, and call [`tick`](Recognizer::tick) when a pending failure
/// deadline may have elapsed. Once terminal, call
/// [`reset`](Recognizer::reset) to reuse the instance.
pub struct Recognizer<K: GestureKind> {
    kind: K,
    target: TargetId,
    name: Option<String>,
    state: GestureState,
    translation: Translation,
    qualifier: ClickQualifier,
    interpret_distance: f64,
    timer: FailureTimer,
    callback: Option<Callback<K>>,
}

impl<K: GestureKind> fmt::Debug for Recognizer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("name", &self.name)
            .field("state", &self.state)
            .field("clicks", &self.qualifier.count())
            .field("failure_pending", &self.timer.is_pending())
            .finish()
    }
}

impl<K: GestureKind> Recognizer<K> {
    /// Start building a recognizer with the gesture's default configuration.
    #[must_use]
    pub fn builder() -> RecognizerBuilder<K> {
        RecognizerBuilder::default()
    }

    /// The gesture capability.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// The bound input target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> TargetId {
        self.target
    }

    /// Optional label.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Current recognition state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Displacement accumulated so far (zeroed when the gesture began).
    #[inline]
    #[must_use]
    pub fn translation(&self) -> Translation {
        self.translation
    }

    /// Add a raw displacement reported by the event source.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.translation += Translation::new(dx, dy);
    }

    /// Qualifying presses counted since the last reset.
    #[inline]
    #[must_use]
    pub fn click_count(&self) -> u32 {
        self.qualifier.count()
    }

    /// Presses required before interpretation.
    #[inline]
    #[must_use]
    pub fn number_of_clicks(&self) -> u32 {
        self.qualifier.required()
    }

    /// Distance that must be exceeded before interpretation.
    #[inline]
    #[must_use]
    pub fn interpret_distance(&self) -> f64 {
        self.interpret_distance
    }

    /// Maximum gap allowed between qualifying presses.
    #[inline]
    #[must_use]
    pub fn max_click_interval(&self) -> Duration {
        self.qualifier.max_interval()
    }

    /// Deadline of the pending delayed failure, if any.
    #[inline]
    #[must_use]
    pub fn failure_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Whether a delayed failure is pending.
    #[inline]
    #[must_use]
    pub fn has_pending_failure(&self) -> bool {
        self.timer.is_pending()
    }

    /// Return to `Possible`, forgetting counted presses, accumulated
    /// translation and any pending deadline.
    ///
    /// The instance, its configuration, target and callback are kept.
    pub fn reset(&mut self) {
        if self.state != GestureState::Possible {
            debug!(
                gesture = K::NAME,
                name = self.name.as_deref().unwrap_or(""),
                from = %self.state,
                "gesture reset"
            );
        }
        self.state = GestureState::Possible;
        self.translation = Translation::ZERO;
        self.qualifier.reset();
        self.cancel_fail_after_delay();
    }

    /// Whether motion so far warrants a match decision: the translation
    /// exceeds the interpret distance and the click sequence is complete.
    #[must_use]
    pub fn should_interpret(&self) -> bool {
        self.translation.length() > self.interpret_distance && self.qualifier.is_satisfied()
    }

    /// Whether the current input has the shape of this gesture.
    #[must_use]
    pub fn should_recognize(&self, input: &InputSnapshot) -> bool {
        self.kind.should_recognize(input)
    }

    /// Fail this recognizer if it is still `Possible` after `delay`.
    ///
    /// Replaces any pending deadline.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn fail_after_delay(&mut self, now: Instant, delay: Duration) {
        let deadline = self.timer.schedule(now, delay);
        trace!(gesture = K::NAME, ?deadline, "failure deadline armed");
    }

    /// Drop the pending failure deadline, if any.
    pub fn cancel_fail_after_delay(&mut self) {
        if self.timer.cancel() {
            trace!(gesture = K::NAME, "failure deadline cancelled");
        }
    }

    /// Fire the failure deadline if it has elapsed.
    ///
    /// Returns the state after the check.
    pub fn tick(&mut self, now: Instant) -> GestureState {
        if self.timer.expire(now) {
            if self.state == GestureState::Possible {
                self.transition(GestureState::Failed);
            } else {
                debug!(
                    gesture = K::NAME,
                    state = %self.state,
                    "failure deadline elapsed after decision, ignored"
                );
            }
        }
        self.state
    }

    /// Feed one raw event.
    ///
    /// `input` is the aggregate input state after the event source applied
    /// `event`. An elapsed failure deadline is honored before the event is
    /// interpreted. Returns the state after the event.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        input: &InputSnapshot,
        now: Instant,
    ) -> GestureState {
        self.tick(now);
        match self.kind.classify(event) {
            EventRole::Press => self.on_press(input, now),
            EventRole::Release => self.on_release(input, now),
            EventRole::Motion => self.on_motion(input),
            EventRole::Interrupt => self.on_interrupt(input),
            EventRole::Reject => self.on_reject(),
            EventRole::Ignore => {}
        }
        self.state
    }

    /// Feed one event together with the event source's observation of it:
    /// the translation delta (if any) is accumulated before the event is
    /// handled.
    pub fn feed(
        &mut self,
        event: &InputEvent,
        observation: &Observation,
        now: Instant,
    ) -> GestureState {
        if let Some(delta) = observation.delta {
            self.translation += delta;
        }
        self.handle(event, &observation.snapshot, now)
    }

    // -- Per-event hooks ----------------------------------------------------

    /// A pointer button was pressed.
    pub fn on_button_down(
        &mut self,
        button: u8,
        input: &InputSnapshot,
        now: Instant,
    ) -> GestureState {
        self.handle(&InputEvent::ButtonDown { button, pos: Point::ORIGIN }, input, now)
    }

    /// A pointer button was released.
    pub fn on_button_up(
        &mut self,
        button: u8,
        input: &InputSnapshot,
        now: Instant,
    ) -> GestureState {
        self.handle(&InputEvent::ButtonUp { button, pos: Point::ORIGIN }, input, now)
    }

    /// The pointer moved.
    pub fn on_pointer_move(&mut self, input: &InputSnapshot, now: Instant) -> GestureState {
        self.handle(&InputEvent::PointerMove { pos: Point::ORIGIN }, input, now)
    }

    /// A touch point was placed.
    pub fn on_touch_start(
        &mut self,
        id: TouchId,
        input: &InputSnapshot,
        now: Instant,
    ) -> GestureState {
        self.handle(&InputEvent::TouchStart { id, pos: Point::ORIGIN }, input, now)
    }

    /// A touch point moved.
    pub fn on_touch_move(
        &mut self,
        id: TouchId,
        input: &InputSnapshot,
        now: Instant,
    ) -> GestureState {
        self.handle(&InputEvent::TouchMove { id, pos: Point::ORIGIN }, input, now)
    }

    /// A touch point was lifted.
    pub fn on_touch_end(
        &mut self,
        id: TouchId,
        input: &InputSnapshot,
        now: Instant,
    ) -> GestureState {
        self.handle(&InputEvent::TouchEnd { id, pos: Point::ORIGIN }, input, now)
    }

    /// The platform aborted a touch point.
    pub fn on_touch_cancel(
        &mut self,
        id: TouchId,
        input: &InputSnapshot,
        now: Instant,
    ) -> GestureState {
        self.handle(&InputEvent::TouchCancel { id }, input, now)
    }
}

// ---------------------------------------------------------------------------
// Internal role handlers
// ---------------------------------------------------------------------------

impl<K: GestureKind> Recognizer<K> {
    fn on_press(&mut self, input: &InputSnapshot, now: Instant) {
        if self.state == GestureState::Possible && self.kind.press_qualifies(input) {
            self.qualifier.register(&mut self.timer, now);
        }
    }

    fn on_release(&mut self, input: &InputSnapshot, now: Instant) {
        if self.qualifier.is_satisfied() {
            if self.kind.inputs_released(input) {
                match self.state {
                    GestureState::Possible => self.transition(GestureState::Failed),
                    GestureState::Began | GestureState::Changed => {
                        self.transition(GestureState::Ended);
                    }
                    _ => {}
                }
            }
        } else if self.state == GestureState::Possible {
            // Between clicks: the next press must arrive in time.
            self.qualifier.await_next(&mut self.timer, now);
        }
    }

    fn on_motion(&mut self, input: &InputSnapshot) {
        match self.state {
            GestureState::Possible => {
                if self.should_interpret() {
                    if self.kind.should_recognize(input) {
                        self.kind.begin_interpretation(&mut self.translation);
                        self.transition(GestureState::Began);
                    } else {
                        self.transition(GestureState::Failed);
                    }
                }
            }
            GestureState::Began | GestureState::Changed => self.transition(GestureState::Changed),
            GestureState::Ended | GestureState::Cancelled | GestureState::Failed => {}
        }
    }

    fn on_interrupt(&mut self, input: &InputSnapshot) {
        if !self.kind.inputs_released(input) {
            return;
        }
        match self.state {
            GestureState::Possible => self.transition(GestureState::Failed),
            GestureState::Began | GestureState::Changed => {
                self.transition(GestureState::Cancelled);
            }
            _ => {}
        }
    }

    fn on_reject(&mut self) {
        if self.state == GestureState::Possible {
            self.transition(GestureState::Failed);
        }
    }

    fn transition(&mut self, to: GestureState) {
        let from = self.state;
        if from != to {
            debug!(
                gesture = K::NAME,
                name = self.name.as_deref().unwrap_or(""),
                from = %from,
                to = %to,
                "gesture transition"
            );
        }
        self.state = to;
        // Interpretation decided: no qualification deadline remains.
        if to != GestureState::Possible {
            self.cancel_fail_after_delay();
        }
        if to == GestureState::Ended {
            if let Some(mut callback) = self.callback.take() {
                callback(self);
                self.callback = Some(callback);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Object-safe view
// ---------------------------------------------------------------------------

/// Object-safe view of a recognizer, so heterogeneous recognizers can share
/// one input stream.
pub trait Recognize {
    /// Gesture name.
    fn gesture(&self) -> &'static str;

    /// Optional label.
    fn label(&self) -> Option<&str>;

    /// Bound input target.
    fn target(&self) -> TargetId;

    /// Current recognition state.
    fn state(&self) -> GestureState;

    /// Displacement accumulated since the gesture began.
    fn translation(&self) -> Translation;

    /// Feed one event with the event source's observation of it.
    fn feed(&mut self, event: &InputEvent, observation: &Observation, now: Instant) -> GestureState;

    /// Fire an elapsed failure deadline.
    fn tick(&mut self, now: Instant) -> GestureState;

    /// Return to `Possible`.
    fn reset(&mut self);

    /// Deadline of the pending delayed failure, if any.
    fn next_deadline(&self) -> Option<Instant>;
}

impl<K: GestureKind> Recognize for Recognizer<K> {
    fn gesture(&self) -> &'static str {
        K::NAME
    }

    fn label(&self) -> Option<&str> {
        self.name()
    }

    fn target(&self) -> TargetId {
        self.target
    }

    fn state(&self) -> GestureState {
        self.state
    }

    fn translation(&self) -> Translation {
        self.translation
    }

    fn feed(
        &mut self,
        event: &InputEvent,
        observation: &Observation,
        now: Instant,
    ) -> GestureState {
        Recognizer::feed(self, event, observation, now)
    }

    fn tick(&mut self, now: Instant) -> GestureState {
        Recognizer::tick(self, now)
    }

    fn reset(&mut self) {
        Recognizer::reset(self);
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Minimal capability: button 0 presses, moves, releases; any touch rejects.
    #[derive(Debug)]
    struct Mock;

    impl GestureKind for Mock {
        const NAME: &'static str = "mock";
        type Config = u32;

        fn from_config(clicks: &u32) -> Result<(Self, Thresholds)> {
            if *clicks == 0 {
                return Err(GestureError::invalid(Self::NAME, "zero clicks"));
            }
            Ok((
                Mock,
                Thresholds {
                    number_of_clicks: *clicks,
                    interpret_distance: 5.0,
                    max_click_interval: Duration::from_millis(400),
                },
            ))
        }

        fn classify(&self, event: &InputEvent) -> EventRole {
            match event {
                InputEvent::ButtonDown { .. } => EventRole::Press,
                InputEvent::ButtonUp { .. } => EventRole::Release,
                InputEvent::PointerMove { .. } => EventRole::Motion,
                InputEvent::TouchCancel { .. } => EventRole::Interrupt,
                _ => EventRole::Reject,
            }
        }

        fn should_recognize(&self, input: &InputSnapshot) -> bool {
            !input.buttons.is_empty()
        }

        fn inputs_released(&self, input: &InputSnapshot) -> bool {
            input.buttons.is_empty()
        }
    }

    fn mock(clicks: u32) -> Recognizer<Mock> {
        Recognizer::<Mock>::builder()
            .config(clicks)
            .target(TargetId(1))
            .build()
            .unwrap()
    }

    const DOWN: InputSnapshot = InputSnapshot::with_buttons(crate::input::Buttons::PRIMARY);
    const UP: InputSnapshot = InputSnapshot::IDLE;

    #[test]
    fn build_requires_target() {
        let err = Recognizer::<Mock>::builder().config(1).build().unwrap_err();
        assert_eq!(err, GestureError::MissingTarget { gesture: "mock" });
    }

    #[test]
    fn build_rejects_invalid_config() {
        let err = Recognizer::<Mock>::builder()
            .config(0)
            .target(TargetId(1))
            .build()
            .unwrap_err();
        assert!(matches!(err, GestureError::InvalidConfig { .. }));
    }

    #[test]
    fn maybe_target_none_fails() {
        let err = Recognizer::<Mock>::builder()
            .maybe_target(None)
            .build()
            .unwrap_err();
        assert_eq!(err.gesture(), "mock");
    }

    #[test]
    fn starts_possible() {
        let r = mock(1);
        assert_eq!(r.state(), GestureState::Possible);
        assert_eq!(r.click_count(), 0);
        assert!(!r.has_pending_failure());
        assert_eq!(r.target(), TargetId(1));
        assert_eq!(r.name(), None);
    }

    #[test]
    fn motion_below_distance_keeps_possible() {
        let t = Instant::now();
        let mut r = mock(1);
        r.on_button_down(0, &DOWN, t);
        r.translate(3.0, 4.0); // exactly 5, not beyond
        assert_eq!(r.on_pointer_move(&DOWN, t), GestureState::Possible);
        r.translate(0.1, 0.0);
        assert_eq!(r.on_pointer_move(&DOWN, t), GestureState::Began);
    }

    #[test]
    fn began_zeroes_translation() {
        let t = Instant::now();
        let mut r = mock(1);
        r.on_button_down(0, &DOWN, t);
        r.translate(10.0, 0.0);
        r.on_pointer_move(&DOWN, t);
        assert_eq!(r.state(), GestureState::Began);
        assert_eq!(r.translation(), Translation::ZERO);
    }

    #[test]
    fn motion_without_shape_fails() {
        let t = Instant::now();
        let mut r = mock(1);
        r.on_button_down(0, &DOWN, t);
        r.translate(10.0, 0.0);
        assert_eq!(r.on_pointer_move(&UP, t), GestureState::Failed);
    }

    #[test]
    fn press_and_release_never_interpret() {
        let t = Instant::now();
        let mut r = mock(1);
        r.translate(50.0, 0.0);
        assert_eq!(r.on_button_down(0, &DOWN, t), GestureState::Possible);
    }

    #[test]
    fn terminal_state_ignores_events() {
        let t = Instant::now();
        let mut r = mock(1);
        r.on_touch_start(1, &UP, t);
        assert_eq!(r.state(), GestureState::Failed);

        r.on_button_down(0, &DOWN, t);
        r.translate(20.0, 0.0);
        r.on_pointer_move(&DOWN, t);
        r.on_button_up(0, &UP, t);
        assert_eq!(r.state(), GestureState::Failed);
        assert_eq!(r.click_count(), 0);
    }

    #[test]
    fn late_deadline_does_not_overwrite_ended() {
        let t = Instant::now();
        let mut r = mock(1);
        r.on_button_down(0, &DOWN, t);
        r.translate(10.0, 0.0);
        r.on_pointer_move(&DOWN, t);
        r.on_button_up(0, &UP, t);
        assert_eq!(r.state(), GestureState::Ended);

        // Arm a deadline by hand after the decision; its firing is ignored.
        r.fail_after_delay(t, Duration::from_millis(10));
        assert_eq!(r.tick(t + Duration::from_millis(20)), GestureState::Ended);
        assert!(!r.has_pending_failure());
    }

    #[test]
    fn handle_honors_elapsed_deadline_first() {
        let t = Instant::now();
        let mut r = mock(2);
        r.on_button_down(0, &DOWN, t);
        r.on_button_up(0, &UP, t);
        // Second press arrives after the interval: too late.
        let late = t + Duration::from_millis(500);
        assert_eq!(r.on_button_down(0, &DOWN, late), GestureState::Failed);
        assert_eq!(r.click_count(), 1);
    }

    #[test]
    fn unrepresentable_delay_never_fails() {
        let t = Instant::now();
        let mut r = mock(2);
        r.on_button_down(0, &DOWN, t);
        r.fail_after_delay(t, Duration::MAX);
        assert!(!r.has_pending_failure());
        assert_eq!(r.tick(t + Duration::from_secs(3600)), GestureState::Possible);
    }

    #[test]
    fn terminal_transition_clears_deadline() {
        let t = Instant::now();
        let mut r = mock(2);
        r.on_button_down(0, &DOWN, t);
        assert!(r.has_pending_failure());
        r.on_touch_start(9, &DOWN, t);
        assert_eq!(r.state(), GestureState::Failed);
        assert!(!r.has_pending_failure());
    }

    #[test]
    fn interrupt_from_active_cancels() {
        let t = Instant::now();
        let mut r = mock(1);
        r.on_button_down(0, &DOWN, t);
        r.translate(10.0, 0.0);
        r.on_pointer_move(&DOWN, t);
        assert_eq!(r.on_touch_cancel(1, &UP, t), GestureState::Cancelled);
    }

    #[test]
    fn interrupt_with_inputs_held_is_ignored() {
        let t = Instant::now();
        let mut r = mock(1);
        r.on_button_down(0, &DOWN, t);
        r.translate(10.0, 0.0);
        r.on_pointer_move(&DOWN, t);
        assert_eq!(r.on_touch_cancel(1, &DOWN, t), GestureState::Began);
    }

    #[test]
    fn callback_fires_once_with_ended_state() {
        let t = Instant::now();
        let seen = Rc::new(Cell::new(0u32));
        let saw_ended = Rc::new(Cell::new(false));
        let (seen2, saw_ended2) = (Rc::clone(&seen), Rc::clone(&saw_ended));

        let mut r = Recognizer::<Mock>::builder()
            .config(1)
            .target(TargetId(2))
            .name("primary")
            .on_recognized(move |r| {
                seen2.set(seen2.get() + 1);
                saw_ended2.set(r.state() == GestureState::Ended);
            })
            .build()
            .unwrap();

        r.on_button_down(0, &DOWN, t);
        r.translate(10.0, 0.0);
        r.on_pointer_move(&DOWN, t);
        r.on_pointer_move(&DOWN, t);
        r.on_button_up(0, &UP, t);
        r.on_button_up(0, &UP, t);

        assert_eq!(seen.get(), 1);
        assert!(saw_ended.get());
        assert_eq!(r.name(), Some("primary"));
    }

    #[test]
    fn callback_not_invoked_on_failure() {
        let t = Instant::now();
        let seen = Rc::new(Cell::new(false));
        let seen2 = Rc::clone(&seen);
        let mut r = Recognizer::<Mock>::builder()
            .config(1)
            .target(TargetId(2))
            .on_recognized(move |_| seen2.set(true))
            .build()
            .unwrap();

        r.on_button_down(0, &DOWN, t);
        r.on_button_up(0, &UP, t);
        assert_eq!(r.state(), GestureState::Failed);
        assert!(!seen.get());
    }

    #[test]
    fn reset_is_idempotent() {
        let t = Instant::now();
        let mut r = mock(3);
        r.on_button_down(0, &DOWN, t);
        r.translate(2.0, 2.0);
        r.reset();
        r.reset();
        assert_eq!(r.state(), GestureState::Possible);
        assert_eq!(r.click_count(), 0);
        assert_eq!(r.translation(), Translation::ZERO);
        assert!(!r.has_pending_failure());
    }

    #[test]
    fn cancel_fail_after_delay_when_idle_is_noop() {
        let mut r = mock(1);
        r.cancel_fail_after_delay();
        assert_eq!(r.state(), GestureState::Possible);
        assert!(!r.has_pending_failure());
    }

    #[test]
    fn debug_format() {
        let r = mock(1);
        let dbg = format!("{r:?}");
        assert!(dbg.contains("Recognizer"));
        assert!(dbg.contains("Possible"));
    }
}
