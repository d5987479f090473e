#![forbid(unsafe_code)]

//! Deterministic replay of scripts through a [`GestureSet`].
//!
//! The runner owns a synthetic clock anchored at a fixed origin. Input steps
//! are delivered at the current synthetic time; wait steps advance it, firing
//! each failure deadline at the exact instant it falls due so the trace
//! records the deadline time rather than the end of the wait.

use gestura_core::{GestureSet, GestureState, InputEvent, Recognize, RecognizerId, TargetId};
use tracing::debug;
use web_time::{Duration, Instant};

use crate::error::Result;
use crate::script::{Scenario, Script, Step};
use crate::trace::{CAUSE_DEADLINE, CAUSE_RESET, Trace, TraceEntry};

/// Target every scenario recognizer is bound to.
pub const SCENARIO_TARGET: TargetId = TargetId(1);

/// Replays scripts and records every state transition.
#[derive(Debug)]
pub struct Runner {
    set: GestureSet,
    labels: Vec<String>,
    origin: Instant,
    elapsed: Duration,
    step: usize,
    trace: Trace,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Create a runner whose clock starts now.
    #[must_use]
    pub fn new() -> Self {
        Self::with_origin(Instant::now())
    }

    /// Create a runner whose clock starts at `origin`.
    #[must_use]
    pub fn with_origin(origin: Instant) -> Self {
        Self {
            set: GestureSet::new(),
            labels: Vec::new(),
            origin,
            elapsed: Duration::ZERO,
            step: 0,
            trace: Trace::new(),
        }
    }

    /// Build a runner with the recognizers a scenario declares.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors from the recognizer specs.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        let mut runner = Self::new();
        for spec in &scenario.recognizers {
            runner.push_boxed(spec.build(SCENARIO_TARGET)?);
        }
        Ok(runner)
    }

    /// Install a recognizer. Unlabeled recognizers are traced as
    /// `<gesture>#<index>`.
    pub fn push(&mut self, recognizer: impl Recognize + 'static) -> &mut Self {
        self.push_boxed(Box::new(recognizer))
    }

    pub fn push_boxed(&mut self, recognizer: Box<dyn Recognize>) -> &mut Self {
        let label = recognizer
            .label()
            .map(str::to_owned)
            .unwrap_or_else(|| format!("{}#{}", recognizer.gesture(), self.set.len()));
        self.labels.push(label);
        self.set.push_boxed(recognizer);
        self
    }

    /// Labels of the installed recognizers, in insertion order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn set(&self) -> &GestureSet {
        &self.set
    }

    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    #[must_use]
    pub fn into_trace(self) -> Trace {
        self.trace
    }

    /// Current synthetic time.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.origin + self.elapsed
    }

    /// Synthetic milliseconds since the origin.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// State of the recognizer labeled `label`.
    #[must_use]
    pub fn state_of(&self, label: &str) -> Option<GestureState> {
        let idx = self.labels.iter().position(|l| l == label)?;
        self.set.states().get(idx).copied()
    }

    /// Current state of every recognizer, paired with its label.
    #[must_use]
    pub fn states(&self) -> Vec<(&str, GestureState)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.set.states())
            .collect()
    }

    /// Replay every step of `script`.
    pub fn run(&mut self, script: &Script) -> &Trace {
        for step in script.steps() {
            self.apply(step);
        }
        &self.trace
    }

    /// Replay a single step.
    pub fn apply(&mut self, step: &Step) {
        match step {
            Step::Input { event } => self.deliver(event),
            Step::Wait { ms } => self.advance(Duration::from_millis(*ms)),
            Step::Reset => {
                let before = self.set.states();
                self.set.clear();
                self.record(&before, CAUSE_RESET);
            }
        }
        self.step += 1;
    }

    fn deliver(&mut self, event: &InputEvent) {
        // Deadlines due now fire before the event, as their own transitions.
        self.fire_due();
        debug!(
            step = self.step,
            at_ms = self.elapsed_ms(),
            event = event.name(),
            "replaying input"
        );
        let before = self.set.states();
        self.set.dispatch(event, self.now());
        self.record(&before, event.name());
    }

    fn advance(&mut self, by: Duration) {
        let end = self.elapsed + by;
        loop {
            match self.set.next_deadline() {
                Some(deadline) if deadline <= self.origin + end => {
                    self.elapsed = self.elapsed.max(deadline.saturating_duration_since(self.origin));
                    self.fire_due();
                }
                _ => break,
            }
        }
        self.elapsed = end;
    }

    fn fire_due(&mut self) {
        let before = self.set.states();
        self.set.tick(self.now());
        self.record(&before, CAUSE_DEADLINE);
    }

    fn record(&mut self, before: &[GestureState], cause: &str) {
        let at_ms = self.elapsed_ms();
        for (idx, (from, to)) in before.iter().zip(self.set.states()).enumerate() {
            if *from == to {
                continue;
            }
            let Some(gesture) = self.set.get(RecognizerId(idx)).map(|r| r.gesture()) else {
                continue;
            };
            self.trace.push(TraceEntry {
                at_ms,
                step: self.step,
                recognizer: self.labels[idx].clone(),
                gesture: gesture.to_owned(),
                cause: cause.to_owned(),
                from: *from,
                to,
            });
        }
    }
}
