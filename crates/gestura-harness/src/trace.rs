#![forbid(unsafe_code)]

//! Recorded state transitions and their JSONL form.
//!
//! # JSONL Schema
//!
//! One object per transition, in the order they happened:
//!
//! ```json
//! {"at_ms":0,"step":3,"recognizer":"orbit","gesture":"drag","cause":"pointer_move","from":"possible","to":"began"}
//! {"at_ms":400,"step":5,"recognizer":"pan#1","gesture":"pan","cause":"deadline","from":"possible","to":"failed"}
//! ```
//!
//! `cause` is the name of the input event, `deadline` for an elapsed
//! failure deadline, or `reset`.

use gestura_core::GestureState;
use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

/// Cause recorded for transitions triggered by an elapsed failure deadline.
pub const CAUSE_DEADLINE: &str = "deadline";

/// Cause recorded for transitions triggered by a reset step.
pub const CAUSE_RESET: &str = "reset";

/// One observed state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Synthetic time of the transition, in milliseconds since the start.
    pub at_ms: u64,
    /// Index of the script step that was running.
    pub step: usize,
    /// Recognizer label.
    pub recognizer: String,
    /// Gesture name.
    pub gesture: String,
    /// What triggered the transition.
    pub cause: String,
    pub from: GestureState,
    pub to: GestureState,
}

/// Ordered list of transitions observed while replaying a script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Transitions of the recognizer labeled `recognizer`, as `(from, to)` pairs.
    #[must_use]
    pub fn transitions_for(&self, recognizer: &str) -> Vec<(GestureState, GestureState)> {
        self.entries
            .iter()
            .filter(|e| e.recognizer == recognizer)
            .map(|e| (e.from, e.to))
            .collect()
    }

    /// States entered by the recognizer labeled `recognizer`, in order.
    #[must_use]
    pub fn states_for(&self, recognizer: &str) -> Vec<GestureState> {
        self.entries
            .iter()
            .filter(|e| e.recognizer == recognizer)
            .map(|e| e.to)
            .collect()
    }

    /// Index of the first entry where `self` and `other` disagree, if any.
    #[must_use]
    pub fn first_divergence(&self, other: &Trace) -> Option<usize> {
        let common = self.entries.len().min(other.entries.len());
        (0..common)
            .find(|&i| self.entries[i] != other.entries[i])
            .or_else(|| (self.entries.len() != other.entries.len()).then_some(common))
    }

    /// Render as JSONL, one entry per line.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Json`] if an entry fails to serialize.
    pub fn to_jsonl(&self) -> Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse JSONL produced by [`to_jsonl`](Trace::to_jsonl). Blank lines are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidTrace`] naming the first bad line.
    pub fn from_jsonl(input: &str) -> Result<Self> {
        let mut trace = Self::new();
        for (idx, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let entry = serde_json::from_str(line).map_err(|err| HarnessError::InvalidTrace {
                line: idx + 1,
                message: err.to_string(),
            })?;
            trace.push(entry);
        }
        Ok(trace)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
