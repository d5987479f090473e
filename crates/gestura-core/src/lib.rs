#![forbid(unsafe_code)]

//! Core: gesture recognition state machines for pointer and touch input.
//!
//! # Role in Gestura
//! `gestura-core` turns raw button and touch transitions into named gestures
//! that a viewport can use to drive its camera or UI. Every recognizer
//! observes the same input stream and independently decides, from partial
//! and time-sensitive evidence, whether the sequence in progress matches.
//!
//! # Primary responsibilities
//! - **GestureState**: the closed lifecycle shared by every recognizer.
//! - **Recognizer**: a fixed state-machine core parameterized by a small
//!   [`GestureKind`](recognizer::GestureKind) capability ([`Drag`], [`Pan`]).
//! - **Click/tap qualification** and the **delayed-failure timer** that bounds
//!   how long a recognizer waits between qualifying presses.
//! - **InputTracker**: a reference event source that maintains the aggregate
//!   input state (button mask, touch count, translation deltas).
//!
//! # How it fits in the system
//! The caller owns the event loop. Raw events go into a
//! [`GestureSet`](set::GestureSet) (or straight into a recognizer with an
//! [`InputSnapshot`](input::InputSnapshot)), and the caller polls
//! [`GestureSet::next_deadline`](set::GestureSet::next_deadline) to know when
//! to call `tick` so pending failure deadlines can elapse.
//!
//! ```
//! use gestura_core::{DragRecognizer, GestureSet, GestureState, InputEvent, Point, TargetId};
//! use web_time::Instant;
//!
//! let drag = DragRecognizer::builder().target(TargetId(1)).build().unwrap();
//! let mut set = GestureSet::new();
//! let id = set.push(drag);
//!
//! let t = Instant::now();
//! set.dispatch(&InputEvent::ButtonDown { button: 0, pos: Point::new(0.0, 0.0) }, t);
//! set.dispatch(&InputEvent::PointerMove { pos: Point::new(10.0, 0.0) }, t);
//! set.dispatch(&InputEvent::PointerMove { pos: Point::new(12.0, 0.0) }, t);
//! assert_eq!(set.state(id), Some(GestureState::Changed));
//! ```

pub mod config;
pub mod drag;
pub mod error;
pub mod input;
mod logging;
pub mod pan;
pub mod qualifier;
pub mod recognizer;
pub mod set;
pub mod state;
pub mod timer;
pub mod tracker;

pub use config::{DragConfig, PanConfig, Thresholds};
pub use drag::{Drag, DragRecognizer};
pub use error::{GestureError, Result};
pub use input::{Buttons, InputEvent, InputSnapshot, Point, TargetId, TouchId, Translation};
pub use pan::{Pan, PanRecognizer};
pub use recognizer::{EventRole, GestureKind, Recognize, Recognizer, RecognizerBuilder};
pub use set::{GestureSet, RecognizerId};
pub use state::GestureState;
pub use timer::FailureTimer;
pub use tracker::{InputTracker, Observation};

// Logging macros at crate root for internal call sites.
pub(crate) use logging::{debug, trace};
