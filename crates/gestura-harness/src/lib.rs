#![forbid(unsafe_code)]

//! Scripted-input harness for Gestura recognizers.
//!
//! Builds timestamped input [`Script`]s, replays them through a
//! [`GestureSet`](gestura_core::GestureSet) on a synthetic clock, and records
//! every state transition as a [`Trace`] that can be written as JSONL and
//! compared against golden files.
//!
//! ```
//! use gestura_core::{DragConfig, GestureState};
//! use gestura_harness::{RecognizerSpec, Runner, Scenario, Script};
//!
//! let scenario = Scenario::new("drag")
//!     .with_recognizer(RecognizerSpec::drag(DragConfig::default()).labeled("orbit"));
//! let mut runner = Runner::from_scenario(&scenario).unwrap();
//! runner.run(&Script::new().down(0).move_by(8.0, 0.0).up(0));
//!
//! assert_eq!(
//!     runner.trace().states_for("orbit"),
//!     vec![GestureState::Began, GestureState::Ended]
//! );
//! ```

pub mod cli;
pub mod error;
pub mod runner;
pub mod script;
pub mod trace;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
pub use runner::Runner;
pub use script::{RecognizerSpec, Scenario, Script, Step};
pub use trace::{Trace, TraceEntry};
