//! Logging facade.
//!
//! With the `tracing` feature enabled this re-exports the `tracing` event
//! macros. Without it the same macro names expand to nothing, so call sites
//! never need their own `cfg` guards. Either way the macros stay private to
//! this crate.
//!
//! ```ignore
//! use crate::{debug, trace};
//!
//! debug!(gesture = "drag", from = %from, to = %to, "gesture transition");
//! ```

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use debug;
#[cfg(not(feature = "tracing"))]
pub(crate) use trace;
