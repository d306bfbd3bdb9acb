//! Logging infrastructure for query evaluation.
//!
//! Events go through `tracing` with the target `"relational_query"` and
//! carry an `event` field for filtering. The library never installs a global
//! subscriber; applications configure one themselves.
//!
//! ## Conventions
//!
//! - `event`: snake_case event name (required)
//! - `component`: subsystem (`"evaluator"`, `"loader"`)
//! - Use `%` for Display, `?` for Debug formatting

/// Target for all log events of this crate.
pub(crate) const TARGET: &str = "relational_query";

/// Macro for debug-level log events.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::TARGET, $($field)*)
    };
}

/// Macro for trace-level log events.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::TARGET, $($field)*)
    };
}

/// Macro for warn-level log events.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
pub(crate) use log_warn;
