//! Logging facilities for Virtual Select.
//!
//! This module provides:
//! - Fixed target names for the `tracing` crate, one per subsystem
//! - Span names used by performance instrumentation
//! - [`PerfSpan`], a guard that tracks the duration of an operation
//!
//! # Tracing Integration
//!
//! Virtual Select never installs a subscriber. To see logs, install one in
//! your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("virtual_select=debug")
//!         .init();
//! }
//! ```
//!
//! State transitions are logged at `debug`, per-frame detail at `trace`.

/// Span names used throughout Virtual Select for tracing.
pub mod span_names {
    /// Full widget render.
    pub const RENDER: &str = "virtual_select::render";
    /// Popup open sequence, including the open hook.
    pub const OPEN: &str = "virtual_select::open";
    /// Signal emission span.
    pub const SIGNAL: &str = "virtual_select::signal";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "virtual_select_core::signal";
    /// Widget state machine and input dispatch.
    pub const INTERACTION: &str = "virtual_select::interaction";
    /// Scroll offset management.
    pub const SCROLL: &str = "virtual_select::scroll";
    /// Scrollbar geometry and drag sessions.
    pub const SCROLLBAR: &str = "virtual_select::scrollbar";
    /// Render planning and painting.
    pub const RENDER: &str = "virtual_select::render";
    /// Item list and selection state.
    pub const SELECTION: &str = "virtual_select::selection";
    /// Performance spans.
    pub const PERF: &str = "virtual_select::perf";
}

/// A guard that emits a tracing span when dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "virtual_select::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
