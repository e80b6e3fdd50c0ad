//! Core systems for Virtual Select.
//!
//! This crate provides the foundational pieces shared by the Virtual Select
//! widget crates:
//!
//! - **Signal/Slot System**: Type-safe notifications from a widget to its observers
//! - **Cancelable Notifications**: [`VetoSignal`], where any observer may refuse
//!   a pending change
//! - **Logging**: Fixed `tracing` targets and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use virtual_select_core::Signal;
//!
//! // Create a signal that notifies when a selection is committed
//! let changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = changed.connect(|index| {
//!     println!("Selection committed at: {}", index);
//! });
//!
//! // Emit the signal
//! changed.emit(4);
//!
//! // Disconnect when done
//! changed.disconnect(conn_id);
//! ```
//!
//! # Veto Example
//!
//! ```
//! use virtual_select_core::VetoSignal;
//!
//! let before_change = VetoSignal::<i32>::new();
//!
//! // Refuse to select the first row.
//! before_change.connect(|&index| index != 0);
//!
//! assert!(before_change.emit(3));
//! assert!(!before_change.emit(0));
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal, VetoSignal};
