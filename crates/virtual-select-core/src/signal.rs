//! Signal/slot system for Virtual Select.
//!
//! This module provides the type-safe notification mechanism widgets use to
//! report state changes to their observers. Signals are emitted by a widget
//! when something happened, and connected slots (callbacks) are invoked in
//! response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - Plain notification; observers can react but not block
//! - [`VetoSignal<Args>`] - Cancelable notification; any slot may veto
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Dispatch
//!
//! All slots run synchronously on the emitting thread, in connection order,
//! before `emit` returns. The connection table is snapshotted before slots
//! run, so a slot may connect or disconnect other slots on the same signal
//! without deadlocking; such changes take effect on the next emission.
//!
//! # Example
//!
//! ```
//! use virtual_select_core::{Signal, VetoSignal};
//!
//! let changed = Signal::<i32>::new();
//! let conn_id = changed.connect(|index| {
//!     println!("committed index {index}");
//! });
//! changed.emit(3);
//! changed.disconnect(conn_id);
//!
//! // A cancelable notification: slots return `false` to veto.
//! let before_change = VetoSignal::<i32>::new();
//! before_change.connect(|&index| index != 2);
//! assert!(before_change.emit(1));
//! assert!(!before_change.emit(2));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::span_names;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`]
    /// or [`VetoSignal::disconnect`]. The ID remains valid until the connection
    /// is explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Connection table shared by both signal flavours.
struct Slots<F: ?Sized> {
    connections: Mutex<SlotMap<ConnectionId, Arc<F>>>,
    blocked: AtomicBool,
}

impl<F: ?Sized> Slots<F> {
    fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    fn insert(&self, slot: Arc<F>) -> ConnectionId {
        self.connections.lock().insert(slot)
    }

    fn remove(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    fn clear(&self) {
        self.connections.lock().clear();
    }

    fn len(&self) -> usize {
        self.connections.lock().len()
    }

    fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Clone the current slots out so the lock is not held while they run.
    fn snapshot(&self) -> Vec<Arc<F>> {
        self.connections.lock().values().cloned().collect()
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a reference
/// to the provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(i32, String)` for multiple arguments.
pub struct Signal<Args> {
    slots: Slots<dyn Fn(&Args) + Send + Sync>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Slots::new(),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            id,
            disconnect: Box::new(move |id| self.disconnect(id)),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.remove(id)
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.slots.clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.slots.set_blocked(blocked);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.slots.is_blocked()
    }

    /// Emit the signal, invoking all connected slots in connection order.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "virtual_select_core::signal", "signal blocked, skipping emit");
            return;
        }

        let slots = self.slots.snapshot();
        let _span = tracing::trace_span!(
            target: "virtual_select_core::signal",
            "signal",
            operation = span_names::SIGNAL,
            connection_count = slots.len()
        )
        .entered();
        tracing::trace!(target: "virtual_select_core::signal", "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A cancelable notification.
///
/// Every connected slot is consulted on each emission and returns whether it
/// allows the pending action. The emission reports `true` only when no slot
/// vetoed. All slots run even after a veto, so every observer sees every
/// request.
///
/// A blocked `VetoSignal` allows everything.
pub struct VetoSignal<Args> {
    slots: Slots<dyn Fn(&Args) -> bool + Send + Sync>,
}

impl<Args: 'static> Default for VetoSignal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> VetoSignal<Args> {
    /// Create a new cancelable signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Slots::new(),
        }
    }

    /// Connect a slot; it returns `false` to veto the pending action.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) -> bool + Send + Sync + 'static,
    {
        self.slots.insert(Arc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_>
    where
        F: Fn(&Args) -> bool + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            id,
            disconnect: Box::new(move |id| self.disconnect(id)),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.remove(id)
    }

    /// Disconnect all slots.
    pub fn disconnect_all(&self) {
        self.slots.clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.len()
    }

    /// Block the signal; while blocked every emission is allowed.
    pub fn set_blocked(&self, blocked: bool) {
        self.slots.set_blocked(blocked);
    }

    /// Check if the signal is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.slots.is_blocked()
    }

    /// Emit the notification and report whether the action may proceed.
    pub fn emit(&self, args: Args) -> bool {
        if self.is_blocked() {
            return true;
        }

        let slots = self.slots.snapshot();
        let _span = tracing::trace_span!(
            target: "virtual_select_core::signal",
            "signal",
            operation = span_names::SIGNAL,
            connection_count = slots.len(),
            cancelable = true
        )
        .entered();
        let mut allowed = true;
        for slot in slots {
            allowed &= slot(&args);
        }

        if !allowed {
            tracing::debug!(target: "virtual_select_core::signal", "cancelable signal vetoed");
        }
        allowed
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`] or [`VetoSignal::connect_scoped`].
///
/// # Example
///
/// ```
/// use virtual_select_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let seen = Arc::new(AtomicI32::new(0));
///
/// {
///     let seen = seen.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         seen.store(n, Ordering::SeqCst);
///     });
///     signal.emit(7);
/// }
///
/// // Guard dropped, slot disconnected.
/// signal.emit(9);
/// assert_eq!(seen.load(Ordering::SeqCst), 7);
/// ```
pub struct ConnectionGuard<'a> {
    id: ConnectionId,
    disconnect: Box<dyn Fn(ConnectionId) -> bool + 'a>,
}

impl ConnectionGuard<'_> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard<'_> {
    fn drop(&mut self) {
        (self.disconnect)(self.id);
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
static_assertions::assert_impl_all!(VetoSignal<i32>: Send, Sync);
