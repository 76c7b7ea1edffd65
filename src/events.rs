//! Listener channels for callback delivery.
//!
//! The attribution SDK surfaces its callbacks as subscribable channels.
//! Subscribing returns an opaque [`SubscriptionHandle`] that must be passed
//! back to [`EventChannel::unsubscribe`]; [`DeepLinkManager`] does this on
//! drop.
//!
//! [`DeepLinkManager`]: crate::DeepLinkManager

use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Listener function type.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Identifies a subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// A synchronous, thread-safe listener list.
pub struct EventChannel<T> {
	listeners: RwLock<Vec<(SubscriptionHandle, Listener<T>)>>,
	next_id: AtomicU64,
}

impl<T> EventChannel<T> {
	/// Create a channel with no listeners.
	pub fn new() -> Self {
		Self {
			listeners: RwLock::new(Vec::new()),
			next_id: AtomicU64::new(0),
		}
	}

	/// Register a listener and return its handle.
	pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
	where
		F: Fn(&T) + Send + Sync + 'static,
	{
		let handle = SubscriptionHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
		self.listeners.write().push((handle, Arc::new(listener)));
		handle
	}

	/// Remove a listener. Returns whether the handle was still registered.
	pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
		let mut listeners = self.listeners.write();
		let before = listeners.len();
		listeners.retain(|(id, _)| *id != handle);
		listeners.len() < before
	}

	/// Deliver an event to every listener.
	pub fn emit(&self, event: &T) {
		// Listeners are cloned out so a callback may subscribe or
		// unsubscribe without holding the lock.
		let listeners: Vec<Listener<T>> = self
			.listeners
			.read()
			.iter()
			.map(|(_, listener)| Arc::clone(listener))
			.collect();

		for listener in listeners {
			listener(event);
		}
	}

	/// Number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.read().len()
	}
}

impl<T> Default for EventChannel<T> {
	fn default() -> Self {
		Self::new()
	}
}
