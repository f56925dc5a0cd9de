//! Single-threaded publish/subscribe channel for graph reloads.
//!
//! Handlers are keyed by topic string. Subscribing returns a guard that
//! removes the handler when dropped, so a disposed subscriber can never be
//! invoked again. Publishing snapshots the handler list first; handlers
//! may subscribe or unsubscribe reentrantly.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::types::GraphData;

/// Topic announcing a replacement graph.
pub const GRAPH_TOPIC: &str = "load-graph";

type Handler = Rc<dyn Fn(&GraphData)>;

#[derive(Default)]
struct Inner {
	topics: HashMap<String, Vec<(u64, Handler)>>,
	next_id: u64,
}

/// Topic-keyed reload channel carrying graph data.
#[derive(Clone, Default)]
pub struct ReloadBus {
	inner: Rc<RefCell<Inner>>,
}

impl ReloadBus {
	/// An empty bus.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register `handler` for `topic`; dropping the returned guard
	/// unregisters it.
	pub fn subscribe(&self, topic: &str, handler: impl Fn(&GraphData) + 'static) -> Subscription {
		let mut inner = self.inner.borrow_mut();
		inner.next_id += 1;
		let id = inner.next_id;
		inner
			.topics
			.entry(topic.to_string())
			.or_default()
			.push((id, Rc::new(handler)));
		Subscription {
			bus: Rc::downgrade(&self.inner),
			topic: topic.to_string(),
			id,
		}
	}

	/// Deliver `data` to every handler of `topic`, returning how many ran.
	pub fn publish(&self, topic: &str, data: &GraphData) -> usize {
		let handlers: Vec<Handler> = self
			.inner
			.borrow()
			.topics
			.get(topic)
			.map(|list| list.iter().map(|(_, handler)| handler.clone()).collect())
			.unwrap_or_default();
		for handler in &handlers {
			handler(data);
		}
		handlers.len()
	}

	/// Number of handlers currently registered for `topic`.
	pub fn subscriber_count(&self, topic: &str) -> usize {
		self.inner
			.borrow()
			.topics
			.get(topic)
			.map(Vec::len)
			.unwrap_or(0)
	}
}

/// Keeps a bus handler registered for as long as it lives.
pub struct Subscription {
	bus: Weak<RefCell<Inner>>,
	topic: String,
	id: u64,
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(inner) = self.bus.upgrade() {
			let mut inner = inner.borrow_mut();
			if let Some(list) = inner.topics.get_mut(&self.topic) {
				list.retain(|(id, _)| *id != self.id);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn publish_reaches_every_topic_handler() {
		let bus = ReloadBus::new();
		let seen = Rc::new(Cell::new(0));

		let (first, second) = (seen.clone(), seen.clone());
		let _a = bus.subscribe(GRAPH_TOPIC, move |data| {
			first.set(first.get() + data.nodes.len())
		});
		let _b = bus.subscribe(GRAPH_TOPIC, move |data| {
			second.set(second.get() + data.nodes.len())
		});
		let _other = bus.subscribe("other", |_| panic!("wrong topic"));

		let delivered = bus.publish(GRAPH_TOPIC, &GraphData::grid(1, 3));
		assert_eq!(delivered, 2);
		assert_eq!(seen.get(), 6);
	}

	#[test]
	fn dropping_the_guard_unsubscribes() {
		let bus = ReloadBus::new();
		let guard = bus.subscribe(GRAPH_TOPIC, |_| {});
		assert_eq!(bus.subscriber_count(GRAPH_TOPIC), 1);
		drop(guard);
		assert_eq!(bus.subscriber_count(GRAPH_TOPIC), 0);
		assert_eq!(bus.publish(GRAPH_TOPIC, &GraphData::default()), 0);
	}

	#[test]
	fn guard_outliving_the_bus_is_harmless() {
		let guard = {
			let bus = ReloadBus::new();
			bus.subscribe(GRAPH_TOPIC, |_| {})
		};
		drop(guard);
	}
}
