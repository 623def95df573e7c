// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log;
use std::fmt;

/// Identifies one live subscription on a [`Signal`].
///
/// Returned by [`Signal::subscribe`] and consumed by
/// [`Signal::unsubscribe`]. Ids are never reused within one signal, so a
/// stale id simply fails to unsubscribe instead of removing a stranger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Manages a generic, synchronous observer channel.
///
/// This Signal is generic over the type `T` of event it transports. Unlike
/// a queueing bus, [`publish`](Self::publish) does not buffer anything:
/// the event is handed to every currently subscribed callback before the
/// call returns, in the order the callbacks subscribed. There is no
/// filtering and no priority.
pub struct Signal<T> {
    subscribers: Vec<(SubscriberId, Box<dyn FnMut(&T)>)>,
    next_id: u64,
}

impl<T> Signal<T> {
    /// Creates a new signal with no subscribers.
    ///
    /// ## Returns
    /// A new instance of the Signal struct.
    pub fn new() -> Self {
        log::trace!("Generic Signal initialized.");
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers `callback` and returns the id of the new subscription.
    ///
    /// The callback is invoked on every subsequent
    /// [`publish`](Self::publish), after all callbacks that subscribed
    /// before it.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes the subscription identified by `id`.
    ///
    /// ## Returns
    /// `true` if the subscription existed, `false` if the id is unknown or
    /// was already removed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        match self.subscribers.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => {
                log::trace!("Ignored unsubscribe for unknown subscriber {id:?}.");
                false
            }
        }
    }

    /// Delivers `event` to every current subscriber, in subscription order.
    ///
    /// Delivery is synchronous and completes before this call returns.
    /// Because the signal is borrowed mutably for the whole delivery, the
    /// subscriber set cannot change while a publish is in flight.
    pub fn publish(&mut self, event: &T) {
        // The event itself cannot be formatted without a `Debug` bound,
        // which we omit to keep the signal as generic as possible.
        log::trace!(
            "Dispatching an event to {} subscriber(s).",
            self.subscribers.len()
        );

        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    /// The number of current subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether the signal currently has no subscribers.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A local, self-contained event enum for testing purposes.
    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        WindowResized { width: u32, height: u32 },
        ShutdownRequested,
    }

    #[test]
    fn signal_creation() {
        let signal = Signal::<TestEvent>::new();
        assert!(signal.is_empty());
        assert_eq!(signal.len(), 0);
    }

    #[test]
    fn publish_reaches_single_subscriber() {
        let mut signal = Signal::<TestEvent>::new();
        let received = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&received);
        signal.subscribe(move |event: &TestEvent| sink.borrow_mut().push(event.clone()));

        let event = TestEvent::WindowResized {
            width: 1,
            height: 1,
        };
        signal.publish(&event);

        assert_eq!(*received.borrow(), vec![event]);
    }

    #[test]
    fn delivery_follows_subscription_order() {
        let mut signal = Signal::<TestEvent>::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in 0..3 {
            let sink = Rc::clone(&order);
            signal.subscribe(move |_: &TestEvent| sink.borrow_mut().push(tag));
        }

        signal.publish(&TestEvent::ShutdownRequested);
        signal.publish(&TestEvent::ShutdownRequested);

        assert_eq!(
            *order.borrow(),
            vec![0, 1, 2, 0, 1, 2],
            "Each publish must walk the subscribers in subscription order"
        );
    }

    #[test]
    fn unsubscribed_callback_is_skipped() {
        let mut signal = Signal::<TestEvent>::new();
        let counter = Rc::new(RefCell::new(0u32));

        let sink = Rc::clone(&counter);
        let id = signal.subscribe(move |_: &TestEvent| *sink.borrow_mut() += 1);

        signal.publish(&TestEvent::ShutdownRequested);
        assert!(signal.unsubscribe(id));
        signal.publish(&TestEvent::ShutdownRequested);

        assert_eq!(*counter.borrow(), 1);
        assert!(signal.is_empty());
    }

    #[test]
    fn unsubscribe_is_rejected_for_unknown_id() {
        let mut signal = Signal::<TestEvent>::new();
        let id = signal.subscribe(|_: &TestEvent| {});

        assert!(signal.unsubscribe(id));
        assert!(
            !signal.unsubscribe(id),
            "A second unsubscribe with the same id must be rejected"
        );
    }

    #[test]
    fn unsubscribe_preserves_order_of_remaining_subscribers() {
        let mut signal = Signal::<TestEvent>::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut ids = Vec::new();
        for tag in 0..3 {
            let sink = Rc::clone(&order);
            ids.push(signal.subscribe(move |_: &TestEvent| sink.borrow_mut().push(tag)));
        }

        assert!(signal.unsubscribe(ids[1]));
        signal.publish(&TestEvent::ShutdownRequested);

        assert_eq!(*order.borrow(), vec![0, 2]);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        let mut signal = Signal::<TestEvent>::new();
        signal.publish(&TestEvent::ShutdownRequested);
        assert!(signal.is_empty());
    }
}
