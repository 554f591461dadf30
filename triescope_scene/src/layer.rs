// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;
use core::time::Duration;

use hashbrown::{HashMap, HashSet};
use triescope_timing::TimerQueue;

use crate::diff::{KeyedDiff, diff_keys};

/// Builds, updates, and retires the elements of a [`KeyedLayer`].
///
/// `D` is the datum joined to each key and `E` the retained element.
pub trait JoinHandler<K, D, E> {
    /// Creates the element for a key that is not in the layer.
    fn enter(&mut self, key: &K, datum: D, now: Duration) -> E;

    /// Updates an existing element with its new datum.
    ///
    /// This is also called for an element that was exiting and whose key
    /// reappeared; the handler should animate it back in.
    fn update(&mut self, key: &K, element: &mut E, datum: D, now: Duration);

    /// Starts the exit of an element whose key disappeared, returning the
    /// time at which it may be removed.
    fn exit(&mut self, key: &K, element: &mut E, now: Duration) -> Duration;
}

#[derive(Debug)]
struct Slot<E> {
    element: E,
    /// Token of the pending removal, if exiting.
    exit: Option<u64>,
}

/// Ordered, keyed, retained elements.
///
/// Order is entry order and is used as paint order.
#[derive(Debug)]
pub struct KeyedLayer<K, E> {
    order: Vec<K>,
    slots: HashMap<K, Slot<E>>,
    removals: TimerQueue<(K, u64)>,
    next_token: u64,
}

impl<K, E> Default for KeyedLayer<K, E> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            slots: HashMap::new(),
            removals: TimerQueue::new(),
            next_token: 0,
        }
    }
}

impl<K: Eq + Hash + Clone, E> KeyedLayer<K, E> {
    /// Creates an empty layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the layer against `data`.
    ///
    /// Returns what was applied: `enter` lists created elements, `update`
    /// lists elements that were updated (including revived ones), and
    /// `exit` lists elements that *started* exiting in this join. Elements
    /// that were already exiting and are still absent keep their original
    /// removal time and are not reported again.
    pub fn join<D, I, H>(&mut self, data: I, now: Duration, handler: &mut H) -> KeyedDiff<K>
    where
        I: IntoIterator<Item = (K, D)>,
        H: JoinHandler<K, D, E> + ?Sized,
    {
        let mut seen: HashSet<K> = HashSet::new();
        let data: Vec<(K, D)> = data
            .into_iter()
            .filter(|(k, _)| seen.insert(k.clone()))
            .collect();
        let mut diff = diff_keys(
            self.order.iter().cloned(),
            data.iter().map(|(k, _)| k.clone()),
        );

        for (key, datum) in data {
            if let Some(slot) = self.slots.get_mut(&key) {
                slot.exit = None;
                handler.update(&key, &mut slot.element, datum, now);
            } else {
                let element = handler.enter(&key, datum, now);
                self.slots.insert(
                    key.clone(),
                    Slot {
                        element,
                        exit: None,
                    },
                );
                self.order.push(key);
            }
        }

        diff.exit.retain(|key| {
            let Some(slot) = self.slots.get_mut(key) else {
                return false;
            };
            if slot.exit.is_some() {
                return false;
            }
            let end = handler.exit(key, &mut slot.element, now);
            let token = self.next_token;
            self.next_token += 1;
            slot.exit = Some(token);
            self.removals.schedule(end, (key.clone(), token));
            true
        });
        diff
    }

    /// Removes elements whose exit has completed by `now`, returning their keys.
    pub fn prune(&mut self, now: Duration) -> Vec<K> {
        let mut removed = Vec::new();
        while let Some((_, (key, token))) = self.removals.pop_due(now) {
            let still_exiting = self
                .slots
                .get(&key)
                .is_some_and(|slot| slot.exit == Some(token));
            if still_exiting {
                self.slots.remove(&key);
                removed.push(key);
            }
        }
        if !removed.is_empty() {
            let slots = &self.slots;
            self.order.retain(|k| slots.contains_key(k));
        }
        removed
    }

    /// Earliest pending removal, if any element is exiting.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.removals.next_deadline()
    }

    /// Number of elements, including exiting ones.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the layer holds no elements at all.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of elements that are not exiting.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.slots.values().filter(|s| s.exit.is_none()).count()
    }

    /// Returns `true` if `key` is present and exiting.
    #[must_use]
    pub fn is_exiting(&self, key: &K) -> bool {
        self.slots.get(key).is_some_and(|s| s.exit.is_some())
    }

    /// The element for `key`, exiting or not.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&E> {
        self.slots.get(key).map(|s| &s.element)
    }

    /// Mutable access to the element for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut E> {
        self.slots.get_mut(key).map(|s| &mut s.element)
    }

    /// Elements in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &E)> + '_ {
        self.order
            .iter()
            .filter_map(|k| self.slots.get_key_value(k).map(|(k, s)| (k, &s.element)))
    }

    /// Mutable access to every element, in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut E)> + '_ {
        self.slots.iter_mut().map(|(k, s)| (k, &mut s.element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Records calls; elements are `(value, exits_started)`.
    #[derive(Default)]
    struct Log {
        calls: Vec<(&'static str, u32)>,
        exit_after: Duration,
    }

    impl JoinHandler<u32, u32, (u32, u32)> for Log {
        fn enter(&mut self, key: &u32, datum: u32, _now: Duration) -> (u32, u32) {
            self.calls.push(("enter", *key));
            (datum, 0)
        }

        fn update(&mut self, key: &u32, element: &mut (u32, u32), datum: u32, _now: Duration) {
            self.calls.push(("update", *key));
            element.0 = datum;
        }

        fn exit(&mut self, key: &u32, element: &mut (u32, u32), now: Duration) -> Duration {
            self.calls.push(("exit", *key));
            element.1 += 1;
            now + self.exit_after
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn enter_order_is_paint_order() {
        let mut layer = KeyedLayer::new();
        let mut h = Log::default();
        layer.join([(3, 0), (1, 0)], ms(0), &mut h);
        layer.join([(1, 0), (2, 0), (3, 0)], ms(0), &mut h);
        let keys: Vec<u32> = layer.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, [3, 1, 2]);
    }

    #[test]
    fn exiting_element_is_revived_not_duplicated() {
        let mut layer = KeyedLayer::new();
        let mut h = Log {
            exit_after: ms(100),
            ..Log::default()
        };
        layer.join([(1, 10)], ms(0), &mut h);
        let gone = layer.join(core::iter::empty::<(u32, u32)>(), ms(0), &mut h);
        assert_eq!(gone.exit, [1]);
        assert!(layer.is_exiting(&1));
        assert_eq!(layer.live_len(), 0);

        let back = layer.join([(1, 11)], ms(50), &mut h);
        assert_eq!(back.update, [1]);
        assert!(back.enter.is_empty());
        assert!(!layer.is_exiting(&1));

        // The stale removal must not fire.
        assert!(layer.prune(ms(200)).is_empty());
        assert_eq!(layer.get(&1), Some(&(11, 1)));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn already_exiting_elements_are_not_exited_twice() {
        let mut layer = KeyedLayer::new();
        let mut h = Log {
            exit_after: ms(100),
            ..Log::default()
        };
        layer.join([(1, 0), (2, 0)], ms(0), &mut h);
        layer.join([(2, 0)], ms(0), &mut h);
        let again = layer.join([(2, 0)], ms(10), &mut h);
        assert!(again.exit.is_empty());
        assert_eq!(layer.get(&1), Some(&(0, 1)));
        assert_eq!(layer.next_deadline(), Some(ms(100)));

        assert_eq!(layer.prune(ms(99)), Vec::<u32>::new());
        assert_eq!(layer.prune(ms(100)), vec![1]);
        assert_eq!(layer.next_deadline(), None);
    }

    #[test]
    fn duplicate_data_keys_use_the_first_datum() {
        let mut layer = KeyedLayer::new();
        let mut h = Log::default();
        let diff = layer.join([(7, 1), (7, 2)], ms(0), &mut h);
        assert_eq!(diff.enter, [7]);
        assert_eq!(layer.get(&7), Some(&(1, 0)));
        assert_eq!(h.calls, [("enter", 7)]);
    }
}
