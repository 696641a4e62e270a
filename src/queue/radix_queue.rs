use std::{
    collections::{hash_map::Entry, BTreeSet},
    hash::Hash,
};

use ahash::{HashMap, HashMapExt};
use radix_heap::RadixHeapMap;

use super::{Frontier, QueueElement};
use crate::graphs::Distance;

/// Monotone radix heap frontier.
///
/// A radix heap only accepts keys that are not smaller than the last popped
/// one, which holds for Dijkstra with non-negative edge weights. The heap
/// holds one key per distance, the nodes at that distance live in a bucket
/// and are popped smallest first.
pub struct RadixQueue<N> {
    heap: RadixHeapMap<i64, ()>,
    buckets: HashMap<Distance, BTreeSet<N>>,
    live: HashMap<N, Distance>,
    last_popped: Option<Distance>,
}

impl<N: Clone + Ord + Hash> Default for RadixQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Ord + Hash> RadixQueue<N> {
    pub fn new() -> RadixQueue<N> {
        RadixQueue {
            heap: RadixHeapMap::new(),
            buckets: HashMap::new(),
            live: HashMap::new(),
            last_popped: None,
        }
    }

    fn remove_from_bucket(&mut self, node: &N, distance: Distance) {
        if let Some(bucket) = self.buckets.get_mut(&distance) {
            bucket.remove(node);
            // the key stays in the heap and is skipped on pop
            if bucket.is_empty() {
                self.buckets.remove(&distance);
            }
        }
    }
}

impl<N: Clone + Ord + Hash> Frontier<N> for RadixQueue<N> {
    fn insert(&mut self, node: N, distance: Distance) -> bool {
        match self.live.get(&node).copied() {
            Some(current) if current <= distance => return false,
            Some(current) => self.remove_from_bucket(&node, current),
            None => (),
        }

        self.live.insert(node.clone(), distance);
        match self.buckets.entry(distance) {
            Entry::Occupied(mut bucket) => {
                bucket.get_mut().insert(node);
            }
            Entry::Vacant(bucket) => {
                self.heap.push(-(distance as i64), ());
                bucket.insert(BTreeSet::from([node]));
            }
        }
        true
    }

    fn pop(&mut self) -> Option<QueueElement<N>> {
        while let Some((key, ())) = self.heap.pop() {
            let distance = -key as Distance;
            let Some(bucket) = self.buckets.get_mut(&distance) else {
                continue;
            };
            let Some(node) = bucket.pop_first() else {
                continue;
            };

            if bucket.is_empty() {
                self.buckets.remove(&distance);
            } else {
                self.heap.push(key, ());
            }
            self.live.remove(&node);
            self.last_popped = Some(distance);
            return Some(QueueElement { distance, node });
        }

        // Skipped keys may have raised the heap's top above the last returned
        // distance.
        match self.last_popped {
            Some(distance) => self.heap.clear_to(-(distance as i64)),
            None => self.heap.clear(),
        }
        None
    }

    fn remove(&mut self, node: &N) -> Option<Distance> {
        let distance = self.live.remove(node)?;
        self.remove_from_bucket(node, distance);
        Some(distance)
    }

    fn contains(&self, node: &N) -> bool {
        self.live.contains_key(node)
    }

    fn len(&self) -> usize {
        self.live.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.buckets.clear();
        self.live.clear();
        self.last_popped = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_distance_order() {
        let mut queue = RadixQueue::new();
        queue.insert(10u32, 0);
        let first = queue.pop().unwrap();
        assert_eq!((first.node, first.distance), (10, 0));

        queue.insert(11u32, 6);
        queue.insert(12u32, 2);
        queue.insert(11u32, 3);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop(), Some(QueueElement::new(2, 12)));
        assert_eq!(queue.pop(), Some(QueueElement::new(3, 11)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn ties_are_broken_by_node() {
        let mut queue = RadixQueue::new();
        queue.insert(9u32, 1);
        queue.insert(2u32, 1);
        queue.insert(5u32, 4);
        queue.insert(5u32, 1);

        assert_eq!(queue.pop(), Some(QueueElement::new(1, 2)));
        queue.insert(7u32, 1);
        assert_eq!(queue.pop(), Some(QueueElement::new(1, 5)));
        assert_eq!(queue.pop(), Some(QueueElement::new(1, 7)));
        assert_eq!(queue.pop(), Some(QueueElement::new(1, 9)));
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn insert_after_skipping_removed_entries() {
        let mut queue = RadixQueue::new();
        queue.insert(1u32, 10);
        assert_eq!(queue.remove(&1), Some(10));
        queue.insert(2u32, 2);

        assert_eq!(queue.pop(), Some(QueueElement::new(2, 2)));
        assert_eq!(queue.pop(), None);

        // only bounded by the last returned distance
        assert!(queue.insert(3u32, 5));
        assert!(queue.insert(4u32, 2));
        assert_eq!(queue.pop(), Some(QueueElement::new(2, 4)));
        assert_eq!(queue.pop(), Some(QueueElement::new(5, 3)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn clear_allows_a_fresh_search() {
        let mut queue = RadixQueue::new();
        queue.insert('a', 8);
        assert!(queue.pop().is_some());

        queue.clear();
        assert!(queue.insert('b', 0));
        assert_eq!(queue.pop(), Some(QueueElement::new(0, 'b')));
    }
}
