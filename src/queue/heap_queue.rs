use std::{collections::BinaryHeap, hash::Hash};

use ahash::{HashMap, HashMapExt};

use super::{Frontier, QueueElement};
use crate::graphs::Distance;

/// Binary heap frontier with lazy deletion.
///
/// Lowering a distance pushes a second element instead of updating the old
/// one. `live` holds the authoritative distance of every queued node, heap
/// elements that disagree with it are skipped when they surface.
#[derive(Clone)]
pub struct HeapQueue<N> {
    heap: BinaryHeap<QueueElement<N>>,
    live: HashMap<N, Distance>,
}

impl<N: Clone + Ord + Hash> Default for HeapQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Ord + Hash> HeapQueue<N> {
    pub fn new() -> HeapQueue<N> {
        HeapQueue {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
        }
    }

    /// Number of elements physically stored, including stale ones.
    pub fn stored_elements(&self) -> usize {
        self.heap.len()
    }
}

impl<N: Clone + Ord + Hash> Frontier<N> for HeapQueue<N> {
    fn insert(&mut self, node: N, distance: Distance) -> bool {
        if self
            .live
            .get(&node)
            .is_some_and(|&current| current <= distance)
        {
            return false;
        }

        self.live.insert(node.clone(), distance);
        self.heap.push(QueueElement::new(distance, node));
        true
    }

    fn pop(&mut self) -> Option<QueueElement<N>> {
        while let Some(element) = self.heap.pop() {
            if self.live.get(&element.node) == Some(&element.distance) {
                self.live.remove(&element.node);
                return Some(element);
            }
        }

        None
    }

    fn remove(&mut self, node: &N) -> Option<Distance> {
        self.live.remove(node)
    }

    fn contains(&self, node: &N) -> bool {
        self.live.contains_key(node)
    }

    fn len(&self) -> usize {
        self.live.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }
}
