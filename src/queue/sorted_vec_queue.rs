use std::hash::Hash;

use ahash::{HashMap, HashMapExt};

use super::{Frontier, QueueElement};
use crate::graphs::Distance;

/// Frontier backed by a vector sorted by descending distance, so the element
/// to pop next is always the last one.
///
/// Inserting is `O(n)`, popping is `O(1)`. There are no stale entries: a
/// lowered distance removes the old element before inserting the new one.
#[derive(Clone)]
pub struct SortedVecQueue<N> {
    // ascending in `QueueElement` order, i.e. descending in distance
    elements: Vec<QueueElement<N>>,
    live: HashMap<N, Distance>,
}

impl<N: Clone + Ord + Hash> Default for SortedVecQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Ord + Hash> SortedVecQueue<N> {
    pub fn new() -> SortedVecQueue<N> {
        SortedVecQueue {
            elements: Vec::new(),
            live: HashMap::new(),
        }
    }

    /// Queued elements, the next one to be popped last.
    pub fn as_slice(&self) -> &[QueueElement<N>] {
        &self.elements
    }

    fn remove_element(&mut self, node: &N, distance: Distance) {
        let element = QueueElement::new(distance, node.clone());
        if let Ok(index) = self.elements.binary_search(&element) {
            self.elements.remove(index);
        }
    }
}

impl<N: Clone + Ord + Hash> Frontier<N> for SortedVecQueue<N> {
    fn insert(&mut self, node: N, distance: Distance) -> bool {
        match self.live.get(&node).copied() {
            Some(current) if current <= distance => return false,
            Some(current) => self.remove_element(&node, current),
            None => (),
        }

        self.live.insert(node.clone(), distance);
        let element = QueueElement::new(distance, node);
        let index = self
            .elements
            .binary_search(&element)
            .unwrap_or_else(|index| index);
        self.elements.insert(index, element);
        true
    }

    fn pop(&mut self) -> Option<QueueElement<N>> {
        let element = self.elements.pop()?;
        self.live.remove(&element.node);
        Some(element)
    }

    fn remove(&mut self, node: &N) -> Option<Distance> {
        let distance = self.live.remove(node)?;
        self.remove_element(node, distance);
        Some(distance)
    }

    fn contains(&self, node: &N) -> bool {
        self.live.contains_key(node)
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.live.clear();
    }
}
