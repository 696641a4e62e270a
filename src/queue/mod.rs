use std::cmp::Ordering;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graphs::Distance;

pub mod heap_queue;
pub mod radix_queue;
pub mod sorted_vec_queue;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct QueueElement<N> {
    pub distance: Distance,
    pub node: N,
}

// The priority queue depends on `Ord`.
// Explicitly implement the trait so the queue becomes a min-heap
// instead of a max-heap.
impl<N: Ord> Ord for QueueElement<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Notice that the we flip the ordering on distances and nodes, so the
        // smallest node wins a tie. Comparing nodes at all keeps `PartialEq`
        // and `Ord` consistent.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// `PartialOrd` needs to be implemented as well.
impl<N: Ord> PartialOrd for QueueElement<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> QueueElement<N> {
    pub fn new(distance: Distance, node: N) -> QueueElement<N> {
        QueueElement { distance, node }
    }
}

/// Working set of discovered but not yet finalized nodes, keyed by their
/// tentative distance.
///
/// Every node is present at most once. Implementations may keep superseded
/// entries internally but never report them.
pub trait Frontier<N> {
    /// Inserts `node`, or lowers its distance if it is already present with a
    /// larger one. Returns `false` and changes nothing if the node is already
    /// present with a distance smaller or equal to `distance`.
    fn insert(&mut self, node: N, distance: Distance) -> bool;

    /// Removes and returns the node with the smallest distance.
    fn pop(&mut self) -> Option<QueueElement<N>>;

    /// Removes `node` and returns the distance it was queued with.
    fn remove(&mut self, node: &N) -> Option<Distance>;

    fn contains(&self, node: &N) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);
}

#[derive(Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrontierKind {
    /// Binary heap with lazy deletion
    #[default]
    Heap,
    /// Sorted vector, minimum at the end
    SortedVec,
    /// Radix heap over distances, one bucket of nodes per distance
    Radix,
}
