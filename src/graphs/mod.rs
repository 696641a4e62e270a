use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod edge;
pub mod grid;
pub mod vec_vec_graph;

pub type VertexId = u32;
pub type Distance = u32;

/// A node reachable from the node currently being expanded, together with the
/// cost of the edge leading to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Neighbor<N> {
    pub node: N,
    /// Path lengths saturate at `Distance::MAX`.
    pub distance: Distance,
}

impl<N> Neighbor<N> {
    pub fn new(node: N, distance: Distance) -> Neighbor<N> {
        Neighbor { node, distance }
    }
}

impl<N> From<(N, Distance)> for Neighbor<N> {
    fn from((node, distance): (N, Distance)) -> Self {
        Neighbor { node, distance }
    }
}

/// Turns an iterator of nodes into neighbors that are all one step away.
pub trait UniformNeighbors: Iterator {
    #[allow(clippy::type_complexity)]
    fn uniform_neighbors(self) -> std::iter::Map<Self, fn(Self::Item) -> Neighbor<Self::Item>>
    where
        Self: Sized,
    {
        self.map(|node| Neighbor { node, distance: 1 })
    }
}

impl<I: Iterator> UniformNeighbors for I {}

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("grid is empty")]
    EmptyGrid,

    #[error("row {row} has length {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
