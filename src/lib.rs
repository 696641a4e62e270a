//! Dijkstra over lazily expanded graphs.
//!
//! Callers describe their state space with a node type and a function that
//! yields the neighbors of a node together with the edge weights. The search
//! returns the distance map and, on request, predecessors for path
//! reconstruction.

pub mod graphs;
pub mod queue;
pub mod search;
pub mod utility;

pub use graphs::{Distance, Neighbor, UniformNeighbors};
pub use search::{
    dijkstra::{
        shortest_distance, shortest_distances, shortest_distances_until,
        shortest_distances_with_predecessors, shortest_path, DijkstraSearch,
    },
    DistanceMap,
};
