use ahash::HashMap;

use crate::graphs::Distance;

pub mod dijkstra;
pub mod end_condition;
pub mod path;
pub mod predecessors;

/// Shortest known distance of every reached node. Nodes that were never
/// reached have no entry.
pub type DistanceMap<N> = HashMap<N, Distance>;
