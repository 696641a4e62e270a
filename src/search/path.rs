use std::hash::Hash;

use ahash::{HashSet, HashSetExt};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    predecessors::{AllPredecessorsMap, PredecessorMap},
    DistanceMap,
};
use crate::graphs::{Distance, Neighbor, VertexId};

/// Represents a path in a graph.
///
/// This struct encapsulates the vertices that form a path, from the start to
/// the target, and the total distance associated with traversing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path<N> {
    pub vertices: Vec<N>,
    pub distance: Distance,
}

/// Constructs the path to a target node, if reachable.
///
/// This function traces back from the target using the predecessor map until
/// it reaches a node without predecessor. Returns `None` if the target was
/// never reached, or if its chain is broken, i.e. it has no predecessor
/// although it is not a start node.
pub fn get_path<N: Clone + Hash + Eq>(
    distances: &DistanceMap<N>,
    predecessors: &PredecessorMap<N>,
    target: &N,
) -> Option<Path<N>> {
    let distance = *distances.get(target)?;

    let mut vertices = vec![target.clone()];
    let mut current = target;
    while let Some(predecessor) = predecessors.get(current) {
        vertices.push(predecessor.clone());
        current = predecessor;
    }

    // Only start nodes are at distance zero without predecessor.
    if distances.get(current) != Some(&0) {
        return None;
    }

    vertices.reverse();
    Some(Path { vertices, distance })
}

/// Every node lying on at least one shortest path to one of `targets`,
/// targets included.
pub fn nodes_on_shortest_paths<N: Clone + Hash + Eq>(
    predecessors: &AllPredecessorsMap<N>,
    targets: impl IntoIterator<Item = N>,
) -> HashSet<N> {
    let mut visited = HashSet::new();
    let mut stack: Vec<N> = targets.into_iter().collect();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        if let Some(node_predecessors) = predecessors.get(&node) {
            stack.extend(
                node_predecessors
                    .iter()
                    .filter(|predecessor| !visited.contains(*predecessor))
                    .cloned(),
            );
        }
    }

    visited
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("first vertex of path is not the start of the request")]
    WrongStart,

    #[error("last vertex of path is not the target of the request")]
    WrongTarget,

    #[error("no edge between vertex {position} and vertex {} of the path", .position + 1)]
    MissingEdge { position: usize },

    #[error("path claims distance {claimed}, its edges sum up to {actual}")]
    WrongDistance { claimed: Distance, actual: Distance },

    #[error("expected distance {expected:?}, found {found:?}")]
    UnexpectedDistance {
        expected: Option<Distance>,
        found: Option<Distance>,
    },
}

/// Checks that `path` leads from `start` to `target` along edges produced by
/// `get_neighbors` and that its distance is the sum of the cheapest of these
/// edges.
pub fn validate_path<N, F, I>(
    path: &Path<N>,
    start: &N,
    target: &N,
    mut get_neighbors: F,
) -> Result<(), PathError>
where
    N: Eq,
    F: FnMut(&N) -> I,
    I: IntoIterator,
    I::Item: Into<Neighbor<N>>,
{
    let (Some(first), Some(last)) = (path.vertices.first(), path.vertices.last()) else {
        return Err(PathError::Empty);
    };
    if first != start {
        return Err(PathError::WrongStart);
    }
    if last != target {
        return Err(PathError::WrongTarget);
    }

    let mut actual: Distance = 0;
    for (position, (tail, head)) in path.vertices.iter().tuple_windows().enumerate() {
        let weight = get_neighbors(tail)
            .into_iter()
            .map(Into::<Neighbor<N>>::into)
            .filter(|neighbor| &neighbor.node == head)
            .map(|neighbor| neighbor.distance)
            .min()
            .ok_or(PathError::MissingEdge { position })?;
        actual += weight;
    }

    if actual != path.distance {
        return Err(PathError::WrongDistance {
            claimed: path.distance,
            actual,
        });
    }

    Ok(())
}

/// Represents a request for finding a shortest path in a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    pub source: VertexId,
    pub target: VertexId,
}

/// Represents a request for validating a shortest path in a graph.
///
/// This struct is used to encapsulate a shortest path request along with the
/// distance of a shortest path, if there exists one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathTestCase {
    pub request: ShortestPathRequest,
    pub distance: Option<Distance>,
    pub dijkstra_rank: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestTimingResult {
    pub test_case: ShortestPathTestCase,
    pub timing_in_seconds: f64,
}
