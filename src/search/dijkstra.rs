use std::hash::Hash;

use ahash::{HashMap, HashMapExt};
use log::{debug, trace};

use super::{
    end_condition::{AllNodesEncountered, EndCondition},
    path::{get_path, Path},
    predecessors::{PredecessorMap, PredecessorRecorder},
    DistanceMap,
};
use crate::{
    graphs::{Distance, Neighbor},
    queue::{heap_queue::HeapQueue, Frontier, QueueElement},
};

/// State of a single Dijkstra run over a lazily expanded graph.
///
/// Neighbors are produced on demand by a caller supplied function, so the
/// graph may be infinite as long as the search is stopped by an
/// [`EndCondition`]. Edge weights must be non-negative.
pub struct DijkstraSearch<N, Q = HeapQueue<N>> {
    distances: DistanceMap<N>,
    queue: Q,
    dijkstra_rank: u32,
}

impl<N: Clone + Ord + Hash> DijkstraSearch<N> {
    /// Starts a search from every node in `start_nodes` at distance zero.
    pub fn new(start_nodes: impl IntoIterator<Item = N>) -> DijkstraSearch<N> {
        DijkstraSearch::with_queue(start_nodes, HeapQueue::new())
    }
}

impl<N, Q> DijkstraSearch<N, Q>
where
    N: Clone + Hash + Eq,
    Q: Frontier<N>,
{
    pub fn with_queue(start_nodes: impl IntoIterator<Item = N>, mut queue: Q) -> DijkstraSearch<N, Q> {
        queue.clear();

        let mut distances = HashMap::new();
        for node in start_nodes {
            distances.insert(node.clone(), 0);
            queue.insert(node, 0);
        }

        DijkstraSearch {
            distances,
            queue,
            dijkstra_rank: 0,
        }
    }

    /// Finalizes the next node without expanding it.
    pub fn pop(&mut self) -> Option<QueueElement<N>> {
        let element = self.queue.pop()?;
        self.dijkstra_rank += 1;
        trace!(
            "finalized node #{} at distance {}",
            self.dijkstra_rank,
            element.distance
        );
        Some(element)
    }

    /// Relaxes every edge leaving `node`, which has been finalized at
    /// `distance`. Tentative distances saturate at `Distance::MAX`.
    pub fn expand<F, I, P>(&mut self, node: &N, distance: Distance, get_neighbors: &mut F, recorder: &mut P)
    where
        F: FnMut(&N) -> I,
        I: IntoIterator,
        I::Item: Into<Neighbor<N>>,
        P: PredecessorRecorder<N>,
    {
        for neighbor in get_neighbors(node) {
            let Neighbor {
                node: head,
                distance: weight,
            } = neighbor.into();
            self.relax(node, head, distance.saturating_add(weight), recorder);
        }
    }

    fn relax<P>(&mut self, tail: &N, head: N, alternative_distance: Distance, recorder: &mut P)
    where
        P: PredecessorRecorder<N>,
    {
        match self.distances.get_mut(&head) {
            Some(current_distance) if alternative_distance < *current_distance => {
                *current_distance = alternative_distance;
                recorder.improved(&head, tail);
                self.queue.insert(head, alternative_distance);
            }
            Some(current_distance) if alternative_distance == *current_distance => {
                recorder.tied(&head, tail);
            }
            Some(_) => (),
            None => {
                self.distances.insert(head.clone(), alternative_distance);
                recorder.improved(&head, tail);
                self.queue.insert(head, alternative_distance);
            }
        }
    }

    /// Finalizes and expands a single node. Returns `None` once the frontier
    /// is exhausted.
    pub fn step<F, I, P>(&mut self, get_neighbors: &mut F, recorder: &mut P) -> Option<QueueElement<N>>
    where
        F: FnMut(&N) -> I,
        I: IntoIterator,
        I::Item: Into<Neighbor<N>>,
        P: PredecessorRecorder<N>,
    {
        let element = self.pop()?;
        self.expand(&element.node, element.distance, get_neighbors, recorder);
        Some(element)
    }

    /// Runs until the frontier is exhausted or `end_condition` is satisfied by
    /// a finalized node. The node satisfying it is not expanded.
    pub fn run<F, I, E, P>(&mut self, mut get_neighbors: F, mut end_condition: E, recorder: &mut P)
    where
        F: FnMut(&N) -> I,
        I: IntoIterator,
        I::Item: Into<Neighbor<N>>,
        E: EndCondition<N>,
        P: PredecessorRecorder<N>,
    {
        while let Some(QueueElement { node, distance }) = self.pop() {
            if end_condition.end_reached(&node) {
                debug!(
                    "end reached at distance {} after finalizing {} nodes",
                    distance, self.dijkstra_rank
                );
                return;
            }

            self.expand(&node, distance, &mut get_neighbors, recorder);
        }

        debug!(
            "frontier exhausted after finalizing {} nodes",
            self.dijkstra_rank
        );
    }

    pub fn distances(&self) -> &DistanceMap<N> {
        &self.distances
    }

    pub fn into_distances(self) -> DistanceMap<N> {
        self.distances
    }

    /// Shortest known distance of `node`. Only final once `node` has been
    /// popped.
    pub fn distance(&self, node: &N) -> Option<Distance> {
        self.distances.get(node).copied()
    }

    pub fn frontier(&self) -> &Q {
        &self.queue
    }

    /// Number of nodes finalized so far.
    pub fn dijkstra_rank(&self) -> u32 {
        self.dijkstra_rank
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Shortest distances from the nearest of `start_nodes`.
///
/// With empty `end_nodes` every reachable node is finalized. Otherwise the
/// search stops as soon as all of `end_nodes` are finalized, and the result
/// also holds the tentative distances of nodes discovered on the way.
pub fn shortest_distances<N, F, I>(
    start_nodes: impl IntoIterator<Item = N>,
    end_nodes: impl IntoIterator<Item = N>,
    get_neighbors: F,
) -> DistanceMap<N>
where
    N: Clone + Ord + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator,
    I::Item: Into<Neighbor<N>>,
{
    shortest_distances_with_predecessors(start_nodes, end_nodes, get_neighbors, &mut ())
}

/// Same as [`shortest_distances`], additionally reporting every relaxation to
/// `predecessors`.
pub fn shortest_distances_with_predecessors<N, F, I, P>(
    start_nodes: impl IntoIterator<Item = N>,
    end_nodes: impl IntoIterator<Item = N>,
    get_neighbors: F,
    predecessors: &mut P,
) -> DistanceMap<N>
where
    N: Clone + Ord + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator,
    I::Item: Into<Neighbor<N>>,
    P: PredecessorRecorder<N>,
{
    shortest_distances_until(
        start_nodes,
        get_neighbors,
        AllNodesEncountered::new(end_nodes),
        predecessors,
    )
}

/// Shortest distances, stopping once `end_condition` holds for a finalized
/// node.
pub fn shortest_distances_until<N, F, I, E, P>(
    start_nodes: impl IntoIterator<Item = N>,
    get_neighbors: F,
    end_condition: E,
    predecessors: &mut P,
) -> DistanceMap<N>
where
    N: Clone + Ord + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator,
    I::Item: Into<Neighbor<N>>,
    E: EndCondition<N>,
    P: PredecessorRecorder<N>,
{
    let mut search = DijkstraSearch::new(start_nodes);
    search.run(get_neighbors, end_condition, predecessors);
    search.into_distances()
}

/// Distance of a shortest path from `start` to `target`, if there is one.
pub fn shortest_distance<N, F, I>(start: N, target: N, get_neighbors: F) -> Option<Distance>
where
    N: Clone + Ord + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator,
    I::Item: Into<Neighbor<N>>,
{
    let distances = shortest_distances([start], [target.clone()], get_neighbors);
    distances.get(&target).copied()
}

/// A shortest path from `start` to `target`, if there is one.
pub fn shortest_path<N, F, I>(start: N, target: N, get_neighbors: F) -> Option<Path<N>>
where
    N: Clone + Ord + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator,
    I::Item: Into<Neighbor<N>>,
{
    let mut predecessors = PredecessorMap::new();
    let distances = shortest_distances_with_predecessors(
        [start],
        [target.clone()],
        get_neighbors,
        &mut predecessors,
    );
    get_path(&distances, &predecessors, &target)
}
