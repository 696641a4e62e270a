use super::{
    edge::{TaillessEdge, WeightedEdge},
    Distance, Neighbor, VertexId,
};

/// In-memory adjacency list graph over dense vertex ids. Edges sharing a tail
/// are kept sorted by head, parallel edges collapse to the cheapest one.
#[derive(Clone, Default, Debug)]
pub struct VecVecGraph {
    edges: Vec<Vec<TaillessEdge>>,
}

impl VecVecGraph {
    pub fn from_edges(edges: &[WeightedEdge]) -> VecVecGraph {
        let mut graph = VecVecGraph::default();

        edges.iter().for_each(|edge| {
            if edge.weight < graph.get_weight(edge.tail, edge.head).unwrap_or(Distance::MAX) {
                graph.set_weight(edge.tail, edge.head, Some(edge.weight));
            }
        });

        graph
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.edges.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.edges.iter().map(|edges| edges.len() as u32).sum()
    }

    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        0..self.number_of_vertices()
    }

    pub fn edges(&self, tail: VertexId) -> impl ExactSizeIterator<Item = WeightedEdge> + '_ {
        self.out_edges(tail).iter().map(move |edge| edge.set_tail(tail))
    }

    /// Outgoing edges of `vertex` in the form the shortest path engine
    /// consumes. Unknown vertices have no neighbors.
    pub fn neighbors(&self, vertex: VertexId) -> impl ExactSizeIterator<Item = Neighbor<VertexId>> + '_ {
        self.out_edges(vertex).iter().map(TaillessEdge::neighbor)
    }

    pub fn get_weight(&self, tail: VertexId, head: VertexId) -> Option<Distance> {
        let edges_sharing_tail = self.edges.get(tail as usize)?;

        let edge_index = edges_sharing_tail
            .binary_search_by_key(&head, |tailless_edge| tailless_edge.head)
            .ok()?;

        Some(edges_sharing_tail[edge_index].weight)
    }

    /// Connects, updates or (with `None`) disconnects the edge `tail -> head`.
    pub fn set_weight(&mut self, tail: VertexId, head: VertexId, weight: Option<Distance>) {
        let max_edge_endpoints = std::cmp::max(tail, head) as usize;
        if max_edge_endpoints >= self.edges.len() {
            self.edges.resize(max_edge_endpoints + 1, Vec::new());
        }

        let edges_sharing_tail = &mut self.edges[tail as usize];
        let edge_index = edges_sharing_tail.binary_search_by_key(&head, |other| other.head);

        match (weight, edge_index) {
            (Some(weight), Ok(index)) => edges_sharing_tail[index].weight = weight,
            (Some(weight), Err(index)) => {
                edges_sharing_tail.insert(index, TaillessEdge { head, weight })
            }
            (None, Ok(index)) => {
                edges_sharing_tail.remove(index);
            }
            (None, Err(_)) => (),
        }
    }

    pub fn add_edge_bidirectional(&mut self, edge: &WeightedEdge) {
        for edge in [*edge, edge.reversed()] {
            self.set_weight(edge.tail, edge.head, Some(edge.weight));
        }
    }

    fn out_edges(&self, tail: VertexId) -> &[TaillessEdge] {
        self.edges
            .get(tail as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
