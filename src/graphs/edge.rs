use super::{Distance, Neighbor, VertexId};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct WeightedEdge {
    pub tail: VertexId,
    pub head: VertexId,
    pub weight: Distance,
}

impl WeightedEdge {
    pub fn new(tail: VertexId, head: VertexId, weight: Distance) -> WeightedEdge {
        WeightedEdge { tail, head, weight }
    }

    pub fn reversed(&self) -> WeightedEdge {
        WeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }
}

/// Edge stored in the adjacency list of its tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaillessEdge {
    pub head: VertexId,
    pub weight: Distance,
}

impl TaillessEdge {
    pub fn set_tail(&self, tail: VertexId) -> WeightedEdge {
        WeightedEdge {
            tail,
            head: self.head,
            weight: self.weight,
        }
    }

    pub fn neighbor(&self) -> Neighbor<VertexId> {
        Neighbor::new(self.head, self.weight)
    }
}
