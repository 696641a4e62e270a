use std::hash::Hash;

use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};

/// Cheapest known predecessor of every reached node except the start nodes.
pub type PredecessorMap<N> = HashMap<N, N>;

/// Every predecessor through which a node is reached at its shortest
/// distance.
#[derive(Clone, Debug)]
pub struct AllPredecessorsMap<N> {
    predecessors: HashMap<N, HashSet<N>>,
}

impl<N: Clone + Hash + Eq> Default for AllPredecessorsMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Hash + Eq> AllPredecessorsMap<N> {
    pub fn new() -> AllPredecessorsMap<N> {
        AllPredecessorsMap {
            predecessors: HashMap::new(),
        }
    }

    pub fn get(&self, node: &N) -> Option<&HashSet<N>> {
        self.predecessors.get(node)
    }

    pub fn len(&self) -> usize {
        self.predecessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predecessors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, &HashSet<N>)> {
        self.predecessors.iter()
    }
}

/// Receives the relaxations performed by a search.
pub trait PredecessorRecorder<N> {
    /// `node` got a strictly shorter distance through `predecessor`. Also
    /// called when `node` is discovered.
    fn improved(&mut self, node: &N, predecessor: &N);

    /// `node` is reachable through `predecessor` at exactly its current
    /// distance.
    fn tied(&mut self, _node: &N, _predecessor: &N) {}
}

/// Records nothing.
impl<N> PredecessorRecorder<N> for () {
    fn improved(&mut self, _node: &N, _predecessor: &N) {}
}

impl<N: Clone + Hash + Eq> PredecessorRecorder<N> for PredecessorMap<N> {
    fn improved(&mut self, node: &N, predecessor: &N) {
        self.insert(node.clone(), predecessor.clone());
    }
}

impl<N: Clone + Hash + Eq> PredecessorRecorder<N> for AllPredecessorsMap<N> {
    fn improved(&mut self, node: &N, predecessor: &N) {
        let predecessors = self
            .predecessors
            .entry(node.clone())
            .or_insert_with(HashSet::new);
        predecessors.clear();
        predecessors.insert(predecessor.clone());
    }

    fn tied(&mut self, node: &N, predecessor: &N) {
        self.predecessors
            .entry(node.clone())
            .or_insert_with(HashSet::new)
            .insert(predecessor.clone());
    }
}
