use std::hash::Hash;

use ahash::{HashSet, HashSetExt};

/// Decides whether a search may stop after `node` has been finalized.
pub trait EndCondition<N> {
    fn end_reached(&mut self, node: &N) -> bool;
}

/// Never stops, the search runs until the frontier is exhausted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Exhaustive;

impl<N> EndCondition<N> for Exhaustive {
    fn end_reached(&mut self, _node: &N) -> bool {
        false
    }
}

impl<N, F> EndCondition<N> for F
where
    F: FnMut(&N) -> bool,
{
    fn end_reached(&mut self, node: &N) -> bool {
        self(node)
    }
}

/// Stops once every searched node has been finalized. Without searched nodes
/// it never stops.
#[derive(Clone, Debug)]
pub struct AllNodesEncountered<N> {
    searched: HashSet<N>,
    encountered: HashSet<N>,
}

impl<N: Clone + Hash + Eq> AllNodesEncountered<N> {
    pub fn new(searched: impl IntoIterator<Item = N>) -> AllNodesEncountered<N> {
        AllNodesEncountered {
            searched: searched.into_iter().collect(),
            encountered: HashSet::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.searched.len() - self.encountered.len()
    }
}

impl<N: Clone + Hash + Eq> EndCondition<N> for AllNodesEncountered<N> {
    fn end_reached(&mut self, node: &N) -> bool {
        if !self.searched.contains(node) {
            return false;
        }

        self.encountered.insert(node.clone());
        self.encountered.len() == self.searched.len()
    }
}
