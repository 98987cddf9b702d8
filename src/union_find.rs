use crate::room::RegionId;
use std::collections::{BTreeMap, BTreeSet};

/// Region id → canonical id table used while placing doorways.
#[derive(Debug, Clone)]
pub struct RegionMerge {
    parents: BTreeMap<RegionId, RegionId>,
    unmerged: BTreeSet<RegionId>,
}

impl RegionMerge {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = RegionId>,
    {
        let unmerged = ids.into_iter().collect::<BTreeSet<_>>();
        RegionMerge {
            parents: unmerged.iter().map(|id| (*id, *id)).collect(),
            unmerged,
        }
    }

    /// Canonical id of `id`, compressing the path behind it. Unknown ids are their own root.
    pub fn find(&mut self, id: RegionId) -> RegionId {
        let mut root = id;
        while let Some(&parent) = self.parents.get(&root) {
            if parent == root {
                break;
            }
            root = parent;
        }
        let mut current = id;
        while current != root {
            let Some(next) = self.parents.insert(current, root) else {
                break;
            };
            current = next;
        }
        root
    }

    /// Attaches `other`'s root to `destination`'s root. Returns false if they already matched.
    pub fn union(&mut self, destination: RegionId, other: RegionId) -> bool {
        let destination = self.find(destination);
        let other = self.find(other);
        if destination == other {
            return false;
        }
        self.parents.insert(other, destination);
        self.unmerged.remove(&other);
        true
    }

    pub fn same(&mut self, a: RegionId, b: RegionId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of canonical ids still standing.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.unmerged.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<RegionId> {
        (0..n).map(RegionId::from).collect()
    }

    #[test]
    fn test_union_attaches_to_destination() {
        let mut merge = RegionMerge::new(ids(4));
        assert_eq!(merge.remaining(), 4);
        assert!(merge.union(RegionId::from(2), RegionId::from(3)));
        assert_eq!(merge.find(RegionId::from(3)), RegionId::from(2));
        assert!(merge.union(RegionId::from(0), RegionId::from(3)));
        assert_eq!(merge.find(RegionId::from(2)), RegionId::from(0));
        assert_eq!(merge.find(RegionId::from(3)), RegionId::from(0));
        assert_eq!(merge.remaining(), 2);
        assert!(!merge.union(RegionId::from(2), RegionId::from(0)));
        assert_eq!(merge.remaining(), 2);
    }

    #[test]
    fn test_chain_collapses_to_single_root() {
        let mut merge = RegionMerge::new(ids(6));
        for i in 1..6 {
            assert!(merge.union(RegionId::from(i), RegionId::from(i - 1)));
        }
        assert_eq!(merge.remaining(), 1);
        for id in ids(6) {
            assert_eq!(merge.find(id), RegionId::from(5));
        }
        assert!(merge.same(RegionId::from(0), RegionId::from(4)));
    }

    #[test]
    fn test_unknown_id_is_own_root() {
        let mut merge = RegionMerge::new(ids(2));
        assert_eq!(merge.find(RegionId::from(9)), RegionId::from(9));
    }
}
