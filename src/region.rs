use crate::room::RegionId;
use std::collections::{BTreeMap, BTreeSet};

/// Occupied coordinate → region id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionMap {
    map: BTreeMap<(i32, i32), RegionId>,
}

impl RegionMap {
    pub fn insert(&mut self, x: i32, y: i32, id: RegionId) -> Option<RegionId> {
        self.map.insert((x, y), id)
    }

    pub fn remove(&mut self, x: i32, y: i32) -> Option<RegionId> {
        self.map.remove(&(x, y))
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<RegionId> {
        self.map.get(&(x, y)).copied()
    }

    pub fn ids(&self) -> BTreeSet<RegionId> {
        self.map.values().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), RegionId)> + '_ {
        self.map.iter().map(|(p, id)| (*p, *id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// A blank cell bordering two distinct regions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Connector {
    pub regions: (RegionId, RegionId),
}

impl Connector {
    /// Builds a connector from the region ids around a cell, if exactly two are distinct.
    pub fn from_neighbors<I>(ids: I) -> Option<Self>
    where
        I: IntoIterator<Item = RegionId>,
    {
        let distinct = ids.into_iter().collect::<BTreeSet<_>>();
        if distinct.len() != 2 {
            return None;
        }
        let mut iter = distinct.into_iter();
        Some(Connector {
            regions: (iter.next()?, iter.next()?),
        })
    }
}

/// Ordered by coordinate, so picking the n-th entry is reproducible.
pub type ConnectorMap = BTreeMap<(i32, i32), Connector>;
