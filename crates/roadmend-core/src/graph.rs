//! Road network model: places, the roads between them, and the blocked subset.

use crate::place::{BlockedRoad, Place, RoadKey};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Place → set of adjacent places.
pub type Adjacency = BTreeMap<Place, BTreeSet<Place>>;

/// Errors raised while assembling a [`RoadGraph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("blocked road {a} - {b} is not a road of the network")]
    InvalidEdge { a: Place, b: Place },
    #[error("road from {0} to itself")]
    SelfLoop(Place),
    #[error("road {key} is blocked twice with different costs ({first} and {second})")]
    ConflictingCost { key: RoadKey, first: u64, second: u64 },
}

/// Undirected road network with a set of blocked roads.
///
/// Adjacency is always symmetric: if `b` is listed as a neighbor of `a`,
/// `a` is a neighbor of `b`. Every blocked road is a road of the network.
/// Both invariants are established in [`RoadGraph::new`] and the graph is
/// immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    adjacency: Adjacency,
    blocked: BTreeMap<RoadKey, BlockedRoad>,
}

impl RoadGraph {
    /// Build a graph from an adjacency mapping and blocked roads.
    ///
    /// Missing reverse edges are filled in. Places that only appear as
    /// neighbors become vertices with their own entry.
    pub fn new(
        adjacency: Adjacency,
        blocked: impl IntoIterator<Item = BlockedRoad>,
    ) -> Result<Self, GraphError> {
        let mut symmetric: Adjacency = BTreeMap::new();
        for (place, neighbors) in adjacency {
            symmetric.entry(place.clone()).or_default();
            for neighbor in neighbors {
                if neighbor == place {
                    return Err(GraphError::SelfLoop(place));
                }
                symmetric
                    .entry(neighbor.clone())
                    .or_default()
                    .insert(place.clone());
                symmetric
                    .entry(place.clone())
                    .or_default()
                    .insert(neighbor);
            }
        }

        let mut blocked_map: BTreeMap<RoadKey, BlockedRoad> = BTreeMap::new();
        for road in blocked {
            let adjacent = symmetric
                .get(&road.a)
                .is_some_and(|neighbors| neighbors.contains(&road.b));
            if !adjacent {
                return Err(GraphError::InvalidEdge {
                    a: road.a,
                    b: road.b,
                });
            }
            match blocked_map.entry(road.key()) {
                Entry::Vacant(slot) => {
                    slot.insert(road);
                }
                Entry::Occupied(existing) => {
                    let first = existing.get().cost;
                    if first != road.cost {
                        return Err(GraphError::ConflictingCost {
                            key: existing.key().clone(),
                            first,
                            second: road.cost,
                        });
                    }
                }
            }
        }

        Ok(Self {
            adjacency: symmetric,
            blocked: blocked_map,
        })
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.adjacency.keys()
    }

    pub fn contains(&self, place: &Place) -> bool {
        self.adjacency.contains_key(place)
    }

    pub fn place_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected roads, blocked ones included.
    pub fn road_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Each undirected road exactly once, in key order.
    pub fn roads(&self) -> Vec<RoadKey> {
        self.adjacency
            .iter()
            .flat_map(|(place, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |n| place < *n)
                    .map(move |n| RoadKey::from_refs(place, n))
            })
            .collect()
    }

    pub fn has_road(&self, a: &Place, b: &Place) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// All neighbors of `place`, blocked roads included.
    pub fn neighbors<'a>(&'a self, place: &Place) -> impl Iterator<Item = &'a Place> + use<'a> {
        self.adjacency.get(place).into_iter().flatten()
    }

    /// Neighbors of `place` reachable over roads that are not blocked.
    pub fn open_neighbors<'a>(&'a self, place: &Place) -> impl Iterator<Item = &'a Place> + use<'a> {
        let from = place.clone();
        self.neighbors(place)
            .filter(move |n| !self.is_blocked(&from, n))
    }

    /// Symmetric: `is_blocked(a, b) == is_blocked(b, a)`.
    pub fn is_blocked(&self, a: &Place, b: &Place) -> bool {
        self.blocked.contains_key(&RoadKey::from_refs(a, b))
    }

    pub fn blocked_road(&self, a: &Place, b: &Place) -> Option<&BlockedRoad> {
        self.blocked.get(&RoadKey::from_refs(a, b))
    }

    pub fn blocked_roads(&self) -> impl Iterator<Item = &BlockedRoad> {
        self.blocked.values()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }

    /// Canonical keys of every blocked road.
    pub fn blocked_pairs(&self) -> BTreeSet<RoadKey> {
        self.blocked.keys().cloned().collect()
    }

    /// Sum of all blocked-road costs. Widened so any number of `u64` costs fits.
    pub fn total_blocked_cost(&self) -> u128 {
        self.blocked.values().map(|r| u128::from(r.cost)).sum()
    }

    /// Places whose category marks them as regional centers, in order.
    pub fn regional_centers<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Place> + 'a {
        self.places().filter(move |p| p.has_category(category))
    }
}

/// Incremental construction of a [`RoadGraph`], used by the input parsers.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: Adjacency,
    blocked: Vec<BlockedRoad>,
}

impl GraphBuilder {
    /// Add a place with no roads (yet).
    pub fn place(&mut self, place: Place) -> &mut Self {
        self.adjacency.entry(place).or_default();
        self
    }

    pub fn connect(&mut self, a: Place, b: Place) -> &mut Self {
        self.adjacency.entry(a).or_default().insert(b);
        self
    }

    /// Mark a road as blocked. The road itself still has to be declared with
    /// [`GraphBuilder::connect`].
    pub fn block(&mut self, a: Place, b: Place, cost: u64) -> &mut Self {
        self.blocked.push(BlockedRoad::new(a, b, cost));
        self
    }

    pub fn build(&mut self) -> Result<RoadGraph, GraphError> {
        RoadGraph::new(
            std::mem::take(&mut self.adjacency),
            std::mem::take(&mut self.blocked),
        )
    }
}
