//! Restoration planning: the cheapest set of blocked roads to reopen so that
//! every place can reach the regional center again.
//!
//! Each iteration looks at the blocked roads crossing from the central
//! component to an isolated one and reopens the cheapest of them. This is
//! Prim's cut property applied to the network with its open components
//! contracted, so the accepted roads have minimum total cost. Reachability is
//! re-evaluated after every accepted road; a merge can expose frontier roads
//! of other components in the next round.
//!
//! Ties on cost are broken by the canonical road key (lower endpoint, then
//! higher endpoint, each ordered by category and then name).

use crate::components::{PlaceIndex, find_components};
use crate::error::AnalysisError;
use crate::union_find::UnionFind;
use roadmend_core::config::{AnalysisConfig, Strategy};
use roadmend_core::graph::RoadGraph;
use roadmend_core::place::{BlockedRoad, Place, REGIONAL_CENTER, RoadKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Planner settings.
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    pub center_category: String,
    pub strategy: Strategy,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            center_category: REGIONAL_CENTER.to_string(),
            strategy: Strategy::Recompute,
        }
    }
}

impl From<&AnalysisConfig> for RestoreOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            center_category: config.center_category.clone(),
            strategy: config.strategy,
        }
    }
}

/// One accepted road.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestorationStep {
    pub road: BlockedRoad,
    /// Isolated components before the road was reopened.
    pub isolated_before: usize,
    /// Isolated components after the road was reopened.
    pub isolated_after: usize,
    /// Places that regained a path to the center through this road.
    pub reconnected: usize,
}

/// Roads to reopen, in the order they were accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestorationPlan {
    pub steps: Vec<RestorationStep>,
}

impl RestorationPlan {
    pub fn roads(&self) -> impl Iterator<Item = &BlockedRoad> {
        self.steps.iter().map(|s| &s.road)
    }

    /// The accepted roads as a set; endpoint order does not matter.
    pub fn road_set(&self) -> HashSet<BlockedRoad> {
        self.roads().cloned().collect()
    }

    /// Summed in `u128`; individual costs are `u64`.
    pub fn total_cost(&self) -> u128 {
        self.roads().map(|r| u128::from(r.cost)).sum()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Whether the road between `a` and `b` is part of the plan.
    pub fn reopens(&self, a: &Place, b: &Place) -> bool {
        self.roads().any(|r| r.connects(a, b))
    }
}

/// Plan which of the graph's blocked roads to reopen.
///
/// Returns an empty plan when nothing is cut off,
/// [`AnalysisError::NoCentralComponent`] when the network has no regional
/// center, and [`AnalysisError::RestorationImpossible`] when some places stay
/// unreachable even with every blocked road open.
pub fn restore(graph: &RoadGraph, options: &RestoreOptions) -> Result<RestorationPlan, AnalysisError> {
    let plan = match options.strategy {
        Strategy::Recompute => restore_recompute(graph, &options.center_category)?,
        Strategy::UnionFind => restore_union_find(graph, &options.center_category)?,
    };
    tracing::info!(
        "restoration plan: {} road(s), total cost {} ({} strategy)",
        plan.len(),
        plan.total_cost(),
        options.strategy
    );
    Ok(plan)
}

/// Recompute the full partition after every accepted road.
fn restore_recompute(graph: &RoadGraph, category: &str) -> Result<RestorationPlan, AnalysisError> {
    let mut working: BTreeMap<RoadKey, &BlockedRoad> =
        graph.blocked_roads().map(|r| (r.key(), r)).collect();
    let mut plan = RestorationPlan::default();

    loop {
        let blocked: BTreeSet<RoadKey> = working.keys().cloned().collect();
        let partition = find_components(graph, &blocked, category)?;
        if partition.is_connected() {
            return Ok(plan);
        }

        // BTreeMap iteration is key-ordered, so min_by_key keeps the smallest
        // key among equal costs.
        let choice = working
            .iter()
            .filter(|(key, _)| partition.is_central(key.low()) != partition.is_central(key.high()))
            .min_by_key(|(_, road)| road.cost)
            .map(|(key, road)| (key.clone(), *road));

        let Some((key, road)) = choice else {
            return Err(AnalysisError::RestorationImpossible {
                isolated: partition.isolated.len(),
                stranded: partition.disconnected_places().into_iter().cloned().collect(),
            });
        };

        let outer = if partition.is_central(key.low()) {
            key.high()
        } else {
            key.low()
        };
        let reconnected = partition.component_of(outer).map_or(0, BTreeSet::len);
        let isolated_before = partition.isolated.len();

        tracing::debug!(
            "reopening {} (cost {}): reconnects {} place(s), {} isolated component(s) left",
            key,
            road.cost,
            reconnected,
            isolated_before - 1
        );

        working.remove(&key);
        plan.steps.push(RestorationStep {
            road: road.clone(),
            isolated_before,
            isolated_after: isolated_before - 1,
            reconnected,
        });
    }
}

/// Track open components in a disjoint-set forest instead of re-walking the
/// graph. Selects exactly the roads [`restore_recompute`] selects.
fn restore_union_find(graph: &RoadGraph, category: &str) -> Result<RestorationPlan, AnalysisError> {
    let index = PlaceIndex::new(graph);
    let center = index.center(category)?;

    let mut candidates: Vec<(&BlockedRoad, RoadKey, usize, usize)> = Vec::new();
    let mut closed = HashSet::new();
    for road in graph.blocked_roads() {
        let key = road.key();
        let (a, b) = index.road(graph, &key)?;
        closed.insert((a.min(b), a.max(b)));
        candidates.push((road, key, a, b));
    }
    // Cheapest first; the first frontier road in this order is the one the
    // recompute strategy would pick.
    candidates.sort_by(|x, y| x.0.cost.cmp(&y.0.cost).then_with(|| x.1.cmp(&y.1)));

    let mut forest = UnionFind::new(index.len());
    for (i, neighbors) in index.open_adjacency(graph, &closed).iter().enumerate() {
        for &j in neighbors {
            forest.union(i, j);
        }
    }

    let mut plan = RestorationPlan::default();
    loop {
        let isolated_before = forest.set_count() - 1;
        if isolated_before == 0 {
            return Ok(plan);
        }

        let root = forest.find(center);
        let position = candidates.iter().position(|&(_, _, a, b)| {
            let a_central = forest.find(a) == root;
            a_central != (forest.find(b) == root)
        });

        let Some(position) = position else {
            let stranded = (0..index.len())
                .filter(|&i| !forest.same(i, center))
                .map(|i| index.place(i).clone())
                .collect();
            return Err(AnalysisError::RestorationImpossible {
                isolated: isolated_before,
                stranded,
            });
        };

        let (road, key, a, b) = candidates.remove(position);
        let outer = if forest.same(a, center) { b } else { a };
        let reconnected = forest.size_of(outer);
        forest.union(a, b);

        tracing::debug!(
            "reopening {} (cost {}): reconnects {} place(s), {} isolated component(s) left",
            key,
            road.cost,
            reconnected,
            isolated_before - 1
        );

        plan.steps.push(RestorationStep {
            road: road.clone(),
            isolated_before,
            isolated_after: forest.set_count() - 1,
            reconnected,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(category: &str, name: &str) -> Place {
        Place::new(category, name)
    }

    fn options(strategy: Strategy) -> RestoreOptions {
        RestoreOptions {
            strategy,
            ..RestoreOptions::default()
        }
    }

    /// Two roads into the same isolated piece with equal cost.
    fn tied() -> RoadGraph {
        RoadGraph::builder()
            .connect(Place::regional_center("R"), place("village", "B"))
            .connect(Place::regional_center("R"), place("city", "A"))
            .connect(place("city", "A"), place("village", "B"))
            .block(Place::regional_center("R"), place("village", "B"), 5)
            .block(Place::regional_center("R"), place("city", "A"), 5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_tie_broken_by_smallest_key() {
        for strategy in [Strategy::Recompute, Strategy::UnionFind] {
            let plan = restore(&tied(), &options(strategy)).unwrap();
            assert_eq!(plan.len(), 1);
            // (city A, regional_center R) sorts before (regional_center R, village B).
            assert!(plan.reopens(&place("city", "A"), &Place::regional_center("R")));
            assert_eq!(plan.total_cost(), 5);
        }
    }

    #[test]
    fn test_step_records_merge() {
        let plan = restore(&tied(), &RestoreOptions::default()).unwrap();
        let step = &plan.steps[0];
        assert_eq!(step.isolated_before, 1);
        assert_eq!(step.isolated_after, 0);
        assert_eq!(step.reconnected, 2);
    }

    #[test]
    fn test_road_inside_isolated_piece_is_not_frontier() {
        // A - B is blocked and cheap but both ends are isolated; only B - R helps.
        let graph = RoadGraph::builder()
            .connect(place("city", "A"), place("city", "B"))
            .connect(place("city", "B"), Place::regional_center("R"))
            .block(place("city", "A"), place("city", "B"), 1)
            .block(place("city", "B"), Place::regional_center("R"), 9)
            .build()
            .unwrap();
        for strategy in [Strategy::Recompute, Strategy::UnionFind] {
            let plan = restore(&graph, &options(strategy)).unwrap();
            let order: Vec<u64> = plan.roads().map(|r| r.cost).collect();
            assert_eq!(order, vec![9, 1]);
            assert_eq!(plan.steps[0].reconnected, 1);
        }
    }

    #[test]
    fn test_options_from_config() {
        let config = AnalysisConfig {
            center_category: "capital".to_string(),
            strategy: Strategy::UnionFind,
        };
        let opts = RestoreOptions::from(&config);
        assert_eq!(opts.center_category, "capital");
        assert_eq!(opts.strategy, Strategy::UnionFind);
    }
}
