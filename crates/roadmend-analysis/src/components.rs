//! Component analysis: which places can still reach the regional center.
//!
//! Blocked roads are dropped from the network and the remaining roads are
//! walked with an iterative depth-first search. The component holding a
//! regional center is central; every other component is isolated.

use crate::error::AnalysisError;
use roadmend_core::graph::{GraphError, RoadGraph};
use roadmend_core::place::{Place, RoadKey};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Places mutually reachable over open roads.
pub type Component = BTreeSet<Place>;

/// Split of every place into the central component and the isolated ones.
///
/// The central component and the isolated components are pairwise disjoint
/// and together cover every place of the analyzed graph exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub central: Component,
    /// Isolated components ordered by their smallest place.
    pub isolated: Vec<Component>,
}

impl Partition {
    /// True when no place is cut off from the center.
    pub fn is_connected(&self) -> bool {
        self.isolated.is_empty()
    }

    pub fn component_count(&self) -> usize {
        1 + self.isolated.len()
    }

    pub fn place_count(&self) -> usize {
        self.central.len() + self.isolated.iter().map(BTreeSet::len).sum::<usize>()
    }

    pub fn is_central(&self, place: &Place) -> bool {
        self.central.contains(place)
    }

    pub fn component_of(&self, place: &Place) -> Option<&Component> {
        if self.central.contains(place) {
            return Some(&self.central);
        }
        self.isolated.iter().find(|c| c.contains(place))
    }

    /// Every place outside the central component, in order.
    pub fn disconnected_places(&self) -> BTreeSet<&Place> {
        self.isolated.iter().flatten().collect()
    }
}

/// Dense numbering of a graph's places, in place order.
pub(crate) struct PlaceIndex<'g> {
    places: Vec<&'g Place>,
    ids: HashMap<&'g Place, usize>,
}

impl<'g> PlaceIndex<'g> {
    pub(crate) fn new(graph: &'g RoadGraph) -> Self {
        let places: Vec<&Place> = graph.places().collect();
        let ids = places.iter().enumerate().map(|(i, p)| (*p, i)).collect();
        Self { places, ids }
    }

    pub(crate) fn len(&self) -> usize {
        self.places.len()
    }

    pub(crate) fn id(&self, place: &Place) -> Option<usize> {
        self.ids.get(place).copied()
    }

    pub(crate) fn place(&self, id: usize) -> &'g Place {
        self.places[id]
    }

    /// Index pair of a road, or `InvalidEdge` if the graph has no such road.
    pub(crate) fn road(&self, graph: &RoadGraph, key: &RoadKey) -> Result<(usize, usize), GraphError> {
        match (self.id(key.low()), self.id(key.high())) {
            (Some(a), Some(b)) if graph.has_road(key.low(), key.high()) => Ok((a, b)),
            _ => Err(GraphError::InvalidEdge {
                a: key.low().clone(),
                b: key.high().clone(),
            }),
        }
    }

    /// The smallest regional-center place, which anchors the central component.
    pub(crate) fn center(&self, category: &str) -> Result<usize, AnalysisError> {
        self.places
            .iter()
            .position(|p| p.has_category(category))
            .ok_or_else(|| AnalysisError::NoCentralComponent {
                category: category.to_string(),
            })
    }

    /// Adjacency lists over indices with the given roads left out.
    pub(crate) fn open_adjacency(
        &self,
        graph: &RoadGraph,
        closed: &HashSet<(usize, usize)>,
    ) -> Vec<Vec<usize>> {
        self.places
            .iter()
            .enumerate()
            .map(|(i, place)| {
                graph
                    .neighbors(place)
                    .filter_map(|n| self.id(n))
                    .filter(|&j| !closed.contains(&(i.min(j), i.max(j))))
                    .collect()
            })
            .collect()
    }
}

/// Partition `graph` into components, treating `blocked` roads as absent.
///
/// `blocked` is usually the graph's own [`RoadGraph::blocked_pairs`] or a
/// subset of it; any pair that is not a road of the graph is rejected.
pub fn find_components(
    graph: &RoadGraph,
    blocked: &BTreeSet<RoadKey>,
    center_category: &str,
) -> Result<Partition, AnalysisError> {
    let index = PlaceIndex::new(graph);

    let mut closed = HashSet::with_capacity(blocked.len());
    for key in blocked {
        let (a, b) = index.road(graph, key)?;
        closed.insert((a.min(b), a.max(b)));
    }

    let center = index.center(center_category)?;
    let adjacency = index.open_adjacency(graph, &closed);
    let labels = label_components(&adjacency);
    let central_label = labels.component[center];

    let mut groups: Vec<Component> = vec![BTreeSet::new(); labels.count];
    for (id, &label) in labels.component.iter().enumerate() {
        groups[label].insert(index.place(id).clone());
    }

    let mut central = Component::new();
    let mut isolated = Vec::with_capacity(labels.count.saturating_sub(1));
    for (label, group) in groups.into_iter().enumerate() {
        if label == central_label {
            central = group;
        } else {
            isolated.push(group);
        }
    }
    isolated.sort_by(|a, b| a.first().cmp(&b.first()));

    let stray_centers = isolated
        .iter()
        .filter(|c| c.iter().any(|p| p.has_category(center_category)))
        .count();
    if stray_centers > 0 {
        tracing::warn!(
            "{} regional center(s) lie outside the central component anchored at {}",
            stray_centers,
            index.place(center)
        );
    }

    Ok(Partition { central, isolated })
}

/// Partition using the graph's own blocked roads.
pub fn analyze(graph: &RoadGraph, center_category: &str) -> Result<Partition, AnalysisError> {
    find_components(graph, &graph.blocked_pairs(), center_category)
}

struct Labels {
    /// Component label per place index.
    component: Vec<usize>,
    count: usize,
}

/// Label connected components with an explicit-stack DFS.
fn label_components(adjacency: &[Vec<usize>]) -> Labels {
    let mut component: Vec<Option<usize>> = vec![None; adjacency.len()];
    let mut count = 0;
    let mut stack = Vec::new();

    for start in 0..adjacency.len() {
        if component[start].is_some() {
            continue;
        }
        component[start] = Some(count);
        stack.push(start);
        while let Some(node) = stack.pop() {
            for &next in &adjacency[node] {
                if component[next].is_none() {
                    component[next] = Some(count);
                    stack.push(next);
                }
            }
        }
        count += 1;
    }

    Labels {
        component: component.into_iter().flatten().collect(),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmend_core::place::REGIONAL_CENTER;

    fn place(category: &str, name: &str) -> Place {
        Place::new(category, name)
    }

    fn chain() -> RoadGraph {
        // village A - city B - regional_center D, village A - village C
        RoadGraph::builder()
            .connect(place("village", "A"), place("city", "B"))
            .connect(place("village", "A"), place("village", "C"))
            .connect(place("city", "B"), Place::regional_center("D"))
            .block(place("village", "A"), place("city", "B"), 4)
            .build()
            .unwrap()
    }

    #[test]
    fn test_blocked_road_splits_chain() {
        let partition = analyze(&chain(), REGIONAL_CENTER).unwrap();
        assert_eq!(
            partition.central,
            BTreeSet::from([place("city", "B"), Place::regional_center("D")])
        );
        assert_eq!(
            partition.isolated,
            vec![BTreeSet::from([place("village", "A"), place("village", "C")])]
        );
        assert!(!partition.is_connected());
        assert_eq!(partition.component_count(), 2);
    }

    #[test]
    fn test_no_blocked_roads_is_one_component() {
        let graph = chain();
        let partition = find_components(&graph, &BTreeSet::new(), REGIONAL_CENTER).unwrap();
        assert!(partition.is_connected());
        assert_eq!(partition.central.len(), graph.place_count());
    }

    #[test]
    fn test_unknown_blocked_pair_rejected() {
        let graph = chain();
        let blocked = BTreeSet::from([RoadKey::from_refs(
            &place("village", "C"),
            &Place::regional_center("D"),
        )]);
        let err = find_components(&graph, &blocked, REGIONAL_CENTER).unwrap_err();
        assert!(matches!(err, AnalysisError::Graph(GraphError::InvalidEdge { .. })));
    }

    #[test]
    fn test_missing_center_category() {
        let err = analyze(&chain(), "capital").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::NoCentralComponent {
                category: "capital".to_string(),
            }
        );
    }

    #[test]
    fn test_isolated_place_without_roads() {
        let graph = RoadGraph::builder()
            .connect(place("city", "A"), Place::regional_center("R"))
            .place(place("hamlet", "Lone"))
            .build()
            .unwrap();
        let partition = analyze(&graph, REGIONAL_CENTER).unwrap();
        assert_eq!(partition.isolated.len(), 1);
        assert!(partition.isolated[0].contains(&place("hamlet", "Lone")));
        assert_eq!(
            partition.component_of(&place("hamlet", "Lone")),
            Some(&partition.isolated[0])
        );
        assert_eq!(partition.component_of(&place("city", "Nowhere")), None);
    }

    #[test]
    fn test_second_center_stays_isolated() {
        // Two centers in different pieces: the smaller one anchors the center.
        let graph = RoadGraph::builder()
            .connect(Place::regional_center("A"), place("city", "X"))
            .connect(Place::regional_center("B"), place("city", "Y"))
            .build()
            .unwrap();
        let partition = analyze(&graph, REGIONAL_CENTER).unwrap();
        assert!(partition.is_central(&Place::regional_center("A")));
        assert!(!partition.is_central(&Place::regional_center("B")));
        assert_eq!(partition.place_count(), 4);
    }

    #[test]
    fn test_label_components_counts_singletons() {
        let adjacency = vec![vec![1], vec![0], vec![], vec![]];
        let labels = label_components(&adjacency);
        assert_eq!(labels.count, 3);
        assert_eq!(labels.component[0], labels.component[1]);
        assert_ne!(labels.component[2], labels.component[3]);
    }
}
