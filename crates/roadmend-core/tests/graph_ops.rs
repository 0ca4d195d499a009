use roadmend_core::graph::*;
use roadmend_core::place::*;
use std::collections::BTreeSet;

fn place(category: &str, name: &str) -> Place {
    Place::new(category, name)
}

/// Ring of four places: city A - city B - regional_center D - village C - city A.
fn make_ring() -> RoadGraph {
    RoadGraph::builder()
        .connect(place("city", "A"), place("city", "B"))
        .connect(place("city", "B"), Place::regional_center("D"))
        .connect(Place::regional_center("D"), place("village", "C"))
        .connect(place("village", "C"), place("city", "A"))
        .block(place("city", "A"), place("city", "B"), 10)
        .block(Place::regional_center("D"), place("village", "C"), 8)
        .build()
        .unwrap()
}

#[test]
fn test_adjacency_is_symmetric() {
    let graph = make_ring();
    for (place, neighbors) in graph.adjacency() {
        for neighbor in neighbors {
            assert!(
                graph.has_road(neighbor, place),
                "{} lists {} but not the reverse",
                place,
                neighbor
            );
        }
    }
}

#[test]
fn test_is_blocked_symmetric_for_every_pair() {
    let graph = make_ring();
    let places: Vec<&Place> = graph.places().collect();
    for a in &places {
        for b in &places {
            assert_eq!(graph.is_blocked(a, b), graph.is_blocked(b, a));
        }
    }
    assert!(graph.is_blocked(&Place::regional_center("D"), &place("village", "C")));
    assert!(!graph.is_blocked(&place("city", "A"), &place("village", "C")));
}

#[test]
fn test_counts_and_costs() {
    let graph = make_ring();
    assert_eq!(graph.place_count(), 4);
    assert_eq!(graph.road_count(), 4);
    assert_eq!(graph.blocked_count(), 2);
    assert_eq!(graph.total_blocked_cost(), 18);
}

#[test]
fn test_blocked_pairs_are_canonical() {
    let graph = make_ring();
    let pairs = graph.blocked_pairs();
    assert!(pairs.contains(&RoadKey::from_refs(
        &place("village", "C"),
        &Place::regional_center("D")
    )));
    assert!(pairs.contains(&RoadKey::from_refs(&place("city", "B"), &place("city", "A"))));
}

#[test]
fn test_blocked_road_keeps_declared_order() {
    let graph = make_ring();
    let road = graph
        .blocked_road(&place("village", "C"), &Place::regional_center("D"))
        .unwrap();
    assert_eq!(road.a, Place::regional_center("D"));
    assert_eq!(road.b, place("village", "C"));
}

#[test]
fn test_open_neighbors_exclude_blocked() {
    let graph = make_ring();
    let open: BTreeSet<&Place> = graph.open_neighbors(&place("city", "A")).collect();
    assert_eq!(open, BTreeSet::from([&place("village", "C")]));
}

#[test]
fn test_invalid_edge_detected_at_construction() {
    let result = RoadGraph::builder()
        .connect(place("city", "A"), place("city", "B"))
        .connect(place("city", "B"), Place::regional_center("R"))
        .block(place("city", "A"), Place::regional_center("R"), 4)
        .build();
    assert!(matches!(result, Err(GraphError::InvalidEdge { .. })));
}

#[test]
fn test_isolated_place_kept() {
    let graph = RoadGraph::builder()
        .place(place("hamlet", "Lone"))
        .connect(place("city", "A"), Place::regional_center("R"))
        .build()
        .unwrap();
    assert_eq!(graph.place_count(), 3);
    assert_eq!(graph.neighbors(&place("hamlet", "Lone")).count(), 0);
}
