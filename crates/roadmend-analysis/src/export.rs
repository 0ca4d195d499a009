//! Export a road network as DOT (Graphviz) or a Mermaid flowchart.
//!
//! Open roads are green, blocked roads red and dashed, and roads reopened by a
//! restoration plan blue and bold. Blocked and reopened roads carry their cost.

use crate::restore::RestorationPlan;
use roadmend_core::graph::RoadGraph;
use roadmend_core::place::{Place, RoadKey};
use std::collections::HashMap;
use std::fmt::Write;

/// Export format for graph visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dot,
    Mermaid,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dot" | "graphviz" => Some(Self::Dot),
            "mermaid" | "md" => Some(Self::Mermaid),
            _ => None,
        }
    }
}

/// How a road is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoadState {
    Open,
    Blocked(u64),
    Restored(u64),
}

/// Rendering options shared by both formats.
#[derive(Debug, Clone)]
pub struct ExportOptions<'a> {
    /// Category labelled `R.C.` in the output.
    pub center_category: &'a str,
    pub plan: Option<&'a RestorationPlan>,
}

fn road_states(graph: &RoadGraph, plan: Option<&RestorationPlan>) -> Vec<(RoadKey, RoadState)> {
    graph
        .roads()
        .into_iter()
        .map(|key| {
            let state = match graph.blocked_road(key.low(), key.high()) {
                Some(road) if plan.is_some_and(|p| p.reopens(key.low(), key.high())) => {
                    RoadState::Restored(road.cost)
                }
                Some(road) => RoadState::Blocked(road.cost),
                None => RoadState::Open,
            };
            (key, state)
        })
        .collect()
}

fn label(place: &Place, center_category: &str) -> String {
    if place.has_category(center_category) {
        format!("R.C. {}", place.name)
    } else {
        place.name.clone()
    }
}

/// Stable node identifiers: `n0`, `n1`, ... in place order.
fn node_ids(graph: &RoadGraph) -> HashMap<&Place, String> {
    graph
        .places()
        .enumerate()
        .map(|(i, p)| (p, format!("n{}", i)))
        .collect()
}

/// Escape for a double-quoted DOT string.
fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape for a quoted Mermaid label, using Mermaid entity codes.
fn escape_mermaid(text: &str) -> String {
    text.replace('#', "#35;").replace('"', "#quot;")
}

/// Export the graph as a DOT (Graphviz) string.
pub fn export_dot(graph: &RoadGraph, options: &ExportOptions<'_>) -> String {
    let ids = node_ids(graph);
    let mut out = String::new();
    writeln!(out, "graph roads {{").unwrap();
    writeln!(out, "  node [shape=circle, style=filled, fillcolor=\"#e0ffe0\", fontsize=12];").unwrap();
    writeln!(out).unwrap();

    for place in graph.places() {
        let shape = if place.has_category(options.center_category) {
            "doublecircle"
        } else {
            "circle"
        };
        writeln!(
            out,
            "  {} [shape={}, label=\"{}\", tooltip=\"{}\"];",
            ids[place],
            shape,
            escape_dot(&label(place, options.center_category)),
            escape_dot(&place.to_string())
        )
        .unwrap();
    }

    writeln!(out).unwrap();

    for (key, state) in road_states(graph, options.plan) {
        let (a, b) = (&ids[key.low()], &ids[key.high()]);
        let attrs = match state {
            RoadState::Open => "color=green".to_string(),
            RoadState::Blocked(cost) => format!("color=red, style=dashed, label=\"{}\"", cost),
            RoadState::Restored(cost) => format!("color=blue, style=bold, label=\"{}\"", cost),
        };
        writeln!(out, "  {} -- {} [{}];", a, b, attrs).unwrap();
    }

    writeln!(out, "}}").unwrap();
    out
}

/// Export the graph as a Mermaid flowchart string.
pub fn export_mermaid(graph: &RoadGraph, options: &ExportOptions<'_>) -> String {
    let ids = node_ids(graph);
    let mut out = String::new();
    writeln!(out, "flowchart LR").unwrap();

    for place in graph.places() {
        let text = escape_mermaid(&label(place, options.center_category));
        if place.has_category(options.center_category) {
            writeln!(out, "  {}((\"{}\"))", ids[place], text).unwrap();
        } else {
            writeln!(out, "  {}(\"{}\")", ids[place], text).unwrap();
        }
    }

    // linkStyle addresses edges by declaration order.
    let mut styles = Vec::new();
    for (i, (key, state)) in road_states(graph, options.plan).into_iter().enumerate() {
        let (a, b) = (&ids[key.low()], &ids[key.high()]);
        match state {
            RoadState::Open => {
                writeln!(out, "  {} --- {}", a, b).unwrap();
                styles.push((i, "stroke:green"));
            }
            RoadState::Blocked(cost) => {
                writeln!(out, "  {} -.-|{}| {}", a, cost, b).unwrap();
                styles.push((i, "stroke:red"));
            }
            RoadState::Restored(cost) => {
                writeln!(out, "  {} ===|{}| {}", a, cost, b).unwrap();
                styles.push((i, "stroke:blue"));
            }
        }
    }
    for (i, style) in styles {
        writeln!(out, "  linkStyle {} {}", i, style).unwrap();
    }

    out
}

/// Export the graph in the specified format.
pub fn export(graph: &RoadGraph, format: ExportFormat, options: &ExportOptions<'_>) -> String {
    match format {
        ExportFormat::Dot => export_dot(graph, options),
        ExportFormat::Mermaid => export_mermaid(graph, options),
    }
}
