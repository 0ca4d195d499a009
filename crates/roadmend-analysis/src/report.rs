//! Human-readable and JSON reports of an analysis run.

use crate::components::{Partition, analyze};
use crate::error::AnalysisError;
use crate::restore::{RestorationPlan, RestoreOptions, restore};
use chrono::{DateTime, Utc};
use roadmend_core::graph::RoadGraph;
use roadmend_core::place::{BlockedRoad, Place};
use serde::Serialize;
use std::fmt::Write;

/// Everything the `solve` command writes out.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub cost_unit: String,
    /// One entry per isolated component.
    pub disconnected: Vec<Vec<Place>>,
    pub restoration: Restoration,
}

/// Outcome of the planner as recorded in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Restoration {
    Planned {
        roads: Vec<BlockedRoad>,
        total_cost: u128,
    },
    Impossible {
        reason: String,
        stranded: Vec<Place>,
    },
}

impl Report {
    /// Analyze `graph` and plan its restoration.
    ///
    /// An unrecoverable network is recorded in the report rather than
    /// returned as an error; a network without a regional center is an error.
    pub fn build(
        graph: &RoadGraph,
        options: &RestoreOptions,
        cost_unit: &str,
    ) -> Result<Self, AnalysisError> {
        let partition = analyze(graph, &options.center_category)?;
        let restoration = match restore(graph, options) {
            Ok(plan) => Restoration::from(&plan),
            Err(err) => {
                let AnalysisError::RestorationImpossible { stranded, .. } = &err else {
                    return Err(err);
                };
                Restoration::Impossible {
                    reason: err.to_string(),
                    stranded: stranded.clone(),
                }
            }
        };
        Ok(Self::new(&partition, restoration, cost_unit))
    }

    pub fn new(partition: &Partition, restoration: Restoration, cost_unit: &str) -> Self {
        Self {
            generated_at: Utc::now(),
            cost_unit: cost_unit.to_string(),
            disconnected: partition
                .isolated
                .iter()
                .map(|c| c.iter().cloned().collect())
                .collect(),
            restoration,
        }
    }

    pub fn total_cost(&self) -> Option<u128> {
        match &self.restoration {
            Restoration::Planned { total_cost, .. } => Some(*total_cost),
            Restoration::Impossible { .. } => None,
        }
    }

    /// Text layout of the output file.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        writeln!(out, "Disconnected places:").unwrap();
        for group in &self.disconnected {
            writeln!(out, "{}", join_places(group)).unwrap();
        }
        writeln!(out).unwrap();
        writeln!(out, "Restored roads:").unwrap();
        match &self.restoration {
            Restoration::Planned { roads, total_cost } => {
                for road in roads {
                    writeln!(out, "{}", road).unwrap();
                }
                writeln!(out).unwrap();
                writeln!(
                    out,
                    "In total, {} {} of roads need to be restored",
                    total_cost, self.cost_unit
                )
                .unwrap();
            }
            Restoration::Impossible { reason, .. } => {
                writeln!(out, "Restoration impossible: {}", reason).unwrap();
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&RestorationPlan> for Restoration {
    fn from(plan: &RestorationPlan) -> Self {
        Self::Planned {
            roads: plan.roads().cloned().collect(),
            total_cost: plan.total_cost(),
        }
    }
}

fn join_places<'a>(places: impl IntoIterator<Item = &'a Place>) -> String {
    places
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per isolated component, places comma-separated.
pub fn render_disconnected(partition: &Partition) -> String {
    let mut out = String::new();
    for group in &partition.isolated {
        writeln!(out, "{}", join_places(group)).unwrap();
    }
    out
}

/// One sentence per road followed by the total.
pub fn render_plan(plan: &RestorationPlan, cost_unit: &str) -> String {
    let mut out = String::new();
    for road in plan.roads() {
        writeln!(
            out,
            "Restore {} {} between {} and {}",
            road.cost, cost_unit, road.a, road.b
        )
        .unwrap();
    }
    writeln!(
        out,
        "In total, {} {} of roads need to be restored",
        plan.total_cost(),
        cost_unit
    )
    .unwrap();
    out
}
