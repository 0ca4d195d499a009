//! JSON network files and version handling.

use crate::graph::RoadGraph;
use crate::place::{BlockedRoad, Place};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CURRENT_VERSION: &str = "1.0.0";

/// On-disk JSON representation of a road network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkFile {
    pub version: String,
    /// Every road once; direction is irrelevant.
    pub roads: Vec<(Place, Place)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked: Vec<BlockedRoad>,
    /// Places with no roads at all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub places: Vec<Place>,
}

impl NetworkFile {
    pub fn from_graph(graph: &RoadGraph) -> Self {
        Self {
            version: CURRENT_VERSION.to_string(),
            roads: graph
                .roads()
                .into_iter()
                .map(|key| (key.low().clone(), key.high().clone()))
                .collect(),
            blocked: graph.blocked_roads().cloned().collect(),
            places: graph
                .places()
                .filter(|p| graph.neighbors(p).next().is_none())
                .cloned()
                .collect(),
        }
    }

    pub fn into_graph(self) -> Result<RoadGraph> {
        let mut builder = RoadGraph::builder();
        for place in self.places {
            builder.place(place);
        }
        for (a, b) in self.roads {
            builder.connect(a, b);
        }
        for road in self.blocked {
            builder.block(road.a, road.b, road.cost);
        }
        builder.build().context("invalid road network in JSON file")
    }
}

/// Validate a network file's schema version.
pub fn validate_version(file: &NetworkFile) -> Result<()> {
    if file.version != CURRENT_VERSION {
        anyhow::bail!(
            "network file version mismatch: expected {}, found {}",
            CURRENT_VERSION,
            file.version
        );
    }
    Ok(())
}

/// Serialize a graph to a pretty-printed JSON string.
pub fn to_json(graph: &RoadGraph) -> Result<String> {
    serde_json::to_string_pretty(&NetworkFile::from_graph(graph))
        .context("failed to serialize road network to JSON")
}

/// Deserialize a graph from a JSON string.
pub fn from_json(json: &str) -> Result<RoadGraph> {
    let file: NetworkFile =
        serde_json::from_str(json).context("failed to deserialize road network from JSON")?;
    validate_version(&file)?;
    file.into_graph()
}
