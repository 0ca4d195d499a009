//! Read/write road network files from disk.

use crate::graph::RoadGraph;
use crate::{format, schema};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// File formats understood by [`load`] and [`save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFormat {
    /// `Connections:` / `Blocked roads:` sections.
    Text,
    Json,
}

impl NetworkFormat {
    /// `.json` files are JSON, anything else is the text format.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Load a road network, choosing the format from the file extension.
pub fn load(path: &Path) -> Result<RoadGraph> {
    load_as(path, NetworkFormat::from_path(path))
}

pub fn load_as(path: &Path, kind: NetworkFormat) -> Result<RoadGraph> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read road network from {}", path.display()))?;
    match kind {
        NetworkFormat::Text => format::parse(&content)
            .with_context(|| format!("failed to parse {}", path.display())),
        NetworkFormat::Json => schema::from_json(&content)
            .with_context(|| format!("failed to load {}", path.display())),
    }
}

/// Save a road network, creating parent directories if needed.
pub fn save(path: &Path, graph: &RoadGraph) -> Result<()> {
    save_as(path, graph, NetworkFormat::from_path(path))
}

pub fn save_as(path: &Path, graph: &RoadGraph, kind: NetworkFormat) -> Result<()> {
    ensure_parent_dir(path)?;

    let content = match kind {
        NetworkFormat::Text => format::to_text(graph)
            .with_context(|| format!("cannot save {} in the text format", path.display()))?,
        NetworkFormat::Json => schema::to_json(graph)?,
    };
    fs::write(path, content)
        .with_context(|| format!("failed to write road network to {}", path.display()))?;

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

/// Write an already-rendered report or export to `path`.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
