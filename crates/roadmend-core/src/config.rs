//! Configuration for analysis and reporting.
//!
//! Load order: `roadmend.toml` → environment variables → defaults.

use crate::place::REGIONAL_CENTER;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const CONFIG_FILE: &str = "roadmend.toml";

/// Top-level roadmend configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmendConfig {
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
}

/// Component analysis and restoration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Place category that marks a regional center.
    pub center_category: String,
    /// How the planner tracks connectivity between iterations.
    pub strategy: Strategy,
}

/// Report rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Unit printed after road costs in human-readable output.
    pub cost_unit: String,
}

/// Connectivity bookkeeping used by the restoration planner.
///
/// Both strategies select the same roads; `UnionFind` avoids re-running the
/// full component search after every accepted road.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Recompute components from scratch each iteration.
    #[default]
    Recompute,
    /// Merge components in a disjoint-set forest.
    UnionFind,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recompute" => Ok(Self::Recompute),
            "union_find" | "union-find" | "unionfind" => Ok(Self::UnionFind),
            other => Err(format!(
                "unknown strategy {:?}, expected recompute or union_find",
                other
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recompute => f.write_str("recompute"),
            Self::UnionFind => f.write_str("union_find"),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            center_category: REGIONAL_CENTER.to_string(),
            strategy: Strategy::Recompute,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cost_unit: "km".to_string(),
        }
    }
}

/// Helper to parse an env var and apply it to a config field.
fn env_override<T: FromStr>(var: &str, target: &mut T) {
    if let Ok(v) = std::env::var(var)
        && let Ok(n) = v.parse()
    {
        *target = n;
    }
}

impl RoadmendConfig {
    /// Load `roadmend.toml` from `dir`, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let config = if path.exists() {
            Self::read(&path)?
        } else {
            Self::default()
        };
        config.finish()
    }

    /// Load an explicit config file. Unlike [`RoadmendConfig::load`], the file
    /// must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::read(path)?.finish()
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    fn finish(mut self) -> Result<Self> {
        env_override(
            "ROADMEND_CENTER_CATEGORY",
            &mut self.analysis.center_category,
        );
        env_override("ROADMEND_STRATEGY", &mut self.analysis.strategy);
        env_override("ROADMEND_COST_UNIT", &mut self.report.cost_unit);

        self.analysis.center_category = self.analysis.center_category.trim().to_string();
        if self.analysis.center_category.is_empty() {
            anyhow::bail!("analysis.center_category must not be empty");
        }

        Ok(self)
    }
}
