//! Core types and storage for roadmend.
//!
//! Provides the road network model ([`graph::RoadGraph`]), place and blocked-road
//! value types, the plain-text and JSON input formats, file storage, and
//! configuration loading.

pub mod config;
pub mod format;
pub mod graph;
pub mod place;
pub mod schema;
pub mod storage;
