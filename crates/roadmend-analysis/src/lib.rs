//! Connectivity analysis for road networks.
//!
//! Finds the places cut off from the regional center (components), plans the
//! cheapest set of blocked roads to reopen (restore), and renders the results
//! as text/JSON reports or DOT/Mermaid graphs.

pub mod components;
pub mod error;
pub mod export;
pub mod report;
pub mod restore;
mod union_find;
