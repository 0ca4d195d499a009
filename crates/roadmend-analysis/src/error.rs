//! Errors from component analysis and restoration planning.

use roadmend_core::graph::GraphError;
use roadmend_core::place::Place;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// No place of the regional-center category exists anywhere in the network.
    #[error("no place of category {category:?} in the network")]
    NoCentralComponent { category: String },
    /// Some places stay cut off even with every blocked road reopened.
    #[error(
        "{isolated} isolated component(s) cannot be reconnected to the regional center, even with every blocked road reopened"
    )]
    RestorationImpossible {
        isolated: usize,
        /// Places still unreachable when the planner gave up, in order.
        stranded: Vec<Place>,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}
