use grid_util::point::Point;
use itertools::Itertools;
use log::warn;
use std::iter;

use crate::cost_model::step_cost;
use crate::error::SearchError;
use crate::state::SearchState;

/// A path found by a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct GridPath {
    steps: Vec<Point>,
    cost: f64,
}

impl GridPath {
    /// Every cell after the origin, ending with the destination.
    pub fn steps(&self) -> &[Point] {
        &self.steps
    }
    /// The cells strictly between origin and destination.
    pub fn intermediate(&self) -> &[Point] {
        &self.steps[..self.steps.len().saturating_sub(1)]
    }
    /// Number of moves along the path.
    pub fn len(&self) -> usize {
        self.steps.len()
    }
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
    /// Sum of the Euclidean step costs from the origin through every step.
    pub fn cost(&self) -> f64 {
        self.cost
    }
}

/// Follows predecessor links of the settled cells from the destination back to the origin.
///
/// The cost is summed edge by edge rather than read from the destination's g-cost, so it always
/// describes the returned cells.
pub(crate) fn reconstruct_path(state: &SearchState) -> Result<GridPath, SearchError> {
    let origin = state.origin().ok_or(SearchError::MissingOrigin)?;
    let destination = state.destination().ok_or(SearchError::MissingDestination)?;
    if !state.is_settled(&destination) {
        return Err(SearchError::NoPathAvailable);
    }
    let mut chain = iter::successors(Some(destination), |p| {
        state.settled_record(p).and_then(|record| record.predecessor)
    })
    // A predecessor chain visits every settled cell at most once.
    .take(state.settled_len() + 1)
    .collect::<Vec<Point>>();
    if chain.last() != Some(&origin) {
        warn!("Predecessor chain of {:?} does not lead back to {:?}", destination, origin);
        return Err(SearchError::NoPathAvailable);
    }
    chain.reverse();
    let cost: f64 = chain
        .iter()
        .tuple_windows()
        .map(|(from, to)| step_cost(from, to))
        .sum();
    chain.remove(0);
    Ok(GridPath { steps: chain, cost })
}
