use grid_util::point::Point;
use num_traits::Zero;

use crate::config::{Algorithm, Heuristic};

/// Cost of moving between two cells: their Euclidean distance. Independent of the chosen
/// heuristic, so a cardinal step costs 1 and a diagonal step costs `sqrt(2)`.
pub fn step_cost(from: &Point, to: &Point) -> f64 {
    let (dx, dy) = deltas(from, to);
    dx.hypot(dy)
}

fn deltas(p1: &Point, p2: &Point) -> (f64, f64) {
    ((p1.x - p2.x).abs() as f64, (p1.y - p2.y).abs() as f64)
}

impl Heuristic {
    /// Estimated remaining cost from `point` to `goal`.
    pub fn estimate(&self, point: &Point, goal: &Point) -> f64 {
        let (dx, dy) = deltas(point, goal);
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => dx.hypot(dy),
            Heuristic::Quadratic => dx * dx + dy * dy,
            Heuristic::Diagonal => dx.max(dy),
        }
    }
}

impl Algorithm {
    /// The h-cost assigned to a newly discovered cell. Dijkstra ignores the goal.
    pub fn estimate(&self, heuristic: Heuristic, point: &Point, goal: &Point) -> f64 {
        match self {
            Algorithm::Dijkstra => f64::zero(),
            Algorithm::AStar => heuristic.estimate(point, goal),
        }
    }
}
