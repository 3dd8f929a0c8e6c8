use grid_util::point::Point;
use num_traits::Zero;

/// Search bookkeeping for one discovered cell. The cell's identity is the [Point] it is stored
/// under; the record only carries costs, which may change while the cell is in the frontier.
#[derive(Clone, Debug, PartialEq)]
pub struct CellRecord {
    /// Cost of the best known path from the origin.
    pub g_cost: f64,
    /// Heuristic estimate of the remaining cost, zero for Dijkstra.
    pub h_cost: f64,
    /// `g_cost + h_cost`, the frontier ordering key.
    pub f_cost: f64,
    /// The cell this one was reached from. Only the origin has none.
    pub predecessor: Option<Point>,
    /// Discovery order, used as the last tie-breaker when selecting from the frontier.
    pub(crate) sequence: u64,
}

impl CellRecord {
    pub(crate) fn new(g_cost: f64, h_cost: f64, predecessor: Point, sequence: u64) -> CellRecord {
        CellRecord {
            g_cost,
            h_cost,
            f_cost: g_cost + h_cost,
            predecessor: Some(predecessor),
            sequence,
        }
    }

    pub(crate) fn origin() -> CellRecord {
        CellRecord {
            g_cost: f64::zero(),
            h_cost: f64::zero(),
            f_cost: f64::zero(),
            predecessor: None,
            sequence: 0,
        }
    }

    /// Lowers the path cost and re-parents the cell, keeping its heuristic estimate.
    pub(crate) fn relax(&mut self, g_cost: f64, predecessor: Point) {
        self.g_cost = g_cost;
        self.f_cost = g_cost + self.h_cost;
        self.predecessor = Some(predecessor);
    }
}
