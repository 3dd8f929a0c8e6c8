use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::debug;

use crate::cell::CellRecord;
use crate::frontier::Frontier;
use crate::FxIndexMap;

/// [SearchState] holds everything a search run works on: the blocked cells in a [BoolGrid], the
/// settled cells, the frontier, and the origin, destination and current cell.
///
/// Settled and frontier cells are keyed by coordinate and a coordinate is in at most one of the
/// two. Predecessor links are stored as coordinates, so the records form a tree rooted at the
/// origin that is dropped wholesale on reset.
///
/// The editing methods enforce that origin and destination are distinct, in bounds and never
/// blocked. Edits that would break this are ignored and reported by returning `false`.
#[derive(Debug)]
pub struct SearchState {
    blocked: BoolGrid,
    pub(crate) settled: FxIndexMap<Point, CellRecord>,
    pub(crate) frontier: Frontier,
    origin: Option<Point>,
    destination: Option<Point>,
    pub(crate) current: Option<Point>,
}

impl SearchState {
    pub fn new(width: usize, height: usize) -> SearchState {
        SearchState {
            blocked: BoolGrid::new(width, height, false),
            settled: FxIndexMap::default(),
            frontier: Frontier::default(),
            origin: None,
            destination: None,
            current: None,
        }
    }

    pub fn width(&self) -> usize {
        self.blocked.width()
    }
    pub fn height(&self) -> usize {
        self.blocked.height()
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width()
            && (point.y as usize) < self.height()
    }

    pub fn origin(&self) -> Option<Point> {
        self.origin
    }
    pub fn destination(&self) -> Option<Point> {
        self.destination
    }
    /// The cell most recently settled by a run that has not terminated yet.
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// Out-of-bounds points are reported as not blocked.
    pub fn is_blocked(&self, point: &Point) -> bool {
        self.in_bounds(point) && self.blocked.get_point(*point)
    }
    /// All blocked cells in row-major order.
    pub fn blocked_points(&self) -> impl Iterator<Item = Point> + '_ {
        let (w, h) = (self.width() as i32, self.height() as i32);
        (0..h)
            .flat_map(move |y| (0..w).map(move |x| Point::new(x, y)))
            .filter(move |p| self.blocked.get_point(*p))
    }

    pub fn settled(&self) -> impl Iterator<Item = (&Point, &CellRecord)> {
        self.settled.iter()
    }
    pub fn settled_len(&self) -> usize {
        self.settled.len()
    }
    pub fn is_settled(&self, point: &Point) -> bool {
        self.settled.contains_key(point)
    }
    pub fn settled_record(&self, point: &Point) -> Option<&CellRecord> {
        self.settled.get(point)
    }

    pub fn frontier(&self) -> impl Iterator<Item = (&Point, &CellRecord)> {
        self.frontier.iter()
    }
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
    pub fn in_frontier(&self, point: &Point) -> bool {
        self.frontier.contains(point)
    }
    pub fn frontier_record(&self, point: &Point) -> Option<&CellRecord> {
        self.frontier.get(point)
    }

    /// Cells that have been settled, are in the frontier or are blocked are never discovered
    /// again.
    pub(crate) fn is_known(&self, point: &Point) -> bool {
        self.is_settled(point) || self.in_frontier(point) || self.is_blocked(point)
    }

    /// Moves a cell out of the frontier (if present) into the settled set.
    pub(crate) fn settle(&mut self, point: Point) -> Option<&CellRecord> {
        let record = self.frontier.take(&point)?;
        self.settled.insert(point, record);
        self.settled.get(&point)
    }

    pub(crate) fn settle_origin(&mut self, origin: Point) {
        self.settled.insert(origin, CellRecord::origin());
    }

    /// Moves the origin, unblocking the cell. Ignored if the point is out of bounds or is the
    /// destination.
    pub fn set_origin(&mut self, point: Point) -> bool {
        if !self.in_bounds(&point) || self.destination == Some(point) {
            debug!("Ignoring origin {:?}", point);
            return false;
        }
        self.blocked.set_point(point, false);
        self.origin = Some(point);
        true
    }

    /// Moves the destination, unblocking the cell. Ignored if the point is out of bounds or is
    /// the origin.
    pub fn set_destination(&mut self, point: Point) -> bool {
        if !self.in_bounds(&point) || self.origin == Some(point) {
            debug!("Ignoring destination {:?}", point);
            return false;
        }
        self.blocked.set_point(point, false);
        self.destination = Some(point);
        true
    }

    /// Blocks a cell. The origin and destination cannot be blocked.
    pub fn set_blocked(&mut self, point: Point) -> bool {
        if !self.in_bounds(&point) || self.origin == Some(point) || self.destination == Some(point)
        {
            debug!("Ignoring blocked cell {:?}", point);
            return false;
        }
        self.blocked.set_point(point, true);
        true
    }

    pub fn clear_blocked(&mut self, point: Point) -> bool {
        if !self.in_bounds(&point) {
            return false;
        }
        self.blocked.set_point(point, false);
        true
    }

    /// Exchanges origin and destination. Requires both to be set.
    pub fn swap_endpoints(&mut self) -> bool {
        match (self.origin, self.destination) {
            (Some(origin), Some(destination)) => {
                self.origin = Some(destination);
                self.destination = Some(origin);
                true
            }
            _ => false,
        }
    }

    /// Drops all data of a run, keeping blocked cells and endpoints.
    pub fn reset_run(&mut self) {
        self.settled.clear();
        self.frontier.clear();
        self.current = None;
    }

    /// Drops the run, the blocked cells and the endpoints.
    pub fn clear_all(&mut self) {
        self.reset_run();
        self.blocked = BoolGrid::new(self.width(), self.height(), false);
        self.origin = None;
        self.destination = None;
    }

    fn symbol(&self, point: Point) -> char {
        if self.origin == Some(point) {
            'S'
        } else if self.destination == Some(point) {
            'G'
        } else if self.blocked.get_point(point) {
            '#'
        } else if self.current == Some(point) {
            '@'
        } else if self.is_settled(&point) {
            'x'
        } else if self.in_frontier(&point) {
            'o'
        } else {
            '.'
        }
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| self.symbol(Point::new(x, y)))
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
