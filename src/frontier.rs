//! The set of discovered but not yet settled cells, ordered by f-cost.
//!
//! Records live in a map keyed by coordinate, while a [BinaryHeap] holds snapshots of their costs.
//! Path correction lowers costs of cells already in the heap; instead of updating entries in
//! place, a fresh entry is pushed and outdated ones are discarded when they reach the top.
use grid_util::point::Point;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cell::CellRecord;
use crate::FxIndexMap;

#[derive(Debug)]
struct SmallestCostHolder {
    estimated_cost: f64,
    cost: f64,
    sequence: u64,
    point: Point,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first. Ties go to the largest cost (the cell closest to the
        // goal by its own estimate), then to the earliest discovered cell.
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.total_cmp(&other.cost) {
                Ordering::Equal => other.sequence.cmp(&self.sequence),
                s => s,
            },
            s => s,
        }
    }
}

impl SmallestCostHolder {
    fn snapshot(point: Point, record: &CellRecord) -> SmallestCostHolder {
        SmallestCostHolder {
            estimated_cost: record.f_cost,
            cost: record.g_cost,
            sequence: record.sequence,
            point,
        }
    }
    fn is_current(&self, record: &CellRecord) -> bool {
        self.estimated_cost == record.f_cost && self.cost == record.g_cost
    }
}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    records: FxIndexMap<Point, CellRecord>,
    queue: BinaryHeap<SmallestCostHolder>,
}

impl Frontier {
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
    pub fn contains(&self, point: &Point) -> bool {
        self.records.contains_key(point)
    }
    pub fn get(&self, point: &Point) -> Option<&CellRecord> {
        self.records.get(point)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Point, &CellRecord)> {
        self.records.iter()
    }

    pub fn insert(&mut self, point: Point, record: CellRecord) {
        self.queue.push(SmallestCostHolder::snapshot(point, &record));
        self.records.insert(point, record);
    }

    /// Lowers the path cost of a frontier cell if `g_cost` improves on it. Returns whether the
    /// cell was updated.
    pub fn relax(&mut self, point: &Point, g_cost: f64, predecessor: Point) -> bool {
        match self.records.get_mut(point) {
            Some(record) if g_cost < record.g_cost => {
                record.relax(g_cost, predecessor);
                self.queue.push(SmallestCostHolder::snapshot(*point, record));
                true
            }
            _ => false,
        }
    }

    /// The cell with the smallest f-cost. Outdated heap entries met on the way are dropped.
    pub fn peek_min(&mut self) -> Option<Point> {
        while let Some(top) = self.queue.peek() {
            match self.records.get(&top.point) {
                Some(record) if top.is_current(record) => return Some(top.point),
                _ => {
                    self.queue.pop();
                }
            }
        }
        None
    }

    /// Removes a cell, handing over its record.
    pub fn take(&mut self, point: &Point) -> Option<CellRecord> {
        self.records.swap_remove(point)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(g: f64, h: f64, sequence: u64) -> CellRecord {
        CellRecord::new(g, h, Point::new(0, 0), sequence)
    }

    #[test]
    fn selects_smallest_f_cost() {
        let mut frontier = Frontier::default();
        frontier.insert(Point::new(1, 0), record(1.0, 5.0, 1));
        frontier.insert(Point::new(2, 0), record(2.0, 1.0, 2));
        frontier.insert(Point::new(3, 0), record(3.0, 4.0, 3));
        assert_eq!(frontier.peek_min(), Some(Point::new(2, 0)));
    }

    /// Equal f-costs are broken in favour of the larger g-cost, i.e. the smaller h-cost.
    #[test]
    fn tie_prefers_smaller_estimate() {
        let mut frontier = Frontier::default();
        frontier.insert(Point::new(1, 0), record(1.0, 3.0, 1));
        frontier.insert(Point::new(2, 0), record(3.0, 1.0, 2));
        assert_eq!(frontier.peek_min(), Some(Point::new(2, 0)));
    }

    /// Fully equal costs are broken in favour of the earliest discovered cell.
    #[test]
    fn tie_prefers_earliest_discovery() {
        let mut frontier = Frontier::default();
        frontier.insert(Point::new(5, 5), record(2.0, 2.0, 7));
        frontier.insert(Point::new(1, 1), record(2.0, 2.0, 3));
        frontier.insert(Point::new(3, 3), record(2.0, 2.0, 5));
        assert_eq!(frontier.peek_min(), Some(Point::new(1, 1)));
    }

    #[test]
    fn relaxed_cell_moves_up_and_stale_entry_is_skipped() {
        let mut frontier = Frontier::default();
        let a = Point::new(1, 0);
        let b = Point::new(2, 0);
        frontier.insert(a, record(2.0, 2.0, 1));
        frontier.insert(b, record(5.0, 1.0, 2));
        assert_eq!(frontier.peek_min(), Some(a));
        assert!(frontier.relax(&b, 1.0, Point::new(1, 1)));
        assert_eq!(frontier.peek_min(), Some(b));
        assert_eq!(frontier.get(&b).unwrap().f_cost, 2.0);
        assert_eq!(frontier.get(&b).unwrap().predecessor, Some(Point::new(1, 1)));

        frontier.take(&b);
        // The superseded snapshot of b must not resurface.
        assert_eq!(frontier.peek_min(), Some(a));
        frontier.take(&a);
        assert_eq!(frontier.peek_min(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn relax_ignores_worse_costs() {
        let mut frontier = Frontier::default();
        let a = Point::new(1, 0);
        frontier.insert(a, record(2.0, 2.0, 1));
        assert!(!frontier.relax(&a, 2.0, Point::new(4, 4)));
        assert!(!frontier.relax(&Point::new(9, 9), 0.5, Point::new(4, 4)));
        assert_eq!(frontier.get(&a).unwrap().predecessor, Some(Point::new(0, 0)));
    }
}
