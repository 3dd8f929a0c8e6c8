use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::state::SearchState;
use crate::NEIGHBOUR_OFFSETS;

/// Whether a single move from `from` by `(dx, dy)` is allowed on the grid of `state`, ignoring
/// settled and frontier cells. A diagonal move is refused if either cell it passes between is
/// blocked, whether or not diagonals are allowed at all.
pub(crate) fn can_step(
    state: &SearchState,
    from: &Point,
    (dx, dy): (i32, i32),
    allow_diagonals: bool,
) -> bool {
    let to = Point::new(from.x + dx, from.y + dy);
    if !state.in_bounds(&to) {
        return false;
    }
    if dx != 0 && dy != 0 {
        let corner_blocked = state.is_blocked(&Point::new(to.x, from.y))
            || state.is_blocked(&Point::new(from.x, to.y));
        if corner_blocked {
            return false;
        }
        if !allow_diagonals {
            return false;
        }
    }
    true
}

/// The free cells one legal move away from `from`, in [NEIGHBOUR_OFFSETS] order.
pub(crate) fn free_neighbours(
    state: &SearchState,
    from: &Point,
    allow_diagonals: bool,
) -> SmallVec<[Point; 8]> {
    NEIGHBOUR_OFFSETS
        .iter()
        .filter(|&&offset| can_step(state, from, offset, allow_diagonals))
        .map(|&(dx, dy)| Point::new(from.x + dx, from.y + dy))
        .filter(|p| !state.is_blocked(p))
        .collect()
}

/// Connected components of the free cells, under the same movement rules as the search.
pub(crate) struct Components {
    width: usize,
    components: UnionFind<usize>,
}

impl Components {
    /// Links up every free cell with its free neighbours in a new [UnionFind] structure.
    pub fn generate(state: &SearchState, allow_diagonals: bool) -> Components {
        let w = state.width();
        let h = state.height();
        info!("Generating connected components for a {}x{} grid", w, h);
        let mut components = UnionFind::new(w * h);
        for x in 0..w as i32 {
            for y in 0..h as i32 {
                let point = Point::new(x, y);
                if state.is_blocked(&point) {
                    continue;
                }
                let parent_ix = y as usize * w + x as usize;
                for p in free_neighbours(state, &point, allow_diagonals) {
                    components.union(parent_ix, p.y as usize * w + p.x as usize);
                }
            }
        }
        Components { width: w, components }
    }

    fn ix(&self, point: &Point) -> usize {
        point.y as usize * self.width + point.x as usize
    }

    /// Checks if two in-bounds points are on the same component.
    pub fn equiv(&self, p1: &Point, p2: &Point) -> bool {
        self.components.equiv(self.ix(p1), self.ix(p2))
    }
}
