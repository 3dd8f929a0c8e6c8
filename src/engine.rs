use grid_util::point::Point;
use log::{info, trace, warn};
use std::io::{BufRead, Write};

use crate::cell::CellRecord;
use crate::components::{can_step, free_neighbours, Components};
use crate::config::{Algorithm, Heuristic, SearchConfig};
use crate::cost_model::step_cost;
use crate::error::{MapError, SearchError};
use crate::map_format::{self, MapRecord, MapWarning};
use crate::path::{reconstruct_path, GridPath};
use crate::state::SearchState;
use crate::NEIGHBOUR_OFFSETS;

/// Where the engine is in the lifecycle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// No run has been started since construction or the last reset.
    Idle,
    Running,
    /// The destination has been settled.
    Succeeded,
    /// The frontier ran empty before the destination was reached.
    Failed,
}

/// Outcome of a single [Pathfinder::advance] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// The given cell was settled and the run goes on.
    Continue(Point),
    /// The destination was settled.
    Success(Point),
    /// No path exists with the current obstacles.
    Failure,
}

impl StepResult {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepResult::Continue(_))
    }
    /// The cell settled by this step, if any.
    pub fn cell(&self) -> Option<Point> {
        match self {
            StepResult::Continue(p) | StepResult::Success(p) => Some(*p),
            StepResult::Failure => None,
        }
    }
}

/// [Pathfinder] runs a search one settled cell per [advance](Self::advance) call, so that the
/// caller can render the [SearchState] in between.
///
/// Each step expands the neighbours of the previously settled cell into the frontier, selects
/// the frontier cell with the smallest f-cost, optionally runs path correction around it and
/// settles it. A cell's costs are fixed when it is first discovered; only path correction can
/// lower them afterwards.
///
/// The engine is single-threaded and has no notion of time: cancelling a run is a matter of not
/// calling [advance](Self::advance) anymore. The configuration, the blocked cells and the
/// endpoints can only be changed while no run is in progress.
#[derive(Debug)]
pub struct Pathfinder {
    config: SearchConfig,
    state: SearchState,
    status: RunStatus,
    steps: usize,
    sequence: u64,
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder::new(SearchConfig::default())
    }
}

impl Pathfinder {
    pub fn new(config: SearchConfig) -> Pathfinder {
        Pathfinder {
            state: SearchState::new(config.width, config.height),
            config,
            status: RunStatus::Idle,
            steps: 0,
            sequence: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
    /// Read-only view of the grid and of the current run, for rendering.
    pub fn state(&self) -> &SearchState {
        &self.state
    }
    pub fn status(&self) -> RunStatus {
        self.status
    }
    /// Number of cells opened into the frontier, plus one per selection of the next cell, plus
    /// the neighbours examined by path correction. For statistics only.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn ensure_not_running(&self) -> Result<(), SearchError> {
        if self.status == RunStatus::Running {
            Err(SearchError::RunInProgress)
        } else {
            Ok(())
        }
    }

    /// Replaces the configuration. A change of grid size starts over with an empty grid.
    pub fn set_config(&mut self, config: SearchConfig) -> Result<(), SearchError> {
        self.ensure_not_running()?;
        if (config.width, config.height) != (self.state.width(), self.state.height()) {
            info!("Resizing grid to {}x{}", config.width, config.height);
            self.state = SearchState::new(config.width, config.height);
            self.status = RunStatus::Idle;
            self.steps = 0;
        }
        self.config = config;
        Ok(())
    }
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), SearchError> {
        self.ensure_not_running()?;
        self.config.algorithm = algorithm;
        Ok(())
    }
    pub fn set_heuristic(&mut self, heuristic: Heuristic) -> Result<(), SearchError> {
        self.ensure_not_running()?;
        self.config.heuristic = heuristic;
        Ok(())
    }
    pub fn set_allow_diagonals(&mut self, allow_diagonals: bool) -> Result<(), SearchError> {
        self.ensure_not_running()?;
        self.config.allow_diagonals = allow_diagonals;
        Ok(())
    }
    pub fn set_path_correction(&mut self, path_correction: bool) -> Result<(), SearchError> {
        self.ensure_not_running()?;
        self.config.path_correction = path_correction;
        Ok(())
    }

    /// See [SearchState::set_origin]. Returns whether the edit was applied.
    pub fn set_origin(&mut self, point: Point) -> Result<bool, SearchError> {
        self.ensure_not_running()?;
        Ok(self.state.set_origin(point))
    }
    /// See [SearchState::set_destination]. Returns whether the edit was applied.
    pub fn set_destination(&mut self, point: Point) -> Result<bool, SearchError> {
        self.ensure_not_running()?;
        Ok(self.state.set_destination(point))
    }
    /// See [SearchState::set_blocked]. Returns whether the edit was applied.
    pub fn set_blocked(&mut self, point: Point) -> Result<bool, SearchError> {
        self.ensure_not_running()?;
        Ok(self.state.set_blocked(point))
    }
    pub fn clear_blocked(&mut self, point: Point) -> Result<bool, SearchError> {
        self.ensure_not_running()?;
        Ok(self.state.clear_blocked(point))
    }
    pub fn swap_endpoints(&mut self) -> Result<bool, SearchError> {
        self.ensure_not_running()?;
        Ok(self.state.swap_endpoints())
    }

    /// Clears the settled cells, the frontier, the current cell and the step count. Blocked
    /// cells and endpoints are kept. Abandons a run in progress.
    pub fn reset_run(&mut self) {
        info!("Resetting run");
        self.state.reset_run();
        self.status = RunStatus::Idle;
        self.steps = 0;
        self.sequence = 0;
    }

    /// Resets the run and removes all blocked cells and both endpoints.
    pub fn clear_all(&mut self) -> Result<(), SearchError> {
        self.ensure_not_running()?;
        self.reset_run();
        self.state.clear_all();
        Ok(())
    }

    /// Checks if origin and destination are on the same connected component. This is computed
    /// independently of the search and does not affect it.
    pub fn reachable(&self) -> Result<bool, SearchError> {
        let origin = self.state.origin().ok_or(SearchError::MissingOrigin)?;
        let destination = self
            .state
            .destination()
            .ok_or(SearchError::MissingDestination)?;
        let components = Components::generate(&self.state, self.config.allow_diagonals);
        Ok(components.equiv(&origin, &destination))
    }

    /// Validates the configuration and endpoints and settles the origin. Called by
    /// [advance](Self::advance) when the engine is idle.
    pub fn start_run(&mut self) -> Result<(), SearchError> {
        match self.status {
            RunStatus::Idle => {}
            RunStatus::Running => return Err(SearchError::RunInProgress),
            RunStatus::Succeeded | RunStatus::Failed => return Err(SearchError::RunFinished),
        }
        self.config.validate()?;
        let origin = self.state.origin().ok_or(SearchError::MissingOrigin)?;
        let destination = self
            .state
            .destination()
            .ok_or(SearchError::MissingDestination)?;
        for p in [origin, destination] {
            if !self.state.in_bounds(&p) {
                return Err(SearchError::OutOfBounds(p));
            }
        }
        if origin == destination {
            return Err(SearchError::EndpointsCoincide);
        }
        info!(
            "Starting {:?} run from {:?} to {:?}",
            self.config.algorithm, origin, destination
        );
        self.state.reset_run();
        self.state.settle_origin(origin);
        self.state.current = Some(origin);
        self.steps = 0;
        self.sequence = 0;
        self.status = RunStatus::Running;
        Ok(())
    }

    /// Performs one step of the search. Starts a run if the engine is idle; fails with
    /// [SearchError::RunFinished] once the run has terminated.
    pub fn advance(&mut self) -> Result<StepResult, SearchError> {
        match self.status {
            RunStatus::Idle => self.start_run()?,
            RunStatus::Running => {}
            RunStatus::Succeeded | RunStatus::Failed => return Err(SearchError::RunFinished),
        }
        let previous = self.state.current.ok_or(SearchError::MissingOrigin)?;
        let destination = self
            .state
            .destination()
            .ok_or(SearchError::MissingDestination)?;

        self.expand(&previous, &destination);

        let next = self.state.frontier.peek_min();
        self.steps += 1;
        let next = match next {
            Some(next) => next,
            None => {
                info!("Frontier exhausted after {} steps, no path exists", self.steps);
                self.state.current = None;
                self.status = RunStatus::Failed;
                return Ok(StepResult::Failure);
            }
        };

        if self.config.corrects_paths() {
            self.correct_paths(&next);
        }
        self.state.settle(next);
        trace!("Settled {:?}", next);

        if next == destination {
            info!(
                "Reached {:?} after {} steps, {} cells settled",
                destination,
                self.steps,
                self.state.settled_len()
            );
            self.state.current = None;
            self.status = RunStatus::Succeeded;
            Ok(StepResult::Success(next))
        } else {
            self.state.current = Some(next);
            Ok(StepResult::Continue(next))
        }
    }

    /// Calls [advance](Self::advance) until the run terminates. A run settles every cell at most
    /// once, so this takes at most `width * height` steps.
    pub fn run_to_completion(&mut self) -> Result<StepResult, SearchError> {
        loop {
            let result = self.advance()?;
            if result.is_terminal() {
                return Ok(result);
            }
        }
    }

    /// The path found by a successful run.
    pub fn reconstruct_path(&self) -> Result<GridPath, SearchError> {
        if self.status != RunStatus::Succeeded {
            return Err(SearchError::NoPathAvailable);
        }
        reconstruct_path(&self.state)
    }

    /// Opens every neighbour of `previous` that is reachable in one move and has not been seen
    /// before.
    fn expand(&mut self, previous: &Point, destination: &Point) {
        let g_cost = self
            .state
            .settled_record(previous)
            .map_or(0.0, |record| record.g_cost);
        for point in free_neighbours(&self.state, previous, self.config.allow_diagonals) {
            if self.state.is_known(&point) {
                continue;
            }
            let h_cost = self
                .config
                .algorithm
                .estimate(self.config.heuristic, &point, destination);
            self.sequence += 1;
            let record = CellRecord::new(
                g_cost + step_cost(previous, &point),
                h_cost,
                *previous,
                self.sequence,
            );
            self.state.frontier.insert(point, record);
            self.steps += 1;
        }
    }

    /// Re-parents frontier neighbours of `next` that are cheaper to reach through it.
    fn correct_paths(&mut self, next: &Point) {
        let g_cost = match self.state.frontier_record(next) {
            Some(record) => record.g_cost,
            None => return,
        };
        for offset in NEIGHBOUR_OFFSETS {
            let diagonal = offset.0 != 0 && offset.1 != 0;
            if diagonal && !self.config.allow_diagonals {
                continue;
            }
            self.steps += 1;
            if !can_step(&self.state, next, offset, self.config.allow_diagonals) {
                continue;
            }
            let neighbour = Point::new(next.x + offset.0, next.y + offset.1);
            let candidate = g_cost + step_cost(next, &neighbour);
            if self.state.frontier.relax(&neighbour, candidate, *next) {
                trace!("Corrected {:?} to go through {:?}", neighbour, next);
            }
        }
    }

    /// Replaces the grid with the map read from `reader`. Lines that cannot be parsed are
    /// skipped and returned as warnings; both an origin and a destination must be present.
    pub fn load_map<R: BufRead>(&mut self, reader: R) -> Result<Vec<MapWarning>, MapError> {
        self.ensure_not_running()?;
        let map = map_format::parse_map(reader)?;
        self.clear_all()?;
        for record in &map.records {
            let applied = match *record {
                MapRecord::Origin(p) => self.state.set_origin(p),
                MapRecord::Destination(p) => self.state.set_destination(p),
                MapRecord::Blocked(p) => self.state.set_blocked(p),
            };
            if !applied {
                warn!("Ignoring map record {}", record);
            }
        }
        if self.state.origin().is_none() {
            return Err(MapError::MissingRecord('O'));
        }
        if self.state.destination().is_none() {
            return Err(MapError::MissingRecord('D'));
        }
        Ok(map.warnings)
    }

    /// Writes origin, destination and blocked cells to `writer`.
    pub fn save_map<W: Write>(&self, writer: W) -> Result<(), MapError> {
        map_format::write_map(&self.state, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pathfinder(config: SearchConfig, origin: (i32, i32), destination: (i32, i32)) -> Pathfinder {
        let mut pathfinder = Pathfinder::new(config);
        let (origin, destination) = (
            Point::new(origin.0, origin.1),
            Point::new(destination.0, destination.1),
        );
        assert!(pathfinder.set_origin(origin).unwrap());
        assert!(pathfinder.set_destination(destination).unwrap());
        pathfinder
    }

    /// On a 3x1 corridor each step opens one cell and selects it.
    #[test]
    fn corridor_step_by_step() {
        let config = SearchConfig::default().with_size(3, 1);
        let mut pathfinder = pathfinder(config, (0, 0), (2, 0));
        assert_eq!(pathfinder.status(), RunStatus::Idle);

        assert_eq!(
            pathfinder.advance().unwrap(),
            StepResult::Continue(Point::new(1, 0))
        );
        assert_eq!(pathfinder.status(), RunStatus::Running);
        assert_eq!(pathfinder.state().current(), Some(Point::new(1, 0)));
        assert_eq!(pathfinder.steps(), 2);

        assert_eq!(
            pathfinder.advance().unwrap(),
            StepResult::Success(Point::new(2, 0))
        );
        assert_eq!(pathfinder.status(), RunStatus::Succeeded);
        assert_eq!(pathfinder.state().current(), None);
        assert_eq!(pathfinder.steps(), 4);
        assert_eq!(pathfinder.state().settled_len(), 3);

        let path = pathfinder.reconstruct_path().unwrap();
        assert_eq!(path.steps(), &[Point::new(1, 0), Point::new(2, 0)]);
        assert_eq!(path.intermediate(), &[Point::new(1, 0)]);
        assert_eq!(path.cost(), 2.0);
    }

    #[test]
    fn advancing_a_finished_run_fails_fast() {
        let config = SearchConfig::default().with_size(3, 1);
        let mut pathfinder = pathfinder(config, (0, 0), (2, 0));
        pathfinder.run_to_completion().unwrap();
        assert_eq!(pathfinder.advance(), Err(SearchError::RunFinished));
        assert_eq!(pathfinder.start_run(), Err(SearchError::RunFinished));
        pathfinder.reset_run();
        assert!(pathfinder.advance().is_ok());
    }

    #[test]
    fn path_requires_success() {
        let config = SearchConfig::default().with_size(4, 1);
        let mut pathfinder = pathfinder(config, (0, 0), (3, 0));
        assert_eq!(
            pathfinder.reconstruct_path(),
            Err(SearchError::NoPathAvailable)
        );
        pathfinder.advance().unwrap();
        assert_eq!(
            pathfinder.reconstruct_path(),
            Err(SearchError::NoPathAvailable)
        );
    }

    #[test]
    fn edits_are_refused_while_running() {
        let config = SearchConfig::default().with_size(5, 5);
        let mut pathfinder = pathfinder(config, (0, 0), (4, 4));
        pathfinder.advance().unwrap();
        let p = Point::new(2, 2);
        assert_eq!(pathfinder.set_blocked(p), Err(SearchError::RunInProgress));
        assert_eq!(pathfinder.clear_blocked(p), Err(SearchError::RunInProgress));
        assert_eq!(pathfinder.set_origin(p), Err(SearchError::RunInProgress));
        assert_eq!(pathfinder.set_destination(p), Err(SearchError::RunInProgress));
        assert_eq!(pathfinder.swap_endpoints(), Err(SearchError::RunInProgress));
        assert_eq!(
            pathfinder.set_algorithm(Algorithm::Dijkstra),
            Err(SearchError::RunInProgress)
        );
        assert_eq!(
            pathfinder.set_heuristic(Heuristic::Manhattan),
            Err(SearchError::RunInProgress)
        );
        assert_eq!(
            pathfinder.set_allow_diagonals(false),
            Err(SearchError::RunInProgress)
        );
        assert_eq!(
            pathfinder.set_path_correction(true),
            Err(SearchError::RunInProgress)
        );
        assert!(pathfinder.clear_all().is_err());

        pathfinder.reset_run();
        assert_eq!(pathfinder.set_blocked(p), Ok(true));
        assert_eq!(pathfinder.state().settled_len(), 0);
        assert_eq!(pathfinder.steps(), 0);
    }

    #[test]
    fn run_requires_endpoints() {
        let mut pathfinder = Pathfinder::new(SearchConfig::default().with_size(4, 4));
        assert_eq!(pathfinder.advance(), Err(SearchError::MissingOrigin));
        pathfinder.set_origin(Point::new(0, 0)).unwrap();
        assert_eq!(pathfinder.advance(), Err(SearchError::MissingDestination));
        assert_eq!(pathfinder.status(), RunStatus::Idle);
    }

    #[test]
    fn invalid_dimensions_are_caught_at_run_start() {
        let mut pathfinder = Pathfinder::new(SearchConfig::default().with_size(0, 3));
        assert!(!pathfinder.set_origin(Point::new(0, 0)).unwrap());
        assert!(matches!(
            pathfinder.advance(),
            Err(SearchError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn enclosed_origin_fails_after_one_step() {
        let config = SearchConfig::default().with_size(5, 5);
        let mut pathfinder = pathfinder(config, (2, 2), (4, 4));
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            pathfinder.set_blocked(Point::new(2 + dx, 2 + dy)).unwrap();
        }
        assert!(!pathfinder.reachable().unwrap());
        assert_eq!(pathfinder.advance().unwrap(), StepResult::Failure);
        assert_eq!(pathfinder.status(), RunStatus::Failed);
        assert_eq!(pathfinder.state().current(), None);
        assert_eq!(pathfinder.steps(), 1);
    }

    // |S....|
    // |.....|
    // |....G|
    //
    // The first step settles (1,1), which discovers (2,0) diagonally at cost 2*sqrt(2). The second
    // step selects (1,0), from which (2,0) is only 2 away.
    fn correction_grid(path_correction: bool) -> Pathfinder {
        let config = SearchConfig::default()
            .with_size(5, 3)
            .with_path_correction(path_correction);
        let mut pathfinder = pathfinder(config, (0, 0), (4, 2));
        assert_eq!(
            pathfinder.advance().unwrap(),
            StepResult::Continue(Point::new(1, 1))
        );
        assert_eq!(
            pathfinder.advance().unwrap(),
            StepResult::Continue(Point::new(1, 0))
        );
        pathfinder
    }

    #[test]
    fn first_discovery_fixes_costs() {
        let pathfinder = correction_grid(false);
        let record = pathfinder
            .state()
            .frontier_record(&Point::new(2, 0))
            .unwrap();
        assert!((record.g_cost - 2.0 * 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(record.predecessor, Some(Point::new(1, 1)));
        // 3 opened + 1 selection, then 5 opened + 1 selection
        assert_eq!(pathfinder.steps(), 10);
    }

    #[test]
    fn path_correction_relaxes_frontier() {
        let pathfinder = correction_grid(true);
        let record = pathfinder
            .state()
            .frontier_record(&Point::new(2, 0))
            .unwrap();
        assert!((record.g_cost - 2.0).abs() < 1e-9);
        assert!((record.f_cost - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-9);
        assert_eq!(record.predecessor, Some(Point::new(1, 0)));
        // Each selection additionally examines all 8 neighbours.
        assert_eq!(pathfinder.steps(), 26);
    }

    #[test]
    fn dijkstra_ignores_path_correction() {
        let config = SearchConfig::default()
            .with_size(4, 4)
            .with_algorithm(Algorithm::Dijkstra)
            .with_path_correction(true);
        let mut pathfinder = pathfinder(config, (0, 0), (3, 3));
        pathfinder.advance().unwrap();
        // 3 opened + 1 selection, no correction steps
        assert_eq!(pathfinder.steps(), 4);
        for (_, record) in pathfinder.state().frontier() {
            assert_eq!(record.h_cost, 0.0);
            assert_eq!(record.f_cost, record.g_cost);
        }
    }

    #[test]
    fn resizing_clears_the_grid() {
        let mut pathfinder = Pathfinder::new(SearchConfig::default().with_size(4, 4));
        pathfinder.set_origin(Point::new(3, 3)).unwrap();
        pathfinder
            .set_config(SearchConfig::default().with_size(4, 4).with_diagonals(false))
            .unwrap();
        assert_eq!(pathfinder.state().origin(), Some(Point::new(3, 3)));
        pathfinder
            .set_config(SearchConfig::default().with_size(2, 2))
            .unwrap();
        assert_eq!(pathfinder.state().origin(), None);
        assert_eq!(pathfinder.state().width(), 2);
    }
}
