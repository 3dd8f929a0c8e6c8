//! # grid_stepper
//!
//! An incremental grid search engine. Runs
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) or
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) over a bounded 2-D grid one
//! settled cell at a time, so that a driver (typically an animation loop) can observe the
//! settled cells, the frontier and the current cell between steps.
//!
//! Movement is 8-connected or 4-connected, moves cost their Euclidean length and diagonal moves
//! may never cut past a blocked corner. Cells are never re-expanded once discovered; an optional
//! path correction pass relaxes frontier neighbours of every newly selected cell instead.
//!
//! ```
//! use grid_stepper::{Pathfinder, SearchConfig, StepResult};
//! use grid_util::point::Point;
//!
//! let mut pathfinder = Pathfinder::new(SearchConfig::default().with_size(5, 5));
//! pathfinder.set_origin(Point::new(0, 0)).unwrap();
//! pathfinder.set_destination(Point::new(4, 4)).unwrap();
//! let result = pathfinder.run_to_completion().unwrap();
//! assert!(matches!(result, StepResult::Success(_)));
//! let path = pathfinder.reconstruct_path().unwrap();
//! assert_eq!(path.len(), 4);
//! ```
mod cell;
mod components;
mod config;
mod cost_model;
mod engine;
mod error;
mod frontier;
pub mod map_format;
mod path;
mod state;

pub use cell::CellRecord;
pub use config::{Algorithm, Heuristic, SearchConfig};
pub use cost_model::step_cost;
pub use engine::{Pathfinder, RunStatus, StepResult};
pub use error::{MapError, SearchError};
pub use path::GridPath;
pub use state::SearchState;

use fxhash::FxBuildHasher;
use indexmap::IndexMap;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Neighbour offsets in the order in which they are visited: column by column, from `dx = -1`
/// to `dx = 1`, and within a column from `dy = -1` to `dy = 1`.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Default grid width, in cells.
pub const DEFAULT_WIDTH: usize = 75;
/// Default grid height, in cells.
pub const DEFAULT_HEIGHT: usize = 50;
