use grid_util::point::Point;
use thiserror::Error;

/// Errors raised by the search engine. Reaching no path is not one of them: it is the normal
/// [StepResult::Failure](crate::StepResult::Failure) outcome.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("no origin has been set")]
    MissingOrigin,

    #[error("no destination has been set")]
    MissingDestination,

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("{0:?} lies outside the grid")]
    OutOfBounds(Point),

    #[error("origin and destination are the same cell")]
    EndpointsCoincide,

    #[error("cannot edit the grid or the configuration while a run is in progress")]
    RunInProgress,

    #[error("the run has already finished; reset it before advancing")]
    RunFinished,

    #[error("no path available")]
    NoPathAvailable,
}

/// Errors raised while reading or writing a path map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("map has no '{0}' record")]
    MissingRecord(char),

    #[error(transparent)]
    Search(#[from] SearchError),
}
