use crate::error::SearchError;
use crate::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// The search algorithm used to order the frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Orders the frontier by path cost only.
    Dijkstra,
    /// Orders the frontier by path cost plus a heuristic estimate of the remaining cost.
    #[default]
    AStar,
}

/// Heuristic estimate of the remaining cost, used by [Algorithm::AStar].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `|dx| + |dy|`
    Manhattan,
    /// `sqrt(dx² + dy²)`
    #[default]
    Euclidean,
    /// `dx² + dy²`, strongly favours cells close to the destination.
    Quadratic,
    /// [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance), `max(|dx|, |dy|)`
    Diagonal,
}

/// Settings of a search run. The engine keeps one of these and refuses to change it while a run
/// is in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    pub allow_diagonals: bool,
    /// Relaxes frontier neighbours of each selected cell. Only has an effect for
    /// [Algorithm::AStar].
    pub path_correction: bool,
    pub width: usize,
    pub height: usize,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            algorithm: Algorithm::AStar,
            heuristic: Heuristic::Euclidean,
            allow_diagonals: true,
            path_correction: false,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl SearchConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> SearchConfig {
        self.algorithm = algorithm;
        self
    }
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> SearchConfig {
        self.heuristic = heuristic;
        self
    }
    pub fn with_diagonals(mut self, allow_diagonals: bool) -> SearchConfig {
        self.allow_diagonals = allow_diagonals;
        self
    }
    pub fn with_path_correction(mut self, path_correction: bool) -> SearchConfig {
        self.path_correction = path_correction;
        self
    }
    pub fn with_size(mut self, width: usize, height: usize) -> SearchConfig {
        self.width = width;
        self.height = height;
        self
    }

    /// Whether path correction actually runs under this configuration.
    pub fn corrects_paths(&self) -> bool {
        self.path_correction && self.algorithm == Algorithm::AStar
    }

    /// Checks that the grid has a positive size and fits the `i32` coordinate space.
    pub fn validate(&self) -> Result<(), SearchError> {
        let fits = |n: usize| n > 0 && i32::try_from(n).is_ok();
        if fits(self.width) && fits(self.height) {
            Ok(())
        } else {
            Err(SearchError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_interactive_settings() {
        let config = SearchConfig::default();
        assert_eq!(config.algorithm, Algorithm::AStar);
        assert_eq!(config.heuristic, Heuristic::Euclidean);
        assert!(config.allow_diagonals);
        assert!(!config.path_correction);
        assert_eq!((config.width, config.height), (75, 50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        for (w, h) in [(0, 5), (5, 0), (0, 0)] {
            let config = SearchConfig::default().with_size(w, h);
            assert!(matches!(
                config.validate(),
                Err(SearchError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn correction_requires_astar() {
        let config = SearchConfig::default().with_path_correction(true);
        assert!(config.corrects_paths());
        assert!(!config
            .with_algorithm(Algorithm::Dijkstra)
            .corrects_paths());
    }
}
