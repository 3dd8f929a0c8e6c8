use grid_stepper::{Algorithm, Pathfinder, SearchConfig};
use grid_util::point::Point;

// Compares Dijkstra with A* on a 10x10 grid with four 2x2 obstacles, moving only horizontally
// and vertically. Both find a path of the same length, A* settling fewer cells on the way.

fn main() {
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
        let config = SearchConfig::default()
            .with_size(10, 10)
            .with_algorithm(algorithm)
            .with_diagonals(false);
        let mut pathfinder = Pathfinder::new(config);
        for (x, y) in [(1, 1), (5, 0), (0, 5), (8, 8)] {
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                pathfinder.set_blocked(Point::new(x + dx, y + dy)).unwrap();
            }
        }
        pathfinder.set_origin(Point::new(0, 0)).unwrap();
        pathfinder.set_destination(Point::new(7, 7)).unwrap();
        pathfinder.run_to_completion().unwrap();
        println!("{}", pathfinder.state());
        let path = pathfinder.reconstruct_path().unwrap();
        println!(
            "{:?}: cost {}, {} cells settled, {} steps",
            algorithm,
            path.cost(),
            pathfinder.state().settled_len(),
            pathfinder.steps()
        );
    }
}
