use grid_stepper::{Pathfinder, SearchConfig};
use grid_util::point::Point;

// In this example a path is found on a 7x5 grid with shape
//  _______
// |S  #   |
// |   #   |
// |   #  G|
// |   #   |
// |       |
//  _______
// where
// - # marks an obstacle
// - S marks the origin
// - G marks the destination
//
// The grid is printed after every step, with
// - @ the cell settled last
// - x the other settled cells
// - o the frontier

fn main() {
    let config = SearchConfig::default()
        .with_size(7, 5)
        .with_path_correction(true);
    let mut pathfinder = Pathfinder::new(config);
    pathfinder.set_origin(Point::new(0, 0)).unwrap();
    pathfinder.set_destination(Point::new(6, 2)).unwrap();
    for y in 0..4 {
        pathfinder.set_blocked(Point::new(3, y)).unwrap();
    }
    println!("{}", pathfinder.state());
    loop {
        let result = pathfinder.advance().unwrap();
        println!("{:?}, {} steps", result, pathfinder.steps());
        println!("{}", pathfinder.state());
        if result.is_terminal() {
            break;
        }
    }
    match pathfinder.reconstruct_path() {
        Ok(path) => {
            println!("Path (cost {:.3}):", path.cost());
            for p in path.steps() {
                println!("{:?}", p);
            }
        }
        Err(e) => println!("{}", e),
    }
}
