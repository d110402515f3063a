//! Grid navigation: A* pathfinding, approach-tile selection, and the
//! occupancy overlay that lets characters path around each other.
mod astar;
mod neighbour;
mod occupancy;

pub use astar::find_path;
pub use neighbour::closest_neighbour;
pub use occupancy::Occupancy;
