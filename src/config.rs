use std::time::Duration;

use crate::snake::Direction;
use crate::Cell;

/// Everything fixed at startup: a 10x25 grid by default, a three-segment
/// snake heading right, and one food already placed.
#[derive(Debug, Clone)]
pub struct Config {
    pub width: i32,
    pub height: i32,
    pub initial_snake: Vec<Cell>,
    pub initial_heading: Direction,
    pub initial_foods: Vec<Cell>,
    pub move_period: Duration,
    pub spawn_period: Duration,
    pub expire_period: Duration,
    pub food_lifetime: Duration,
    pub points_per_food: u32,
    /// Fixed RNG seed for food placement; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 10,
            height: 25,
            initial_snake: vec![(8, 12), (7, 12), (6, 12)],
            initial_heading: Direction::Right,
            initial_foods: vec![(5, 4)],
            move_period: Duration::from_millis(500),
            spawn_period: Duration::from_millis(3000),
            expire_period: Duration::from_millis(1000),
            food_lifetime: Duration::from_millis(10_000),
            points_per_food: 1,
            seed: None,
        }
    }
}

impl Config {
    pub fn in_bounds(&self, (x, y): Cell) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_and_layout() {
        let config = Config::default();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 25);
        assert_eq!(config.initial_snake, vec![(8, 12), (7, 12), (6, 12)]);
        assert_eq!(config.initial_heading, Direction::Right);
        assert_eq!(config.initial_foods, vec![(5, 4)]);
        assert_eq!(config.points_per_food, 1);
    }

    #[test]
    fn default_layout_is_in_bounds() {
        let config = Config::default();
        for &cell in config.initial_snake.iter().chain(&config.initial_foods) {
            assert!(config.in_bounds(cell));
        }
    }
}
