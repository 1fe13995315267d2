use std::time::Instant;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::Config;
use crate::snake::{Direction, Snake};
use crate::Cell;

/// How a grid cell should be drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Snake,
    Food,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub spawned_at: Instant,
}

/// A stimulus delivered to the engine. The scheduler hands these over one at
/// a time; each is processed to completion before the next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Advance,
    Turn(Direction),
    SpawnFood,
    ExpireFood,
}

/// The game state engine: owns the snake, the heading, the live foods and
/// the score, and mutates them in response to events. It never reads the
/// clock itself; callers pass `now` in.
pub struct Engine {
    config: Config,
    snake: Snake,
    /// Heading the next advance will use.
    heading: Direction,
    /// Heading the previous advance actually used. Reversal checks read this
    /// one: a requested-but-unapplied heading must not widen what a later
    /// key press is allowed to do.
    committed: Direction,
    foods: Vec<Food>,
    score: u32,
    rng: StdRng,
}

impl Engine {
    pub fn new(config: Config, now: Instant) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut engine = Engine {
            snake: Snake::new(&config.initial_snake),
            heading: config.initial_heading,
            committed: config.initial_heading,
            foods: vec![],
            score: 0,
            config,
            rng,
        };
        engine.restore_initial(now);
        engine
    }

    pub fn handle(&mut self, event: Event, now: Instant) {
        match event {
            Event::Advance => self.advance(now),
            Event::Turn(direction) => self.request_direction(direction),
            Event::SpawnFood => self.spawn_food(now),
            Event::ExpireFood => self.expire_food(now),
        }
    }

    /// One movement tick: wrap the head forward, then either reset on
    /// self-collision, grow onto a food, or slide one cell.
    pub fn advance(&mut self, now: Instant) {
        let new_head = self.wrap_step(self.snake.head(), self.heading);

        if self.snake.hits_body(new_head) {
            debug!("self-collision at {:?}, resetting", new_head);
            self.restore_initial(now);
            return;
        }

        if let Some(idx) = self.foods.iter().position(|f| f.cell == new_head) {
            self.foods.swap_remove(idx);
            self.score += self.config.points_per_food;
            self.snake.advance(new_head, true);
            debug!("ate food at {:?}, score {}", new_head, self.score);
        } else {
            self.snake.advance(new_head, false);
        }

        self.committed = self.heading;
    }

    /// Accept a direction change unless it reverses the heading the last
    /// tick actually moved in.
    pub fn request_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.committed) {
            self.heading = direction;
        }
    }

    /// Place a food on a uniformly random free cell. Rejection sampling with
    /// a bounded retry count; a full grid means the spawn is skipped.
    pub fn spawn_food(&mut self, now: Instant) {
        let attempts = self.config.area() * 4;

        for _ in 0..attempts {
            let cell = (
                self.rng.gen_range(0..self.config.width),
                self.rng.gen_range(0..self.config.height),
            );
            if self.snake.contains(cell) || self.food_at(cell) {
                continue;
            }
            self.foods.push(Food { cell, spawned_at: now });
            return;
        }

        debug!("no free cell found after {} attempts, skipping spawn", attempts);
    }

    /// Drop every food that has reached its lifetime.
    pub fn expire_food(&mut self, now: Instant) {
        let lifetime = self.config.food_lifetime;
        self.foods
            .retain(|f| now.duration_since(f.spawned_at) < lifetime);
    }

    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        if self.food_at(cell) {
            CellKind::Food
        } else if self.snake.contains(cell) {
            CellKind::Snake
        } else {
            CellKind::Empty
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Restore the startup state: initial snake, heading, foods, zero score.
    /// Runs to completion inside the triggering event, so no snapshot ever
    /// sees a half-reset state.
    fn restore_initial(&mut self, now: Instant) {
        self.snake = Snake::new(&self.config.initial_snake);
        self.heading = self.config.initial_heading;
        self.committed = self.config.initial_heading;
        self.score = 0;
        self.foods = self
            .config
            .initial_foods
            .iter()
            .map(|&cell| Food { cell, spawned_at: now })
            .collect();
    }

    fn wrap_step(&self, (x, y): Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        // rem_euclid normalizes negatives into [0, dim)
        (
            (x + dx).rem_euclid(self.config.width),
            (y + dy).rem_euclid(self.config.height),
        )
    }

    fn food_at(&self, cell: Cell) -> bool {
        self.foods.iter().any(|f| f.cell == cell)
    }
}
