use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::Result;
use log::info;

use crate::config::Config;
use crate::engine::{Engine, Event};
use crate::snake::Direction;
use crate::term::TermManager;

const POLL_INTERVAL_MS: u64 = 5;

/// Owns the engine and the terminal, and runs the cooperative event loop:
/// one thread, short sleeps, keys drained and timers fired strictly in
/// sequence so every engine event runs to completion before the next.
pub struct Game {
    engine: Engine,
    term: TermManager,
}

impl Game {
    pub fn new(config: Config) -> Self {
        Game {
            engine: Engine::new(config, Instant::now()),
            term: TermManager::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let result = self.event_loop();
        // Restore the terminal whether the loop ended by quit or by error.
        self.term.restore()?;
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let config = self.engine.config().clone();
        let start = Instant::now();
        let mut next_move = start + config.move_period;
        let mut next_spawn = start + config.spawn_period;
        let mut next_expire = start + config.expire_period;

        self.term.draw(&self.engine)?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            let now = Instant::now();

            for key in self.term.read_key_events_queue()? {
                if is_quit(&key) {
                    info!("quit requested, final score {}", self.engine.score());
                    return Ok(());
                }
                if let Some(direction) = direction_for(key.code) {
                    self.engine.handle(Event::Turn(direction), now);
                }
                // Every other key is silently ignored
            }

            // Timer deadlines live on this stack frame: leaving the loop is
            // teardown, nothing can fire afterwards. Movement runs before
            // spawn before expiry when several are due at once.
            let mut dirty = false;

            if now >= next_move {
                self.engine.handle(Event::Advance, now);
                next_move = now + config.move_period;
                dirty = true;
            }
            if now >= next_spawn {
                self.engine.handle(Event::SpawnFood, now);
                next_spawn = now + config.spawn_period;
                dirty = true;
            }
            if now >= next_expire {
                self.engine.handle(Event::ExpireFood, now);
                next_expire = now + config.expire_period;
                dirty = true;
            }

            if dirty {
                self.term.draw(&self.engine)?;
            }
        }
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL
        }
    ) || matches!(ev.code, KeyCode::Char('q') | KeyCode::Esc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(direction_for(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::Char('w')), Some(Direction::Up));
        assert_eq!(direction_for(KeyCode::Down), Some(Direction::Down));
        assert_eq!(direction_for(KeyCode::Char('s')), Some(Direction::Down));
        assert_eq!(direction_for(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::Char('a')), Some(Direction::Left));
        assert_eq!(direction_for(KeyCode::Right), Some(Direction::Right));
        assert_eq!(direction_for(KeyCode::Char('d')), Some(Direction::Right));
    }

    #[test]
    fn unrecognized_keys_map_to_nothing() {
        assert_eq!(direction_for(KeyCode::Char('x')), None);
        assert_eq!(direction_for(KeyCode::Enter), None);
        assert_eq!(direction_for(KeyCode::Tab), None);
    }

    #[test]
    fn quit_keys() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let plain_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);

        assert!(is_quit(&ctrl_c));
        assert!(is_quit(&q));
        assert!(is_quit(&esc));
        assert!(!is_quit(&plain_c));
    }
}
