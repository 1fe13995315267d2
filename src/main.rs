mod config;
mod engine;
mod game;
mod snake;
mod term;

use anyhow::{bail, Result};
use clap::Parser;
use log::info;

use crate::config::Config;
use crate::game::Game;
use std::time::Duration;

/// A grid coordinate. Signed so heading deltas compose before wrapping.
pub type Cell = (i32, i32);

#[derive(Parser, Debug)]
#[command(
    name = "torsnake",
    about = "Terminal snake on a toroidal grid with expiring food"
)]
struct Args {
    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,
    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,
    /// Movement period in milliseconds
    #[arg(long)]
    move_ms: Option<u64>,
    /// Food spawn period in milliseconds
    #[arg(long)]
    spawn_ms: Option<u64>,
    /// Food expiry check period in milliseconds
    #[arg(long)]
    expire_ms: Option<u64>,
    /// Food lifetime in milliseconds
    #[arg(long)]
    lifetime_ms: Option<u64>,
    /// RNG seed for food placement (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = Config::default();

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(ms) = args.move_ms {
        config.move_period = Duration::from_millis(ms);
    }
    if let Some(ms) = args.spawn_ms {
        config.spawn_period = Duration::from_millis(ms);
    }
    if let Some(ms) = args.expire_ms {
        config.expire_period = Duration::from_millis(ms);
    }
    if let Some(ms) = args.lifetime_ms {
        config.food_lifetime = Duration::from_millis(ms);
    }
    config.seed = args.seed;

    for &cell in config.initial_snake.iter().chain(&config.initial_foods) {
        if !config.in_bounds(cell) {
            bail!(
                "grid {}x{} is too small for the initial layout",
                config.width,
                config.height
            );
        }
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let (cols, rows) = term::terminal_size()?;
    let (need_cols, need_rows) = term::required_size(&config);
    if cols < need_cols || rows < need_rows {
        bail!(
            "terminal is {}x{}, need at least {}x{} for a {}x{} grid",
            cols,
            rows,
            need_cols,
            need_rows,
            config.width,
            config.height
        );
    }

    info!(
        "starting: grid {}x{}, move {:?}, spawn {:?}, expiry check {:?}, lifetime {:?}",
        config.width,
        config.height,
        config.move_period,
        config.spawn_period,
        config.expire_period,
        config.food_lifetime
    );

    Game::new(config).run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_args() -> Args {
        Args::parse_from(["torsnake"])
    }

    #[test]
    fn defaults_pass_validation() {
        let config = build_config(&no_args()).unwrap();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 25);
    }

    #[test]
    fn overrides_apply() {
        let args = Args::parse_from([
            "torsnake",
            "--width",
            "30",
            "--move-ms",
            "250",
            "--seed",
            "42",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.width, 30);
        assert_eq!(config.move_period, Duration::from_millis(250));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn grid_too_small_for_initial_layout_is_rejected() {
        let args = Args::parse_from(["torsnake", "--width", "5"]);
        assert!(build_config(&args).is_err());
    }
}
