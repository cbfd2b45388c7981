//! Pachinko headless runner
//!
//! Launches a batch of balls on the default (or a JSON-configured) board,
//! runs the simulation at 60 Hz until the board drains and logs the results.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use pachinko::Settings;
use pachinko::consts::MAX_STEP;
use pachinko::sim::{GameEvent, GameState, TickInput, tick};

#[derive(Parser, Debug)]
#[command(about = "Drop balls through a pachinko board and report where they land")]
struct Args {
    /// Number of balls to launch
    #[arg(short, long, default_value_t = 50)]
    balls: u32,

    /// Launch power in 0..=1
    #[arg(short, long, default_value_t = 0.8)]
    power: f32,

    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Frames between launches
    #[arg(long, default_value_t = 20)]
    interval: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.session.starting_balls = settings.session.starting_balls.max(args.balls);

    let mut state = match args.seed {
        Some(seed) => GameState::new(settings, seed),
        None => GameState::from_entropy(settings),
    };
    log::info!(
        "Pachinko starting: {} balls at power {:.2}, seed {}",
        args.balls,
        args.power,
        state.seed
    );

    let launch = TickInput {
        launch: Some(args.power.clamp(0.0, 1.0)),
        ..Default::default()
    };
    let idle = TickInput::default();

    let mut launched = 0;
    let mut frame: u64 = 0;
    // Hard stop well past the age cap of the last ball
    let drain_frames = (state.settings.launcher.max_ball_age / MAX_STEP) as u64 * 2;
    let max_frames = u64::from(args.balls) * u64::from(args.interval.max(1)) + drain_frames;

    while frame < max_frames {
        let input = if launched < args.balls && frame % u64::from(args.interval.max(1)) == 0 {
            launched += 1;
            &launch
        } else {
            &idle
        };
        tick(&mut state, input, MAX_STEP);
        frame += 1;

        for event in state.drain_events() {
            if let GameEvent::Scored { ball, slot, points } = event {
                log::debug!("ball {} -> slot {} (+{})", ball.0, slot, points);
            }
        }

        if launched == args.balls && state.is_idle() {
            break;
        }
    }

    let tally = &state.tally;
    log::info!(
        "Done after {:.1}s simulated: score {}, {} launched, {} missed",
        frame as f32 * MAX_STEP,
        tally.score,
        tally.launched,
        tally.misses
    );
    for (slot, hits) in state.board.slots.iter().zip(&tally.slot_hits) {
        log::info!(
            "slot {:>2} [{:+.2}, {:+.2}) {:>5} pts: {:>4} {}",
            slot.index,
            slot.min_x,
            slot.max_x,
            slot.points,
            hits,
            "#".repeat(*hits as usize)
        );
    }
    if !state.is_idle() {
        log::warn!("{} balls still on the board", state.balls.live_count());
    }

    Ok(())
}
