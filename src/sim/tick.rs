//! Per-frame simulation tick
//!
//! One call per animation frame: apply input, advance the world, then let the
//! ball manager score and retire balls.

use super::events::GameEvent;
use super::state::GameState;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Launch a ball with this power (0..=1)
    pub launch: Option<f32>,
    /// Clear every ball from the board before stepping
    pub reset: bool,
}

/// Advance the session by one frame of `dt` seconds (clamped by the world)
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut frame: Vec<GameEvent> = Vec::new();

    if input.reset {
        state.balls.reset(&mut state.world);
        state.tally.in_play = 0;
    }

    if let Some(power) = input.launch {
        if state.balls_remaining == 0 {
            log::warn!("Launch ignored: no balls left");
        } else {
            state.balls_remaining -= 1;
            state.balls.launch(&mut state.world, power, &mut frame);
        }
    }

    state.world.advance(dt, &mut frame);
    state
        .balls
        .update(&mut state.world, &state.board, dt, &mut frame);

    for event in &frame {
        state.tally.record(event);
    }
    state.events.extend(frame);
    state.time_ticks += 1;
}
