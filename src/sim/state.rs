//! Session state: world, board, balls and the running tallies

use serde::{Deserialize, Serialize};

use super::balls::BallManager;
use super::board::Board;
use super::events::GameEvent;
use super::world::World;
use crate::settings::Settings;

/// Totals gathered from the event stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub score: u64,
    /// Balls launched so far
    pub launched: u32,
    /// Balls currently on the board
    pub in_play: u32,
    /// Per-slot landing counts
    pub slot_hits: Vec<u32>,
    /// Balls removed without scoring
    pub misses: u32,
    /// Obstacle contacts
    pub contacts: u64,
}

impl Tally {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_hits: vec![0; slot_count],
            ..Default::default()
        }
    }

    /// Fold one event into the totals
    pub fn record(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Launched { .. } => {
                self.launched += 1;
                self.in_play += 1;
            }
            GameEvent::Collision { .. } => self.contacts += 1,
            GameEvent::Scored { slot, points, .. } => {
                self.score += u64::from(points);
                if let Some(hits) = self.slot_hits.get_mut(slot) {
                    *hits += 1;
                }
            }
            GameEvent::Removed { scored, .. } => {
                self.in_play = self.in_play.saturating_sub(1);
                if !scored {
                    self.misses += 1;
                }
            }
        }
    }
}

/// Everything one pachinko session owns
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for the world and launcher RNGs
    pub seed: u64,
    pub settings: Settings,
    pub world: World,
    pub board: Board,
    pub balls: BallManager,
    pub tally: Tally,
    /// Ball inventory; each launch takes one
    pub balls_remaining: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the caller last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Build the board and an empty launcher from `settings`
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut world = World::new(settings.physics.clone(), seed);
        let board = Board::build(&settings.board, &mut world);
        // Separate stream so launch jitter does not shift the world's kicks
        let launcher_seed = seed.wrapping_mul(2654435761).wrapping_add(1);
        let balls = BallManager::new(settings.launcher.clone(), launcher_seed);

        log::info!("New session with seed {}", seed);
        Self {
            seed,
            tally: Tally::new(board.slots.len()),
            balls_remaining: settings.session.starting_balls,
            settings,
            world,
            board,
            balls,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// New session seeded from the OS
    pub fn from_entropy(settings: Settings) -> Self {
        Self::new(settings, rand::random())
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// No balls on the board
    pub fn is_idle(&self) -> bool {
        self.balls.live_count() == 0
    }

    pub fn score(&self) -> u64 {
        self.tally.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::balls::BallId;

    #[test]
    fn test_entropy_session_builds_full_board() {
        let state = GameState::from_entropy(Settings::default());
        assert_eq!(state.board.slots.len(), state.settings.board.slot_count);
        assert_eq!(state.tally.slot_hits.len(), state.board.slots.len());
        assert_eq!(state.balls_remaining, state.settings.session.starting_balls);
        assert!(state.is_idle());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_tally_counts_misses_and_hits() {
        let mut tally = Tally::new(3);
        let ball = BallId(1);
        tally.record(&GameEvent::Launched { ball });
        tally.record(&GameEvent::Launched { ball: BallId(2) });
        tally.record(&GameEvent::Scored { ball, slot: 1, points: 500 });
        tally.record(&GameEvent::Removed { ball, scored: true });
        tally.record(&GameEvent::Removed {
            ball: BallId(2),
            scored: false,
        });

        assert_eq!(tally.score, 500);
        assert_eq!(tally.slot_hits, vec![0, 1, 0]);
        assert_eq!(tally.misses, 1);
        assert_eq!(tally.in_play, 0);
    }
}
