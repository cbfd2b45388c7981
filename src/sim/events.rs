//! Events emitted by the simulation
//!
//! The world and the ball manager report what happened through an `EventSink`
//! passed into each call instead of holding listeners of their own.

use serde::{Deserialize, Serialize};

use super::balls::BallId;
use super::body::{BodyHandle, BodyTag, StaticId};

/// Something observable happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ball entered play
    Launched { ball: BallId },
    /// A moving body touched a static obstacle
    Collision {
        body: BodyHandle,
        obstacle: StaticId,
        tag: BodyTag,
    },
    /// A ball settled into a slot (at most once per ball)
    Scored { ball: BallId, slot: usize, points: u32 },
    /// A ball left the board and its body was retired
    Removed { ball: BallId, scored: bool },
}

/// Receiver for simulation events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards everything
impl EventSink for () {
    fn emit(&mut self, _event: GameEvent) {}
}
