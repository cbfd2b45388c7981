//! Ball lifecycle: launch, slot scoring and retirement
//!
//! Each ball moves `Active -> Scored`, or `Active -> Stuck` when it outlives
//! the age cap without reaching a slot. Removal drops the ball from the
//! manager whatever its state and is reported through `GameEvent::Removed`.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::Board;
use super::body::{Body, BodyHandle};
use super::events::{EventSink, GameEvent};
use super::world::World;
use crate::settings::LaunchSettings;

/// Stable id of a launched ball (never reused within a manager)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BallId(pub u32);

/// Where a ball is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// In play and not yet scored
    Active,
    /// Landed in a slot; still falling out of the board
    Scored { slot: usize, points: u32 },
    /// Hit the age cap while in play; drains out as a miss
    Stuck,
}

/// A ball the manager is tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub body: BodyHandle,
    pub state: BallState,
    /// Seconds since launch
    pub age: f32,
}

impl Ball {
    pub fn has_scored(&self) -> bool {
        matches!(self.state, BallState::Scored { .. })
    }
}

/// Spawns balls and watches them for scoring and removal
#[derive(Debug, Clone)]
pub struct BallManager {
    pub settings: LaunchSettings,
    /// Live balls in launch order
    balls: Vec<Ball>,
    next_id: u32,
    rng: Pcg32,
}

impl BallManager {
    pub fn new(settings: LaunchSettings, seed: u64) -> Self {
        Self {
            settings,
            balls: Vec::new(),
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Balls that have not been removed yet
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|ball| ball.id == id)
    }

    pub fn live_count(&self) -> usize {
        self.balls.len()
    }

    /// Launch velocity before jitter
    ///
    /// Speed grows linearly with power; the direction points up and toward
    /// the board's center line.
    pub fn launch_velocity(&self, power: f32) -> Vec3 {
        let power = power.clamp(0.0, 1.0);
        let speed = self.settings.base_speed + power * self.settings.power_speed;
        let inward = if self.settings.origin.x > 0.0 { -1.0 } else { 1.0 };
        Vec3::new(inward, self.settings.loft, 0.0).normalize() * speed
    }

    /// Put a new ball into play at the launch origin
    pub fn launch(&mut self, world: &mut World, power: f32, sink: &mut impl EventSink) -> BallId {
        let mut velocity = self.launch_velocity(power);
        if self.settings.jitter > 0.0 {
            velocity.x += (self.rng.random::<f32>() - 0.5) * self.settings.jitter;
        }

        let body = world.add_body(Body::ball(self.settings.origin, velocity, self.settings.ball_radius));
        let id = BallId(self.next_id);
        self.next_id += 1;

        self.balls.push(Ball {
            id,
            body,
            state: BallState::Active,
            age: 0.0,
        });
        log::debug!("Ball {} launched at power {:.2}, v = {:?}", id.0, power, velocity);
        sink.emit(GameEvent::Launched { ball: id });
        id
    }

    /// Check every ball against the slots and the removal floor
    ///
    /// Call once per frame after the world has advanced. Scoring fires at most
    /// once per ball and only while it is still in play; removal happens
    /// whenever a ball drops below `remove_below_y`, scored or not.
    pub fn update(&mut self, world: &mut World, board: &Board, dt: f32, sink: &mut impl EventSink) {
        let settings = &self.settings;
        let dt = dt.max(0.0);

        self.balls.retain_mut(|ball| {
            ball.age += dt;

            let Some(body) = world.body_mut(ball.body) else {
                // Body was taken out of the world behind our back
                sink.emit(GameEvent::Removed {
                    ball: ball.id,
                    scored: false,
                });
                return false;
            };

            let position = body.position;
            if ball.state == BallState::Active && position.y < settings.score_check_y {
                if let Some(slot) = board.slot_at(position.x) {
                    ball.state = BallState::Scored {
                        slot: slot.index,
                        points: slot.points,
                    };
                    log::debug!("Ball {} scored {} in slot {}", ball.id.0, slot.points, slot.index);
                    sink.emit(GameEvent::Scored {
                        ball: ball.id,
                        slot: slot.index,
                        points: slot.points,
                    });
                    // The pocket swallows the ball; it drains through the floor
                    body.collides = false;
                }
            }

            if ball.state == BallState::Active && ball.age > settings.max_ball_age {
                log::debug!("Ball {} stuck for {:.1}s, draining", ball.id.0, ball.age);
                ball.state = BallState::Stuck;
                body.collides = false;
            }

            if position.y < settings.remove_below_y {
                world.remove_body(ball.body);
                let scored = ball.has_scored();
                log::debug!("Ball {} removed (scored: {})", ball.id.0, scored);
                sink.emit(GameEvent::Removed { ball: ball.id, scored });
                return false;
            }

            true
        });
    }

    /// Retire every live ball; static geometry is untouched
    ///
    /// Returns how many balls were cleared.
    pub fn reset(&mut self, world: &mut World) -> usize {
        let cleared = self.balls.len();
        for ball in self.balls.drain(..) {
            world.remove_body(ball.body);
        }
        if cleared > 0 {
            log::info!("Reset cleared {} balls", cleared);
        }
        cleared
    }
}
