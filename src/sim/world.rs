//! Physics world: body storage and the fixed-step integrator

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use slab::Slab;

use super::body::{Body, BodyHandle, StaticId};
use super::collision;
use super::events::{EventSink, GameEvent};
use crate::horizontal_length;
use crate::settings::PhysicsSettings;

/// Owns every body and advances the dynamic ones
#[derive(Debug, Clone)]
pub struct World {
    pub settings: PhysicsSettings,
    /// Static geometry, checked in registration order
    statics: Vec<Body>,
    /// Moving bodies, addressed by handle
    bodies: Slab<Body>,
    rng: Pcg32,
}

impl World {
    /// Create an empty world whose random kicks come from `seed`
    pub fn new(settings: PhysicsSettings, seed: u64) -> Self {
        Self {
            settings,
            statics: Vec::new(),
            bodies: Slab::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Restart the perturbation sequence from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Register a moving body
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        BodyHandle(self.bodies.insert(body))
    }

    /// Register a piece of static geometry
    pub fn add_static_body(&mut self, mut body: Body) -> StaticId {
        body.is_static = true;
        self.statics.push(body);
        StaticId(self.statics.len() - 1)
    }

    /// Remove a moving body; returns it if it was present
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.bodies.try_remove(handle.0)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0)
    }

    pub fn static_body(&self, id: StaticId) -> Option<&Body> {
        self.statics.get(id.0)
    }

    /// Moving bodies with their handles
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter().map(|(key, body)| (BodyHandle(key), body))
    }

    pub fn static_bodies(&self) -> &[Body] {
        &self.statics
    }

    pub fn dynamic_count(&self) -> usize {
        self.bodies.len()
    }

    /// Advance every moving body by one step of at most `max_step` seconds
    ///
    /// Contacts are resolved one static body at a time in registration order;
    /// each sees the position and velocity left by the previous one.
    pub fn advance(&mut self, dt: f32, sink: &mut impl EventSink) {
        let dt = dt.clamp(0.0, self.settings.max_step);
        if dt == 0.0 {
            return;
        }
        let gravity = self.settings.gravity;
        let friction = self.settings.friction_factor();
        let restitution = self.settings.restitution;
        let perturbation = self.settings.perturbation;
        let min_speed = self.settings.perturbation_min_speed;

        for (key, body) in self.bodies.iter_mut() {
            if body.is_static {
                continue;
            }

            body.velocity.y += gravity * dt;
            body.velocity.x *= friction;
            body.velocity.z *= friction;
            body.position += body.velocity * dt;

            if body.collides {
                for (index, obstacle) in self.statics.iter().enumerate() {
                    if collision::resolve(body, obstacle, restitution) {
                        sink.emit(GameEvent::Collision {
                            body: BodyHandle(key),
                            obstacle: StaticId(index),
                            tag: obstacle.tag,
                        });
                    }
                }
            }

            // Random horizontal kick keeps balls from repeating the same path
            if perturbation > 0.0 && horizontal_length(body.velocity) > min_speed {
                body.velocity.x += (self.rng.random::<f32>() - 0.5) * perturbation;
            }
        }
    }
}
