//! Fixed-step simulation module
//!
//! All board physics lives here:
//! - Fixed timestep (dt clamped to `max_step`)
//! - Seeded RNG only, one stream per world and per launcher
//! - Events go to an injected sink, never to stored callbacks
//! - No rendering or platform dependencies

pub mod balls;
pub mod board;
pub mod body;
pub mod collision;
pub mod events;
pub mod state;
pub mod tick;
pub mod world;

pub use balls::{Ball, BallId, BallManager, BallState};
pub use board::{Board, Slot};
pub use body::{Body, BodyHandle, BodyTag, Shape, StaticId, VisualId};
pub use collision::{CollisionResult, resolve, sphere_box, sphere_cylinder, sphere_sphere};
pub use events::{EventSink, GameEvent};
pub use state::{GameState, Tally};
pub use tick::{TickInput, tick};
pub use world::World;
