//! Fireworks for the completion celebration.
//!
//! [`Simulation`] steps particle physics one frame at a time, [`sequence`] holds the
//! scripted timeline, and [`Show`] feeds both through a message queue on the caller's
//! clock.

pub mod explosion;
pub mod particle;
pub mod sequence;
pub mod show;
pub mod simulation;

pub use explosion::{Explosion, ExplosionKind};
pub use particle::{Particle, Spark, Trail, TrailPoint};
pub use sequence::{Cue, Placement};
pub use show::{Message, Show};
pub use simulation::{Simulation, Sprite};
