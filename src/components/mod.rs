//! ECS components for entities.
//!
//! Submodules overview:
//! - [`actor`] – gameplay tag (player, enemy, coin, block) plus patrol and pickup markers
//! - [`boxcollider`] – axis-aligned body size for ground and pickup checks
//! - [`mapposition`] – world-space top-left corner of an entity
//! - [`rigidbody`] – per-frame velocity and gravity flag
//! - [`spritelink`] – link from an entity to its sprite record

pub mod actor;
pub mod boxcollider;
pub mod mapposition;
pub mod rigidbody;
pub mod spritelink;
