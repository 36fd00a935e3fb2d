//! rf-core: room generation engine
//!
//! Assembles 2D platformer rooms out of interlocking build pieces using a
//! randomized depth-first backtracking search. This crate contains all
//! generation logic with no I/O dependencies; it is designed to be pure
//! and testable.
//!
//! The entry points are [`level::Generator`] for a single search attempt and
//! [`level::LevelDesigner`] for a round of concurrent attempts where the
//! first solution wins.

pub mod level;

mod rng;
pub use rng::GenRng;
