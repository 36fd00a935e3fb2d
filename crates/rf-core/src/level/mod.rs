//! Room assembly system
//!
//! Contains cell categories, build-piece stencils, placement solutions, the
//! backtracking generator, and the parallel-attempt designer.

mod catalog;
mod cell;
mod designer;
mod generator;
mod grid;
mod piece;
mod point;
mod room;
mod solution;

pub use catalog::{exit_marker, piece_catalog};
pub use cell::CellKind;
pub use designer::{DesignOutcome, LevelDesigner};
pub use generator::{CancelFlag, GenerationError, Generator, SearchOutcome};
pub use grid::Grid;
pub use piece::{BuildPiece, PieceParseError, TransformedBuildPiece};
pub use point::Point2D;
pub use room::{Room, RoomError};
pub use solution::BuildRoomSolution;
