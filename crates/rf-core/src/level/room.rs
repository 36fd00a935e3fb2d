//! Generation request descriptor

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Point2D;

/// Configuration errors detected when a room request is built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("room size must be at least 1x1, got {width}x{height}")]
    EmptySize { width: usize, height: usize },
    #[error("room has no exits")]
    NoExits,
    #[error("exit {0} lies outside a {1}x{2} room")]
    ExitOutOfBounds(Point2D, usize, usize),
    #[error("duplicate exit {0}")]
    DuplicateExit(Point2D),
}

/// A generation request: grid size plus the boundary openings the finished
/// room must connect. Immutable once constructed; lives for one round.
///
/// Exits are validated for bounds and uniqueness up front so a malformed
/// request never silently produces a degenerate room. Keeping exits on the
/// room perimeter is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    width: usize,
    height: usize,
    exits: Vec<Point2D>,
}

impl Room {
    /// Validate and build a room request
    pub fn new(width: usize, height: usize, exits: Vec<Point2D>) -> Result<Self, RoomError> {
        if width == 0 || height == 0 {
            return Err(RoomError::EmptySize { width, height });
        }
        if exits.is_empty() {
            return Err(RoomError::NoExits);
        }
        for (i, &exit) in exits.iter().enumerate() {
            if exit.x < 0
                || exit.y < 0
                || exit.x as usize >= width
                || exit.y as usize >= height
            {
                return Err(RoomError::ExitOutOfBounds(exit, width, height));
            }
            if exits[..i].contains(&exit) {
                return Err(RoomError::DuplicateExit(exit));
            }
        }
        Ok(Self {
            width,
            height,
            exits,
        })
    }

    /// Room width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Room height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// The exit coordinates, in request order
    pub fn exits(&self) -> &[Point2D] {
        &self.exits
    }
}
