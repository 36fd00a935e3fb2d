//! Grid cell categories

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Category of a single grid cell.
///
/// Replaces the raw character tags of the build-piece stencils
/// (`'n' 's' 'b' 'c' 'e'`) with a closed enumeration so every match site
/// is exhaustive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    /// Open, unbuilt space; placeable over
    #[default]
    Empty = 0,
    /// Filled ground
    Solid = 1,
    /// Wall or boundary
    Border = 2,
    /// Attachment point for chaining further pieces
    Connection = 3,
    /// Room-boundary opening that must end up covered by a connection
    Exit = 4,
}

impl CellKind {
    /// Stencil glyph for this category
    pub const fn glyph(self) -> char {
        match self {
            CellKind::Empty => 'n',
            CellKind::Solid => 's',
            CellKind::Border => 'b',
            CellKind::Connection => 'c',
            CellKind::Exit => 'e',
        }
    }

    /// Parse a stencil glyph
    pub const fn from_glyph(c: char) -> Option<CellKind> {
        match c {
            'n' => Some(CellKind::Empty),
            's' => Some(CellKind::Solid),
            'b' => Some(CellKind::Border),
            'c' => Some(CellKind::Connection),
            'e' => Some(CellKind::Exit),
            _ => None,
        }
    }

    /// Placement compatibility: solid ground may never coincide with a
    /// connection or border cell, in either direction.
    pub const fn conflicts_with(self, other: CellKind) -> bool {
        matches!(
            (self, other),
            (CellKind::Solid, CellKind::Connection | CellKind::Border)
                | (CellKind::Connection | CellKind::Border, CellKind::Solid)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_glyph_roundtrip() {
        for kind in CellKind::iter() {
            assert_eq!(CellKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(CellKind::from_glyph('x'), None);
    }

    #[test]
    fn test_conflicts_symmetric() {
        for a in CellKind::iter() {
            for b in CellKind::iter() {
                assert_eq!(a.conflicts_with(b), b.conflicts_with(a));
            }
        }
    }

    #[test]
    fn test_conflict_pairs() {
        assert!(CellKind::Solid.conflicts_with(CellKind::Connection));
        assert!(CellKind::Solid.conflicts_with(CellKind::Border));
        assert!(CellKind::Border.conflicts_with(CellKind::Solid));
        assert!(!CellKind::Solid.conflicts_with(CellKind::Solid));
        assert!(!CellKind::Connection.conflicts_with(CellKind::Connection));
        assert!(!CellKind::Empty.conflicts_with(CellKind::Solid));
        assert!(!CellKind::Exit.conflicts_with(CellKind::Connection));
    }
}
