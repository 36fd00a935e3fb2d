//! Fixed catalog of build-piece templates
//!
//! Process-wide constant data: loaded once at startup, shared read-only by
//! every search attempt, never mutated.

use std::sync::{Arc, LazyLock};

use super::BuildPiece;

static CATALOG: LazyLock<Vec<Arc<BuildPiece>>> = LazyLock::new(|| {
    let stencils: &[&[&str]] = &[
        // straight ground run
        &["cc", "ss"],
        // left-turn elbow
        &["bc", "bs", "cn", "sn"],
        // right-turn elbow
        &["cb", "sb", "nc", "ns"],
        // T junction
        &["ncn", "ccc", "sss"],
        // vertical shaft
        &["cb", "cb"],
    ];
    stencils
        .iter()
        .map(|rows| {
            Arc::new(BuildPiece::from_rows(rows).expect("catalog stencil is well formed"))
        })
        .collect()
});

static EXIT_MARKER: LazyLock<Arc<BuildPiece>> =
    LazyLock::new(|| Arc::new(BuildPiece::from_rows(&["e"]).expect("exit stencil is well formed")));

/// The standard piece catalog shared by every generator
pub fn piece_catalog() -> &'static [Arc<BuildPiece>] {
    &CATALOG
}

/// The 1x1 `Exit` stencil used to retrofit room exits as prior placements
pub fn exit_marker() -> Arc<BuildPiece> {
    EXIT_MARKER.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_pieces_have_connections() {
        assert!(!piece_catalog().is_empty());
        for piece in piece_catalog() {
            assert!(!piece.connection_cells().is_empty());
        }
    }

    #[test]
    fn test_exit_marker_is_single_exit_cell() {
        let marker = exit_marker();
        assert_eq!(marker.width(), 1);
        assert_eq!(marker.height(), 1);
        assert!(marker.connection_cells().is_empty());
    }
}
