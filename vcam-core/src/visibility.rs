/// Whole-edge culling against the view plane.
///
/// Decide whether an edge should be drawn from its endpoints' camera-space
/// depths (before depth scaling).
///
/// Only edges lying entirely behind the view plane are rejected. An edge
/// with one endpoint behind is kept and drawn from the squashed projection of
/// that endpoint; the segment is never clipped.
pub fn is_edge_visible(start_depth: f32, end_depth: f32) -> bool {
    !(start_depth < 0.0 && end_depth < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_behind_is_culled() {
        assert!(!is_edge_visible(-0.5, -10.0));
        assert!(!is_edge_visible(-f32::MIN_POSITIVE, -f32::MIN_POSITIVE));
    }

    #[test]
    fn test_one_in_front_is_drawn() {
        assert!(is_edge_visible(-3.0, 2.0));
        assert!(is_edge_visible(2.0, -3.0));
        assert!(is_edge_visible(1.0, 1.0));
    }

    #[test]
    fn test_view_plane_counts_as_in_front() {
        assert!(is_edge_visible(0.0, -1.0));
        assert!(is_edge_visible(-1.0, 0.0));
        assert!(is_edge_visible(-0.0, -1.0));
    }
}
