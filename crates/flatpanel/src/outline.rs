//! Outline of the development view.
//!
//! The outline is closed by four edges:
//! - left: a straight vertical line on the left datum
//! - top: a short lip out to the top-left flange, then across to the first
//!   point of the right-edge profile
//! - right: a smooth curve through every profile point
//! - bottom: from the last profile point to the bottom-left return, then back
//!   to the left datum

use crate::error::Result;
use crate::params::PanelParams;
use crate::profile::EdgeProfile;
use crate::Point2;

/// Key corner points and the right-edge polyline of a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineGeometry {
    /// Top end of the left edge.
    pub left_top: Point2,
    /// Bottom end of the left edge.
    pub left_bottom: Point2,
    /// End of the top-left lip.
    pub top_left_inner: Point2,
    /// Top end of the right edge (first profile point).
    pub top_right: Point2,
    /// Start of the bottom-left return.
    pub bottom_left_return: Point2,
    /// Bottom end of the right edge (last profile point).
    pub bottom_right: Point2,
    /// Right edge points from top to bottom.
    pub right_edge: Vec<Point2>,
}

impl OutlineGeometry {
    /// Derive the outline from a parameter set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the right-edge profile has fewer than
    /// two points.
    pub fn build(params: &PanelParams) -> Result<Self> {
        Ok(Self::from_profile(params, &params.profile()?))
    }

    /// Derive the outline from a parameter set and its already built profile.
    pub fn from_profile(params: &PanelParams, profile: &EdgeProfile) -> Self {
        let top_y = 0.0;
        let bottom_y = params.overall_len;

        Self {
            left_top: Point2::new(params.left_x, top_y),
            left_bottom: Point2::new(params.left_x, bottom_y),
            top_left_inner: Point2::new(params.left_x + params.top_left_flange, top_y),
            top_right: profile.first(),
            bottom_left_return: Point2::new(params.bottom_left_return, bottom_y),
            bottom_right: profile.last(),
            right_edge: profile.points().to_vec(),
        }
    }

    /// Straight outline edges in drawing order: left edge, the two top
    /// segments, then the two bottom segments.
    pub fn straight_edges(&self) -> [(Point2, Point2); 5] {
        [
            (self.left_top, self.left_bottom),
            (self.left_top, self.top_left_inner),
            (self.top_left_inner, self.top_right),
            (self.bottom_right, self.bottom_left_return),
            (self.bottom_left_return, self.left_bottom),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_outline_points() {
        let outline = OutlineGeometry::build(&PanelParams::default()).unwrap();

        assert_eq!(outline.left_top, Point2::new(0.0, 0.0));
        assert_eq!(outline.left_bottom, Point2::new(0.0, 1670.0));
        assert_eq!(outline.top_left_inner, Point2::new(35.0, 0.0));
        assert_eq!(outline.top_right, Point2::new(385.0, 0.0));
        assert_eq!(outline.bottom_left_return, Point2::new(83.0, 1670.0));
        assert_eq!(outline.bottom_right, Point2::new(345.0, 1635.0));
        assert_eq!(outline.right_edge.len(), 9);
    }

    #[test]
    fn test_top_right_comes_from_profile() {
        let params = PanelParams {
            right_edge_profile: vec![(12.0, 420.0), (900.0, 400.0)],
            ..Default::default()
        };
        let outline = OutlineGeometry::build(&params).unwrap();
        assert_eq!(outline.top_right, Point2::new(420.0, 12.0));
        assert_eq!(outline.right_edge.first(), Some(&outline.top_right));
        assert_eq!(outline.right_edge.last(), Some(&outline.bottom_right));
    }

    #[test]
    fn test_left_datum_shift() {
        let params = PanelParams {
            left_x: 10.0,
            ..Default::default()
        };
        let outline = OutlineGeometry::build(&params).unwrap();
        assert_eq!(outline.left_top, Point2::new(10.0, 0.0));
        assert_eq!(outline.top_left_inner, Point2::new(45.0, 0.0));
        // The bottom return is an absolute x.
        assert_eq!(outline.bottom_left_return, Point2::new(83.0, 1670.0));
    }

    #[test]
    fn test_straight_edges_chain() {
        let outline = OutlineGeometry::build(&PanelParams::default()).unwrap();
        let edges = outline.straight_edges();
        assert_eq!(edges[1].1, edges[2].0);
        assert_eq!(edges[2].1, outline.right_edge[0]);
        assert_eq!(edges[3].0, *outline.right_edge.last().unwrap());
        assert_eq!(edges[3].1, edges[4].0);
        assert_eq!(edges[4].1, edges[0].1);
    }

    #[test]
    fn test_empty_profile_is_an_error() {
        let params = PanelParams {
            right_edge_profile: vec![],
            ..Default::default()
        };
        assert!(OutlineGeometry::build(&params).is_err());
    }
}
