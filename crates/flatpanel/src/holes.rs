//! Hole placement along the left and right edges.

use crate::params::PanelParams;
use crate::profile::EdgeProfile;
use crate::Point2;

/// Which edge a hole is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Straight left edge.
    Left,
    /// Bowed right edge.
    Right,
}

/// A round hole in the flat pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    /// Hole centre.
    pub center: Point2,
    /// Hole diameter.
    pub diameter: f64,
    /// Edge the hole is offset from.
    pub side: Side,
    /// Distance from the top edge this hole was placed at.
    pub station: f64,
}

impl Hole {
    /// Hole radius.
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Place one hole per station on each edge.
///
/// Left holes sit `hole_offset_from_left` to the right of the left datum;
/// right holes sit `hole_offset_from_right` to the left of the right edge at
/// the same station. The result holds all left holes followed by all right
/// holes, each in station order.
///
/// Offsets are not checked against the panel width here, see
/// [`PanelParams::validate`].
pub fn place_holes(params: &PanelParams, profile: &EdgeProfile) -> Vec<Hole> {
    let left = params.stations.iter().map(|&y| Hole {
        center: Point2::new(params.left_x + params.hole_offset_from_left, y),
        diameter: params.hole_dia,
        side: Side::Left,
        station: y,
    });
    let right = params.stations.iter().map(|&y| Hole {
        center: Point2::new(profile.right_x_at(y) - params.hole_offset_from_right, y),
        diameter: params.hole_dia,
        side: Side::Right,
        station: y,
    });
    left.chain(right).collect()
}
