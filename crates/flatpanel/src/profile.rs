//! Piecewise-linear profile of the right bowed edge.

use crate::error::{PanelError, Result};
use crate::Point2;

/// The right edge of the panel as control points sorted by distance from top.
///
/// Points are stored as drawing coordinates: `x` is the distance from the
/// left datum, `y` the distance from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeProfile {
    points: Vec<Point2>,
}

impl EdgeProfile {
    /// Create a profile from `(distance_from_top, distance_from_left)` pairs.
    ///
    /// The pairs are sorted by distance from top (stable, so points sharing a
    /// y keep their input order).
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming `right_edge_profile` if there are
    /// fewer than two points or a coordinate is NaN.
    pub fn new(pairs: &[(f64, f64)]) -> Result<Self> {
        if pairs.len() < 2 {
            return Err(PanelError::config(
                "right_edge_profile",
                format!("needs at least 2 points, got {}", pairs.len()),
            ));
        }
        if pairs.iter().any(|(y, x)| y.is_nan() || x.is_nan()) {
            return Err(PanelError::config("right_edge_profile", "contains NaN"));
        }

        let mut points: Vec<Point2> = pairs.iter().map(|&(y, x)| Point2::new(x, y)).collect();
        points.sort_by(|a, b| a.y.total_cmp(&b.y));
        Ok(Self { points })
    }

    /// Control points ordered from top to bottom.
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Topmost control point (the top-right corner of the panel).
    pub fn first(&self) -> Point2 {
        self.points[0]
    }

    /// Bottommost control point.
    pub fn last(&self) -> Point2 {
        self.points[self.points.len() - 1]
    }

    /// Range of distances from top covered by the profile.
    pub fn y_range(&self) -> (f64, f64) {
        (self.first().y, self.last().y)
    }

    /// X of the right edge at distance `y` from the top.
    ///
    /// Clamped to the end points outside the profile, linear between control
    /// points. A control point's own y returns its stored x exactly.
    pub fn right_x_at(&self, y: f64) -> f64 {
        let first = self.first();
        let last = self.last();
        if y <= first.y {
            return first.x;
        }
        if y >= last.y {
            return last.x;
        }

        self.points
            .windows(2)
            .find(|span| span[0].y <= y && y <= span[1].y)
            .map(|span| lerp_span(span[0], span[1], y))
            .unwrap_or(last.x)
    }
}

fn lerp_span(p0: Point2, p1: Point2, y: f64) -> f64 {
    if p1.y == p0.y || y == p0.y {
        return p0.x;
    }
    if y == p1.y {
        return p1.x;
    }
    let t = (y - p0.y) / (p1.y - p0.y);
    p0.x + t * (p1.x - p0.x)
}
