//! Dashed line approximation from alternating solid segments.

use crate::Point2;

/// Default number of intervals a dashed line is split into.
pub const DEFAULT_DASH_SEGMENTS: usize = 80;

/// A straight line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub start: Point2,
    /// End point.
    pub end: Point2,
}

impl Segment {
    /// Segment length.
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Split `start → end` into `segments` equal intervals and return every other
/// one, beginning with the first.
///
/// Each returned dash is `|end - start| / segments` long. Zero segments yield
/// nothing.
pub fn dashed_segments(start: Point2, end: Point2, segments: usize) -> Vec<Segment> {
    let n = segments as f64;
    let lerp = |t: f64| Point2::from(start.coords.lerp(&end.coords, t));

    let mut dashes = Vec::with_capacity(segments.div_ceil(2));
    let mut on = true;
    for i in 0..segments {
        if on {
            dashes.push(Segment {
                start: lerp(i as f64 / n),
                end: lerp((i + 1) as f64 / n),
            });
        }
        on = !on;
    }
    dashes
}
