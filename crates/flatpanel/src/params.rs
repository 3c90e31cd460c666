//! Panel parameter set.
//!
//! [`PanelParams::default`] carries the dimensions of the reference panel.
//! Every field can be overridden from a TOML file; fields left out of the
//! file keep their default value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dashed::DEFAULT_DASH_SEGMENTS;
use crate::error::{PanelError, Result};
use crate::holes::{place_holes, Side};
use crate::profile::EdgeProfile;

/// All dimensions needed to draw one development view, in drawing units.
///
/// The y axis grows away from the top edge (top = 0, bottom = `overall_len`);
/// the x axis grows to the right of the left datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelParams {
    /// Units label printed on the drawing. Display only.
    pub units: String,
    /// Distance from the top edge to the bottom edge.
    pub overall_len: f64,
    /// X position of the straight left edge.
    pub left_x: f64,
    /// Width of the top-left lip, measured from the left datum.
    pub top_left_flange: f64,
    /// X position where the bottom edge returns towards the left datum.
    pub bottom_left_return: f64,
    /// Right bowed edge as `(distance_from_top, distance_from_left)` pairs,
    /// ordered by distance from top. The first pair is also the top-right
    /// corner of the panel.
    pub right_edge_profile: Vec<(f64, f64)>,
    /// Distances from the top edge at which a hole is placed on each side.
    pub stations: Vec<f64>,
    /// Distance from the left edge to the left hole centres.
    pub hole_offset_from_left: f64,
    /// Distance from the right edge to the right hole centres.
    pub hole_offset_from_right: f64,
    /// Hole diameter.
    pub hole_dia: f64,
    /// Distance from the top edge to the bend line. Must lie within
    /// `0..=overall_len`, so override it together with `overall_len`.
    pub bending_line_y: f64,
    /// Height of the bend line label.
    pub text_height: f64,
    /// Number of equal intervals the bend line is split into.
    pub dash_segments: usize,
}

impl Default for PanelParams {
    fn default() -> Self {
        Self {
            units: "mm".to_string(),
            overall_len: 1670.0,
            left_x: 0.0,
            top_left_flange: 35.0,
            bottom_left_return: 83.0,
            right_edge_profile: vec![
                (0.0, 385.0),
                (235.0, 360.0),
                (435.0, 368.0),
                (635.0, 372.0),
                (835.0, 374.0),
                (1035.0, 372.0),
                (1235.0, 368.0),
                (1435.0, 360.0),
                (1635.0, 345.0),
            ],
            stations: vec![55.0, 285.0, 515.0, 835.0, 1155.0, 1385.0, 1615.0],
            hole_offset_from_left: 20.0,
            hole_offset_from_right: 20.0,
            hole_dia: 14.0,
            bending_line_y: 1385.0,
            text_height: 10.0,
            dash_segments: DEFAULT_DASH_SEGMENTS,
        }
    }
}

impl PanelParams {
    /// Parse a parameter set from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a parameter set from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PanelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render the parameter set as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the interpolator for the right edge.
    pub fn profile(&self) -> Result<EdgeProfile> {
        EdgeProfile::new(&self.right_edge_profile)
    }

    /// Check the parameter set for values that would produce invalid
    /// geometry.
    ///
    /// Stations outside the profile's y range are accepted (the right edge is
    /// clamped there) but logged.
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("overall_len", self.overall_len),
            ("left_x", self.left_x),
            ("top_left_flange", self.top_left_flange),
            ("bottom_left_return", self.bottom_left_return),
            ("hole_offset_from_left", self.hole_offset_from_left),
            ("hole_offset_from_right", self.hole_offset_from_right),
            ("hole_dia", self.hole_dia),
            ("bending_line_y", self.bending_line_y),
            ("text_height", self.text_height),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(PanelError::config(field, format!("{value} is not finite")));
            }
        }

        for (field, value) in [
            ("overall_len", self.overall_len),
            ("hole_dia", self.hole_dia),
            ("text_height", self.text_height),
        ] {
            if value <= 0.0 {
                return Err(PanelError::config(field, format!("must be positive, got {value}")));
            }
        }
        for (field, value) in [
            ("hole_offset_from_left", self.hole_offset_from_left),
            ("hole_offset_from_right", self.hole_offset_from_right),
        ] {
            if value < 0.0 {
                return Err(PanelError::config(
                    field,
                    format!("must not be negative, got {value}"),
                ));
            }
        }
        if self.bending_line_y < 0.0 || self.bending_line_y > self.overall_len {
            return Err(PanelError::config(
                "bending_line_y",
                format!(
                    "{} is outside the panel (0 to {})",
                    self.bending_line_y, self.overall_len
                ),
            ));
        }
        if self.dash_segments == 0 {
            return Err(PanelError::config("dash_segments", "must be at least 1"));
        }

        self.validate_profile()?;

        if let Some(y) = self.stations.iter().find(|y| !y.is_finite()) {
            return Err(PanelError::config("stations", format!("{y} is not finite")));
        }

        self.validate_hole_clearance()
    }

    fn validate_profile(&self) -> Result<()> {
        let profile = &self.right_edge_profile;
        if profile.len() < 2 {
            return Err(PanelError::config(
                "right_edge_profile",
                format!("needs at least 2 points, got {}", profile.len()),
            ));
        }
        if let Some((i, _)) = profile
            .iter()
            .enumerate()
            .find(|(_, (y, x))| !y.is_finite() || !x.is_finite())
        {
            return Err(PanelError::config(
                "right_edge_profile",
                format!("point {i} is not finite"),
            ));
        }
        if let Some(i) = profile.windows(2).position(|w| w[1].0 < w[0].0) {
            return Err(PanelError::config(
                "right_edge_profile",
                format!(
                    "points must be sorted by distance from top: point {} ({}) comes after {}",
                    i + 1,
                    profile[i + 1].0,
                    profile[i].0
                ),
            ));
        }
        Ok(())
    }

    /// Left and right holes at the same station must not touch.
    fn validate_hole_clearance(&self) -> Result<()> {
        let profile = self.profile()?;
        let (first, last) = profile.y_range();
        for &y in &self.stations {
            if y < first || y > last {
                tracing::warn!(
                    station = y,
                    first,
                    last,
                    "station outside the right edge profile, edge x is clamped"
                );
            }
        }

        let holes = place_holes(self, &profile);
        let left = holes.iter().filter(|hole| hole.side == Side::Left);
        let right = holes.iter().filter(|hole| hole.side == Side::Right);
        for (l, r) in left.zip(right) {
            if l.center.x + self.hole_dia / 2.0 >= r.center.x - self.hole_dia / 2.0 {
                return Err(PanelError::config(
                    "stations",
                    format!(
                        "holes at station {} overlap (left centre x={}, right centre x={})",
                        l.station, l.center.x, r.center.x
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: PanelError) -> &'static str {
        match err {
            PanelError::Config { field, .. } => field,
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_params_are_valid() {
        let params = PanelParams::default();
        params.validate().unwrap();
        assert_eq!(params.right_edge_profile.first(), Some(&(0.0, 385.0)));
        assert_eq!(params.stations.len(), 7);
        assert_eq!(params.dash_segments, 80);
    }

    #[test]
    fn test_toml_overrides_keep_defaults() {
        let params = PanelParams::from_toml_str(
            r#"
            overall_len = 1000.0
            right_edge_profile = [[0.0, 350.0], [1000.0, 400.0]]
            stations = [500.0]
            "#,
        )
        .unwrap();

        assert_eq!(params.overall_len, 1000.0);
        assert_eq!(params.right_edge_profile, vec![(0.0, 350.0), (1000.0, 400.0)]);
        assert_eq!(params.stations, vec![500.0]);
        assert_eq!(params.hole_dia, 14.0);
        assert_eq!(params.units, "mm");
    }

    #[test]
    fn test_toml_roundtrip_of_defaults() {
        let text = PanelParams::default().to_toml_string().unwrap();
        let parsed = PanelParams::from_toml_str(&text).unwrap();
        assert_eq!(parsed, PanelParams::default());
    }

    #[test]
    fn test_malformed_toml() {
        let err = PanelParams::from_toml_str("overall_len = \"long\"").unwrap_err();
        assert!(matches!(err, PanelError::Params(_)));
    }

    #[test]
    fn test_short_profile_rejected() {
        let params = PanelParams {
            right_edge_profile: vec![(0.0, 350.0)],
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "right_edge_profile");

        let params = PanelParams {
            right_edge_profile: vec![],
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "right_edge_profile");
    }

    #[test]
    fn test_unsorted_profile_rejected() {
        let params = PanelParams {
            right_edge_profile: vec![(0.0, 350.0), (800.0, 360.0), (400.0, 370.0)],
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("sorted"));
        assert_eq!(field_of(err), "right_edge_profile");
    }

    #[test]
    fn test_scalar_ranges() {
        let params = PanelParams {
            hole_dia: 0.0,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "hole_dia");

        let params = PanelParams {
            hole_offset_from_right: -1.0,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "hole_offset_from_right");

        let params = PanelParams {
            overall_len: f64::NAN,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "overall_len");

        let params = PanelParams {
            dash_segments: 0,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "dash_segments");

        let params = PanelParams {
            bending_line_y: 1700.0,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "bending_line_y");
    }

    #[test]
    fn test_crossing_holes_rejected() {
        let params = PanelParams {
            right_edge_profile: vec![(0.0, 40.0), (1670.0, 40.0)],
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("overlap"));
        assert_eq!(field_of(err), "stations");
    }

    #[test]
    fn test_clearance_checked_per_station() {
        let params = PanelParams {
            overall_len: 1000.0,
            right_edge_profile: vec![(0.0, 400.0), (1000.0, 40.0)],
            stations: vec![100.0, 900.0],
            bending_line_y: 500.0,
            ..Default::default()
        };
        params.validate().unwrap();

        // The edge is at x = 43.6 here, so the right hole lands left of the left one.
        let params = PanelParams {
            stations: vec![100.0, 990.0],
            ..params
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("station 990"));
        assert_eq!(field_of(err), "stations");
    }

    #[test]
    fn test_shorter_panel_needs_bend_line_override() {
        let params = PanelParams {
            overall_len: 1000.0,
            right_edge_profile: vec![(0.0, 350.0), (1000.0, 400.0)],
            stations: vec![500.0],
            hole_offset_from_left: 20.0,
            hole_offset_from_right: 20.0,
            ..Default::default()
        };
        // The default bend line at 1385 lies below a 1000 long panel.
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("1385"));
        assert_eq!(field_of(err), "bending_line_y");

        let params = PanelParams {
            bending_line_y: 800.0,
            ..params
        };
        params.validate().unwrap();
    }

    #[test]
    fn test_station_outside_profile_is_clamped_not_rejected() {
        let params = PanelParams {
            stations: vec![1660.0],
            ..Default::default()
        };
        params.validate().unwrap();
    }
}
