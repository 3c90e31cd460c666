//! Development view assembly.
//!
//! Entities are emitted in a fixed order: layers, outline, holes, bend line,
//! station ticks with labels, then the global notes.

use std::path::Path;

use crate::dashed::{dashed_segments, Segment};
use crate::emitter::{DrawingEmitter, PanelLayer};
use crate::error::Result;
use crate::export::DxfDocument;
use crate::holes::{place_holes, Hole, Side};
use crate::outline::OutlineGeometry;
use crate::params::PanelParams;
use crate::Point2;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "panel_development.dxf";

/// Label placed under the bend line.
const BEND_LABEL: &str = "Bending line";
/// Title placed under the panel.
const TITLE: &str = "Development View";

/// Length of the station tick drawn left of the datum.
const TICK_LEN: f64 = 8.0;
/// Station label position relative to `(left_x, station)`.
const STATION_LABEL_OFFSET: (f64, f64) = (-40.0, -3.0);
const STATION_LABEL_HEIGHT: f64 = 8.0;
/// Bend label position relative to the left end of the bend line.
const BEND_LABEL_OFFSET: (f64, f64) = (10.0, 12.0);
/// Notes are placed at a fixed x below the bottom edge.
const NOTES_X: f64 = 10.0;
const UNITS_NOTE_DROP: f64 = 40.0;
const UNITS_NOTE_HEIGHT: f64 = 8.0;
const TITLE_DROP: f64 = 20.0;
const TITLE_HEIGHT: f64 = 10.0;

/// Geometry computed for one development view.
#[derive(Debug, Clone, PartialEq)]
pub struct DevelopmentView {
    /// Panel outline.
    pub outline: OutlineGeometry,
    /// Left holes followed by right holes.
    pub holes: Vec<Hole>,
    /// Drawn dashes of the bend line.
    pub bend_line: Vec<Segment>,
}

impl DevelopmentView {
    /// Holes measured from one edge.
    pub fn holes_on(&self, side: Side) -> impl Iterator<Item = &Hole> {
        self.holes.iter().filter(move |h| h.side == side)
    }
}

/// Compute the view geometry without drawing it.
pub fn compute_view(params: &PanelParams) -> Result<DevelopmentView> {
    let profile = params.profile()?;
    let outline = OutlineGeometry::from_profile(params, &profile);
    let holes = place_holes(params, &profile);
    let bend_line = dashed_segments(
        Point2::new(params.left_x, params.bending_line_y),
        Point2::new(outline.bottom_right.x, params.bending_line_y),
        params.dash_segments,
    );

    Ok(DevelopmentView {
        outline,
        holes,
        bend_line,
    })
}

/// Validate `params` and draw the development view into `emitter`.
pub fn build_development_view<E: DrawingEmitter + ?Sized>(
    params: &PanelParams,
    emitter: &mut E,
) -> Result<DevelopmentView> {
    params.validate()?;
    let view = compute_view(params)?;

    for layer in PanelLayer::ALL {
        emitter.create_layer(layer.name(), layer.color());
    }

    draw_outline(emitter, &view.outline);
    draw_holes(emitter, &view.holes);
    draw_bend_line(emitter, params, &view.bend_line);
    draw_stations(emitter, params);
    draw_notes(emitter, params);

    tracing::debug!(
        holes = view.holes.len(),
        dashes = view.bend_line.len(),
        stations = params.stations.len(),
        "built development view"
    );
    Ok(view)
}

/// Build the development view into a new DXF document and save it to `path`.
pub fn generate(params: &PanelParams, path: impl AsRef<Path>) -> Result<DevelopmentView> {
    let mut doc = DxfDocument::new();
    let view = build_development_view(params, &mut doc)?;
    doc.save(path.as_ref())?;
    Ok(view)
}

fn draw_outline<E: DrawingEmitter + ?Sized>(emitter: &mut E, outline: &OutlineGeometry) {
    let layer = PanelLayer::Outline.name();
    let [left, top_lip, top_span, bottom_span, bottom_return] = outline.straight_edges();

    emitter.draw_line(left.0, left.1, layer);
    emitter.draw_line(top_lip.0, top_lip.1, layer);
    emitter.draw_line(top_span.0, top_span.1, layer);
    emitter.draw_curve_through_points(&outline.right_edge, layer);
    emitter.draw_line(bottom_span.0, bottom_span.1, layer);
    emitter.draw_line(bottom_return.0, bottom_return.1, layer);
}

fn draw_holes<E: DrawingEmitter + ?Sized>(emitter: &mut E, holes: &[Hole]) {
    for hole in holes {
        let layer = match hole.side {
            Side::Left => PanelLayer::HolesLeft,
            Side::Right => PanelLayer::HolesRight,
        };
        emitter.draw_circle(hole.center, hole.radius(), layer.name());
    }
}

fn draw_bend_line<E: DrawingEmitter + ?Sized>(
    emitter: &mut E,
    params: &PanelParams,
    dashes: &[Segment],
) {
    for dash in dashes {
        emitter.draw_line(dash.start, dash.end, PanelLayer::Center.name());
    }
    emitter.draw_text(
        BEND_LABEL,
        Point2::new(
            params.left_x + BEND_LABEL_OFFSET.0,
            params.bending_line_y + BEND_LABEL_OFFSET.1,
        ),
        PanelLayer::Notes.name(),
        params.text_height,
    );
}

fn draw_stations<E: DrawingEmitter + ?Sized>(emitter: &mut E, params: &PanelParams) {
    for &y in &params.stations {
        emitter.draw_line(
            Point2::new(params.left_x - TICK_LEN, y),
            Point2::new(params.left_x, y),
            PanelLayer::Center.name(),
        );
        emitter.draw_text(
            &station_label(y),
            Point2::new(
                params.left_x + STATION_LABEL_OFFSET.0,
                y + STATION_LABEL_OFFSET.1,
            ),
            PanelLayer::Notes.name(),
            STATION_LABEL_HEIGHT,
        );
    }
}

fn draw_notes<E: DrawingEmitter + ?Sized>(emitter: &mut E, params: &PanelParams) {
    emitter.draw_text(
        &format!("Units: {}", params.units),
        Point2::new(NOTES_X, params.overall_len + UNITS_NOTE_DROP),
        PanelLayer::Notes.name(),
        UNITS_NOTE_HEIGHT,
    );
    emitter.draw_text(
        TITLE,
        Point2::new(NOTES_X, params.overall_len + TITLE_DROP),
        PanelLayer::Notes.name(),
        TITLE_HEIGHT,
    );
}

/// Station value truncated towards zero.
fn station_label(y: f64) -> String {
    format!("{}", y.trunc() as i64)
}
