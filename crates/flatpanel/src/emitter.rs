//! Drawing output abstraction.
//!
//! Geometry code talks to a [`DrawingEmitter`] and never to a concrete file
//! format. [`crate::export::DxfDocument`] is the DXF implementation.

use std::path::Path;

use crate::error::Result;
use crate::Point2;

/// Sink for drawing entities.
///
/// Layers are referenced by name. Colors are AutoCAD Color Index values.
pub trait DrawingEmitter {
    /// Register a layer. Registering an existing name is a no-op.
    fn create_layer(&mut self, name: &str, color: u8);

    /// Add a straight line.
    fn draw_line(&mut self, start: Point2, end: Point2, layer: &str);

    /// Add a circle.
    fn draw_circle(&mut self, center: Point2, radius: f64, layer: &str);

    /// Add a smooth curve passing through `points` in order.
    fn draw_curve_through_points(&mut self, points: &[Point2], layer: &str);

    /// Add a single line of text with its insertion point at `insert`.
    fn draw_text(&mut self, content: &str, insert: Point2, layer: &str, height: f64);

    /// Write everything drawn so far to `path`.
    fn save(&self, path: &Path) -> Result<()>;
}

/// Layers of a development view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelLayer {
    /// Panel outline.
    Outline,
    /// Holes measured from the left edge.
    HolesLeft,
    /// Holes measured from the right edge.
    HolesRight,
    /// Bend line and station ticks.
    Center,
    /// Labels and notes.
    Notes,
}

impl PanelLayer {
    /// Every layer, in registration order.
    pub const ALL: [PanelLayer; 5] = [
        PanelLayer::Outline,
        PanelLayer::HolesLeft,
        PanelLayer::HolesRight,
        PanelLayer::Center,
        PanelLayer::Notes,
    ];

    /// Layer name as written to the drawing.
    pub fn name(self) -> &'static str {
        match self {
            PanelLayer::Outline => "OUTLINE",
            PanelLayer::HolesLeft => "HOLES_L",
            PanelLayer::HolesRight => "HOLES_R",
            PanelLayer::Center => "CENTER",
            PanelLayer::Notes => "NOTES",
        }
    }

    /// ACI display color.
    pub fn color(self) -> u8 {
        match self {
            PanelLayer::Outline => 7,    // white/black
            PanelLayer::HolesLeft => 3,  // green
            PanelLayer::HolesRight => 5, // blue
            PanelLayer::Center => 2,     // yellow
            PanelLayer::Notes => 1,      // red
        }
    }
}
