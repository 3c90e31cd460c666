#![warn(missing_docs)]

//! flatpanel — flat-pattern development drawings for sheet-metal panels.
//!
//! Builds the unfolded outline of a panel with one straight and one bowed
//! edge, places holes at a constant offset from both edges, marks the bend
//! line, and exports the result as DXF.
//!
//! # Example
//!
//! ```rust,no_run
//! use flatpanel::{generate, PanelParams};
//!
//! let params = PanelParams {
//!     overall_len: 1000.0,
//!     right_edge_profile: vec![(0.0, 350.0), (1000.0, 400.0)],
//!     stations: vec![500.0],
//!     bending_line_y: 800.0,
//!     ..Default::default()
//! };
//! let view = generate(&params, "panel_development.dxf").unwrap();
//! assert_eq!(view.holes.len(), 2);
//! ```

pub mod dashed;
pub mod drawing;
pub mod emitter;
pub mod error;
pub mod export;
pub mod holes;
pub mod outline;
pub mod params;
pub mod profile;

pub use dashed::{dashed_segments, Segment, DEFAULT_DASH_SEGMENTS};
pub use drawing::{build_development_view, compute_view, generate, DevelopmentView, DEFAULT_OUTPUT};
pub use emitter::{DrawingEmitter, PanelLayer};
pub use error::{PanelError, Result};
pub use export::DxfDocument;
pub use holes::{place_holes, Hole, Side};
pub use outline::OutlineGeometry;
pub use params::PanelParams;
pub use profile::EdgeProfile;

/// A point in drawing coordinates: x from the left datum, y down from the
/// top edge.
pub type Point2 = nalgebra::Point2<f64>;
