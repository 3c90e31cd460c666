//! Drawing file export.

pub mod dxf;

pub use dxf::{DxfDocument, Entity};
