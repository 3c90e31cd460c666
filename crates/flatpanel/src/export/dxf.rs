//! DXF export for flat-pattern development drawings.
//!
//! Writes a minimal AC1015 (R2000) file so that fit-point SPLINE entities are
//! allowed. The file carries:
//! - `$HANDSEED` and a hex handle (group 5) on every table, record and entity
//! - an LTYPE table with BYBLOCK, BYLAYER and CONTINUOUS
//! - a LAYER table with every registered layer and its color
//! - LINE, CIRCLE, SPLINE and TEXT entities
//!
//! There are no BLOCKS or OBJECTS sections, so strict R2000 readers that
//! require the model-space block record will refuse the file.
//!
//! Handles are assigned in write order and coordinates are written as-is with
//! six decimals, so the same document always serializes to the same bytes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::emitter::DrawingEmitter;
use crate::error::{PanelError, Result};
use crate::Point2;

/// Degree of the fitted SPLINE curves.
const SPLINE_DEGREE: u32 = 3;

/// Linetype records as (name, description).
const LTYPES: [(&str, &str); 3] = [("BYBLOCK", ""), ("BYLAYER", ""), ("CONTINUOUS", "Solid line")];

/// Hex handle allocator, starting at 1.
#[derive(Default)]
struct Handles(u32);

impl Handles {
    fn allocate(&mut self) -> String {
        self.0 += 1;
        format!("{:X}", self.0)
    }
}

/// A drawing entity stored in a [`DxfDocument`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// Line segment.
    Line {
        /// Start point.
        start: Point2,
        /// End point.
        end: Point2,
        /// Layer name.
        layer: String,
    },
    /// Circle (for holes).
    Circle {
        /// Center position.
        center: Point2,
        /// Circle radius.
        radius: f64,
        /// Layer name.
        layer: String,
    },
    /// Spline fitted through points.
    Spline {
        /// Points the curve passes through, in order.
        fit_points: Vec<Point2>,
        /// Layer name.
        layer: String,
    },
    /// Single-line text.
    Text {
        /// Text string.
        content: String,
        /// Insertion point (baseline start).
        insert: Point2,
        /// Text height in drawing units.
        height: f64,
        /// Layer name.
        layer: String,
    },
}

impl Entity {
    /// Layer the entity is drawn on.
    pub fn layer(&self) -> &str {
        match self {
            Entity::Line { layer, .. }
            | Entity::Circle { layer, .. }
            | Entity::Spline { layer, .. }
            | Entity::Text { layer, .. } => layer,
        }
    }
}

#[derive(Debug, Clone)]
struct Layer {
    name: String,
    color: u8,
}

/// DXF document builder.
///
/// Accumulates layers and entities through [`DrawingEmitter`] and exports them
/// as DXF.
#[derive(Debug, Clone, Default)]
pub struct DxfDocument {
    layers: Vec<Layer>,
    entities: Vec<Entity>,
}

impl DxfDocument {
    /// Create a new empty DXF document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered layers as `(name, color)` in registration order.
    pub fn layers(&self) -> impl Iterator<Item = (&str, u8)> {
        self.layers.iter().map(|l| (l.name.as_str(), l.color))
    }

    /// Whether a layer with this name has been registered.
    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name == name)
    }

    /// All entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities drawn on `layer`.
    pub fn entities_on<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.layer() == layer)
    }

    /// Number of LINE entities.
    pub fn num_lines(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Line { .. }))
            .count()
    }

    /// Number of CIRCLE entities.
    pub fn num_circles(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Circle { .. }))
            .count()
    }

    /// Number of TEXT entities.
    pub fn num_texts(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| matches!(e, Entity::Text { .. }))
            .count()
    }

    /// Export to a DXF file.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| PanelError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        self.export_to_writer(&mut writer).map_err(io_err)?;
        writer.flush().map_err(io_err)?;

        tracing::info!(
            path = %path.display(),
            entities = self.entities.len(),
            layers = self.layers.len(),
            "wrote DXF"
        );
        Ok(())
    }

    /// Export to a writer.
    pub fn export_to_writer(&self, mut writer: impl Write) -> std::io::Result<()> {
        let mut handles = Handles::default();
        self.write_header(&mut writer)?;
        self.write_tables(&mut writer, &mut handles)?;
        self.write_entities(&mut writer, &mut handles)?;

        writeln!(writer, "0")?;
        writeln!(writer, "EOF")?;

        Ok(())
    }

    /// Serialize the document to a DXF string.
    pub fn to_dxf_string(&self) -> String {
        let mut buf = Vec::new();
        self.export_to_writer(&mut buf)
            .expect("writing to a Vec cannot fail");
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Number of handles the writer hands out: two tables, their records and
    /// every entity.
    fn handle_count(&self) -> usize {
        2 + LTYPES.len() + self.layers.len() + self.entities.len()
    }

    fn write_header(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "HEADER")?;

        // AutoCAD version
        writeln!(writer, "9")?;
        writeln!(writer, "$ACADVER")?;
        writeln!(writer, "1")?;
        writeln!(writer, "AC1015")?; // DXF R2000

        // Next free handle
        writeln!(writer, "9")?;
        writeln!(writer, "$HANDSEED")?;
        writeln!(writer, "5")?;
        writeln!(writer, "{:X}", self.handle_count() + 1)?;

        // Units = millimeters
        writeln!(writer, "9")?;
        writeln!(writer, "$INSUNITS")?;
        writeln!(writer, "70")?;
        writeln!(writer, "4")?;

        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        Ok(())
    }

    fn write_tables(&self, writer: &mut impl Write, handles: &mut Handles) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "TABLES")?;

        self.write_ltype_table(writer, handles)?;
        self.write_layer_table(writer, handles)?;

        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        Ok(())
    }

    fn write_table_start(
        writer: &mut impl Write,
        handles: &mut Handles,
        name: &str,
        count: usize,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "TABLE")?;
        writeln!(writer, "2")?;
        writeln!(writer, "{}", name)?;
        writeln!(writer, "5")?;
        writeln!(writer, "{}", handles.allocate())?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbSymbolTable")?;
        writeln!(writer, "70")?;
        writeln!(writer, "{}", count)?;
        Ok(())
    }

    fn write_ltype_table(&self, writer: &mut impl Write, handles: &mut Handles) -> std::io::Result<()> {
        Self::write_table_start(writer, handles, "LTYPE", LTYPES.len())?;

        // Dashes are drawn as separate lines, so every layer is continuous.
        for (name, description) in LTYPES {
            writeln!(writer, "0")?;
            writeln!(writer, "LTYPE")?;
            writeln!(writer, "5")?;
            writeln!(writer, "{}", handles.allocate())?;
            writeln!(writer, "100")?;
            writeln!(writer, "AcDbSymbolTableRecord")?;
            writeln!(writer, "100")?;
            writeln!(writer, "AcDbLinetypeTableRecord")?;
            writeln!(writer, "2")?;
            writeln!(writer, "{}", name)?;
            writeln!(writer, "70")?;
            writeln!(writer, "0")?;
            writeln!(writer, "3")?;
            writeln!(writer, "{}", description)?;
            writeln!(writer, "72")?;
            writeln!(writer, "65")?;
            writeln!(writer, "73")?;
            writeln!(writer, "0")?;
            writeln!(writer, "40")?;
            writeln!(writer, "0.0")?;
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDTAB")?;

        Ok(())
    }

    fn write_layer_table(&self, writer: &mut impl Write, handles: &mut Handles) -> std::io::Result<()> {
        Self::write_table_start(writer, handles, "LAYER", self.layers.len())?;

        for layer in &self.layers {
            writeln!(writer, "0")?;
            writeln!(writer, "LAYER")?;
            writeln!(writer, "5")?;
            writeln!(writer, "{}", handles.allocate())?;
            writeln!(writer, "100")?;
            writeln!(writer, "AcDbSymbolTableRecord")?;
            writeln!(writer, "100")?;
            writeln!(writer, "AcDbLayerTableRecord")?;
            writeln!(writer, "2")?;
            writeln!(writer, "{}", layer.name)?;
            writeln!(writer, "70")?;
            writeln!(writer, "0")?;
            writeln!(writer, "62")?;
            writeln!(writer, "{}", layer.color)?;
            writeln!(writer, "6")?;
            writeln!(writer, "CONTINUOUS")?;
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDTAB")?;

        Ok(())
    }

    fn write_entities(&self, writer: &mut impl Write, handles: &mut Handles) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "SECTION")?;
        writeln!(writer, "2")?;
        writeln!(writer, "ENTITIES")?;

        for entity in &self.entities {
            let handle = handles.allocate();
            match entity {
                Entity::Line { start, end, layer } => {
                    self.write_line(writer, &handle, start, end, layer)?;
                }
                Entity::Circle {
                    center,
                    radius,
                    layer,
                } => {
                    self.write_circle(writer, &handle, center, *radius, layer)?;
                }
                Entity::Spline { fit_points, layer } => {
                    self.write_spline(writer, &handle, fit_points, layer)?;
                }
                Entity::Text {
                    content,
                    insert,
                    height,
                    layer,
                } => {
                    self.write_text(writer, &handle, content, insert, *height, layer)?;
                }
            }
        }

        writeln!(writer, "0")?;
        writeln!(writer, "ENDSEC")?;

        Ok(())
    }

    fn write_line(
        &self,
        writer: &mut impl Write,
        handle: &str,
        start: &Point2,
        end: &Point2,
        layer: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "LINE")?;
        writeln!(writer, "5")?;
        writeln!(writer, "{}", handle)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbEntity")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{}", layer)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbLine")?;
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", start.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", start.y)?;
        writeln!(writer, "30")?;
        writeln!(writer, "0.0")?;
        writeln!(writer, "11")?;
        writeln!(writer, "{:.6}", end.x)?;
        writeln!(writer, "21")?;
        writeln!(writer, "{:.6}", end.y)?;
        writeln!(writer, "31")?;
        writeln!(writer, "0.0")?;
        Ok(())
    }

    fn write_circle(
        &self,
        writer: &mut impl Write,
        handle: &str,
        center: &Point2,
        radius: f64,
        layer: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "CIRCLE")?;
        writeln!(writer, "5")?;
        writeln!(writer, "{}", handle)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbEntity")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{}", layer)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbCircle")?;
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", center.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", center.y)?;
        writeln!(writer, "30")?;
        writeln!(writer, "0.0")?;
        writeln!(writer, "40")?;
        writeln!(writer, "{:.6}", radius)?;
        Ok(())
    }

    /// Fit-point spline; readers compute the control points themselves.
    fn write_spline(
        &self,
        writer: &mut impl Write,
        handle: &str,
        fit_points: &[Point2],
        layer: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "SPLINE")?;
        writeln!(writer, "5")?;
        writeln!(writer, "{}", handle)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbEntity")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{}", layer)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbSpline")?;

        // Plane normal (+Z)
        writeln!(writer, "210")?;
        writeln!(writer, "0.0")?;
        writeln!(writer, "220")?;
        writeln!(writer, "0.0")?;
        writeln!(writer, "230")?;
        writeln!(writer, "1.0")?;

        writeln!(writer, "70")?;
        writeln!(writer, "8")?; // Planar
        writeln!(writer, "71")?;
        writeln!(writer, "{}", SPLINE_DEGREE)?;
        writeln!(writer, "72")?;
        writeln!(writer, "0")?; // No knots
        writeln!(writer, "73")?;
        writeln!(writer, "0")?; // No control points
        writeln!(writer, "74")?;
        writeln!(writer, "{}", fit_points.len())?;
        writeln!(writer, "44")?;
        writeln!(writer, "0.0000000001")?; // Fit tolerance

        for p in fit_points {
            writeln!(writer, "11")?;
            writeln!(writer, "{:.6}", p.x)?;
            writeln!(writer, "21")?;
            writeln!(writer, "{:.6}", p.y)?;
            writeln!(writer, "31")?;
            writeln!(writer, "0.0")?;
        }

        Ok(())
    }

    fn write_text(
        &self,
        writer: &mut impl Write,
        handle: &str,
        content: &str,
        insert: &Point2,
        height: f64,
        layer: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "0")?;
        writeln!(writer, "TEXT")?;
        writeln!(writer, "5")?;
        writeln!(writer, "{}", handle)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbEntity")?;
        writeln!(writer, "8")?;
        writeln!(writer, "{}", layer)?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbText")?;
        writeln!(writer, "10")?;
        writeln!(writer, "{:.6}", insert.x)?;
        writeln!(writer, "20")?;
        writeln!(writer, "{:.6}", insert.y)?;
        writeln!(writer, "30")?;
        writeln!(writer, "0.0")?;
        writeln!(writer, "40")?;
        writeln!(writer, "{:.6}", height)?;
        writeln!(writer, "1")?;
        // Group values are line-delimited.
        writeln!(writer, "{}", content.replace(['\r', '\n'], " "))?;
        writeln!(writer, "100")?;
        writeln!(writer, "AcDbText")?;
        Ok(())
    }
}

impl DrawingEmitter for DxfDocument {
    fn create_layer(&mut self, name: &str, color: u8) {
        if self.has_layer(name) {
            return;
        }
        self.layers.push(Layer {
            name: name.to_string(),
            color,
        });
    }

    fn draw_line(&mut self, start: Point2, end: Point2, layer: &str) {
        self.entities.push(Entity::Line {
            start,
            end,
            layer: layer.to_string(),
        });
    }

    fn draw_circle(&mut self, center: Point2, radius: f64, layer: &str) {
        self.entities.push(Entity::Circle {
            center,
            radius,
            layer: layer.to_string(),
        });
    }

    fn draw_curve_through_points(&mut self, points: &[Point2], layer: &str) {
        self.entities.push(Entity::Spline {
            fit_points: points.to_vec(),
            layer: layer.to_string(),
        });
    }

    fn draw_text(&mut self, content: &str, insert: Point2, layer: &str, height: f64) {
        self.entities.push(Entity::Text {
            content: content.to_string(),
            insert,
            height,
            layer: layer.to_string(),
        });
    }

    fn save(&self, path: &Path) -> Result<()> {
        self.export(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_create_layer_is_idempotent() {
        let mut doc = DxfDocument::new();
        doc.create_layer("OUTLINE", 7);
        doc.create_layer("NOTES", 1);
        doc.create_layer("OUTLINE", 3);

        let layers: Vec<_> = doc.layers().collect();
        assert_eq!(layers, vec![("OUTLINE", 7), ("NOTES", 1)]);
    }

    #[test]
    fn test_dxf_layer_table() {
        let mut doc = DxfDocument::new();
        doc.create_layer("HOLES_L", 3);
        doc.create_layer("HOLES_R", 5);

        let content = doc.to_dxf_string();
        assert!(content.contains("TABLES"));
        assert!(content.contains("AcDbLayerTableRecord\n2\nHOLES_L\n70\n0\n62\n3\n"));
        assert!(content.contains("AcDbLayerTableRecord\n2\nHOLES_R\n70\n0\n62\n5\n"));
        assert!(content.contains("TABLE\n2\nLAYER\n5\n5\n100\nAcDbSymbolTable\n70\n2\n"));
        assert!(content.contains("TABLE\n2\nLTYPE\n5\n1\n100\nAcDbSymbolTable\n70\n3\n"));
    }

    #[test]
    fn test_dxf_entities() {
        let mut doc = DxfDocument::new();
        doc.create_layer("OUTLINE", 7);
        doc.draw_line(Point2::new(0.0, 0.0), Point2::new(0.0, 1670.0), "OUTLINE");
        doc.draw_circle(Point2::new(20.0, 55.0), 7.0, "HOLES_L");
        doc.draw_curve_through_points(
            &[
                Point2::new(385.0, 0.0),
                Point2::new(360.0, 235.0),
                Point2::new(345.0, 1635.0),
            ],
            "OUTLINE",
        );
        doc.draw_text("Bending line", Point2::new(10.0, 1397.0), "NOTES", 10.0);

        assert_eq!(doc.num_lines(), 1);
        assert_eq!(doc.num_circles(), 1);
        assert_eq!(doc.num_texts(), 1);
        assert_eq!(doc.entities_on("OUTLINE").count(), 2);

        let content = doc.to_dxf_string();
        assert!(content.contains("$ACADVER\n1\nAC1015"));
        assert!(content.contains("100\nAcDbEntity\n8\nOUTLINE\n100\nAcDbLine\n"));
        assert!(content.contains("11\n0.000000\n21\n1670.000000\n"));
        assert!(content.contains("CIRCLE"));
        assert!(content.contains("40\n7.000000\n"));
        assert!(content.contains("SPLINE"));
        assert!(content.contains("74\n3\n"));
        assert!(content.contains("11\n360.000000\n21\n235.000000\n"));
        assert!(content.contains("1\nBending line\n"));
        assert!(content.ends_with("0\nEOF\n"));
    }

    #[test]
    fn test_dxf_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.dxf");

        let mut doc = DxfDocument::new();
        doc.draw_circle(Point2::new(10.0, 20.0), 5.0, "HOLES_R");
        doc.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, doc.to_dxf_string());
    }

    #[test]
    fn test_dxf_export_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("panel.dxf");

        let err = DxfDocument::new().export(&path).unwrap_err();
        match err {
            PanelError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_handles_unique_and_below_seed() {
        let mut doc = DxfDocument::new();
        doc.create_layer("OUTLINE", 7);
        doc.create_layer("HOLES_L", 3);
        doc.draw_line(Point2::new(0.0, 0.0), Point2::new(0.0, 1670.0), "OUTLINE");
        doc.draw_circle(Point2::new(20.0, 55.0), 7.0, "HOLES_L");
        doc.draw_curve_through_points(&[Point2::new(385.0, 0.0), Point2::new(345.0, 1635.0)], "OUTLINE");
        doc.draw_text("55", Point2::new(-40.0, 52.0), "NOTES", 8.0);

        let content = doc.to_dxf_string();
        let lines: Vec<&str> = content.lines().collect();
        let pairs: Vec<(&str, &str)> = lines.chunks(2).map(|p| (p[0], p[1])).collect();

        let seed_at = pairs
            .iter()
            .position(|&(code, value)| code == "9" && value == "$HANDSEED")
            .unwrap();
        assert_eq!(pairs[seed_at + 1].0, "5");
        let seed = u32::from_str_radix(pairs[seed_at + 1].1, 16).unwrap();

        let mut handles: Vec<u32> = pairs[seed_at + 2..]
            .iter()
            .filter(|&&(code, _)| code == "5")
            .map(|&(_, value)| u32::from_str_radix(value, 16).unwrap())
            .collect();

        // 2 tables + 3 linetypes + 2 layers + 4 entities
        assert_eq!(handles.len(), 11);
        assert_eq!(seed, 12);
        assert!(handles.iter().all(|&h| h > 0 && h < seed));
        handles.sort_unstable();
        handles.dedup();
        assert_eq!(handles.len(), 11);
    }

    #[test]
    fn test_text_newlines_flattened() {
        let mut doc = DxfDocument::new();
        doc.draw_text("two\nlines", Point2::origin(), "NOTES", 8.0);
        assert!(doc.to_dxf_string().contains("1\ntwo lines\n"));
    }
}
