//! Bowed side panel exported to DXF.

use flatpanel::{build_development_view, DxfDocument, PanelParams};

fn main() {
    let params = PanelParams {
        overall_len: 1200.0,
        right_edge_profile: vec![(0.0, 300.0), (400.0, 318.0), (800.0, 318.0), (1180.0, 296.0)],
        stations: vec![60.0, 400.0, 800.0, 1140.0],
        bending_line_y: 900.0,
        ..Default::default()
    };

    let mut dxf = DxfDocument::new();
    let view = build_development_view(&params, &mut dxf).unwrap();

    for hole in &view.holes {
        println!(
            "{:?} hole at ({:.2}, {:.2})",
            hole.side, hole.center.x, hole.center.y
        );
    }

    dxf.export("bowed_panel.dxf").unwrap();
    println!("wrote bowed_panel.dxf");
}
