// src/debug/visualization/svg.rs
use crate::math::{
    geometry::{delaunay::Triangulation, voronoi::VoronoiCell},
    types::{Bounds2D, Point},
};
use std::path::Path;
use svg::node::element::{Circle, Polygon, Rectangle, Style};
use svg::{Document, Node};
use tracing::info;

// ===================================================================================
// 1. HILFS-STRUCT für die SVG-Erstellung
// ===================================================================================
/// Ein Helfer zum Erstellen einer SVG-Datei.
struct SvgBuilder {
    document: Document,
    point_radius: f64,
}

impl SvgBuilder {
    /// Erstellt ein neues SVG-Grundgerüst mit Stil und Hintergrund.
    fn new(display_bounds: &Bounds2D, svg_pixel_size: f64) -> Self {
        let viewbox_width = display_bounds.width();
        let viewbox_height = display_bounds.height();

        // Relative Größen, damit die Darstellung unabhängig von der Region bleibt
        let stroke_w_normal = (viewbox_width + viewbox_height) / 2.0 * 0.004;
        let stroke_w_thin = (viewbox_width + viewbox_height) / 2.0 * 0.0015;
        let point_radius = (viewbox_width + viewbox_height) / 2.0 * 0.006;

        let style = Style::new(format!(
            r#"
    .background {{ fill: #f0f0f0; }}
    .region {{ fill: none; stroke: #888888; stroke-width: {stroke_w_thin}; stroke-dasharray: 0.2,0.2; }}
    .triangle {{ fill: none; stroke: #bbbbbb; stroke-width: {stroke_w_thin}; }}
    .cell {{ fill: rgba(150, 255, 150, 0.4); stroke: #00aa00; stroke-width: {stroke_w_normal}; }}
    .invalid-cell {{ fill: rgba(255, 220, 150, 0.3); stroke: #ffaa00; stroke-width: {stroke_w_normal}; }}
    .site {{ fill: #aaccff; stroke: #0000cc; stroke-width: {stroke_w_thin}; }}
    .center {{ fill: #ffaaaa; stroke: #cc0000; stroke-width: {stroke_w_thin}; }}
"#
        ));

        let background = Rectangle::new()
            .set("x", display_bounds.min.x)
            .set("y", display_bounds.min.z)
            .set("width", viewbox_width)
            .set("height", viewbox_height)
            .set("class", "background");

        let document = Document::new()
            .set("width", svg_pixel_size)
            .set("height", svg_pixel_size)
            .set(
                "viewBox",
                (
                    display_bounds.min.x,
                    display_bounds.min.z,
                    viewbox_width,
                    viewbox_height,
                ),
            )
            .add(style)
            .add(background);

        Self {
            document,
            point_radius,
        }
    }

    /// Zeichnet ein Polygon.
    fn draw_polygon(&mut self, vertices: &[Point], class: &str) {
        if vertices.len() < 2 {
            return;
        }
        let points_str: String = vertices
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.z))
            .collect::<Vec<_>>()
            .join(" ");
        self.add(Polygon::new().set("points", points_str).set("class", class));
    }

    /// Zeichnet einen Punkt als Kreis.
    fn draw_point(&mut self, center: Point, class: &str) {
        let circle = Circle::new()
            .set("cx", center.x)
            .set("cy", center.z)
            .set("r", self.point_radius)
            .set("class", class);
        self.add(circle);
    }

    /// Zeichnet ein Rechteck.
    fn draw_rect(&mut self, bounds: &Bounds2D, class: &str) {
        let rect = Rectangle::new()
            .set("x", bounds.min.x)
            .set("y", bounds.min.z)
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("class", class);
        self.add(rect);
    }

    fn add<T: Into<Box<dyn Node>>>(&mut self, node: T) {
        self.document.append(node);
    }

    fn finish(self) -> Document {
        self.document
    }
}

/// Baut das SVG-Dokument für Triangulation, Zellen und Punkte.
///
/// Die Leinwand ist die Arbeitsregion plus 10 % Rand. Ungültige Zellen werden
/// gesondert eingefärbt, Zellmittelpunkte rot markiert.
pub fn render_diagram_svg(
    bounds: &Bounds2D,
    triangulation: Option<&Triangulation>,
    cells: &[VoronoiCell],
    sites: &[Point],
    svg_pixel_size: f64,
) -> Document {
    let margin = (bounds.width() + bounds.height()) / 2.0 * 0.1;
    let display_bounds = bounds.expand(margin);
    let mut svg = SvgBuilder::new(&display_bounds, svg_pixel_size);

    if let Some(triangulation) = triangulation {
        for triangle in triangulation.triangles() {
            svg.draw_polygon(&triangle.vertices(), "triangle");
        }
    }

    for cell in cells {
        let class = if cell.is_valid() { "cell" } else { "invalid-cell" };
        svg.draw_polygon(cell.boundary_points(), class);
    }

    svg.draw_rect(bounds, "region");

    for cell in cells {
        svg.draw_point(cell.average_center(), "center");
    }
    for site in sites {
        svg.draw_point(*site, "site");
    }

    svg.finish()
}

/// Schreibt [`render_diagram_svg`] in eine Datei.
pub fn write_diagram_svg<P: AsRef<Path>>(
    path: P,
    bounds: &Bounds2D,
    triangulation: Option<&Triangulation>,
    cells: &[VoronoiCell],
    sites: &[Point],
    svg_pixel_size: f64,
) -> std::io::Result<()> {
    let document = render_diagram_svg(bounds, triangulation, cells, sites, svg_pixel_size);
    svg::save(path.as_ref(), &document)?;
    info!("Debug SVG '{}' wurde erstellt.", path.as_ref().display());
    Ok(())
}
