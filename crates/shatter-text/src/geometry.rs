//! Extruded text geometry: flatten glyph contours, triangulate caps, build side walls

use crate::mesh::TextMesh;
use crate::outline::{contains_point, polygon_path, signed_area, Contour};
use crate::typeface::Typeface;
use lyon::math::{point, Point};
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers,
};
use serde::{Deserialize, Serialize};
use shatter_core::{Result, ShatterError};

/// Text layout and extrusion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// Glyph height in world units (one em)
    pub size: f32,
    /// Extrusion depth along +Z
    pub depth: f32,
    /// Flattening steps per curve segment
    pub curve_segments: u32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            size: 6.0,
            depth: 1.0,
            curve_segments: 6,
        }
    }
}

impl TextOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ShatterError::NotPositive {
                field: "text.size".to_string(),
                value: self.size as f64,
            });
        }
        if !(self.depth.is_finite() && self.depth > 0.0) {
            return Err(ShatterError::NotPositive {
                field: "text.depth".to_string(),
                value: self.depth as f64,
            });
        }
        if self.curve_segments == 0 {
            return Err(ShatterError::BelowMinimum {
                field: "text.curve_segments".to_string(),
                min: 1.0,
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// A flattened contour oriented so the filled region lies on its left
struct Polygon {
    points: Vec<[f32; 2]>,
}

/// Builds extruded, centered text meshes
pub struct TextGeometry;

impl TextGeometry {
    /// Lay out `text` with `typeface` and extrude it.
    ///
    /// The back cap sits at z = 0 and the front cap at z = depth before the
    /// mesh is centered on the origin.
    pub fn build(typeface: &Typeface, text: &str, options: &TextOptions) -> Result<TextMesh> {
        options.validate()?;
        let glyphs = typeface.generate_outlines(text, options.size)?;

        let mut mesh = TextMesh::new();
        for contours in &glyphs {
            let polygons = orient_contours(contours, options.curve_segments);
            if polygons.is_empty() {
                continue;
            }
            add_caps(&mut mesh, &polygons, options.depth)?;
            for polygon in &polygons {
                add_side_walls(&mut mesh, polygon, options.depth);
            }
        }

        if mesh.is_empty() {
            return Err(ShatterError::Geometry(format!(
                "Text {:?} produced no geometry",
                text
            )));
        }

        mesh.center();
        tracing::debug!(
            glyphs = glyphs.len(),
            faces = mesh.face_count(),
            "built text geometry"
        );
        Ok(mesh)
    }
}

/// Flatten contours and orient solids counter-clockwise, holes clockwise.
///
/// A contour nested inside an odd number of other contours is a hole.
fn orient_contours(contours: &[Contour], curve_segments: u32) -> Vec<Polygon> {
    let flattened: Vec<(Vec<[f32; 2]>, Path)> = contours
        .iter()
        .map(|c| c.flatten(curve_segments))
        .filter(|points| points.len() >= 3)
        .map(|points| {
            let path = polygon_path(&points);
            (points, path)
        })
        .filter(|(_, path)| signed_area(path).abs() > f32::EPSILON)
        .collect();

    flattened
        .iter()
        .enumerate()
        .map(|(i, (points, path))| {
            let depth = flattened
                .iter()
                .enumerate()
                .filter(|(j, (_, other))| *j != i && contains_point(other, points[0]))
                .count();
            let is_hole = depth % 2 == 1;
            let is_ccw = signed_area(path) > 0.0;

            let mut points = points.clone();
            if is_hole == is_ccw {
                points.reverse();
            }
            Polygon { points }
        })
        .collect()
}

/// Triangulate the glyph's filled region and emit front and back caps
fn add_caps(mesh: &mut TextMesh, polygons: &[Polygon], depth: f32) -> Result<()> {
    let mut builder = Path::builder();
    for polygon in polygons {
        let first = polygon.points[0];
        builder.begin(point(first[0], first[1]));
        for p in &polygon.points[1..] {
            builder.line_to(point(p[0], p[1]));
        }
        builder.end(true);
    }
    let path = builder.build();

    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator
        .tessellate_path(
            &path,
            &FillOptions::default().with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| vertex.position()),
        )
        .map_err(|e| ShatterError::Geometry(format!("Cap triangulation failed: {:?}", e)))?;

    for tri in buffers.indices.chunks_exact(3) {
        let mut a = buffers.vertices[tri[0] as usize];
        let b = buffers.vertices[tri[1] as usize];
        let mut c = buffers.vertices[tri[2] as usize];
        let twice_area = (b - a).cross(c - a);
        if twice_area.abs() <= f32::EPSILON {
            continue;
        }
        if twice_area < 0.0 {
            std::mem::swap(&mut a, &mut c);
        }

        // Front cap faces +Z, back cap is the mirror winding facing -Z
        mesh.push_face([a.x, a.y, depth], [b.x, b.y, depth], [c.x, c.y, depth]);
        mesh.push_face([c.x, c.y, 0.0], [b.x, b.y, 0.0], [a.x, a.y, 0.0]);
    }
    Ok(())
}

/// One quad (two faces) per polygon edge, facing away from the filled region
fn add_side_walls(mesh: &mut TextMesh, polygon: &Polygon, depth: f32) {
    let n = polygon.points.len();
    for i in 0..n {
        let p0 = polygon.points[i];
        let p1 = polygon.points[(i + 1) % n];

        let a = [p0[0], p0[1], 0.0];
        let b = [p1[0], p1[1], 0.0];
        let c = [p1[0], p1[1], depth];
        let d = [p0[0], p0[1], depth];

        mesh.push_face(a, b, c);
        mesh.push_face(a, c, d);
    }
}
