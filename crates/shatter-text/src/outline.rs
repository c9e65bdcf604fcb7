//! Glyph outline commands and curve flattening

use lyon::algorithms::area::approximate_signed_area;
use lyon::algorithms::hit_test::hit_test_path;
use lyon::geom::{CubicBezierSegment, QuadraticBezierSegment};
use lyon::math::{point, Point};
use lyon::path::{FillRule, Path};
use shatter_core::{Result, ShatterError};
use std::str::SplitWhitespace;

/// Flattening tolerance for area and hit tests on already-flat polygons
const POLYGON_TOLERANCE: f32 = 0.01;

/// One drawing segment continuing from the previous point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line([f32; 2]),
    Quadratic { control: [f32; 2], to: [f32; 2] },
    Cubic {
        control1: [f32; 2],
        control2: [f32; 2],
        to: [f32; 2],
    },
}

impl Segment {
    fn end(&self) -> [f32; 2] {
        match *self {
            Segment::Line(to) => to,
            Segment::Quadratic { to, .. } => to,
            Segment::Cubic { to, .. } => to,
        }
    }
}

/// A closed glyph contour: a start point followed by segments
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub start: [f32; 2],
    pub segments: Vec<Segment>,
}

impl Contour {
    pub fn new(start: [f32; 2]) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    /// Flatten into a polygon. Lines contribute one step, curves `curve_segments` steps.
    ///
    /// Consecutive duplicates are dropped and so is a final point equal to the start,
    /// since the polygon is implicitly closed.
    pub fn flatten(&self, curve_segments: u32) -> Vec<[f32; 2]> {
        let divisions = curve_segments.max(1);
        let mut points = vec![self.start];
        let mut current = self.start;

        for segment in &self.segments {
            match *segment {
                Segment::Line(to) => push_distinct(&mut points, to),
                Segment::Quadratic { control, to } => {
                    let curve = QuadraticBezierSegment {
                        from: to_point(current),
                        ctrl: to_point(control),
                        to: to_point(to),
                    };
                    for t in steps(divisions) {
                        push_distinct(&mut points, curve.sample(t).to_array());
                    }
                }
                Segment::Cubic {
                    control1,
                    control2,
                    to,
                } => {
                    let curve = CubicBezierSegment {
                        from: to_point(current),
                        ctrl1: to_point(control1),
                        ctrl2: to_point(control2),
                        to: to_point(to),
                    };
                    for t in steps(divisions) {
                        push_distinct(&mut points, curve.sample(t).to_array());
                    }
                }
            }
            current = segment.end();
        }

        while points.len() > 1 && points.last() == points.first() {
            points.pop();
        }
        points
    }
}

fn push_distinct(points: &mut Vec<[f32; 2]>, p: [f32; 2]) {
    if points.last() != Some(&p) {
        points.push(p);
    }
}

/// Curve parameters of `divisions` equal steps, excluding the start
fn steps(divisions: u32) -> impl Iterator<Item = f32> {
    (1..=divisions).map(move |d| d as f32 / divisions as f32)
}

fn to_point(p: [f32; 2]) -> Point {
    point(p[0], p[1])
}

/// Parse a typeface outline command string into contours.
///
/// Commands are whitespace separated: `m x y`, `l x y`, `q x y cx cy` (end point
/// first) and `b x y c1x c1y c2x c2y`. Coordinates are scaled and then offset.
pub fn parse_outline(
    outline: &str,
    scale: f32,
    offset: [f32; 2],
) -> Result<Vec<Contour>> {
    let mut tokens = outline.split_whitespace();
    let mut contours: Vec<Contour> = Vec::new();

    while let Some(command) = tokens.next() {
        if command == "m" {
            let start = next_point(&mut tokens, scale, offset)?;
            contours.push(Contour::new(start));
            continue;
        }

        let segment = match command {
            "l" => Segment::Line(next_point(&mut tokens, scale, offset)?),
            "q" => {
                let to = next_point(&mut tokens, scale, offset)?;
                let control = next_point(&mut tokens, scale, offset)?;
                Segment::Quadratic { control, to }
            }
            "b" => {
                let to = next_point(&mut tokens, scale, offset)?;
                let control1 = next_point(&mut tokens, scale, offset)?;
                let control2 = next_point(&mut tokens, scale, offset)?;
                Segment::Cubic {
                    control1,
                    control2,
                    to,
                }
            }
            other => {
                return Err(ShatterError::FontParse(format!(
                    "Unknown outline command '{}'",
                    other
                )))
            }
        };

        let contour = contours.last_mut().ok_or_else(|| {
            ShatterError::FontParse(format!("Outline command '{}' before any move", command))
        })?;
        contour.segments.push(segment);
    }

    Ok(contours)
}

fn next_point(tokens: &mut SplitWhitespace<'_>, scale: f32, offset: [f32; 2]) -> Result<[f32; 2]> {
    let x = next_number(tokens)?;
    let y = next_number(tokens)?;
    Ok([x * scale + offset[0], y * scale + offset[1]])
}

fn next_number(tokens: &mut SplitWhitespace<'_>) -> Result<f32> {
    let token = tokens
        .next()
        .ok_or_else(|| ShatterError::FontParse("Outline ended mid-command".to_string()))?;
    token
        .parse::<f32>()
        .map_err(|_| ShatterError::FontParse(format!("Invalid outline coordinate '{}'", token)))
}

/// A flattened contour as a closed lyon path
pub(crate) fn polygon_path(points: &[[f32; 2]]) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(to_point(*first));
        for p in rest {
            builder.line_to(to_point(*p));
        }
        builder.end(true);
    }
    builder.build()
}

/// Signed area of a closed path; positive when counter-clockwise (y up)
pub(crate) fn signed_area(path: &Path) -> f32 {
    approximate_signed_area(POLYGON_TOLERANCE, path.iter())
}

/// Even-odd containment of `p` in a closed path
pub(crate) fn contains_point(path: &Path, p: [f32; 2]) -> bool {
    hit_test_path(&to_point(p), path.iter(), FillRule::EvenOdd, POLYGON_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_move_and_lines() {
        let contours = parse_outline("m 0 0 l 10 0 l 10 10 l 0 10 l 0 0", 1.0, [0.0, 0.0]).unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].start, [0.0, 0.0]);
        assert_eq!(contours[0].segments.len(), 4);
        assert_eq!(contours[0].segments[1], Segment::Line([10.0, 10.0]));
    }

    #[test]
    fn quadratic_lists_end_point_first() {
        let contours = parse_outline("m 0 0 q 10 0 5 5", 1.0, [0.0, 0.0]).unwrap();
        assert_eq!(
            contours[0].segments[0],
            Segment::Quadratic {
                control: [5.0, 5.0],
                to: [10.0, 0.0],
            }
        );
    }

    #[test]
    fn cubic_lists_end_point_first() {
        let contours = parse_outline("m 0 0 b 9 0 3 3 6 3", 1.0, [0.0, 0.0]).unwrap();
        assert_eq!(
            contours[0].segments[0],
            Segment::Cubic {
                control1: [3.0, 3.0],
                control2: [6.0, 3.0],
                to: [9.0, 0.0],
            }
        );
    }

    #[test]
    fn applies_scale_then_offset() {
        let contours = parse_outline("m 100 200", 0.01, [5.0, -1.0]).unwrap();
        assert_eq!(contours[0].start, [6.0, 1.0]);
    }

    #[test]
    fn each_move_starts_a_contour() {
        let contours =
            parse_outline("m 0 0 l 1 0 l 1 1 m 5 5 l 6 5 l 6 6", 1.0, [0.0, 0.0]).unwrap();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[1].start, [5.0, 5.0]);
    }

    #[test]
    fn rejects_malformed_outlines() {
        assert!(parse_outline("m 0", 1.0, [0.0, 0.0]).is_err());
        assert!(parse_outline("m 0 zero", 1.0, [0.0, 0.0]).is_err());
        assert!(parse_outline("l 1 1", 1.0, [0.0, 0.0]).is_err());
        assert!(parse_outline("m 0 0 z", 1.0, [0.0, 0.0]).is_err());
    }

    #[test]
    fn empty_outline_has_no_contours() {
        assert!(parse_outline("", 1.0, [0.0, 0.0]).unwrap().is_empty());
    }

    #[test]
    fn flatten_drops_closing_duplicate() {
        let contours = parse_outline("m 0 0 l 10 0 l 10 10 l 0 0", 1.0, [0.0, 0.0]).unwrap();
        let points = contours[0].flatten(6);
        assert_eq!(points, vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]]);
    }

    #[test]
    fn flatten_curves_uses_segment_count() {
        let contours = parse_outline("m 0 0 q 10 0 5 5 l 5 -5", 1.0, [0.0, 0.0]).unwrap();
        let points = contours[0].flatten(6);
        // start + 6 curve steps + 1 line step
        assert_eq!(points.len(), 8);
        // curve midpoint: 0.25*p0 + 0.5*c + 0.25*p2
        assert!((points[3][0] - 5.0).abs() < 1e-5);
        assert!((points[3][1] - 2.5).abs() < 1e-5);
        assert_eq!(points[6], [10.0, 0.0]);
    }

    #[test]
    fn flatten_samples_cubic_at_even_steps() {
        let contours = parse_outline("m 0 0 b 9 0 3 3 6 3", 1.0, [0.0, 0.0]).unwrap();
        let points = contours[0].flatten(2);
        assert_eq!(points.len(), 3);
        // B(0.5) = (p0 + 3c1 + 3c2 + p3) / 8
        assert!((points[1][0] - 4.5).abs() < 1e-5);
        assert!((points[1][1] - 2.25).abs() < 1e-5);
        assert_eq!(points[2], [9.0, 0.0]);
    }

    #[test]
    fn signed_area_follows_winding() {
        let ccw = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!((signed_area(&polygon_path(&ccw)) - 1.0).abs() < 1e-5);
        let mut cw = ccw;
        cw.reverse();
        assert!((signed_area(&polygon_path(&cw)) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn point_in_polygon() {
        let square = polygon_path(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]]);
        assert!(contains_point(&square, [2.0, 2.0]));
        assert!(!contains_point(&square, [5.0, 2.0]));
        assert!(!contains_point(&square, [2.0, -1.0]));
    }

    #[test]
    fn point_in_square_ring() {
        let outer = [[0.0, 0.0], [7.0, 0.0], [7.0, 7.0], [0.0, 7.0]];
        let inner = [[2.0, 2.0], [2.0, 5.0], [5.0, 5.0], [5.0, 2.0]];
        let outer_path = polygon_path(&outer);
        assert!(contains_point(&outer_path, inner[0]));
        assert!(!contains_point(&polygon_path(&inner), outer[0]));
    }

    #[test]
    fn empty_polygon_path() {
        let path = polygon_path(&[]);
        assert_eq!(path.iter().count(), 0);
        assert!(!contains_point(&path, [0.0, 0.0]));
    }
}
