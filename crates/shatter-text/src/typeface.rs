//! Typeface JSON model and text layout

use crate::outline::{parse_outline, Contour};
use serde::Deserialize;
use shatter_core::{Result, ShatterError};
use std::collections::HashMap;

/// Character substituted for glyphs the typeface does not define
const FALLBACK_GLYPH: char = '?';

/// A single glyph: horizontal advance plus outline commands
#[derive(Debug, Clone, Deserialize)]
pub struct Glyph {
    /// Horizontal advance in font units
    pub ha: f32,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
    /// Outline command string; absent for blank glyphs such as space
    #[serde(default)]
    pub o: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub y_min: f32,
    pub y_max: f32,
    #[serde(default)]
    pub x_min: f32,
    #[serde(default)]
    pub x_max: f32,
}

/// A parsed typeface description (the "typeface.json" format)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typeface {
    #[serde(default)]
    pub family_name: String,
    /// Glyphs keyed by the character they draw
    pub glyphs: HashMap<String, Glyph>,
    /// Font units per em
    pub resolution: f32,
    pub bounding_box: BoundingBox,
    #[serde(default)]
    pub underline_thickness: f32,
}

impl Typeface {
    /// Parse and sanity-check typeface JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let typeface: Typeface = serde_json::from_str(json)?;
        if !(typeface.resolution.is_finite() && typeface.resolution > 0.0) {
            return Err(ShatterError::FontParse(format!(
                "Typeface resolution must be positive, got {}",
                typeface.resolution
            )));
        }
        if typeface.glyphs.is_empty() {
            return Err(ShatterError::FontParse("Typeface has no glyphs".to_string()));
        }
        Ok(typeface)
    }

    /// Glyph for `c`, falling back to `?`
    pub fn glyph(&self, c: char) -> Option<&Glyph> {
        let mut buf = [0u8; 4];
        self.glyphs
            .get(c.encode_utf8(&mut buf) as &str)
            .or_else(|| self.glyphs.get(FALLBACK_GLYPH.encode_utf8(&mut buf) as &str))
    }

    /// Distance between baselines for text of the given size
    pub fn line_height(&self, size: f32) -> f32 {
        let scale = size / self.resolution;
        (self.bounding_box.y_max - self.bounding_box.y_min + self.underline_thickness) * scale
    }

    /// Lay out `text` at `size` and return the contours of each placed glyph.
    ///
    /// `\n` starts a new line below the previous one. Characters with neither a
    /// glyph nor a fallback are skipped.
    pub fn generate_outlines(&self, text: &str, size: f32) -> Result<Vec<Vec<Contour>>> {
        let scale = size / self.resolution;
        let line_height = self.line_height(size);
        let mut offset = [0.0f32, 0.0f32];
        let mut glyphs = Vec::new();

        for c in text.chars() {
            if c == '\n' {
                offset[0] = 0.0;
                offset[1] -= line_height;
                continue;
            }

            let Some(glyph) = self.glyph(c) else {
                tracing::warn!(
                    character = %c,
                    family = %self.family_name,
                    "character missing from typeface, skipping"
                );
                continue;
            };

            if let Some(outline) = &glyph.o {
                let contours = parse_outline(outline, scale, offset)?;
                if !contours.is_empty() {
                    glyphs.push(contours);
                }
            }
            offset[0] += glyph.ha * scale;
        }

        Ok(glyphs)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A tiny typeface: a square `I` glyph, an `O` with a square hole, space and `?`
    pub(crate) const TEST_TYPEFACE: &str = r#"{
        "familyName": "Test Sans",
        "resolution": 1000,
        "underlineThickness": 50,
        "boundingBox": { "yMin": -200, "yMax": 800, "xMin": 0, "xMax": 1000 },
        "glyphs": {
            "I": { "ha": 400, "x_min": 0, "x_max": 300, "o": "m 0 0 l 300 0 l 300 700 l 0 700 l 0 0 " },
            "O": { "ha": 800, "x_min": 0, "x_max": 700, "o": "m 0 0 l 700 0 l 700 700 l 0 700 l 0 0 m 200 200 l 200 500 l 500 500 l 500 200 l 200 200 " },
            "?": { "ha": 500, "x_min": 0, "x_max": 400, "o": "m 0 300 l 400 300 l 400 700 l 0 700 " },
            " ": { "ha": 300 }
        }
    }"#;

    pub(crate) fn test_typeface() -> Typeface {
        Typeface::from_json_str(TEST_TYPEFACE).unwrap()
    }

    #[test]
    fn parses_typeface_json() {
        let tf = test_typeface();
        assert_eq!(tf.family_name, "Test Sans");
        assert_eq!(tf.resolution, 1000.0);
        assert_eq!(tf.glyphs.len(), 4);
        assert!(tf.glyphs[" "].o.is_none());
    }

    #[test]
    fn rejects_bad_resolution() {
        let json = TEST_TYPEFACE.replace("\"resolution\": 1000", "\"resolution\": 0");
        assert!(Typeface::from_json_str(&json).is_err());
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(
            Typeface::from_json_str("<html>not found</html>"),
            Err(ShatterError::FontParse(_))
        ));
    }

    #[test]
    fn advances_by_horizontal_advance() {
        let tf = test_typeface();
        // size 10 at resolution 1000 => scale 0.01
        let glyphs = tf.generate_outlines("I I", 10.0).unwrap();
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0][0].start, [0.0, 0.0]);
        // 400 + 300 font units
        assert!((glyphs[1][0].start[0] - 7.0).abs() < 1e-5);
    }

    #[test]
    fn newline_moves_down_one_line() {
        let tf = test_typeface();
        let glyphs = tf.generate_outlines("I\nI", 10.0).unwrap();
        let expected = -(800.0 + 200.0 + 50.0) * 0.01;
        assert_eq!(glyphs[1][0].start[0], 0.0);
        assert!((glyphs[1][0].start[1] - expected).abs() < 1e-5);
    }

    #[test]
    fn unknown_characters_use_fallback() {
        let tf = test_typeface();
        let glyphs = tf.generate_outlines("Z", 10.0).unwrap();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0][0].start, [0.0, 3.0]);
    }

    #[test]
    fn missing_fallback_skips_character() {
        let mut tf = test_typeface();
        tf.glyphs.remove("?");
        let glyphs = tf.generate_outlines("ZI", 10.0).unwrap();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0][0].start, [0.0, 0.0]);
    }
}
