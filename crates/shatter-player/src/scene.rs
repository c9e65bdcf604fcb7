//! Builds the shattering text mesh and its per-face attributes from config

use crate::config::ShatterConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shatter_core::Result;
use shatter_text::{generate_face_attributes, FaceAttributes, TextGeometry, TextMesh, Typeface};

/// Everything the renderer needs that does not change frame to frame
#[derive(Debug, Clone)]
pub struct ShatterScene {
    pub mesh: TextMesh,
    pub attributes: FaceAttributes,
}

impl ShatterScene {
    /// Extrude the configured text, subdivide it and assign face attributes.
    ///
    /// With `config.seed` set the colors and displacement are reproducible.
    pub fn build(config: &ShatterConfig, typeface: &Typeface) -> Result<Self> {
        let text = TextGeometry::build(typeface, &config.text.content, &config.text.options)?;
        let mesh = config.tessellation.modify(&text);

        tracing::info!(
            text = %config.text.content,
            faces = text.face_count(),
            tessellated_faces = mesh.face_count(),
            "built text geometry"
        );

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let palette = config.render.palette_colors();
        let attributes = generate_face_attributes(mesh.face_count(), &palette, &mut rng);

        Ok(Self { mesh, attributes })
    }

    pub fn face_count(&self) -> usize {
        self.mesh.face_count()
    }
}
