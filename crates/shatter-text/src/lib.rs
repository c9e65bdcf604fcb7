//! Shatter Text - from a typeface to a shatterable text mesh
//!
//! The pipeline, in order:
//! 1. `FontLoader` resolves a `FontSource` (URL or file) into a `Typeface`
//! 2. `Typeface::generate_outlines` lays out a string as glyph contours
//! 3. `TextGeometry::build` flattens, triangulates and extrudes them into a `TextMesh`
//! 4. `TessellateModifier` subdivides long edges so faces are small
//! 5. `generate_face_attributes` assigns per-face colors and displacement

mod attributes;
mod geometry;
mod loader;
mod mesh;
mod outline;
mod tessellate;
mod typeface;

pub use attributes::{generate_face_attributes, FaceAttributes, DEFAULT_PALETTE};
pub use geometry::{TextGeometry, TextOptions};
pub use loader::{FontLoader, FontSource, DEFAULT_FONT_URL};
pub use mesh::TextMesh;
pub use outline::{Contour, Segment};
pub use tessellate::TessellateModifier;
pub use typeface::{Glyph, Typeface};
