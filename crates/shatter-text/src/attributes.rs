//! Per-face color and displacement attributes for the shatter shader

use rand::seq::SliceRandom;
use rand::Rng;
use shatter_core::Color;

/// The three face colors, as sRGB hex
pub const DEFAULT_PALETTE: [u32; 3] = [0xe3c134, 0x829def, 0x2c2c5c];

/// Range of the per-face fall distance (Y displacement)
const FALL_RANGE: std::ops::Range<f32> = 2.0..12.0;
/// Range of the per-vertex X/Z scatter
const SCATTER_RANGE: std::ops::Range<f32> = -1.0..1.0;

/// Flat per-vertex attribute arrays, 9 floats per face (3 vertices x 3 components)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceAttributes {
    pub colors: Vec<f32>,
    pub displacement: Vec<f32>,
}

impl FaceAttributes {
    pub fn face_count(&self) -> usize {
        self.colors.len() / 9
    }

    /// Color of vertex `vertex` (0..3) of face `face`
    pub fn vertex_color(&self, face: usize, vertex: usize) -> [f32; 3] {
        let i = face * 9 + vertex * 3;
        [self.colors[i], self.colors[i + 1], self.colors[i + 2]]
    }

    /// Displacement of vertex `vertex` (0..3) of face `face`
    pub fn vertex_displacement(&self, face: usize, vertex: usize) -> [f32; 3] {
        let i = face * 9 + vertex * 3;
        [
            self.displacement[i],
            self.displacement[i + 1],
            self.displacement[i + 2],
        ]
    }
}

/// Generate colors and displacement for `face_count` faces.
///
/// Each face gets one palette color and one fall distance in [2, 12) shared by
/// its three vertices. X and Z are drawn per vertex from [-1, 1). An empty
/// palette colors everything white.
pub fn generate_face_attributes<R: Rng + ?Sized>(
    face_count: usize,
    palette: &[Color],
    rng: &mut R,
) -> FaceAttributes {
    let mut colors = Vec::with_capacity(face_count * 9);
    let mut displacement = Vec::with_capacity(face_count * 9);

    for _ in 0..face_count {
        let color = palette.choose(rng).copied().unwrap_or(Color::WHITE);
        let fall = rng.gen_range(FALL_RANGE);

        for _ in 0..3 {
            colors.extend_from_slice(&color.to_rgb());
            displacement.extend_from_slice(&[
                rng.gen_range(SCATTER_RANGE),
                fall,
                rng.gen_range(SCATTER_RANGE),
            ]);
        }
    }

    FaceAttributes {
        colors,
        displacement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn palette() -> Vec<Color> {
        DEFAULT_PALETTE.iter().map(|&h| Color::from_srgb_hex(h)).collect()
    }

    #[test]
    fn arrays_hold_nine_floats_per_face() {
        let mut rng = StdRng::seed_from_u64(1);
        let attrs = generate_face_attributes(37, &palette(), &mut rng);
        assert_eq!(attrs.colors.len(), 37 * 9);
        assert_eq!(attrs.displacement.len(), 37 * 9);
        assert_eq!(attrs.face_count(), 37);
    }

    #[test]
    fn face_vertices_share_color_and_fall() {
        let mut rng = StdRng::seed_from_u64(7);
        let palette = palette();
        let attrs = generate_face_attributes(500, &palette, &mut rng);

        for f in 0..attrs.face_count() {
            let color = attrs.vertex_color(f, 0);
            let fall = attrs.vertex_displacement(f, 0)[1];
            assert!(palette.iter().any(|c| c.to_rgb() == color));
            assert!((2.0..=12.0).contains(&fall));

            for v in 0..3 {
                assert_eq!(attrs.vertex_color(f, v), color);
                let d = attrs.vertex_displacement(f, v);
                assert_eq!(d[1], fall);
                assert!((-1.0..=1.0).contains(&d[0]));
                assert!((-1.0..=1.0).contains(&d[2]));
            }
        }
    }

    #[test]
    fn scatter_varies_per_vertex() {
        let mut rng = StdRng::seed_from_u64(3);
        let attrs = generate_face_attributes(50, &palette(), &mut rng);
        let varied = (0..50).any(|f| {
            attrs.vertex_displacement(f, 0)[0] != attrs.vertex_displacement(f, 1)[0]
        });
        assert!(varied);
    }

    #[test]
    fn all_palette_entries_are_used() {
        let mut rng = StdRng::seed_from_u64(11);
        let palette = palette();
        let attrs = generate_face_attributes(300, &palette, &mut rng);
        for c in &palette {
            assert!((0..300).any(|f| attrs.vertex_color(f, 0) == c.to_rgb()));
        }
    }

    #[test]
    fn same_seed_same_attributes() {
        let a = generate_face_attributes(64, &palette(), &mut StdRng::seed_from_u64(42));
        let b = generate_face_attributes(64, &palette(), &mut StdRng::seed_from_u64(42));
        let c = generate_face_attributes(64, &palette(), &mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_faces_and_empty_palette() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_face_attributes(0, &palette(), &mut rng),
            FaceAttributes::default()
        );
        let attrs = generate_face_attributes(2, &[], &mut rng);
        assert_eq!(attrs.vertex_color(1, 2), [1.0, 1.0, 1.0]);
    }
}
