//! Non-indexed triangle mesh produced by the text pipeline

use shatter_core::Vec3;

/// A triangle soup: every 3 consecutive vertices form one face, no sharing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

impl TextMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append a face, deriving its flat normal from the winding (counter-clockwise = front)
    pub fn push_face(&mut self, a: [f32; 3], b: [f32; 3], c: [f32; 3]) {
        let normal = face_normal(a, b, c);
        self.push_face_with_normals(a, b, c, [normal; 3]);
    }

    /// Append a face with explicit per-vertex normals
    pub fn push_face_with_normals(
        &mut self,
        a: [f32; 3],
        b: [f32; 3],
        c: [f32; 3],
        normals: [[f32; 3]; 3],
    ) {
        self.positions.extend_from_slice(&[a, b, c]);
        self.normals.extend_from_slice(&normals);
    }

    /// Positions of face `index`
    pub fn face(&self, index: usize) -> [[f32; 3]; 3] {
        let i = index * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    /// Axis-aligned bounds as (min, max), or `None` for an empty mesh
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        let (mut min, mut max) = (first, first);
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }

    /// Translate so the bounding box is centered on the origin
    pub fn center(&mut self) {
        let Some((min, max)) = self.bounding_box() else {
            return;
        };
        let offset = [
            -(min[0] + max[0]) * 0.5,
            -(min[1] + max[1]) * 0.5,
            -(min[2] + max[2]) * 0.5,
        ];
        for p in &mut self.positions {
            p[0] += offset[0];
            p[1] += offset[1];
            p[2] += offset[2];
        }
    }

    /// Total surface area, summed over faces
    pub fn surface_area(&self) -> f32 {
        (0..self.face_count())
            .map(|f| {
                let [a, b, c] = self.face(f).map(Vec3::from_array);
                (b - a).cross(&(c - a)).length() * 0.5
            })
            .sum()
    }
}

/// Unit normal of a counter-clockwise triangle; zero when degenerate
pub(crate) fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let (a, b, c) = (Vec3::from_array(a), Vec3::from_array(b), Vec3::from_array(c));
    (b - a).cross(&(c - a)).normalized().to_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_face_computes_flat_normal() {
        let mut mesh = TextMesh::new();
        mesh.push_face([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn center_moves_bounds_to_origin() {
        let mut mesh = TextMesh::new();
        mesh.push_face([2.0, 2.0, 0.0], [6.0, 2.0, 0.0], [6.0, 4.0, 1.0]);
        mesh.center();
        let (min, max) = mesh.bounding_box().unwrap();
        assert_eq!(min, [-2.0, -1.0, -0.5]);
        assert_eq!(max, [2.0, 1.0, 0.5]);
    }

    #[test]
    fn center_on_empty_mesh_is_noop() {
        let mut mesh = TextMesh::new();
        mesh.center();
        assert!(mesh.is_empty());
        assert!(mesh.bounding_box().is_none());
    }

    #[test]
    fn surface_area_of_unit_square() {
        let mut mesh = TextMesh::new();
        mesh.push_face([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]);
        mesh.push_face([0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]);
        assert!((mesh.surface_area() - 1.0).abs() < 1e-6);
    }
}
