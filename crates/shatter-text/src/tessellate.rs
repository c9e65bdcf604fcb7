//! Edge-splitting tessellation modifier

use crate::mesh::TextMesh;
use serde::{Deserialize, Serialize};
use shatter_core::{Result, ShatterError, Vec3};

/// Upper bound on `max_iterations`; each pass can double the face count
pub const MAX_ITERATIONS: u32 = 12;

/// Splits faces along their longest edge until every edge is short enough.
///
/// Each pass splits every face whose longest edge exceeds `max_edge_length`
/// at that edge's midpoint. Passes stop once nothing was split or after
/// `max_iterations` passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellateModifier {
    pub max_edge_length: f32,
    pub max_iterations: u32,
}

impl Default for TessellateModifier {
    fn default() -> Self {
        Self {
            max_edge_length: 8.0,
            max_iterations: 6,
        }
    }
}

struct Corner {
    position: Vec3,
    normal: Vec3,
}

impl Corner {
    fn lerp_mid(&self, other: &Corner) -> Corner {
        Corner {
            position: self.position.midpoint(&other.position),
            normal: self.normal.midpoint(&other.normal).normalized(),
        }
    }
}

impl TessellateModifier {
    pub fn new(max_edge_length: f32, max_iterations: u32) -> Self {
        Self {
            max_edge_length,
            max_iterations,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_edge_length.is_finite() && self.max_edge_length > 0.0) {
            return Err(ShatterError::NotPositive {
                field: "tessellation.max_edge_length".to_string(),
                value: self.max_edge_length as f64,
            });
        }
        if self.max_iterations > MAX_ITERATIONS {
            return Err(ShatterError::AboveMaximum {
                field: "tessellation.max_iterations".to_string(),
                max: MAX_ITERATIONS as f64,
                value: self.max_iterations as f64,
            });
        }
        Ok(())
    }

    /// Return a subdivided copy of `mesh`. Winding order is preserved.
    pub fn modify(&self, mesh: &TextMesh) -> TextMesh {
        let max_sq = self.max_edge_length * self.max_edge_length;
        let mut current = mesh.clone();
        let mut iteration = 0;
        let mut tessellating = true;

        while tessellating && iteration < self.max_iterations {
            iteration += 1;
            tessellating = false;

            let mut next = TextMesh::new();
            for f in 0..current.face_count() {
                let i = f * 3;
                let corner = |k: usize| Corner {
                    position: Vec3::from_array(current.positions[i + k]),
                    normal: Vec3::from_array(current.normals[i + k]),
                };
                let (va, vb, vc) = (corner(0), corner(1), corner(2));

                let dab = va.position.distance_squared(&vb.position);
                let dbc = vb.position.distance_squared(&vc.position);
                let dac = va.position.distance_squared(&vc.position);

                if dab > max_sq || dbc > max_sq || dac > max_sq {
                    tessellating = true;
                    if dab >= dbc && dab >= dac {
                        let vm = va.lerp_mid(&vb);
                        push(&mut next, &va, &vm, &vc);
                        push(&mut next, &vm, &vb, &vc);
                    } else if dbc >= dab && dbc >= dac {
                        let vm = vb.lerp_mid(&vc);
                        push(&mut next, &va, &vb, &vm);
                        push(&mut next, &vm, &vc, &va);
                    } else {
                        let vm = va.lerp_mid(&vc);
                        push(&mut next, &va, &vb, &vm);
                        push(&mut next, &vm, &vb, &vc);
                    }
                } else {
                    push(&mut next, &va, &vb, &vc);
                }
            }
            current = next;
        }

        tracing::debug!(
            faces_in = mesh.face_count(),
            faces_out = current.face_count(),
            passes = iteration,
            "tessellated mesh"
        );
        current
    }
}

fn push(mesh: &mut TextMesh, a: &Corner, b: &Corner, c: &Corner) {
    mesh.push_face_with_normals(
        a.position.to_array(),
        b.position.to_array(),
        c.position.to_array(),
        [
            a.normal.to_array(),
            b.normal.to_array(),
            c.normal.to_array(),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::face_normal;

    fn big_square() -> TextMesh {
        let mut mesh = TextMesh::new();
        mesh.push_face([0.0, 0.0, 0.0], [20.0, 0.0, 0.0], [20.0, 20.0, 0.0]);
        mesh.push_face([0.0, 0.0, 0.0], [20.0, 20.0, 0.0], [0.0, 20.0, 0.0]);
        mesh
    }

    fn longest_edge(mesh: &TextMesh) -> f32 {
        (0..mesh.face_count())
            .map(|f| {
                let [a, b, c] = mesh.face(f).map(Vec3::from_array);
                a.distance_squared(&b)
                    .max(b.distance_squared(&c))
                    .max(a.distance_squared(&c))
                    .sqrt()
            })
            .fold(0.0, f32::max)
    }

    #[test]
    fn defaults() {
        let m = TessellateModifier::default();
        assert_eq!(m.max_edge_length, 8.0);
        assert_eq!(m.max_iterations, 6);
    }

    #[test]
    fn small_faces_are_untouched() {
        let mut mesh = TextMesh::new();
        mesh.push_face([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let out = TessellateModifier::default().modify(&mesh);
        assert_eq!(out, mesh);
    }

    #[test]
    fn splits_until_edges_are_short() {
        let mesh = big_square();
        let out = TessellateModifier::new(8.0, 20).modify(&mesh);
        assert!(longest_edge(&out) <= 8.0 + 1e-4);
        assert!(out.face_count() > mesh.face_count());
    }

    #[test]
    fn preserves_area_and_winding() {
        let mesh = big_square();
        let out = TessellateModifier::default().modify(&mesh);
        assert!((out.surface_area() - mesh.surface_area()).abs() < 1e-2);
        for f in 0..out.face_count() {
            let [a, b, c] = out.face(f);
            let n = face_normal(a, b, c);
            assert!((n[2] - 1.0).abs() < 1e-5, "face {f} flipped");
            assert_eq!(out.normals[f * 3], [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn iteration_limit_bounds_growth() {
        let mesh = big_square();
        let out = TessellateModifier::new(0.001, 3).modify(&mesh);
        // each pass at most doubles the face count
        assert_eq!(out.face_count(), mesh.face_count() * 8);
    }

    #[test]
    fn validate_caps_iterations() {
        assert!(TessellateModifier::default().validate().is_ok());
        assert!(TessellateModifier::new(8.0, MAX_ITERATIONS).validate().is_ok());
        assert!(matches!(
            TessellateModifier::new(8.0, MAX_ITERATIONS + 1).validate(),
            Err(ShatterError::AboveMaximum { .. })
        ));
        assert!(TessellateModifier::new(0.0, 6).validate().is_err());
        assert!(TessellateModifier::new(f32::NAN, 6).validate().is_err());
    }

    #[test]
    fn zero_iterations_is_identity() {
        let mesh = big_square();
        let out = TessellateModifier::new(1.0, 0).modify(&mesh);
        assert_eq!(out, mesh);
    }
}
