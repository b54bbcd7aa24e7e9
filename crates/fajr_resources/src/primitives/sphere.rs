use std::f32::consts::PI;

use crate::geometry::Geometry;

pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

impl SphereOptions {
    #[must_use]
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self { radius, width_segments, height_segments }
    }
}

/// UV sphere. Latitude runs from the north pole (+Y) to the south pole;
/// the degenerate triangles touching either pole are skipped.
#[must_use]
pub fn create_sphere(options: SphereOptions) -> Geometry {
    let radius = options.radius;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);
    let stride = width_segments + 1;

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        let theta = v * PI;

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * 2.0 * PI;

            let normal = [
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            ];
            positions.push(normal.map(|n| n * radius));
            normals.push(normal);
            uvs.push([u, 1.0 - v]);
        }
    }

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Geometry::from_buffers(&positions, &normals, &uvs, indices)
}
