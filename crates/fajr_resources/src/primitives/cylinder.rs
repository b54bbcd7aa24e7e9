use std::f32::consts::TAU;

use crate::geometry::Geometry;

/// A (possibly tapered) capped cylinder along Y.
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
        }
    }
}

impl CylinderOptions {
    #[must_use]
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self { radius_top, radius_bottom, height, radial_segments }
    }
}

#[must_use]
pub fn create_cylinder(options: CylinderOptions) -> Geometry {
    let segments = options.radial_segments.max(3);
    let half_height = options.height / 2.0;
    let slope = (options.radius_bottom - options.radius_top) / options.height.max(f32::EPSILON);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    // Side wall: two rings, top then bottom.
    for (row, (radius, y)) in [
        (options.radius_top, half_height),
        (options.radius_bottom, -half_height),
    ]
    .into_iter()
    .enumerate()
    {
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            positions.push([radius * sin, y, radius * cos]);
            let n = glam::Vec3::new(sin, slope, cos).normalize();
            normals.push(n.to_array());
            uvs.push([u, 1.0 - row as f32]);
        }
    }
    let ring = segments + 1;
    for s in 0..segments {
        let a = s;
        let b = s + ring;
        let c = s + ring + 1;
        let d = s + 1;
        indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    // Caps.
    for (radius, y, sign) in [
        (options.radius_top, half_height, 1.0_f32),
        (options.radius_bottom, -half_height, -1.0_f32),
    ] {
        if radius <= 0.0 {
            continue;
        }
        let center = positions.len() as u32;
        positions.push([0.0, y, 0.0]);
        normals.push([0.0, sign, 0.0]);
        uvs.push([0.5, 0.5]);

        for s in 0..=segments {
            let (sin, cos) = (s as f32 / segments as f32 * TAU).sin_cos();
            positions.push([radius * sin, y, radius * cos]);
            normals.push([0.0, sign, 0.0]);
            uvs.push([(cos * 0.5) + 0.5, (sin * 0.5 * sign) + 0.5]);
        }

        for s in 0..segments {
            let i = center + 1 + s;
            if sign > 0.0 {
                indices.extend_from_slice(&[i, i + 1, center]);
            } else {
                indices.extend_from_slice(&[i + 1, i, center]);
            }
        }
    }

    Geometry::from_buffers(&positions, &normals, &uvs, indices)
}
