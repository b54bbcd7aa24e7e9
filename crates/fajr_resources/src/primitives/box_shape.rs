use crate::geometry::Geometry;

pub struct BoxOptions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self { width: 1.0, height: 1.0, depth: 1.0 }
    }
}

impl BoxOptions {
    #[must_use]
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }
}

/// Axis-aligned box with four unshared vertices per face so that every face
/// gets a flat normal.
#[must_use]
pub fn create_box(options: BoxOptions) -> Geometry {
    let w = options.width / 2.0;
    let h = options.height / 2.0;
    let d = options.depth / 2.0;

    // (normal, u axis, v axis, half extents along normal/u/v)
    let faces: [([f32; 3], [f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [w, d, h]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [w, d, h]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [h, w, d]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [h, w, d]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [d, w, h]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [d, w, h]),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (n, u, v, [en, eu, ev]) in faces {
        let base = positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            positions.push([
                n[0] * en + u[0] * su * eu + v[0] * sv * ev,
                n[1] * en + u[1] * su * eu + v[1] * sv * ev,
                n[2] * en + u[2] * su * eu + v[2] * sv * ev,
            ]);
            normals.push(n);
            uvs.push([(su + 1.0) / 2.0, (1.0 - sv) / 2.0]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Geometry::from_buffers(&positions, &normals, &uvs, indices)
}
