use crate::geometry::Geometry;

/// A rectangle in the XY plane facing +Z.
pub struct PlaneOptions {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

impl PlaneOptions {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ..Self::default() }
    }

    #[must_use]
    pub fn segments(mut self, width_segments: u32, height_segments: u32) -> Self {
        self.width_segments = width_segments;
        self.height_segments = height_segments;
        self
    }
}

#[must_use]
pub fn create_plane(options: PlaneOptions) -> Geometry {
    let width_half = options.width / 2.0;
    let height_half = options.height / 2.0;

    let grid_x = options.width_segments.max(1);
    let grid_y = options.height_segments.max(1);
    let grid_x1 = grid_x + 1;

    let segment_width = options.width / grid_x as f32;
    let segment_height = options.height / grid_y as f32;

    let vertex_count = (grid_x1 * (grid_y + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);
    let mut indices = Vec::with_capacity((grid_x * grid_y * 6) as usize);

    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - width_half;

            // Rows run top to bottom so that v grows downwards in UV space.
            positions.push([x, -y, 0.0]);
            normals.push([0.0, 0.0, 1.0]);
            uvs.push([ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32]);
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = ix + grid_x1 * iy;
            let b = ix + grid_x1 * (iy + 1);
            let c = (ix + 1) + grid_x1 * (iy + 1);
            let d = (ix + 1) + grid_x1 * iy;

            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    Geometry::from_buffers(&positions, &normals, &uvs, indices)
}
