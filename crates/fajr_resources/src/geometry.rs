use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;
use wgpu::{PrimitiveTopology, VertexFormat};

/// A single vertex attribute stored as raw little-endian bytes, tagged with
/// the vertex format the renderer should bind it with.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub data: Vec<u8>,
    pub format: VertexFormat,
    pub count: u32,
    pub stride: u64,
}

impl Attribute {
    /// Creates a tightly packed (non-interleaved) attribute.
    pub fn new_planar<T: bytemuck::Pod>(data: &[T], format: VertexFormat) -> Self {
        Self {
            data: bytemuck::cast_slice(data).to_vec(),
            format,
            count: data.len() as u32,
            stride: std::mem::size_of::<T>() as u64,
        }
    }

    /// Reads element `i` as a `Vec3`. Only valid for `Float32x3` data.
    #[must_use]
    pub fn read_vec3(&self, i: u32) -> Option<Vec3> {
        if self.format != VertexFormat::Float32x3 {
            return None;
        }
        let offset = i as usize * self.stride as usize;
        let bytes = self.data.get(offset..offset + 12)?;
        let vals: [f32; 3] = bytemuck::pod_read_unaligned(bytes);
        Some(Vec3::from_array(vals))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// An inverted box that any point expands.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::empty(), |mut bb, p| {
            bb.min = bb.min.min(p);
            bb.max = bb.max.max(p);
            bb
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Bounds of the eight transformed corners.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        if self.is_empty() {
            return *self;
        }
        let (lo, hi) = (self.min, self.max);
        let corners = [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ];
        Self::from_points(corners.into_iter().map(|c| matrix.transform_point3(c)))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// CPU-side geometry: named attributes plus optional indices.
///
/// Every primitive generator emits `position`, `normal` and `uv`.
#[derive(Debug, Clone)]
pub struct Geometry {
    attributes: FxHashMap<String, Attribute>,
    indices: Option<Vec<u32>>,
    pub topology: PrimitiveTopology,
    pub bounding_box: BoundingBox,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attributes: FxHashMap::default(),
            indices: None,
            topology: PrimitiveTopology::TriangleList,
            bounding_box: BoundingBox::empty(),
        }
    }

    pub fn set_attribute(&mut self, name: &str, attr: Attribute) {
        self.attributes.insert(name.to_string(), attr);
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.indices = Some(indices);
    }

    #[must_use]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.attribute("position").map_or(0, |a| a.count)
    }

    /// Recomputes [`Geometry::bounding_box`] from the `position` attribute.
    pub fn compute_bounding_volume(&mut self) {
        let Some(positions) = self.attributes.get("position") else {
            self.bounding_box = BoundingBox::empty();
            return;
        };
        self.bounding_box =
            BoundingBox::from_points((0..positions.count).filter_map(|i| positions.read_vec3(i)));
    }

    /// Assembles the standard position/normal/uv triangle geometry used by
    /// all primitive generators.
    #[must_use]
    pub fn from_buffers(
        positions: &[[f32; 3]],
        normals: &[[f32; 3]],
        uvs: &[[f32; 2]],
        indices: Vec<u32>,
    ) -> Self {
        let mut geo = Self::new();
        geo.set_attribute("position", Attribute::new_planar(positions, VertexFormat::Float32x3));
        geo.set_attribute("normal", Attribute::new_planar(normals, VertexFormat::Float32x3));
        geo.set_attribute("uv", Attribute::new_planar(uvs, VertexFormat::Float32x2));
        geo.set_indices(indices);
        geo.compute_bounding_volume();
        geo
    }

    /// Point-list geometry over a flat `[x, y, z, x, y, z, ...]` buffer.
    #[must_use]
    pub fn new_points(flat_positions: &[f32]) -> Self {
        let positions: Vec<[f32; 3]> = flat_positions
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();

        let mut geo = Self::new();
        geo.topology = PrimitiveTopology::PointList;
        geo.set_attribute("position", Attribute::new_planar(&positions, VertexFormat::Float32x3));
        geo.compute_bounding_volume();
        geo
    }
}
