use bitflags::bitflags;
use glam::Vec3;

bitflags! {
    /// Render-state switches shared by all material kinds.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MaterialFlags: u32 {
        const TRANSPARENT      = 1 << 0;
        const DEPTH_WRITE      = 1 << 1;
        const SIZE_ATTENUATION = 1 << 2;
        const POLYGON_OFFSET   = 1 << 3;
    }
}

impl Default for MaterialFlags {
    fn default() -> Self {
        Self::DEPTH_WRITE
    }
}

/// Unlit material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBasicMaterial {
    pub color: Vec3,
    pub opacity: f32,
}

impl MeshBasicMaterial {
    #[must_use]
    pub fn new(color: Vec3) -> Self {
        Self { color, opacity: 1.0 }
    }
}

/// Metallic-roughness PBR material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshStandardMaterial {
    pub color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub env_map_intensity: f32,
    pub displacement_scale: f32,
    pub polygon_offset_factor: f32,
}

impl MeshStandardMaterial {
    #[must_use]
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            roughness: 1.0,
            metalness: 0.0,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            opacity: 1.0,
            env_map_intensity: 1.0,
            displacement_scale: 1.0,
            polygon_offset_factor: 0.0,
        }
    }
}

/// Screen-aligned point sprites.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Vec3,
    pub size: f32,
    pub opacity: f32,
}

impl PointsMaterial {
    #[must_use]
    pub fn new(color: Vec3, size: f32) -> Self {
        Self { color, size, opacity: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MaterialData {
    Basic(MeshBasicMaterial),
    Standard(MeshStandardMaterial),
    Points(PointsMaterial),
}

impl MaterialData {
    #[must_use]
    pub fn shader_name(&self) -> &'static str {
        match self {
            Self::Basic(_) => "mesh_basic",
            Self::Standard(_) => "mesh_standard",
            Self::Points(_) => "points",
        }
    }
}

/// A material: shading model parameters plus render-state flags.
///
/// Built with chained setters:
///
/// ```rust,ignore
/// let sheen = Material::basic(color::hex(0xf7b97c))
///     .with_opacity(0.07)
///     .without_depth_write();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub data: MaterialData,
    pub flags: MaterialFlags,
}

impl Material {
    #[must_use]
    pub fn new(data: MaterialData) -> Self {
        Self { data, flags: MaterialFlags::default() }
    }

    #[must_use]
    pub fn basic(color: Vec3) -> Self {
        Self::new(MaterialData::Basic(MeshBasicMaterial::new(color)))
    }

    #[must_use]
    pub fn standard(color: Vec3) -> Self {
        Self::new(MaterialData::Standard(MeshStandardMaterial::new(color)))
    }

    #[must_use]
    pub fn points(color: Vec3, size: f32) -> Self {
        Self::new(MaterialData::Points(PointsMaterial::new(color, size)))
    }

    /// Sets opacity and marks the material transparent when below 1.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        match &mut self.data {
            MaterialData::Basic(m) => m.opacity = opacity,
            MaterialData::Standard(m) => m.opacity = opacity,
            MaterialData::Points(m) => m.opacity = opacity,
        }
        self.flags.set(MaterialFlags::TRANSPARENT, opacity < 1.0);
        self
    }

    #[must_use]
    pub fn without_depth_write(mut self) -> Self {
        self.flags.remove(MaterialFlags::DEPTH_WRITE);
        self
    }

    #[must_use]
    pub fn with_size_attenuation(mut self) -> Self {
        self.flags.insert(MaterialFlags::SIZE_ATTENUATION);
        self
    }

    /// Applies `f` to the PBR parameters; no-op on other material kinds.
    #[must_use]
    pub fn with_standard(mut self, f: impl FnOnce(&mut MeshStandardMaterial)) -> Self {
        if let MaterialData::Standard(m) = &mut self.data {
            f(m);
            self.flags.set(MaterialFlags::POLYGON_OFFSET, m.polygon_offset_factor != 0.0);
        }
        self
    }

    #[must_use]
    pub fn color(&self) -> Vec3 {
        match &self.data {
            MaterialData::Basic(m) => m.color,
            MaterialData::Standard(m) => m.color,
            MaterialData::Points(m) => m.color,
        }
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        match &self.data {
            MaterialData::Basic(m) => m.opacity,
            MaterialData::Standard(m) => m.opacity,
            MaterialData::Points(m) => m.opacity,
        }
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.flags.contains(MaterialFlags::TRANSPARENT)
    }

    #[must_use]
    pub fn shader_name(&self) -> &'static str {
        self.data.shader_name()
    }

    #[must_use]
    pub fn as_standard(&self) -> Option<&MeshStandardMaterial> {
        match &self.data {
            MaterialData::Standard(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_points(&self) -> Option<&PointsMaterial> {
        match &self.data {
            MaterialData::Points(m) => Some(m),
            _ => None,
        }
    }
}
