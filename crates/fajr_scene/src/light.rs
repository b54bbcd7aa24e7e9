use glam::Vec3;

/// Orthographic shadow camera and map parameters for a directional light.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowConfig {
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub bias: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 512,
            near: 0.5,
            far: 500.0,
            left: -5.0,
            right: 5.0,
            top: 5.0,
            bottom: -5.0,
            bias: 0.0,
        }
    }
}

impl ShadowConfig {
    /// Square shadow frustum of half-extent `extent`.
    #[must_use]
    pub fn square(map_size: u32, near: f32, far: f32, extent: f32) -> Self {
        Self {
            map_size,
            near,
            far,
            left: -extent,
            right: extent,
            top: extent,
            bottom: -extent,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Point the light aims at; the direction is `target - node position`.
    pub target: Vec3,
    pub shadow: Option<ShadowConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional(DirectionalLight),
}

/// Light component attached to a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self { color, intensity, kind: LightKind::Ambient }
    }

    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional(DirectionalLight { target: Vec3::ZERO, shadow: None }),
        }
    }

    /// Enables shadow casting; ignored for ambient lights.
    #[must_use]
    pub fn with_shadow(mut self, shadow: ShadowConfig) -> Self {
        if let LightKind::Directional(dir) = &mut self.kind {
            dir.shadow = Some(shadow);
        }
        self
    }

    #[must_use]
    pub fn casts_shadows(&self) -> bool {
        matches!(&self.kind, LightKind::Directional(DirectionalLight { shadow: Some(_), .. }))
    }
}
