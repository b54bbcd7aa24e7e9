use glam::Vec3;

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    #[must_use]
    pub fn new(color: Vec3, near: f32, far: f32) -> Self {
        Self { color, near, far }
    }

    /// Fog blend factor in `[0, 1]` at view distance `distance`.
    #[must_use]
    pub fn factor(&self, distance: f32) -> f32 {
        if self.far <= self.near {
            return if distance >= self.far { 1.0 } else { 0.0 };
        }
        ((distance - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

/// Named image-based-lighting presets the renderer knows how to bake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentPreset {
    Sunset,
    Dawn,
    Night,
}

impl EnvironmentPreset {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunset => "sunset",
            Self::Dawn => "dawn",
            Self::Night => "night",
        }
    }
}

/// Image-based lighting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub preset: Option<EnvironmentPreset>,
    /// Cube face resolution of the baked environment.
    pub resolution: u32,
    pub intensity: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self { preset: None, resolution: 256, intensity: 1.0 }
    }
}

/// Analytic atmospheric sky (Preetham-style parameters).
#[derive(Debug, Clone, PartialEq)]
pub struct Sky {
    pub distance: f32,
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub sun_position: Vec3,
    pub inclination: f32,
    pub azimuth: f32,
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            distance: 1000.0,
            turbidity: 10.0,
            rayleigh: 1.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            sun_position: Vec3::Y,
            inclination: 0.6,
            azimuth: 0.1,
        }
    }
}

impl Sky {
    /// Unit vector towards the sun.
    #[must_use]
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_position.normalize_or(Vec3::Y)
    }

    /// Sun elevation above the horizon, radians.
    #[must_use]
    pub fn sun_elevation(&self) -> f32 {
        self.sun_direction().y.asin()
    }
}
