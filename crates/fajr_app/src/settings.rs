use fajr_core::color;
use glam::Vec3;

/// Parameters handed to the external rasterizer.
///
/// ```rust,ignore
/// let settings = RendererSettings {
///     shadows: false,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// 4x MSAA when enabled.
    pub antialias: bool,
    pub vsync: bool,
    pub power_preference: wgpu::PowerPreference,

    /// ACES filmic exposure.
    pub tone_mapping_exposure: f32,
    /// Device pixel ratio is clamped into `[min, max]`.
    pub dpr_range: [f32; 2],
    pub shadows: bool,

    pub clear_color: wgpu::Color,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            tone_mapping_exposure: 1.2,
            dpr_range: [1.0, 1.75],
            shadows: true,
            clear_color: wgpu::Color::BLACK,
        }
    }
}

impl RendererSettings {
    #[inline]
    #[must_use]
    pub fn msaa_samples(&self) -> u32 {
        if self.antialias { 4 } else { 1 }
    }

    /// Clamps a device's native pixel ratio into the configured range.
    #[must_use]
    pub fn pixel_ratio(&self, device_ratio: f32) -> f32 {
        let [min, max] = self.dpr_range;
        device_ratio.clamp(min, max)
    }

    /// Drawing-buffer size for a CSS-pixel viewport.
    #[must_use]
    pub fn framebuffer_size(&self, width: u32, height: u32, device_ratio: f32) -> (u32, u32) {
        let ratio = self.pixel_ratio(device_ratio);
        let scale = |v: u32| ((v as f32 * ratio).round() as u32).max(1);
        (scale(width), scale(height))
    }

    /// Sets the clear color from sRGB components, converting to the linear
    /// values wgpu expects for an sRGB surface.
    pub fn set_clear_color(&mut self, srgb: Vec3) {
        let linear = color::srgb_to_linear(srgb);
        self.clear_color = wgpu::Color {
            r: f64::from(linear.x),
            g: f64::from(linear.y),
            b: f64::from(linear.z),
            a: 1.0,
        };
    }
}
