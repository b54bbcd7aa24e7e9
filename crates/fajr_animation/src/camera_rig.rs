use glam::{DVec3, Vec3};

use fajr_core::Transform;

/// Point the camera orbits around and keeps looking at.
pub const LOOK_TARGET: DVec3 = DVec3::new(0.0, 1.25, 0.0);

/// Slow elliptical orbit with a gentle vertical bob.
///
/// ```text
/// theta = t * angular_speed
/// h     = base_height + sin(t * bob_frequency) * bob_amplitude
/// pos   = (cos(theta) * r, h, sin(theta) * r * z_squash)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub radius: f64,
    pub angular_speed: f64,
    pub z_squash: f64,
    pub base_height: f64,
    pub bob_amplitude: f64,
    pub bob_frequency: f64,
    pub target: DVec3,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            radius: 7.4,
            angular_speed: 0.12,
            z_squash: 0.92,
            base_height: 3.0,
            bob_amplitude: 0.25,
            bob_frequency: 0.48,
            target: LOOK_TARGET,
        }
    }
}

/// Camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub target: DVec3,
}

impl CameraRig {
    /// Orbit angle in radians at `t`.
    #[inline]
    #[must_use]
    pub fn theta(&self, t: f64) -> f64 {
        t * self.angular_speed
    }

    #[inline]
    #[must_use]
    pub fn height(&self, t: f64) -> f64 {
        self.base_height + (t * self.bob_frequency).sin() * self.bob_amplitude
    }

    #[must_use]
    pub fn pose(&self, t: f64) -> CameraPose {
        let theta = self.theta(t);
        CameraPose {
            position: DVec3::new(
                theta.cos() * self.radius,
                self.height(t),
                theta.sin() * self.radius * self.z_squash,
            ),
            target: self.target,
        }
    }

    /// Moves the camera onto the orbit and aims it at the target.
    pub fn apply(&self, t: f64, transform: &mut Transform) {
        let pose = self.pose(t);
        transform.position = pose.position.as_vec3();
        transform.look_at(pose.target.as_vec3(), Vec3::Y);
    }
}
