//! Idle motion for the praying figure: body bob, cloth sway, hand lift and
//! the floating wrapper group.

use fajr_core::Transform;
use glam::DVec3;
use rand::RngExt;

// ============================================================================
// Figure bob & cloth sway
// ============================================================================

/// Breathing bob of the figure plus a slow sway of the hanging cloth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSway {
    pub rest_height: f64,
    pub bob_amplitude: f64,
    pub bob_frequency: f64,
    pub cloth_tilt: f64,
    pub cloth_amplitude: f64,
    pub cloth_frequency: f64,
    pub cloth_tilt_gain: f64,
    pub cloth_shift_gain: f64,
}

impl Default for FigureSway {
    fn default() -> Self {
        Self {
            rest_height: 1.2,
            bob_amplitude: 0.02,
            bob_frequency: 0.8,
            cloth_tilt: 0.06,
            cloth_amplitude: 0.01,
            cloth_frequency: 0.4,
            cloth_tilt_gain: 2.5,
            cloth_shift_gain: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigurePose {
    pub figure_y: f64,
    pub cloth_rotation_z: f64,
    pub cloth_x: f64,
}

impl FigureSway {
    #[must_use]
    pub fn pose(&self, t: f64) -> FigurePose {
        let bob = (t * self.bob_frequency).sin() * self.bob_amplitude;
        let subtle = (t * self.cloth_frequency).sin() * self.cloth_amplitude;
        FigurePose {
            figure_y: self.rest_height + bob,
            cloth_rotation_z: self.cloth_tilt + subtle * self.cloth_tilt_gain,
            cloth_x: subtle * self.cloth_shift_gain,
        }
    }

    pub fn apply_figure(&self, t: f64, figure: &mut Transform) {
        figure.position.y = self.pose(t).figure_y as f32;
    }

    pub fn apply_cloth(&self, t: f64, cloth: &mut Transform) {
        let pose = self.pose(t);
        cloth.set_rotation_euler_z(pose.cloth_rotation_z as f32);
        cloth.position.x = pose.cloth_x as f32;
    }
}

// ============================================================================
// Hand sway
// ============================================================================

/// Which of the two registered hands a handle is. The roll sign follows
/// registration order, never spatial position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSide {
    First,
    Second,
}

impl HandSide {
    /// Maps a registry index to a side: 0 is first, anything else second.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        if index == 0 { Self::First } else { Self::Second }
    }

    #[must_use]
    pub fn roll_sign(self) -> f64 {
        match self {
            Self::First => 1.0,
            Self::Second => -1.0,
        }
    }
}

/// Raised hands held in prayer, with a shared slow lift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSway {
    pub pitch: f64,
    pub roll: f64,
    pub lift_amplitude: f64,
    pub lift_frequency: f64,
}

impl Default for HandSway {
    fn default() -> Self {
        Self {
            pitch: -1.2,
            roll: 0.22,
            lift_amplitude: 0.015,
            lift_frequency: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    pub rotation_x: f64,
    pub rotation_z: f64,
}

impl HandSway {
    #[inline]
    #[must_use]
    pub fn lift(&self, t: f64) -> f64 {
        (t * self.lift_frequency).sin() * self.lift_amplitude
    }

    #[must_use]
    pub fn pose(&self, t: f64, side: HandSide) -> HandPose {
        HandPose {
            rotation_x: self.pitch + self.lift(t),
            rotation_z: self.roll * side.roll_sign(),
        }
    }

    pub fn apply(&self, t: f64, side: HandSide, hand: &mut Transform) {
        let pose = self.pose(t, side);
        hand.set_rotation_euler_xz(pose.rotation_x as f32, pose.rotation_z as f32);
    }
}

// ============================================================================
// Float wrapper
// ============================================================================

/// Idle hover applied to the group wrapping the figure.
///
/// A per-scene time offset desynchronizes the hover from the other
/// updaters:
///
/// ```text
/// u     = (t + offset) / 4 * speed
/// rot   = (cos(u) / 8, sin(u) / 8, sin(u) / 20) * rotation_intensity
/// pos.y = sin(u) / 10 * float_intensity
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatDrift {
    pub offset: f64,
    pub speed: f64,
    pub rotation_intensity: f64,
    pub float_intensity: f64,
}

impl Default for FloatDrift {
    fn default() -> Self {
        Self {
            offset: 0.0,
            speed: 0.8,
            rotation_intensity: 0.05,
            float_intensity: 0.015,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPose {
    pub rotation: DVec3,
    pub y: f64,
}

impl FloatDrift {
    /// Upper bound (exclusive) of the random time offset.
    pub const MAX_OFFSET: f64 = 10_000.0;

    /// Default hover with an offset drawn from `rng`.
    pub fn random<R: RngExt + ?Sized>(rng: &mut R) -> Self {
        Self {
            offset: rng.random_range(0.0..Self::MAX_OFFSET),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pose(&self, t: f64) -> FloatPose {
        let u = (t + self.offset) / 4.0 * self.speed;
        let (sin, cos) = u.sin_cos();
        FloatPose {
            rotation: DVec3::new(cos / 8.0, sin / 8.0, sin / 20.0) * self.rotation_intensity,
            y: sin / 10.0 * self.float_intensity,
        }
    }

    pub fn apply(&self, t: f64, group: &mut Transform) {
        let pose = self.pose(t);
        let r = pose.rotation.as_vec3();
        group.set_rotation_euler(r.x, r.y, r.z);
        group.position.y = pose.y as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_from_index() {
        assert_eq!(HandSide::from_index(0), HandSide::First);
        assert_eq!(HandSide::from_index(1), HandSide::Second);
    }

    #[test]
    fn float_pose_is_bounded() {
        let drift = FloatDrift { offset: 1234.5, ..FloatDrift::default() };
        for step in 0..500 {
            let pose = drift.pose(f64::from(step) * 0.37);
            assert!(pose.y.abs() <= 0.0015 + 1e-12);
            assert!(pose.rotation.x.abs() <= 0.05 / 8.0 + 1e-12);
            assert!(pose.rotation.z.abs() <= 0.05 / 20.0 + 1e-12);
        }
    }

    #[test]
    fn float_pose_matches_formula() {
        for (t, offset) in [(0.0, 0.0), (1.0, 0.0), (2.5, 1234.5), (60.0, 9999.9), (17.3, 42.0)] {
            let pose = FloatDrift { offset, ..FloatDrift::default() }.pose(t);
            let u = (t + offset) / 4.0 * 0.8;
            assert!((pose.rotation.x - u.cos() / 8.0 * 0.05).abs() < 1e-15, "t={t} o={offset}");
            assert!((pose.rotation.y - u.sin() / 8.0 * 0.05).abs() < 1e-15, "t={t} o={offset}");
            assert!((pose.rotation.z - u.sin() / 20.0 * 0.05).abs() < 1e-15, "t={t} o={offset}");
            assert!((pose.y - u.sin() / 10.0 * 0.015).abs() < 1e-15, "t={t} o={offset}");
        }
    }

    #[test]
    fn float_at_rest_leans_on_x() {
        let pose = FloatDrift::default().pose(0.0);
        assert_eq!(pose.rotation, DVec3::new(0.05 / 8.0, 0.0, 0.0));
        assert_eq!(pose.y, 0.0);
    }

    #[test]
    fn random_offset_in_range() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        for seed in 0..500 {
            let drift = FloatDrift::random(&mut StdRng::seed_from_u64(seed));
            assert!((0.0..FloatDrift::MAX_OFFSET).contains(&drift.offset), "seed {seed}");
            assert_eq!(drift.speed, 0.8);
            assert_eq!(drift.rotation_intensity, 0.05);
            assert_eq!(drift.float_intensity, 0.015);
        }
    }

    #[test]
    fn cloth_sway_at_rest() {
        let pose = FigureSway::default().pose(0.0);
        assert_eq!(pose.figure_y, 1.2);
        assert_eq!(pose.cloth_rotation_z, 0.06);
        assert_eq!(pose.cloth_x, 0.0);
    }
}
