use std::ops::Range;

use fajr_core::{ChangeTracker, FajrError, Result};
use rand::RngExt;

/// Number of floating dust particles in the scene.
pub const PARTICLE_COUNT: usize = 240;

/// Spawn volume and motion constants for [`ParticleField::generate`].
pub const SPAWN_X: Range<f32> = -10.0..10.0;
pub const SPAWN_Y: Range<f32> = 0.5..5.5;
pub const SPAWN_Z: Range<f32> = -10.0..10.0;
pub const PHASE_SPEED: Range<f32> = 0.08..0.20;
pub const DRIFT_AMPLITUDE: f64 = 0.15;

/// Dust motes hovering over the dunes.
///
/// Owns three parallel arrays:
/// - `base_positions` (`3N`): spawn positions, never modified
/// - `positions` (`3N`): the buffer the renderer uploads
/// - `phase_speeds` (`N`): per-particle angular speed, never modified
///
/// Only the Y component of `positions` is ever rewritten; X and Z stay
/// bit-identical to `base_positions`.
#[derive(Debug, Clone)]
pub struct ParticleField {
    base_positions: Vec<f32>,
    positions: Vec<f32>,
    phase_speeds: Vec<f32>,
    tracker: ChangeTracker,
}

impl ParticleField {
    /// Draws `count` particles from `rng`: all positions first, then all
    /// phase speeds.
    pub fn generate<R: RngExt + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut base_positions = Vec::with_capacity(count * 3);
        for _ in 0..count {
            base_positions.push(rng.random_range(SPAWN_X));
            base_positions.push(rng.random_range(SPAWN_Y));
            base_positions.push(rng.random_range(SPAWN_Z));
        }

        let phase_speeds = (0..count).map(|_| rng.random_range(PHASE_SPEED)).collect();

        Self {
            positions: base_positions.clone(),
            base_positions,
            phase_speeds,
            tracker: ChangeTracker::new(),
        }
    }

    /// Unseeded field backed by the thread-local generator.
    #[must_use]
    pub fn from_entropy(count: usize) -> Self {
        Self::generate(count, &mut rand::rng())
    }

    /// Builds a field from explicit base positions (`[x, y, z]*`) and speeds.
    pub fn from_parts(base_positions: Vec<f32>, phase_speeds: Vec<f32>) -> Result<Self> {
        if base_positions.len() != phase_speeds.len() * 3 {
            return Err(FajrError::InvalidConfig(format!(
                "particle field needs 3 coordinates per phase speed, got {} coordinates for {} speeds",
                base_positions.len(),
                phase_speeds.len()
            )));
        }
        Ok(Self {
            positions: base_positions.clone(),
            base_positions,
            phase_speeds,
            tracker: ChangeTracker::new(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phase_speeds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phase_speeds.is_empty()
    }

    /// Drifted height of particle `i` at time `t`. The index doubles as a
    /// phase offset so particles sharing a speed still move apart.
    #[inline]
    #[must_use]
    pub fn drifted_y(&self, i: usize, t: f64) -> f32 {
        let wave = (t * f64::from(self.phase_speeds[i]) + i as f64).sin() * DRIFT_AMPLITUDE;
        (f64::from(self.base_positions[i * 3 + 1]) + wave) as f32
    }

    /// Rewrites every particle's Y for time `t`, then flags the buffer for
    /// upload once.
    pub fn drift(&mut self, t: f64) {
        for i in 0..self.len() {
            self.positions[i * 3 + 1] = self.drifted_y(i, t);
        }
        self.tracker.changed();
    }

    /// Flat `[x, y, z]*` buffer as last written by [`ParticleField::drift`].
    #[must_use]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[must_use]
    pub fn base_positions(&self) -> &[f32] {
        &self.base_positions
    }

    #[must_use]
    pub fn phase_speeds(&self) -> &[f32] {
        &self.phase_speeds
    }

    #[must_use]
    pub fn tracker(&self) -> &ChangeTracker {
        &self.tracker
    }

    /// Renderer acknowledgement that the current buffer was uploaded.
    pub fn mark_uploaded(&mut self) {
        self.tracker.mark_uploaded();
    }

    /// Lowest and highest current Y.
    #[must_use]
    pub fn y_range(&self) -> Option<(f32, f32)> {
        self.positions
            .iter()
            .skip(1)
            .step_by(3)
            .fold(None, |acc, &y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_rejects_mismatched_lengths() {
        assert!(ParticleField::from_parts(vec![0.0; 5], vec![0.1; 2]).is_err());
        assert!(ParticleField::from_parts(vec![0.0; 6], vec![0.1; 2]).is_ok());
    }

    #[test]
    fn drift_marks_buffer_once_per_batch() {
        let mut field = ParticleField::from_parts(vec![0.0, 1.0, 0.0, 2.0, 3.0, 4.0], vec![0.1, 0.2]).unwrap();
        assert!(!field.tracker().needs_upload());

        field.drift(0.5);
        assert_eq!(field.tracker().version(), 1);
        assert!(field.tracker().needs_upload());

        field.mark_uploaded();
        assert!(!field.tracker().needs_upload());
    }

    #[test]
    fn y_range_covers_all_particles() {
        let field = ParticleField::from_parts(vec![0.0, 1.0, 0.0, 9.0, -2.0, 9.0], vec![0.1, 0.2]).unwrap();
        assert_eq!(field.y_range(), Some((-2.0, 1.0)));
    }
}
