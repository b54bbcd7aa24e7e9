use std::fmt::Debug;

use fajr_core::{FajrError, Result, Transform};

use crate::camera_rig::CameraRig;
use crate::particles::ParticleField;
use crate::sway::{FigureSway, FloatDrift, HandSide, HandSway};

/// Storage the animator writes into.
///
/// Implemented by the scene graph; handles are stable keys, and each call
/// hands out an exclusive borrow for the duration of one updater.
pub trait AnimationTargets {
    type Handle: Copy + Eq + Debug;

    fn transform_mut(&mut self, handle: Self::Handle) -> Option<&mut Transform>;

    fn particles_mut(&mut self, handle: Self::Handle) -> Option<&mut ParticleField>;
}

/// The fixed set of nodes animated every frame.
///
/// `hands[0]` receives the positive roll and `hands[1]` the negative one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationRig<H> {
    pub camera: H,
    pub float_group: Option<H>,
    pub figure: H,
    pub cloth: H,
    pub hands: [H; 2],
    pub particles: H,
}

/// Outcome of one frame update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub updated: u32,
    pub skipped: u32,
}

impl FrameStats {
    fn record(&mut self, applied: bool) {
        if applied {
            self.updated += 1;
        } else {
            self.skipped += 1;
        }
    }
}

/// Drives every per-frame updater from a single elapsed time.
///
/// Holds no clock and carries nothing between frames: calling
/// [`FrameAnimator::update`] twice with the same `t` produces the same
/// scene state. The updaters touch disjoint targets, so their order does
/// not matter.
#[derive(Debug, Clone)]
pub struct FrameAnimator<H> {
    rig: AnimationRig<H>,
    pub camera: CameraRig,
    pub figure: FigureSway,
    pub hands: HandSway,
    pub float: FloatDrift,
}

impl<H: Copy + Eq + Debug> FrameAnimator<H> {
    /// Binds the animator to `targets`, checking that every handle in `rig`
    /// resolves. A handle that later goes stale is skipped at frame time.
    pub fn bind<S>(targets: &mut S, rig: AnimationRig<H>) -> Result<Self>
    where
        S: AnimationTargets<Handle = H>,
    {
        let mut require = |handle: H, name: &'static str| {
            targets
                .transform_mut(handle)
                .map(|_| ())
                .ok_or(FajrError::MissingTarget(name))
        };

        require(rig.camera, "camera")?;
        require(rig.figure, "figure")?;
        require(rig.cloth, "cloth")?;
        require(rig.hands[0], "first hand")?;
        require(rig.hands[1], "second hand")?;
        if let Some(group) = rig.float_group {
            require(group, "float group")?;
        }
        if targets.particles_mut(rig.particles).is_none() {
            return Err(FajrError::MissingTarget("particles"));
        }

        log::debug!("Frame animator bound to {rig:?}");

        Ok(Self {
            rig,
            camera: CameraRig::default(),
            figure: FigureSway::default(),
            hands: HandSway::default(),
            float: FloatDrift::default(),
        })
    }

    #[must_use]
    pub fn with_float_drift(mut self, float: FloatDrift) -> Self {
        self.float = float;
        self
    }

    #[must_use]
    pub fn rig(&self) -> &AnimationRig<H> {
        &self.rig
    }

    /// Runs all updaters for elapsed time `t` (seconds since scene start).
    pub fn update<S>(&self, targets: &mut S, t: f64) -> FrameStats
    where
        S: AnimationTargets<Handle = H>,
    {
        let mut stats = FrameStats::default();

        stats.record(self.update_camera(targets, t));
        stats.record(self.update_float(targets, t));
        stats.record(self.update_figure(targets, t));
        stats.record(self.update_cloth(targets, t));
        for (index, &hand) in self.rig.hands.iter().enumerate() {
            stats.record(self.update_hand(targets, t, hand, HandSide::from_index(index)));
        }
        stats.record(self.update_particles(targets, t));

        if stats.skipped > 0 {
            log::warn!("t={t:.3}: skipped {} detached animation targets", stats.skipped);
        }
        stats
    }

    pub fn update_camera<S>(&self, targets: &mut S, t: f64) -> bool
    where
        S: AnimationTargets<Handle = H>,
    {
        let Some(transform) = targets.transform_mut(self.rig.camera) else {
            return false;
        };
        self.camera.apply(t, transform);
        true
    }

    /// The float group is optional; without one this reports success.
    pub fn update_float<S>(&self, targets: &mut S, t: f64) -> bool
    where
        S: AnimationTargets<Handle = H>,
    {
        let Some(group) = self.rig.float_group else {
            return true;
        };
        let Some(transform) = targets.transform_mut(group) else {
            return false;
        };
        self.float.apply(t, transform);
        true
    }

    pub fn update_figure<S>(&self, targets: &mut S, t: f64) -> bool
    where
        S: AnimationTargets<Handle = H>,
    {
        let Some(transform) = targets.transform_mut(self.rig.figure) else {
            return false;
        };
        self.figure.apply_figure(t, transform);
        true
    }

    pub fn update_cloth<S>(&self, targets: &mut S, t: f64) -> bool
    where
        S: AnimationTargets<Handle = H>,
    {
        let Some(transform) = targets.transform_mut(self.rig.cloth) else {
            return false;
        };
        self.figure.apply_cloth(t, transform);
        true
    }

    pub fn update_hand<S>(&self, targets: &mut S, t: f64, hand: H, side: HandSide) -> bool
    where
        S: AnimationTargets<Handle = H>,
    {
        let Some(transform) = targets.transform_mut(hand) else {
            return false;
        };
        self.hands.apply(t, side, transform);
        true
    }

    pub fn update_particles<S>(&self, targets: &mut S, t: f64) -> bool
    where
        S: AnimationTargets<Handle = H>,
    {
        let Some(field) = targets.particles_mut(self.rig.particles) else {
            return false;
        };
        field.drift(t);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Flat target store: handles are indices, particles live on handle 99.
    struct Targets {
        transforms: Vec<Option<Transform>>,
        particles: Option<ParticleField>,
    }

    impl AnimationTargets for Targets {
        type Handle = usize;

        fn transform_mut(&mut self, handle: usize) -> Option<&mut Transform> {
            self.transforms.get_mut(handle)?.as_mut()
        }

        fn particles_mut(&mut self, handle: usize) -> Option<&mut ParticleField> {
            if handle == 99 { self.particles.as_mut() } else { None }
        }
    }

    fn targets() -> Targets {
        Targets {
            transforms: (0..6).map(|_| Some(Transform::new())).collect(),
            particles: Some(ParticleField::from_parts(vec![1.0, 2.0, 3.0], vec![0.1]).unwrap()),
        }
    }

    fn rig() -> AnimationRig<usize> {
        AnimationRig {
            camera: 0,
            float_group: Some(5),
            figure: 1,
            cloth: 2,
            hands: [3, 4],
            particles: 99,
        }
    }

    #[test]
    fn bind_reports_missing_target() {
        let mut store = targets();
        store.transforms[2] = None;
        let err = FrameAnimator::bind(&mut store, rig()).unwrap_err();
        assert!(matches!(err, FajrError::MissingTarget("cloth")));

        let mut store = targets();
        store.particles = None;
        let err = FrameAnimator::bind(&mut store, rig()).unwrap_err();
        assert!(matches!(err, FajrError::MissingTarget("particles")));
    }

    #[test]
    fn stale_targets_are_skipped() {
        let mut store = targets();
        let animator = FrameAnimator::bind(&mut store, rig()).unwrap();

        assert_eq!(animator.update(&mut store, 1.0), FrameStats { updated: 7, skipped: 0 });

        store.transforms[3] = None;
        store.particles = None;
        assert_eq!(animator.update(&mut store, 2.0), FrameStats { updated: 5, skipped: 2 });
    }

    #[test]
    fn float_group_is_optional() {
        let mut store = targets();
        let animator = FrameAnimator::bind(&mut store, AnimationRig { float_group: None, ..rig() }).unwrap();
        assert!(animator.update_float(&mut store, 3.0));
        assert_eq!(store.transforms[5].as_ref().unwrap().position, glam::Vec3::ZERO);
    }
}
