use fajr_animation::{FrameAnimator, FrameStats};
use fajr_core::{FixedStepClock, FpsCounter, Result, Timer};
use fajr_scene::{NodeHandle, Scene};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::AppConfig;
use crate::desert;
use crate::overlay::Overlay;
use crate::settings::RendererSettings;

/// Frame host for the desert scene.
///
/// Owns the scene and the animator. The external rasterizer reads
/// [`App::scene`] after each [`App::frame`]; nothing here touches a GPU.
pub struct App {
    pub config: AppConfig,
    pub scene: Scene,
    pub animator: FrameAnimator<NodeHandle>,
    pub overlay: Overlay,
    pub settings: RendererSettings,

    clock: FixedStepClock,
    timer: Timer,
    fps_counter: FpsCounter,
    last_stats: FrameStats,
    last_time: f64,
}

/// State of the animated nodes after a frame, for logging and inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub elapsed: f64,
    pub camera_position: [f32; 3],
    pub camera_target: [f32; 3],
    pub float_offset: f64,
    pub figure_y: f32,
    pub cloth_x: f32,
    pub cloth_rotation_z: f32,
    /// `[x, z]` Euler rotation per hand, registration order.
    pub hand_rotations: [[f32; 2]; 2],
    pub particle_count: usize,
    pub particle_y_range: Option<[f32; 2]>,
    pub particle_buffer_version: u64,
    pub updated_targets: u32,
    pub skipped_targets: u32,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let mut scene = Scene::new();
        let desert = match config.seed {
            Some(seed) => desert::build(&mut scene, &config, &mut StdRng::seed_from_u64(seed))?,
            None => desert::build(&mut scene, &config, &mut rand::rng())?,
        };

        let animator = FrameAnimator::bind(&mut scene, desert.rig)?.with_float_drift(desert.float_drift);

        let mut settings = RendererSettings {
            tone_mapping_exposure: config.exposure,
            dpr_range: config.dpr,
            ..RendererSettings::default()
        };
        settings.set_clear_color(scene.background);

        let overlay = Overlay { title: config.title.clone(), ..Overlay::default() };
        let clock = FixedStepClock::new(config.fps);

        log::info!("{} ready ({}x{}, {} fps)", config.title, config.width, config.height, config.fps);

        Ok(Self {
            config,
            scene,
            animator,
            overlay,
            settings,
            clock,
            timer: Timer::new(),
            fps_counter: FpsCounter::new(),
            last_stats: FrameStats::default(),
            last_time: 0.0,
        })
    }

    /// Animates every target for elapsed time `t`, then refreshes world
    /// matrices. Calling twice with the same `t` leaves the same state.
    pub fn frame(&mut self, t: f64) -> FrameStats {
        let stats = self.animator.update(&mut self.scene, t);
        self.scene.update_matrix_world();
        self.last_stats = stats;
        self.last_time = t;
        stats
    }

    /// Advances the fixed-step clock by one frame.
    pub fn step(&mut self) -> FrameStats {
        let (_, t) = self.clock.advance();
        self.frame(t)
    }

    /// Advances using wall-clock time. For hosts with their own loop.
    pub fn tick(&mut self) -> FrameStats {
        self.timer.tick();
        self.fps_counter.update();
        self.frame(self.timer.elapsed_seconds())
    }

    /// Wall clock driven by [`App::tick`].
    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Frame rate measured over the last full second of [`App::tick`]
    /// calls, zero before the first second has passed.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.fps_counter.current_fps
    }

    /// Runs `config.frames` fixed-step frames and reports the final state.
    pub fn run_headless(&mut self) -> FrameSnapshot {
        for _ in 0..self.config.frames {
            self.step();
        }
        let snapshot = self.snapshot();
        log::info!(
            "Simulated {} frames ({:.2}s), camera at {:?}",
            snapshot.frame,
            snapshot.elapsed,
            snapshot.camera_position
        );
        snapshot
    }

    /// Reads the animated nodes back out of the scene.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        let rig = self.animator.rig();
        let position = |handle: NodeHandle| {
            self.scene
                .get_node(handle)
                .map_or(Vec3::ZERO, |node| node.transform.position)
        };
        let euler = |handle: NodeHandle| {
            self.scene
                .get_node(handle)
                .map_or(Vec3::ZERO, |node| node.transform.rotation_euler())
        };

        let cloth_position = position(rig.cloth);
        let hand_rotations = rig.hands.map(|hand| {
            let r = euler(hand);
            [r.x, r.z]
        });

        let particles = self.scene.points.get(rig.particles).map(|points| &points.field);

        FrameSnapshot {
            frame: self.clock.frame(),
            elapsed: self.last_time,
            camera_position: position(rig.camera).to_array(),
            camera_target: self.animator.camera.target.as_vec3().to_array(),
            float_offset: self.animator.float.offset,
            figure_y: position(rig.figure).y,
            cloth_x: cloth_position.x,
            cloth_rotation_z: euler(rig.cloth).z,
            hand_rotations,
            particle_count: particles.map_or(0, |field| field.len()),
            particle_y_range: particles.and_then(|field| field.y_range()).map(|(lo, hi)| [lo, hi]),
            particle_buffer_version: particles.map_or(0, |field| field.tracker().version()),
            updated_targets: self.last_stats.updated,
            skipped_targets: self.last_stats.skipped,
        }
    }

    /// Standalone page for the overlay, colored to match the scene.
    pub fn page_html(&self) -> Result<String> {
        self.overlay.to_html(self.scene.background)
    }
}
