//! Frame animation tests
//!
//! Tests for:
//! - Camera orbit: height band, ellipse, start and half-orbit poses
//! - Figure bob and cloth sway formulas
//! - Hand sway sign assignment by registration order
//! - Particle drift: exact values, idempotence, untouched X/Z
//! - FrameAnimator bound to a live Scene, including stale handles

use std::f64::consts::PI;

use fajr::animation::{
    AnimationRig, CameraRig, DRIFT_AMPLITUDE, FigureSway, FloatDrift, FrameAnimator, FrameStats, HandSide, HandSway,
    LOOK_TARGET, PARTICLE_COUNT, ParticleField,
};
use fajr::resources::Material;
use fajr::scene::{NodeHandle, Points, Scene};
use fajr::FajrError;
use glam::{DVec3, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn seeded_field(seed: u64) -> ParticleField {
    ParticleField::generate(PARTICLE_COUNT, &mut StdRng::seed_from_u64(seed))
}

/// Sample times covering several minutes, including non-integer steps.
fn sample_times() -> impl Iterator<Item = f64> {
    (0..4000).map(|i| f64::from(i) * 0.173)
}

/// Scene holding exactly the nodes the animator drives.
fn rig_scene(seed: u64) -> (Scene, AnimationRig<NodeHandle>) {
    let mut scene = Scene::new();
    let camera = scene.create_node_with_name("Camera");
    let float_group = scene.create_node_with_name("Float");
    let figure = scene.build_node("Figure").with_parent(float_group).build();
    let cloth = scene.build_node("Cloth").with_parent(figure).build();
    let first = scene.build_node("HandA").with_parent(figure).build();
    let second = scene.build_node("HandB").with_parent(figure).build();

    let material = scene.add_material(Material::points(Vec3::ONE, 0.055));
    let particles = scene.create_node_with_name("Particles");
    scene.set_points(particles, Points::new(seeded_field(seed), material));

    let rig = AnimationRig {
        camera,
        float_group: Some(float_group),
        figure,
        cloth,
        hands: [first, second],
        particles,
    };
    (scene, rig)
}

fn field(scene: &Scene, handle: NodeHandle) -> &ParticleField {
    &scene.points[handle].field
}

// ============================================================================
// Camera Orbit
// ============================================================================

#[test]
fn camera_height_stays_in_band() {
    let rig = CameraRig::default();
    for t in sample_times() {
        let h = rig.height(t);
        assert!((2.75..=3.25).contains(&h), "h({t}) = {h}");
        assert_eq!(rig.pose(t).position.y, h);
    }
}

#[test]
fn camera_stays_on_ellipse() {
    let rig = CameraRig::default();
    let r = 7.4;
    for t in sample_times() {
        let p = rig.pose(t).position;
        let residual = p.x * p.x / (r * r) + (p.z / 0.92) * (p.z / 0.92) / (r * r) - 1.0;
        assert!(residual.abs() < 1e-9, "t={t}: residual {residual}");
    }
}

#[test]
fn camera_start_pose() {
    let pose = CameraRig::default().pose(0.0);
    assert_eq!(pose.position, DVec3::new(7.4, 3.0, 0.0));
    assert_eq!(pose.target, DVec3::new(0.0, 1.25, 0.0));
    assert_eq!(pose.target, LOOK_TARGET);
}

#[test]
fn camera_half_orbit() {
    let rig = CameraRig::default();
    let t = PI / 0.12;
    assert!((rig.theta(t) - PI).abs() < 1e-12);

    let p = rig.pose(t).position;
    assert!((p.x + 7.4).abs() < 1e-9);
    assert!(p.z.abs() < 1e-9);
    assert_eq!(p.y, rig.height(t));
}

#[test]
fn camera_transform_looks_at_target() {
    let (mut scene, rig) = rig_scene(1);
    let animator = FrameAnimator::bind(&mut scene, rig).unwrap();

    animator.update_camera(&mut scene, 5.0);
    let transform = &scene.get_node(rig.camera).unwrap().transform;

    let expected = animator.camera.pose(5.0).position.as_vec3();
    assert!((transform.position - expected).length() < EPSILON);

    let forward = transform.rotation * Vec3::NEG_Z;
    let to_target = (LOOK_TARGET.as_vec3() - transform.position).normalize();
    assert!(forward.dot(to_target) > 1.0 - 1e-5);
}

// ============================================================================
// Figure & Hands
// ============================================================================

#[test]
fn figure_and_cloth_follow_formulas() {
    let sway = FigureSway::default();
    for t in [0.0, 0.5, 2.0, 17.3, 123.4] {
        let pose = sway.pose(t);
        assert_eq!(pose.figure_y, 1.2 + (t * 0.8).sin() * 0.02);
        assert!((pose.cloth_rotation_z - (0.06 + (t * 0.4).sin() * 0.01 * 2.5)).abs() < 1e-15);
        assert!((pose.cloth_x - (t * 0.4).sin() * 0.01 * 10.0).abs() < 1e-15);
    }
}

#[test]
fn hand_signs_follow_registration_order() {
    let sway = HandSway::default();
    for t in sample_times().step_by(97) {
        let first = sway.pose(t, HandSide::First);
        let second = sway.pose(t, HandSide::Second);
        assert_eq!(first.rotation_z, 0.22);
        assert_eq!(second.rotation_z, -0.22);
        assert_eq!(first.rotation_x, second.rotation_x);
        assert_eq!(first.rotation_x, -1.2 + (t * 1.2).sin() * 0.015);
    }
}

#[test]
fn hand_signs_stable_in_scene() {
    let (mut scene, rig) = rig_scene(2);
    let animator = FrameAnimator::bind(&mut scene, rig).unwrap();

    // Out-of-order times and repeated calls must not swap signs.
    for t in [9.0, 0.0, 4.5, 4.5, 100.0] {
        animator.update(&mut scene, t);
        let a = scene.get_node(rig.hands[0]).unwrap().transform.rotation_euler();
        let b = scene.get_node(rig.hands[1]).unwrap().transform.rotation_euler();
        assert!(approx_eq(a.z, 0.22));
        assert!(approx_eq(b.z, -0.22));
        assert!(approx_eq(a.x, b.x));
    }
}

// ============================================================================
// Float Wrapper
// ============================================================================

#[test]
fn float_group_follows_drift() {
    let (mut scene, rig) = rig_scene(3);
    let drift = FloatDrift { offset: 321.5, ..FloatDrift::default() };
    let animator = FrameAnimator::bind(&mut scene, rig).unwrap().with_float_drift(drift);
    let float_group = rig.float_group.unwrap();

    for t in [0.0, 1.0, 12.25, 90.0] {
        assert!(animator.update_float(&mut scene, t));

        let pose = drift.pose(t);
        let transform = &scene.get_node(float_group).unwrap().transform;
        assert_eq!(transform.position.y, pose.y as f32);
        assert_eq!(transform.rotation_euler(), pose.rotation.as_vec3());
        assert_eq!(transform.position.x, 0.0);
        assert_eq!(transform.position.z, 0.0);
    }
}

#[test]
fn missing_float_group_is_not_a_skip() {
    let (mut scene, mut rig) = rig_scene(3);
    rig.float_group = None;
    let animator = FrameAnimator::bind(&mut scene, rig).unwrap();

    assert!(animator.update_float(&mut scene, 5.0));
    assert_eq!(animator.update(&mut scene, 5.0), FrameStats { updated: 7, skipped: 0 });
}

// ============================================================================
// Particle Drift
// ============================================================================

#[test]
fn particles_spawn_inside_volume() {
    let field = seeded_field(42);
    assert_eq!(field.len(), PARTICLE_COUNT);
    assert_eq!(field.base_positions().len(), PARTICLE_COUNT * 3);

    for p in field.base_positions().chunks_exact(3) {
        assert!((-10.0..10.0).contains(&p[0]));
        assert!((0.5..5.5).contains(&p[1]));
        assert!((-10.0..10.0).contains(&p[2]));
    }
    for &speed in field.phase_speeds() {
        assert!((0.08..0.20).contains(&speed));
    }
}

#[test]
fn same_seed_same_field() {
    let a = seeded_field(7);
    let b = seeded_field(7);
    assert_eq!(a.base_positions(), b.base_positions());
    assert_eq!(a.phase_speeds(), b.phase_speeds());
}

#[test]
fn drift_at_zero_uses_index_phase() {
    let mut field = seeded_field(3);
    field.drift(0.0);

    for i in 0..field.len() {
        let base_y = f64::from(field.base_positions()[i * 3 + 1]);
        let expected = (base_y + (i as f64).sin() * DRIFT_AMPLITUDE) as f32;
        assert_eq!(field.positions()[i * 3 + 1], expected, "particle {i}");
    }
}

#[test]
fn drift_at_one_second() {
    let mut field = seeded_field(11);
    field.drift(1.0);

    for i in 0..PARTICLE_COUNT {
        let base_y = f64::from(field.base_positions()[i * 3 + 1]);
        let speed = f64::from(field.phase_speeds()[i]);
        let expected = base_y + (speed + i as f64).sin() * 0.15;
        let actual = f64::from(field.positions()[i * 3 + 1]);
        assert!((actual - expected).abs() < 1e-6, "particle {i}: {actual} vs {expected}");
    }
}

#[test]
fn drift_rounds_once_to_f32() {
    for seed in 0..20 {
        let mut field = seeded_field(seed);
        for t in [0.0, 1.0, 7.3] {
            field.drift(t);
            for i in 0..field.len() {
                let base_y = f64::from(field.base_positions()[i * 3 + 1]);
                let speed = f64::from(field.phase_speeds()[i]);
                let expected = (base_y + (t * speed + i as f64).sin() * DRIFT_AMPLITUDE) as f32;
                assert_eq!(field.positions()[i * 3 + 1], expected, "seed {seed}, t={t}, particle {i}");
            }
        }
    }
}

#[test]
fn drift_is_idempotent() {
    let mut field = seeded_field(5);
    field.drift(12.75);
    let first = field.positions().to_vec();

    field.drift(12.75);
    assert_eq!(field.positions(), first.as_slice());

    field.drift(80.0);
    field.drift(12.75);
    assert_eq!(field.positions(), first.as_slice());
}

#[test]
fn drift_never_touches_x_or_z() {
    let mut field = seeded_field(9);
    let base = field.base_positions().to_vec();

    for t in sample_times().step_by(31) {
        field.drift(t);
        for (current, initial) in field.positions().chunks_exact(3).zip(base.chunks_exact(3)) {
            assert_eq!(current[0].to_bits(), initial[0].to_bits());
            assert_eq!(current[2].to_bits(), initial[2].to_bits());
        }
    }
    assert_eq!(field.base_positions(), base.as_slice());
}

#[test]
fn drift_bumps_buffer_version_once_per_frame() {
    let mut field = seeded_field(4);
    for frame in 1_u32..=5 {
        field.drift(f64::from(frame) / 60.0);
        assert_eq!(field.tracker().version(), u64::from(frame));
    }
}

// ============================================================================
// FrameAnimator on a Scene
// ============================================================================

#[test]
fn animator_updates_every_target() {
    let (mut scene, rig) = rig_scene(6);
    let animator = FrameAnimator::bind(&mut scene, rig).unwrap();

    let stats = animator.update(&mut scene, 2.5);
    assert_eq!(stats, FrameStats { updated: 7, skipped: 0 });

    let figure = &scene.get_node(rig.figure).unwrap().transform;
    assert!(approx_eq(figure.position.y, animator.figure.pose(2.5).figure_y as f32));

    let cloth = &scene.get_node(rig.cloth).unwrap().transform;
    let pose = animator.figure.pose(2.5);
    assert!(approx_eq(cloth.position.x, pose.cloth_x as f32));
    assert!(approx_eq(cloth.rotation_euler().z, pose.cloth_rotation_z as f32));

    assert_eq!(field(&scene, rig.particles).tracker().version(), 1);
}

#[test]
fn animator_is_idempotent_per_time() {
    let (mut scene, rig) = rig_scene(8);
    let animator = FrameAnimator::bind(&mut scene, rig).unwrap();

    animator.update(&mut scene, 30.0);
    let camera = scene.get_node(rig.camera).unwrap().transform.clone();
    let particles = field(&scene, rig.particles).positions().to_vec();

    animator.update(&mut scene, 30.0);
    let again = &scene.get_node(rig.camera).unwrap().transform;
    assert_eq!(again.position, camera.position);
    assert_eq!(again.rotation, camera.rotation);
    assert_eq!(field(&scene, rig.particles).positions(), particles.as_slice());
}

#[test]
fn bind_rejects_removed_node() {
    let (mut scene, rig) = rig_scene(1);
    scene.remove_node(rig.hands[1]);
    let err = FrameAnimator::bind(&mut scene, rig).unwrap_err();
    assert!(matches!(err, FajrError::MissingTarget("second hand")));
}

#[test]
fn removed_target_is_skipped_without_panic() {
    let (mut scene, rig) = rig_scene(1);
    let animator = FrameAnimator::bind(&mut scene, rig).unwrap();

    scene.remove_node(rig.cloth);
    let stats = animator.update(&mut scene, 1.0);
    assert_eq!(stats, FrameStats { updated: 6, skipped: 1 });
}
