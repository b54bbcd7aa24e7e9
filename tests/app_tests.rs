//! App and desert scene tests
//!
//! Tests for:
//! - Desert scene assembly (nodes, lights, atmosphere, materials)
//! - Frame host: t=0 pose, idempotent frames, fixed-step headless runs
//! - Seeded determinism
//! - Snapshot serialization and overlay page output
//! - Config validation and overrides

use fajr::app::desert::{self, DUNES};
use fajr::foundation::color;
use fajr::scene::{EnvironmentPreset, LightKind};
use fajr::{App, AppConfig, FajrError};
use glam::Vec3;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-5;

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn seeded(seed: u64) -> AppConfig {
    AppConfig { seed: Some(seed), frames: 120, ..AppConfig::default() }
}

fn app(seed: u64) -> App {
    App::new(seeded(seed)).unwrap()
}

// ============================================================================
// Scene Assembly
// ============================================================================

#[test]
fn desert_has_named_nodes() {
    let app = app(1);
    for name in [
        "Camera", "Float", "Figure", "Head", "Robe", "Cloth", "ClothPanel", "HandLeft", "HandRight",
        "PrayerMat", "Ground", "GroundHighlight", "SunGlow", "DustSheen", "Particles",
    ] {
        assert!(app.scene.find_node_by_name(name).is_some(), "missing {name}");
    }
    for i in 0..DUNES.len() {
        assert!(app.scene.find_node_by_name(&format!("Dune{i}")).is_some());
    }
}

#[test]
fn desert_rig_matches_names() {
    let app = app(2);
    let rig = app.animator.rig();
    let scene = &app.scene;

    assert_eq!(scene.find_node_by_name("Camera"), Some(rig.camera));
    assert_eq!(scene.find_node_by_name("Float"), rig.float_group);
    assert_eq!(scene.find_node_by_name("Figure"), Some(rig.figure));
    assert_eq!(scene.find_node_by_name("Cloth"), Some(rig.cloth));
    assert_eq!(scene.find_node_by_name("HandLeft"), Some(rig.hands[0]));
    assert_eq!(scene.find_node_by_name("HandRight"), Some(rig.hands[1]));
    assert_eq!(scene.find_node_by_name("Particles"), Some(rig.particles));
    assert_eq!(scene.active_camera, Some(rig.camera));

    // Figure hangs off the float group, hands and cloth off the figure.
    assert_eq!(scene.get_node(rig.figure).unwrap().parent(), rig.float_group);
    assert_eq!(scene.get_node(rig.cloth).unwrap().parent(), Some(rig.figure));
    for hand in rig.hands {
        assert_eq!(scene.get_node(hand).unwrap().parent(), Some(rig.figure));
    }
}

#[test]
fn desert_atmosphere_and_lights() {
    let app = app(3);
    let scene = &app.scene;

    assert_eq!(scene.background, color::hex(0x0d1e2e));
    let fog = scene.fog.as_ref().unwrap();
    assert_eq!(fog.color, color::hex(0x13273c));
    assert_eq!((fog.near, fog.far), (12.0, 45.0));

    assert_eq!(scene.environment.preset, Some(EnvironmentPreset::Sunset));
    assert_eq!(scene.environment.resolution, 1024);
    let sky = scene.sky.as_ref().unwrap();
    assert_eq!(sky.turbidity, 4.0);
    assert_eq!(sky.sun_position, Vec3::new(20.0, 4.0, -10.0));

    assert_eq!(scene.lights.len(), 2);
    let sun = scene.lights.values().find(|l| matches!(l.kind, LightKind::Directional(_))).unwrap();
    assert_eq!(sun.intensity, 2.1);
    assert!(sun.casts_shadows());
    let LightKind::Directional(dir) = &sun.kind else { unreachable!() };
    assert_eq!(dir.shadow.as_ref().unwrap().map_size, 2048);

    let camera = scene.cameras.values().next().unwrap();
    assert!((camera.fov - 42f32.to_radians()).abs() < EPSILON);
    assert_eq!((camera.near, camera.far), (0.1, 200.0));
}

#[test]
fn desert_particles_and_materials() {
    let app = app(4);
    let rig = app.animator.rig();
    let points = app.scene.points.get(rig.particles).unwrap();
    assert_eq!(points.field.len(), 240);

    let material = &app.scene.materials[points.material];
    let dust = material.as_points().unwrap();
    assert_eq!(dust.size, 0.055);
    assert_eq!(material.opacity(), 0.75);

    let ground = app.scene.find_node_by_name("Ground").unwrap();
    assert!(app.scene.meshes.get(ground).unwrap().receive_shadow);
}

#[test]
fn prayer_mat_layers_lie_flat() {
    let mut app = app(16);
    app.frame(0.0);
    let scene = &app.scene;

    let footprint = |name: &str| {
        let handle = scene.find_node_by_name(name).unwrap();
        let mesh = scene.meshes.get(handle).unwrap();
        let world = scene.get_node(handle).unwrap().transform.world_matrix();
        scene.geometries[mesh.geometry].bounding_box.transform(world)
    };

    let border = footprint("MatBorder");
    for name in ["MatBase", "MatInlay"] {
        let layer = footprint(name);
        assert!(layer.size().y < EPSILON, "{name} is not horizontal");
        assert!(layer.min.y > border.min.y, "{name} sinks below the border");
        assert!(layer.size().x <= border.size().x && layer.size().z <= border.size().z);
    }

    // Only the base receives shadows.
    let receives = |name: &str| scene.meshes.get(scene.find_node_by_name(name).unwrap()).unwrap().receive_shadow;
    assert!(receives("MatBase"));
    assert!(!receives("MatBorder"));
    assert!(!receives("MatInlay"));
}

#[test]
fn desert_build_with_config_overrides() {
    let config = AppConfig {
        background: Some("#000".into()),
        fog_color: Some("#ffffff".into()),
        particle_count: 16,
        ..AppConfig::default()
    };
    let mut scene = fajr::Scene::new();
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(9);
    let desert = desert::build(&mut scene, &config, &mut rng).unwrap();

    assert_eq!(scene.background, Vec3::ZERO);
    assert_eq!(scene.fog.as_ref().unwrap().color, Vec3::ONE);
    assert_eq!(scene.points.get(desert.rig.particles).unwrap().field.len(), 16);
    assert!((0.0..fajr::FloatDrift::MAX_OFFSET).contains(&desert.float_drift.offset));
}

// ============================================================================
// Frame Host
// ============================================================================

#[test]
fn frame_zero_places_camera_on_orbit_start() {
    let mut app = app(5);
    let stats = app.frame(0.0);
    assert_eq!(stats.skipped, 0);

    let snapshot = app.snapshot();
    assert!(vec3_approx(Vec3::from(snapshot.camera_position), Vec3::new(7.4, 3.0, 0.0)));
    assert!(vec3_approx(Vec3::from(snapshot.camera_target), Vec3::new(0.0, 1.25, 0.0)));
    assert_eq!(snapshot.figure_y, 1.2);
    assert_eq!(snapshot.cloth_x, 0.0);
    assert_eq!(snapshot.hand_rotations, [[-1.2, 0.22], [-1.2, -0.22]]);
}

#[test]
fn frame_is_idempotent() {
    let mut app = app(6);
    app.frame(42.0);
    let first = app.snapshot();
    let first_positions = app.scene.points[app.animator.rig().particles].field.positions().to_vec();

    app.frame(42.0);
    let second = app.snapshot();
    assert_eq!(first.camera_position, second.camera_position);
    assert_eq!(first.figure_y, second.figure_y);
    assert_eq!(first.hand_rotations, second.hand_rotations);
    assert_eq!(first.particle_y_range, second.particle_y_range);
    assert_eq!(
        app.scene.points[app.animator.rig().particles].field.positions(),
        first_positions.as_slice()
    );
}

#[test]
fn frame_propagates_world_matrices() {
    let mut app = app(7);
    app.frame(3.0);

    let rig = *app.animator.rig();
    let hand = app.scene.find_node_by_name("HandLeft").unwrap();
    let figure_world = app.scene.get_node(rig.figure).unwrap().transform.world_position();
    let hand_world = app.scene.get_node(hand).unwrap().transform.world_position();

    // The hand sits above the figure origin, roughly at its local offset.
    assert!((hand_world - figure_world - Vec3::new(-0.36, 0.62, 0.24)).length() < 0.05);
}

#[test]
fn headless_run_advances_fixed_steps() {
    let mut app = app(8);
    let snapshot = app.run_headless();

    assert_eq!(snapshot.frame, 120);
    assert!((snapshot.elapsed - 119.0 / 60.0).abs() < 1e-12);
    assert_eq!(snapshot.particle_buffer_version, 120);
    assert_eq!(snapshot.particle_count, 240);
    assert_eq!(snapshot.updated_targets, 7);

    let [lo, hi] = snapshot.particle_y_range.unwrap();
    assert!(lo >= 0.5 - 0.15 - EPSILON);
    assert!(hi <= 5.5 + 0.15 + EPSILON);
}

#[test]
fn tick_follows_wall_clock() {
    let mut app = app(10);

    let stats = app.tick();
    assert_eq!(stats.skipped, 0);
    let first = app.snapshot().elapsed;
    assert_eq!(first, app.timer().elapsed_seconds());

    app.tick();
    let second = app.snapshot();
    assert!(second.elapsed >= first);
    assert_eq!(app.timer().frame_count, 2);
    assert!(app.fps().is_finite());

    // Real-time ticks leave the fixed-step clock alone.
    assert_eq!(second.frame, 0);
}

#[test]
fn same_seed_same_run() {
    let a = app(11).run_headless();
    let b = app(11).run_headless();
    assert_eq!(a, b);

    let c = app(12).run_headless();
    assert_ne!(a.float_offset, c.float_offset);
}

#[test]
fn snapshot_serializes_to_json() {
    let mut app = app(13);
    let snapshot = app.run_headless();
    let json: serde_json::Value = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["frame"], 120);
    assert_eq!(json["particle_count"], 240);
    assert!(json["camera_position"].is_array());
    assert!(json["hand_rotations"][1][1].as_f64().unwrap() < 0.0);
}

// ============================================================================
// Overlay & Settings
// ============================================================================

#[test]
fn page_uses_scene_background_and_title() {
    let app = App::new(AppConfig { title: "Dawn".into(), ..seeded(14) }).unwrap();
    let html = app.page_html().unwrap();
    assert!(html.contains("<title>Dawn</title>"));
    assert!(html.contains("background:#0d1e2e"));
    assert!(html.contains("Serenity at Fajr"));
    assert!(html.contains("mix-blend-mode:screen"));
}

#[test]
fn settings_follow_config() {
    let app = App::new(AppConfig { exposure: 0.8, dpr: [1.0, 2.0], ..seeded(15) }).unwrap();
    assert_eq!(app.settings.tone_mapping_exposure, 0.8);
    assert_eq!(app.settings.pixel_ratio(3.0), 2.0);
    assert!(app.settings.clear_color.b > app.settings.clear_color.r);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn invalid_config_is_rejected() {
    let err = App::new(AppConfig { particle_count: 0, ..AppConfig::default() }).err().unwrap();
    assert!(matches!(err, FajrError::InvalidConfig(_)));

    let err = App::new(AppConfig { fog_color: Some("teal".into()), ..AppConfig::default() })
        .err()
        .unwrap();
    assert!(matches!(err, FajrError::InvalidColor(_)));
}

#[test]
fn config_from_path_roundtrip() {
    let path = std::env::temp_dir().join(format!("fajr_config_{}.json", std::process::id()));
    let config = AppConfig { seed: Some(3), frames: 10, ..AppConfig::default() };
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let loaded = AppConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);

    assert!(matches!(AppConfig::from_path(&path), Err(FajrError::IoError(_))));
}
