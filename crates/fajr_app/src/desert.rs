//! Desert dawn scene assembly.
//!
//! Everything here is static: nodes, primitives, materials, lights and
//! atmosphere are laid out once. The returned [`Desert`] names the nodes
//! the [`FrameAnimator`](fajr_animation::FrameAnimator) drives afterwards.

use std::f32::consts::FRAC_PI_2;

use fajr_animation::{AnimationRig, FloatDrift, LOOK_TARGET, ParticleField};
use fajr_core::{Result, color};
use fajr_resources::{
    BoxOptions, CircleOptions, CylinderOptions, Geometry, Material, PlaneOptions, SphereOptions, create_box,
    create_circle, create_cylinder, create_plane, create_sphere,
};
use fajr_scene::{
    Camera, Environment, EnvironmentPreset, Fog, Light, NodeHandle, Points, Scene, ShadowConfig, Sky,
};
use glam::Vec3;
use rand::RngExt;

use crate::config::AppConfig;

pub const BACKGROUND: u32 = 0x0d1e2e;
pub const FOG_COLOR: u32 = 0x13273c;
pub const FOG_RANGE: (f32, f32) = (12.0, 45.0);

pub const CAMERA_START: Vec3 = Vec3::new(0.0, 3.2, 8.0);
pub const CAMERA_FOV: f32 = 42.0;

pub const SUN_GLOW_POSITION: Vec3 = Vec3::new(9.0, 4.0, -7.0);

/// Dune placement: `(position, scale, yaw)`.
pub const DUNES: [(Vec3, Vec3, f32); 4] = [
    (Vec3::new(-6.1, 1.2, -4.2), Vec3::new(6.8, 2.4, 6.8), 0.4),
    (Vec3::new(4.9, 0.6, -5.8), Vec3::new(5.4, 1.8, 5.4), -0.3),
    (Vec3::new(-3.2, 0.3, 5.4), Vec3::new(4.2, 1.4, 4.8), 0.62),
    (Vec3::new(6.5, 0.9, 3.8), Vec3::new(6.2, 2.1, 5.6), -0.52),
];

/// Handles produced by [`build`].
#[derive(Debug, Clone, Copy)]
pub struct Desert {
    pub rig: AnimationRig<NodeHandle>,
    pub float_drift: FloatDrift,
}

/// Populates `scene` with the desert dawn.
///
/// `rng` places the dust particles and picks the float offset; pass a
/// seeded generator for reproducible output.
pub fn build<R: RngExt + ?Sized>(scene: &mut Scene, config: &AppConfig, rng: &mut R) -> Result<Desert> {
    setup_atmosphere(scene, config)?;
    let camera = setup_camera(scene, config);
    setup_lights(scene);

    build_ground(scene);
    build_dunes(scene);
    build_sun_glow(scene);
    build_dust_sheen(scene);
    build_prayer_mat(scene);

    let figure = build_figure(scene);
    let particles = build_particles(scene, config.particle_count, rng);
    let float_drift = FloatDrift::random(rng);

    log::info!(
        "Desert scene assembled: {} nodes, {} meshes, {} particles",
        scene.nodes.len(),
        scene.meshes.len(),
        config.particle_count
    );

    Ok(Desert {
        rig: AnimationRig {
            camera,
            float_group: Some(figure.float_group),
            figure: figure.body,
            cloth: figure.cloth,
            hands: figure.hands,
            particles,
        },
        float_drift,
    })
}

fn setup_atmosphere(scene: &mut Scene, config: &AppConfig) -> Result<()> {
    scene.background = match &config.background {
        Some(literal) => color::parse_hex(literal)?,
        None => color::hex(BACKGROUND),
    };

    let fog_color = match &config.fog_color {
        Some(literal) => color::parse_hex(literal)?,
        None => color::hex(FOG_COLOR),
    };
    scene.fog = Some(Fog::new(fog_color, FOG_RANGE.0, FOG_RANGE.1));

    scene.environment = Environment {
        preset: Some(EnvironmentPreset::Sunset),
        resolution: 1024,
        intensity: 1.0,
    };
    scene.sky = Some(Sky {
        distance: 450_000.0,
        turbidity: 4.0,
        rayleigh: 2.5,
        mie_coefficient: 0.009,
        mie_directional_g: 0.7,
        sun_position: Vec3::new(20.0, 4.0, -10.0),
        inclination: 0.52,
        azimuth: 0.2,
    });
    Ok(())
}

fn setup_camera(scene: &mut Scene, config: &AppConfig) -> NodeHandle {
    let handle = scene.build_node("Camera").with_position(CAMERA_START).build();
    if let Some(node) = scene.get_node_mut(handle) {
        node.transform.look_at(LOOK_TARGET.as_vec3(), Vec3::Y);
    }
    scene.set_camera(handle, Camera::new_perspective(CAMERA_FOV, config.aspect(), 0.1, 200.0));
    scene.active_camera = Some(handle);
    handle
}

fn setup_lights(scene: &mut Scene) {
    let ambient = scene.create_node_with_name("AmbientLight");
    scene.set_light(ambient, Light::new_ambient(Vec3::ONE, 0.25));

    let sun = scene.build_node("SunLight").with_position(Vec3::new(12.0, 8.0, -2.0)).build();
    scene.set_light(
        sun,
        Light::new_directional(color::hex(0xffddaf), 2.1).with_shadow(ShadowConfig::square(2048, 1.0, 40.0, 12.0)),
    );
}

/// Adds a geometry/material pair and returns their keys as a mesh builder.
fn mesh_node<'a>(
    scene: &'a mut Scene,
    name: &str,
    geometry: Geometry,
    material: Material,
) -> fajr_scene::NodeBuilder<'a> {
    let geometry = scene.add_geometry(geometry);
    let material = scene.add_material(material);
    scene.build_node(name).with_mesh(geometry, material)
}

/// Rotation that lays an XY-plane primitive flat on the ground.
const FLAT: Vec3 = Vec3::new(-FRAC_PI_2, 0.0, 0.0);

fn build_ground(scene: &mut Scene) {
    mesh_node(
        scene,
        "Ground",
        create_plane(PlaneOptions::new(80.0, 80.0).segments(128, 128)),
        Material::standard(color::hex(0xd6b58c)).with_standard(|m| {
            m.roughness = 0.85;
            m.metalness = 0.05;
            m.displacement_scale = 0.35;
            m.env_map_intensity = 0.2;
        }),
    )
    .with_rotation(FLAT)
    .receive_shadow()
    .build();

    mesh_node(
        scene,
        "GroundHighlight",
        create_plane(PlaneOptions::new(22.0, 22.0)),
        Material::standard(color::hex(0xdcbf9a))
            .with_standard(|m| m.roughness = 0.9)
            .with_opacity(0.85),
    )
    .with_position(Vec3::new(0.0, 0.02, 0.0))
    .with_rotation(FLAT)
    .receive_shadow()
    .build();
}

fn build_dunes(scene: &mut Scene) {
    let geometry = scene.add_geometry(create_sphere(SphereOptions::new(1.0, 64, 64)));
    let material = scene.add_material(Material::standard(color::hex(0xc79f70)).with_standard(|m| {
        m.roughness = 0.8;
    }));

    for (i, (position, scale, yaw)) in DUNES.into_iter().enumerate() {
        scene
            .build_node(&format!("Dune{i}"))
            .with_position(position)
            .with_rotation(Vec3::new(0.0, yaw, 0.0))
            .with_scale(scale)
            .with_mesh(geometry, material)
            .cast_shadow()
            .receive_shadow()
            .build();
    }
}

fn build_sun_glow(scene: &mut Scene) {
    let glow = scene.build_node("SunGlow").with_position(SUN_GLOW_POSITION).build();

    mesh_node(
        scene,
        "SunCore",
        create_sphere(SphereOptions::new(1.1, 32, 32)),
        Material::basic(color::hex(0xffe7b2)).with_opacity(0.12),
    )
    .with_parent(glow)
    .build();

    mesh_node(
        scene,
        "SunHalo",
        create_sphere(SphereOptions::new(1.0, 32, 32)),
        Material::basic(color::hex(0xffcc7a)).with_opacity(0.045),
    )
    .with_scale(Vec3::splat(3.0))
    .with_parent(glow)
    .build();
}

fn build_dust_sheen(scene: &mut Scene) {
    mesh_node(
        scene,
        "DustSheen",
        create_circle(CircleOptions { radius: 20.0, segments: 64 }),
        Material::basic(color::hex(0xf7b97c)).with_opacity(0.07).without_depth_write(),
    )
    .with_position(Vec3::new(0.0, 4.5, 0.0))
    .with_rotation(FLAT)
    .build();
}

/// Base, border and inlay. The two planes are laid flat so they stack on
/// the border box.
fn build_prayer_mat(scene: &mut Scene) {
    let mat = scene.build_node("PrayerMat").with_position(Vec3::new(0.0, 0.01, 0.0)).build();

    mesh_node(
        scene,
        "MatBase",
        create_plane(PlaneOptions::new(1.35, 2.1)),
        Material::standard(color::hex(0x223646)).with_standard(|m| {
            m.roughness = 0.6;
            m.metalness = 0.1;
            m.emissive = color::hex(0x1f2933);
            m.emissive_intensity = 0.2;
        }),
    )
    .with_position(Vec3::new(0.0, 0.01, 0.0))
    .with_rotation(FLAT)
    .receive_shadow()
    .with_parent(mat)
    .build();

    mesh_node(
        scene,
        "MatBorder",
        create_box(BoxOptions::new(1.4, 0.008, 2.15)),
        Material::standard(color::hex(0x406178)).with_standard(|m| {
            m.roughness = 0.5;
            m.metalness = 0.12;
        }),
    )
    .with_parent(mat)
    .build();

    mesh_node(
        scene,
        "MatInlay",
        create_plane(PlaneOptions::new(1.15, 1.8)),
        Material::standard(color::hex(0x2f4e63)).with_standard(|m| {
            m.roughness = 0.55;
            m.metalness = 0.05;
            m.polygon_offset_factor = -0.5;
        }),
    )
    .with_position(Vec3::new(0.0, 0.014, 0.0))
    .with_rotation(FLAT)
    .with_parent(mat)
    .build();
}

struct Figure {
    float_group: NodeHandle,
    body: NodeHandle,
    cloth: NodeHandle,
    hands: [NodeHandle; 2],
}

fn build_figure(scene: &mut Scene) -> Figure {
    let float_group = scene.create_node_with_name("Float");
    let body = scene
        .build_node("Figure")
        .with_position(Vec3::new(0.0, 1.25, 0.0))
        .with_parent(float_group)
        .build();

    mesh_node(
        scene,
        "Head",
        create_sphere(SphereOptions::new(0.22, 32, 32)),
        Material::standard(color::hex(0xf0d9c0)).with_standard(|m| {
            m.roughness = 0.45;
            m.emissive = color::hex(0x2e1f12);
            m.emissive_intensity = 0.02;
        }),
    )
    .with_position(Vec3::new(0.0, 0.95, 0.0))
    .cast_shadow()
    .with_parent(body)
    .build();

    mesh_node(
        scene,
        "Robe",
        create_cylinder(CylinderOptions::new(0.38, 0.46, 1.05, 32)),
        Material::standard(color::hex(0xfbf8f1)).with_standard(|m| {
            m.roughness = 0.36;
            m.metalness = 0.02;
            m.emissive = color::hex(0xf0f5ff);
            m.emissive_intensity = 0.08;
        }),
    )
    .with_position(Vec3::new(0.0, 0.42, 0.0))
    .cast_shadow()
    .receive_shadow()
    .with_parent(body)
    .build();

    let cloth = scene
        .build_node("Cloth")
        .with_position(Vec3::new(0.0, 0.3, 0.35))
        .with_parent(body)
        .build();

    mesh_node(
        scene,
        "ClothPanel",
        create_box(BoxOptions::new(1.0, 1.0, 1.0)),
        Material::standard(color::hex(0xfefefe)).with_standard(|m| {
            m.roughness = 0.3;
            m.emissive = color::hex(0xfbeac6);
            m.emissive_intensity = 0.06;
        }),
    )
    .with_scale(Vec3::new(0.3, 0.48, 0.05))
    .cast_shadow()
    .with_parent(cloth)
    .build();

    let hands = [
        build_hand(scene, "HandLeft", Vec3::new(-0.36, 0.62, 0.24), body),
        build_hand(scene, "HandRight", Vec3::new(0.36, 0.62, 0.24), body),
    ];

    Figure { float_group, body, cloth, hands }
}

fn build_hand(scene: &mut Scene, name: &str, position: Vec3, body: NodeHandle) -> NodeHandle {
    let group = scene.build_node(name).with_position(position).with_parent(body).build();

    mesh_node(
        scene,
        &format!("{name}Arm"),
        create_cylinder(CylinderOptions::new(0.09, 0.1, 0.45, 20)),
        Material::standard(color::hex(0xfbfbfb)).with_standard(|m| {
            m.roughness = 0.4;
            m.emissive = color::hex(0xfff5dc);
            m.emissive_intensity = 0.04;
        }),
    )
    .with_position(Vec3::new(0.0, -0.22, 0.0))
    .cast_shadow()
    .with_parent(group)
    .build();

    mesh_node(
        scene,
        &format!("{name}Palm"),
        create_sphere(SphereOptions::new(0.11, 20, 20)),
        Material::standard(color::hex(0xf4dbc2)).with_standard(|m| m.roughness = 0.5),
    )
    .with_position(Vec3::new(0.0, -0.52, 0.08))
    .cast_shadow()
    .with_parent(group)
    .build();

    group
}

fn build_particles<R: RngExt + ?Sized>(scene: &mut Scene, count: usize, rng: &mut R) -> NodeHandle {
    let field = ParticleField::generate(count, rng);
    let material = scene.add_material(
        Material::points(color::hex(0xffe9c9), 0.055)
            .with_opacity(0.75)
            .with_size_attenuation()
            .without_depth_write(),
    );

    let handle = scene.create_node_with_name("Particles");
    scene.set_points(handle, Points::new(field, material));
    handle
}
