mod config;
mod domain;

use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use config::ConfigPlugin;
use domain::{FootstepAudioPlugin, InputPlugin, SimPlugin, UiPlugin};

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.55, 0.65, 0.78)))
        .insert_resource(Msaa::Sample4)
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "headbob-rs".into(),
                        resolution: (1280., 720.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,headbob_rs=debug".to_string(),
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins(ConfigPlugin::default())
        .add_plugins((SimPlugin, InputPlugin, UiPlugin, FootstepAudioPlugin))
        .add_systems(Startup, setup_scene)
        .run();
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(60.0, 60.0)),
        material: materials.add(Color::srgb(0.32, 0.36, 0.3)),
        ..default()
    });

    let crate_mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let crate_material = materials.add(Color::srgb(0.55, 0.4, 0.25));
    for (x, z) in [(-4.0, -3.0), (3.0, -6.0), (6.0, 2.0), (-7.0, 5.0), (0.0, -12.0)] {
        commands.spawn(PbrBundle {
            mesh: crate_mesh.clone(),
            material: crate_material.clone(),
            transform: Transform::from_xyz(x, 0.5, z),
            ..default()
        });
    }

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
        ..default()
    });
}
