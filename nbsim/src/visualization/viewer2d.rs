use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::forces::SoftenedGravity;
use crate::simulation::integrator::Integrator;

#[derive(Component)]
struct BodyIndex(pub usize);

/// The running simulation, owned by Bevy as a resource
#[derive(Resource)]
struct Viewer {
    integrator: Integrator<SoftenedGravity>,
    trail_length: usize,
}

/// World-space → screen-space scaling factor for positions
const SCALE: f32 = 50.0;
const BODY_RADIUS: f32 = 2.0;

/// Open a window showing the x-y projection of the system.
/// One integration step per frame; the picture freezes once the run is done.
pub fn run_2d(integrator: Integrator<SoftenedGravity>, trail_length: usize) {
    log::info!(
        "run_2d: starting Bevy 2D viewer with {} bodies, {} steps",
        integrator.state().n_bodies(),
        integrator.total_steps()
    );

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Viewer { integrator, trail_length })
        // logging is already set up by the binary
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (physics_step_system, sync_transforms_system, draw_trails_system).chain())
        .run();
}

fn setup_bodies_system(mut commands: Commands, viewer: Res<Viewer>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let mesh = Mesh2dHandle(meshes.add(Circle::new(BODY_RADIUS)));
    let material = materials.add(ColorMaterial::from(Color::WHITE));

    let state = viewer.integrator.state();
    for i in 0..state.n_bodies() {
        let x = state.position(i);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: mesh.clone(),
                material: material.clone(),
                transform: Transform::from_xyz(x.x as f32 * SCALE, x.y as f32 * SCALE, 1.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn physics_step_system(mut viewer: ResMut<Viewer>) {
    if !viewer.integrator.advance() {
        return;
    }
    let steps = viewer.integrator.steps_taken();
    if steps == viewer.integrator.total_steps() {
        log::info!("run_2d: finished after {} steps", steps);
    }
}

fn sync_transforms_system(viewer: Res<Viewer>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let positions = &viewer.integrator.state().positions;
    for (BodyIndex(i), mut transform) in &mut query {
        if *i < positions.nrows() {
            transform.translation.x = (positions[(*i, 0)] as f32) * SCALE;
            transform.translation.y = (positions[(*i, 1)] as f32) * SCALE;
        }
    }
}

/// Trails from the most recent `trail_length` snapshots
fn draw_trails_system(viewer: Res<Viewer>, mut gizmos: Gizmos) {
    let trajectory = viewer.integrator.trajectory();
    let trail = trajectory.trail(trajectory.len().saturating_sub(1), viewer.trail_length);
    if trail.len() < 2 {
        return;
    }

    let cornflower = Color::srgb(0.39, 0.58, 0.93);
    for i in 0..viewer.integrator.state().n_bodies() {
        let points = trail
            .iter()
            .map(|r| Vec2::new(r[(i, 0)] as f32 * SCALE, r[(i, 1)] as f32 * SCALE));
        gizmos.linestrip_2d(points, cornflower);
    }
}
