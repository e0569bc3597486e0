pub mod head_bob;

use bevy::prelude::*;

use crate::config::{GameSettings, HeadBobDefaults};

pub use head_bob::{advance, BobToggles, HeadBobConfig, HeadBobState};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    #[default]
    Hidden,
    Main,
    Settings,
    Journal,
}

impl MenuState {
    /// Where the menu key leads from here: open, close, or back out of a sub-panel.
    pub fn on_escape(self) -> Self {
        match self {
            MenuState::Hidden => MenuState::Main,
            MenuState::Main => MenuState::Hidden,
            MenuState::Settings | MenuState::Journal => MenuState::Main,
        }
    }
}

#[derive(Component)]
pub struct Player;

#[derive(Component, Default)]
pub struct FirstPersonCamera {
    pub pitch: f32,
}

/// Latest movement request for a player, written by the controls each frame.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementIntent {
    /// x strafes, y walks forward.
    pub direction: Vec2,
    /// Head-bob drive; its meaning depends on the control scheme.
    pub magnitude: f32,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FootstepEvent {
    pub camera: Entity,
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<MenuState>()
            .init_resource::<GameSettings>()
            .init_resource::<HeadBobDefaults>()
            .add_event::<FootstepEvent>()
            .add_systems(Startup, spawn_player)
            .add_systems(FixedUpdate, apply_head_bob.run_if(control_permitted));
    }
}

/// Player input only reaches the world while no menu is up.
pub fn control_permitted(settings: Res<GameSettings>, menu: Res<State<MenuState>>) -> bool {
    settings.controls_enabled && *menu.get() == MenuState::Hidden
}

fn spawn_player(mut commands: Commands, defaults: Res<HeadBobDefaults>) {
    let bob = defaults.0;
    commands
        .spawn((
            SpatialBundle::from_transform(Transform::from_xyz(0.0, 0.0, 6.0)),
            Player,
            MovementIntent::default(),
            Name::new("Player"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Camera3dBundle {
                    transform: Transform::from_xyz(0.0, bob.midpoint, 0.0),
                    ..default()
                },
                FirstPersonCamera::default(),
                HeadBobState::default(),
                bob,
                Name::new("FirstPersonCamera"),
            ));
        });
    debug!("Spawned player, camera midpoint {:.2}", bob.midpoint);
}

pub fn apply_head_bob(
    time: Res<Time>,
    settings: Res<GameSettings>,
    players: Query<&MovementIntent, With<Player>>,
    mut cameras: Query<
        (
            Entity,
            &Parent,
            &HeadBobConfig,
            &mut HeadBobState,
            &mut Transform,
        ),
        With<FirstPersonCamera>,
    >,
    mut ev_footstep: EventWriter<FootstepEvent>,
) {
    let dt = time.delta_seconds();
    let toggles = settings.bob_toggles();

    for (camera, parent, config, mut state, mut transform) in &mut cameras {
        let magnitude = players
            .get(parent.get())
            .map(|intent| intent.magnitude)
            .unwrap_or(0.0);

        let tick = advance(*state, config, magnitude, dt, toggles);
        *state = tick.state;
        transform.translation.y = tick.camera_offset_y;

        if tick.footstep {
            ev_footstep.send(FootstepEvent { camera });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::f32::consts::TAU;
    use std::time::Duration;

    fn world_with_rig(magnitude: f32) -> (World, Entity) {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_millis(100));
        world.insert_resource(time);
        world.insert_resource(GameSettings::default());
        world.init_resource::<Events<FootstepEvent>>();

        let config = HeadBobConfig {
            bobbing_speed: TAU,
            bobbing_amount: 0.1,
            midpoint: 1.0,
        };
        let player = world
            .spawn((
                Transform::default(),
                Player,
                MovementIntent {
                    direction: Vec2::Y,
                    magnitude,
                },
            ))
            .id();
        let camera = world
            .spawn((
                Transform::from_xyz(0.0, 1.0, 0.0),
                FirstPersonCamera::default(),
                HeadBobState::default(),
                config,
            ))
            .id();
        world.entity_mut(player).add_child(camera);
        (world, camera)
    }

    #[test]
    fn escape_cycles_between_panels() {
        assert_eq!(MenuState::Hidden.on_escape(), MenuState::Main);
        assert_eq!(MenuState::Main.on_escape(), MenuState::Hidden);
        assert_eq!(MenuState::Settings.on_escape(), MenuState::Main);
        assert_eq!(MenuState::Journal.on_escape(), MenuState::Main);
    }

    #[test]
    fn walking_camera_fires_one_footstep_per_cycle() {
        let (mut world, camera) = world_with_rig(1.0);
        let mut fired = 0;
        for _ in 0..10 {
            world.run_system_once(apply_head_bob);
            let mut events = world.resource_mut::<Events<FootstepEvent>>();
            fired += events.drain().filter(|ev| ev.camera == camera).count();
        }
        assert_eq!(fired, 1);

        let state = world.get::<HeadBobState>(camera).unwrap();
        assert!(state.phase <= TAU);
    }

    #[test]
    fn camera_height_follows_the_bob() {
        let (mut world, camera) = world_with_rig(1.0);
        world.run_system_once(apply_head_bob);
        // First tick samples sin(0).
        assert_eq!(world.get::<Transform>(camera).unwrap().translation.y, 1.0);
        world.run_system_once(apply_head_bob);
        assert!(world.get::<Transform>(camera).unwrap().translation.y > 1.0);
    }

    #[test]
    fn standing_player_keeps_camera_at_midpoint() {
        let (mut world, camera) = world_with_rig(0.0);
        world.get_mut::<HeadBobState>(camera).unwrap().phase = 2.0;
        world.run_system_once(apply_head_bob);
        assert_eq!(world.get::<HeadBobState>(camera).unwrap().phase, 0.0);
        assert_eq!(world.get::<Transform>(camera).unwrap().translation.y, 1.0);
        assert!(world.resource::<Events<FootstepEvent>>().is_empty());
    }

    #[test]
    fn open_menu_blocks_control() {
        let mut world = World::new();
        world.insert_resource(GameSettings::default());
        world.insert_resource(State::new(MenuState::Hidden));
        assert!(world.run_system_once(control_permitted));

        world.insert_resource(State::new(MenuState::Journal));
        assert!(!world.run_system_once(control_permitted));

        world.insert_resource(State::new(MenuState::Hidden));
        world.resource_mut::<GameSettings>().controls_enabled = false;
        assert!(!world.run_system_once(control_permitted));
    }

    fn camera_snapshot(app: &mut App) -> (HeadBobState, f32) {
        let world = app.world_mut();
        let (state, transform) = world
            .query_filtered::<(&HeadBobState, &Transform), With<FirstPersonCamera>>()
            .single(world);
        (*state, transform.translation.y)
    }

    #[test]
    fn open_menu_freezes_head_bob_in_the_app() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .insert_resource(HeadBobDefaults(HeadBobConfig {
                bobbing_speed: 1.0,
                bobbing_amount: 0.1,
                midpoint: 1.0,
            }))
            .add_plugins(SimPlugin);
        app.update();

        {
            let world = app.world_mut();
            let mut intent = world
                .query_filtered::<&mut MovementIntent, With<Player>>()
                .single_mut(world);
            intent.magnitude = 1.0;
        }
        for _ in 0..3 {
            app.update();
        }
        let (walking, _) = camera_snapshot(&mut app);
        assert!(walking.phase > 0.0);

        app.world_mut()
            .resource_mut::<NextState<MenuState>>()
            .set(MenuState::Settings);
        app.update();
        let paused = camera_snapshot(&mut app);

        for _ in 0..5 {
            app.update();
        }
        assert_eq!(camera_snapshot(&mut app), paused);
        assert!(app.world().resource::<Events<FootstepEvent>>().is_empty());
    }
}
