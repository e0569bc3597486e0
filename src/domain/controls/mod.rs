use crate::config::{ControlScheme, GameSettings};
use crate::domain::simulation::{
    control_permitted, FirstPersonCamera, MenuState, MovementIntent, Player,
};
use bevy::input::gamepad::{GamepadConnection, GamepadEvent};
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use std::f32::consts::FRAC_PI_2;

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;

pub const HELP_KEY: KeyCode = KeyCode::KeyH;
pub const DIAGNOSTICS_KEY: KeyCode = KeyCode::F3;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveAction {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveAction {
    pub const ALL: [MoveAction; 4] = [
        MoveAction::Forward,
        MoveAction::Back,
        MoveAction::Left,
        MoveAction::Right,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MoveAction::Forward => "Forward",
            MoveAction::Back => "Back",
            MoveAction::Left => "Left",
            MoveAction::Right => "Right",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RebindOutcome {
    Bound,
    /// The key belonged to another direction, which now has the old key.
    Swapped(MoveAction),
    /// Menu and overlay keys cannot drive movement.
    Reserved,
}

#[derive(Resource)]
pub struct Keybinds {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub menu: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            menu: KeyCode::Escape,
        }
    }
}

impl Keybinds {
    pub fn key_for(&self, action: MoveAction) -> KeyCode {
        match action {
            MoveAction::Forward => self.forward,
            MoveAction::Back => self.back,
            MoveAction::Left => self.left,
            MoveAction::Right => self.right,
        }
    }

    fn slot_mut(&mut self, action: MoveAction) -> &mut KeyCode {
        match action {
            MoveAction::Forward => &mut self.forward,
            MoveAction::Back => &mut self.back,
            MoveAction::Left => &mut self.left,
            MoveAction::Right => &mut self.right,
        }
    }

    pub fn rebind(&mut self, action: MoveAction, key: KeyCode) -> RebindOutcome {
        if key == self.menu || key == HELP_KEY || key == DIAGNOSTICS_KEY {
            return RebindOutcome::Reserved;
        }
        let previous = self.key_for(action);
        let holder = MoveAction::ALL
            .into_iter()
            .find(|other| *other != action && self.key_for(*other) == key);
        *self.slot_mut(action) = key;
        match holder {
            Some(other) => {
                *self.slot_mut(other) = previous;
                RebindOutcome::Swapped(other)
            }
            None => RebindOutcome::Bound,
        }
    }
}

#[derive(Resource)]
struct MyGamepad(Gamepad);

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>()
            .add_systems(
                Update,
                (
                    gamepad_connections,
                    menu_toggle,
                    help_toggle,
                    diagnostics_toggle,
                    (player_movement, mouse_look).run_if(control_permitted),
                ),
            )
            .add_systems(OnEnter(MenuState::Hidden), grab_cursor)
            .add_systems(
                OnExit(MenuState::Hidden),
                (release_cursor, clear_movement_intent),
            );
    }
}

/// Head-bob drive for a raw movement vector under the given scheme.
pub fn movement_magnitude(scheme: ControlScheme, input: Vec2) -> f32 {
    match scheme {
        ControlScheme::Keyboard => input.length_squared(),
        ControlScheme::Gamepad => input.y,
    }
}

fn keyboard_direction(keys: &ButtonInput<KeyCode>, keybinds: &Keybinds) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if keys.pressed(keybinds.forward) {
        dir.y += 1.0;
    }
    if keys.pressed(keybinds.back) {
        dir.y -= 1.0;
    }
    if keys.pressed(keybinds.left) {
        dir.x -= 1.0;
    }
    if keys.pressed(keybinds.right) {
        dir.x += 1.0;
    }
    dir
}

fn player_movement(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    settings: Res<GameSettings>,
    my_gamepad: Option<Res<MyGamepad>>,
    axes: Res<Axis<GamepadAxis>>,
    mut players: Query<(&mut Transform, &mut MovementIntent), With<Player>>,
) {
    let dt = time.delta_seconds();
    let Ok((mut transform, mut intent)) = players.get_single_mut() else {
        return;
    };

    let dir = match (settings.control_scheme, my_gamepad.as_deref()) {
        (ControlScheme::Gamepad, Some(MyGamepad(gamepad))) => {
            let axis_lx = GamepadAxis {
                gamepad: *gamepad,
                axis_type: GamepadAxisType::LeftStickX,
            };
            let axis_ly = GamepadAxis {
                gamepad: *gamepad,
                axis_type: GamepadAxisType::LeftStickY,
            };
            Vec2::new(
                axes.get(axis_lx).unwrap_or(0.0),
                axes.get(axis_ly).unwrap_or(0.0),
            )
        }
        _ => keyboard_direction(&keys, &keybinds),
    };

    *intent = MovementIntent {
        direction: dir,
        magnitude: movement_magnitude(settings.control_scheme, dir),
    };

    if dir.length_squared() > 1e-6 {
        let forward = transform.forward().as_vec3();
        let right = transform.right().as_vec3();
        let step = (forward * dir.y + right * dir.x).normalize_or_zero();
        transform.translation += step * settings.move_speed * dir.length().min(1.0) * dt;
    }
}

fn mouse_look(
    mut motion: EventReader<MouseMotion>,
    settings: Res<GameSettings>,
    mut players: Query<&mut Transform, (With<Player>, Without<FirstPersonCamera>)>,
    mut cameras: Query<(&mut Transform, &mut FirstPersonCamera), Without<Player>>,
) {
    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    for mut t in &mut players {
        t.rotate_y(-delta.x * settings.mouse_sensitivity);
    }
    for (mut t, mut cam) in &mut cameras {
        cam.pitch =
            (cam.pitch - delta.y * settings.mouse_sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        t.rotation = Quat::from_rotation_x(cam.pitch);
    }
}

/// Input stops being read while a menu is up, so drop whatever was held
/// when it opened.
fn clear_movement_intent(mut intents: Query<&mut MovementIntent, With<Player>>) {
    for mut intent in &mut intents {
        *intent = MovementIntent::default();
    }
}

fn menu_toggle(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    menu: Res<State<MenuState>>,
    mut next_menu: ResMut<NextState<MenuState>>,
) {
    if keys.just_pressed(keybinds.menu) {
        let next = menu.get().on_escape();
        debug!("Menu {:?} -> {:?}", menu.get(), next);
        next_menu.set(next);
    }
}

fn help_toggle(mut settings: ResMut<GameSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(HELP_KEY) {
        settings.show_help = !settings.show_help;
    }
}

fn diagnostics_toggle(mut settings: ResMut<GameSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(DIAGNOSTICS_KEY) {
        settings.show_diagnostics = !settings.show_diagnostics;
    }
}

fn set_cursor_lock(windows: &mut Query<&mut Window, With<PrimaryWindow>>, locked: bool) {
    if let Ok(mut window) = windows.get_single_mut() {
        window.cursor.grab_mode = if locked {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        window.cursor.visible = !locked;
    }
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    set_cursor_lock(&mut windows, true);
}

fn release_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    set_cursor_lock(&mut windows, false);
}

fn gamepad_connections(
    mut commands: Commands,
    my_gamepad: Option<Res<MyGamepad>>,
    mut evr_gamepad: EventReader<GamepadEvent>,
) {
    for ev in evr_gamepad.read() {
        let GamepadEvent::Connection(ev_conn) = ev else {
            continue;
        };
        match &ev_conn.connection {
            GamepadConnection::Connected(info) => {
                info!(
                    "Gamepad connected: {:?}, name: {}",
                    ev_conn.gamepad, info.name,
                );
                if my_gamepad.is_none() {
                    commands.insert_resource(MyGamepad(ev_conn.gamepad));
                }
            }
            GamepadConnection::Disconnected => {
                info!("Gamepad disconnected: {:?}", ev_conn.gamepad);
                if let Some(MyGamepad(old_id)) = my_gamepad.as_deref() {
                    if *old_id == ev_conn.gamepad {
                        commands.remove_resource::<MyGamepad>();
                    }
                }
            }
        }
    }
}
