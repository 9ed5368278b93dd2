use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::AppState;
use crate::rendering::hud::skin_button;
use crate::rendering::sprites::SpriteBank;

const START_BACKGROUND: Color = Color::srgb(0.96, 0.87, 0.62);

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app
            // Log + UI spawn on enter
            .add_systems(OnEnter(AppState::StartScreen), (show_menu_instructions, spawn_menu_ui))
            .add_systems(
                Update,
                handle_menu_input.run_if(in_state(AppState::StartScreen)),
            )
            // Cleanup UI on exit
            .add_systems(OnExit(AppState::StartScreen), despawn_menu_ui);
    }
}

#[derive(Component)]
struct MenuUiRoot;

#[derive(Component)]
pub struct StartButton;

fn show_menu_instructions() {
    info!(target: "menu", "=== START SCREEN ===");
    info!(target: "menu", "Click the start button (or press Enter/Space) to play.");
}

fn handle_menu_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let clicked = buttons.iter().any(|i| *i == Interaction::Pressed);
    let key = keys.is_some_and(|k| k.any_just_pressed([KeyCode::Enter, KeyCode::Space]));
    if clicked || key {
        info!(target: "menu", "Starting game");
        next_state.set(AppState::Playing);
    }
}

fn spawn_menu_ui(mut commands: Commands, sprites: Option<Res<SpriteBank>>) {
    let sprites = sprites.as_deref();
    let mut root = commands.spawn((
        MenuUiRoot,
        Name::new("StartScreen"),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(24.0),
            ..default()
        },
    ));
    match sprites.and_then(|s| s.start_background.clone()) {
        Some(image) => root.insert(ImageNode::new(image)),
        None => root.insert(BackgroundColor(START_BACKGROUND)),
    };
    root.with_children(|p| {
        p.spawn((
            Text::new("Flappy Tubes"),
            TextFont {
                font_size: 64.0,
                ..default()
            },
            TextColor(Color::srgb(0.1, 0.35, 0.1)),
        ));
        let mut button = p.spawn((
            StartButton,
            Button,
            Node {
                padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
        ));
        skin_button(&mut button, sprites);
        button.with_children(|b| {
            b.spawn((
                Text::new("Start"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
        p.spawn((
            Text::new("Click to start!"),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::BLACK),
        ));
    });
}

fn despawn_menu_ui(mut commands: Commands, q_root: Query<Entity, With<MenuUiRoot>>) {
    for e in &q_root {
        commands.entity(e).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn pressing_start_enters_play() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_state::<AppState>()
            .add_plugins(MenuPlugin);
        app.update();
        let mut q = app.world_mut().query_filtered::<Entity, With<StartButton>>();
        let button = q.single(app.world()).expect("start button spawned");
        app.world_mut().entity_mut(button).insert(Interaction::Pressed);
        app.update();
        app.update();
        assert_eq!(*app.world().resource::<State<AppState>>().get(), AppState::Playing);
        let mut roots = app.world_mut().query_filtered::<(), With<MenuUiRoot>>();
        assert_eq!(roots.iter(app.world()).count(), 0);
    }

    #[test]
    fn start_screen_uses_loaded_images() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(SpriteBank {
                start_background: Some(Handle::default()),
                button: Some(Handle::default()),
                ..default()
            })
            .init_state::<AppState>()
            .add_plugins(MenuPlugin);
        app.update();
        let mut roots = app
            .world_mut()
            .query_filtered::<&BackgroundColor, (With<MenuUiRoot>, With<ImageNode>)>();
        let fill = roots.single(app.world()).expect("image backed start screen");
        assert_eq!(fill.0, Color::NONE);
        let mut buttons = app
            .world_mut()
            .query_filtered::<(), (With<StartButton>, With<ImageNode>)>();
        assert_eq!(buttons.iter(app.world()).count(), 1);
    }
}
