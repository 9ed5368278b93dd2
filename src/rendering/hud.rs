use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use crate::app::state::AppState;
use crate::core::components::PlayScene;
use crate::core::config::GameConfig;
use crate::core::system::system_order::SessionSet;
use crate::gameplay::session::{Banner, SessionEffect};
use crate::rendering::sprites::SpriteBank;

const HUD_FONT_SIZE: f32 = 30.0;
const BANNER_FONT_SIZE: f32 = 50.0;
const BANNER_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const BUTTON_IDLE: Color = Color::srgb(0.93, 0.55, 0.13);
pub const BUTTON_HOVER: Color = Color::srgb(0.98, 0.66, 0.25);
pub const BUTTON_PRESSED: Color = Color::srgb(0.78, 0.42, 0.08);
// Tints for image buttons.
const TINT_HOVER: Color = Color::srgb(1.0, 0.93, 0.8);
const TINT_PRESSED: Color = Color::srgb(0.75, 0.75, 0.75);

/// Role of each text node the HUD rewrites.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Time,
    Lives,
    BannerMessage,
    ControlLabel,
}

/// Root of the "life lost" / "game over" overlay.
#[derive(Component)]
pub struct BannerRoot;

/// The continue/restart control inside the banner.
#[derive(Component)]
pub struct RestartButton;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_hud)
            .add_systems(Update, apply_hud_effects.in_set(SessionSet::Apply))
            .add_systems(Update, button_feedback);
    }
}

pub fn time_label(secs: u64) -> String {
    format!("Time: {secs}")
}

pub fn lives_label(lives: u32) -> String {
    format!("Lives: {lives}")
}

pub fn spawn_hud(mut commands: Commands, cfg: Res<GameConfig>) {
    commands
        .spawn((
            Name::new("Hud"),
            PlayScene,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            ZIndex(1),
        ))
        .with_children(|p| {
            p.spawn((
                HudText::Time,
                Text::new(time_label(0)),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            p.spawn((
                HudText::Lives,
                Text::new(lives_label(cfg.session.lives.max(1))),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Button face: the button image when loaded, a flat fill otherwise.
pub fn skin_button(button: &mut EntityCommands, sprites: Option<&SpriteBank>) {
    match sprites.and_then(|s| s.button.clone()) {
        Some(image) => button.insert(ImageNode::new(image)),
        None => button.insert(BackgroundColor(BUTTON_IDLE)),
    };
}

fn spawn_banner(commands: &mut Commands, banner: Banner, sprites: Option<&SpriteBank>) {
    commands
        .spawn((
            Name::new("Banner"),
            BannerRoot,
            PlayScene,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            ZIndex(2),
        ))
        .with_children(|p| {
            p.spawn((
                HudText::BannerMessage,
                Text::new(banner.message()),
                TextFont {
                    font_size: BANNER_FONT_SIZE,
                    ..default()
                },
                TextColor(BANNER_COLOR),
            ));
            let mut button = p.spawn((
                RestartButton,
                Button,
                Node {
                    padding: UiRect::axes(Val::Px(28.0), Val::Px(12.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
            ));
            skin_button(&mut button, sprites);
            button.with_children(|b| {
                b.spawn((
                    HudText::ControlLabel,
                    Text::new(banner.control_label()),
                    TextFont {
                        font_size: HUD_FONT_SIZE,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
        });
}

fn apply_hud_effects(
    mut commands: Commands,
    mut effects: EventReader<SessionEffect>,
    mut texts: Query<(&mut Text, &HudText)>,
    banners: Query<Entity, With<BannerRoot>>,
    sprites: Option<Res<SpriteBank>>,
) {
    // Guards against spawning twice when several effects land in one frame.
    let mut banner_present = !banners.is_empty();
    for effect in effects.read() {
        match *effect {
            SessionEffect::LivesChanged(lives) => {
                set_text(&mut texts, HudText::Lives, lives_label(lives));
            }
            SessionEffect::ClockChanged(secs) => {
                set_text(&mut texts, HudText::Time, time_label(secs));
            }
            SessionEffect::ShowBanner(banner) => {
                if banner_present {
                    set_text(&mut texts, HudText::BannerMessage, banner.message().into());
                    set_text(&mut texts, HudText::ControlLabel, banner.control_label().into());
                } else {
                    spawn_banner(&mut commands, banner, sprites.as_deref());
                    banner_present = true;
                }
            }
            SessionEffect::ClearBanner => {
                for e in &banners {
                    commands.entity(e).despawn();
                }
                banner_present = false;
            }
            _ => {}
        }
    }
}

fn set_text(texts: &mut Query<(&mut Text, &HudText)>, role: HudText, value: String) {
    for (mut text, r) in texts.iter_mut() {
        if *r == role && text.0 != value {
            text.0 = value.clone();
        }
    }
}

pub fn button_feedback(
    mut fills: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, Without<ImageNode>),
    >,
    mut images: Query<(&Interaction, &mut ImageNode), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut bg) in &mut fills {
        bg.0 = match interaction {
            Interaction::Pressed => BUTTON_PRESSED,
            Interaction::Hovered => BUTTON_HOVER,
            Interaction::None => BUTTON_IDLE,
        };
    }
    for (interaction, mut image) in &mut images {
        image.color = match interaction {
            Interaction::Pressed => TINT_PRESSED,
            Interaction::Hovered => TINT_HOVER,
            Interaction::None => Color::WHITE,
        };
    }
}
