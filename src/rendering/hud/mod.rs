//! Screen-space text: distance prompt (bottom-left), score and clock (top-right), game-over banner.
use bevy::prelude::*;

use crate::app::state::RoundState;
use crate::core::config::GameConfig;
use crate::core::system::system_order::HudSet;
use crate::gameplay::round::RoundClock;
use crate::gameplay::target::{HiddenTarget, Score};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Distance,
    Points,
    TimeLeft,
    GameOver,
}

/// Distance is truncated toward zero, never rounded up.
pub fn distance_line(distance: f32) -> String {
    format!("Find the hidden point with WSAD! Distance to target: {}", distance as i32)
}

pub fn points_line(points: u32) -> String {
    format!("Points found: {points}")
}

pub fn time_line(time_left: i32) -> String {
    format!("Time left: {time_left}")
}

pub fn game_over_line(points: u32) -> String {
    format!("Game Over! Score: {points}\nPress R to play again")
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud.in_set(HudSet));
    }
}

pub fn spawn_hud(mut commands: Commands, cfg: Res<GameConfig>) {
    let font = TextFont {
        font_size: cfg.hud.font_size,
        ..default()
    };
    let color = TextColor(cfg.hud.color.to_color());

    commands.spawn((
        Text::new(distance_line(0.0)),
        font.clone(),
        color,
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(8.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText::Distance,
    ));

    // Top-right column: score above clock.
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            right: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexEnd,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|col| {
            col.spawn((Text::new(points_line(0)), font.clone(), color, HudText::Points));
            col.spawn((Text::new(time_line(cfg.round.duration_secs)), font.clone(), color, HudText::TimeLeft));
        });

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|center| {
            center.spawn((
                Text::new(String::new()),
                TextFont {
                    font_size: cfg.hud.font_size * 1.6,
                    ..default()
                },
                color,
                TextLayout::new_with_justify(JustifyText::Center),
                Visibility::Hidden,
                HudText::GameOver,
            ));
        });
}

/// Rewrites only texts whose content changed so UI layout is not dirtied every frame.
pub fn update_hud(
    state: Res<State<RoundState>>,
    score: Res<Score>,
    clock: Res<RoundClock>,
    target: Res<HiddenTarget>,
    mut q_text: Query<(&HudText, &mut Text, &mut Visibility)>,
) {
    let game_over = *state.get() == RoundState::GameOver;
    for (kind, mut text, mut vis) in q_text.iter_mut() {
        let want = match kind {
            HudText::Distance => distance_line(target.distance),
            HudText::Points => points_line(score.points_found),
            HudText::TimeLeft => time_line(clock.time_left),
            HudText::GameOver => {
                vis.set_if_neq(if game_over { Visibility::Inherited } else { Visibility::Hidden });
                game_over_line(score.points_found)
            }
        };
        if text.0 != want {
            text.0 = want;
        }
    }
}
