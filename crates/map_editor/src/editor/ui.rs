//! HUD：顶部状态行 + 底部历史状态（撤销位置/未提交变更数）。

use bevy::prelude::*;

use map_core::{EditorSession, EMPTY_CELL};

use crate::editor::types::{
    EditorConfig, EditorState, HistoryStatusText, HudText, ToolKind, ToolState,
};

pub fn setup_ui(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HistoryStatusText,
    ));
}

/// 顶部状态行：工具、笔刷、地图尺寸、常用快捷键。
pub fn update_hud_text(
    config: Res<EditorConfig>,
    state: Res<EditorState>,
    tools: Res<ToolState>,
    mut hud_q: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = hud_q.single_mut() else {
        return;
    };

    let tool = match tools.tool {
        ToolKind::Place => "place",
        ToolKind::Select => "select",
    };
    let brush = if state.selected_tile == EMPTY_CELL {
        "eraser".to_string()
    } else {
        format!("{:03}", state.selected_tile)
    };
    let msg = format!(
        "tool: {tool} (1/2) | brush: {brush} ([ ] cycle, Del eraser) | map: {}x{} | grid: {} (G) | S save  L load  Ctrl+I/E txt",
        config.map_size.x,
        config.map_size.y,
        if config.show_grid { "on" } else { "off" },
    );
    if text.0 != msg {
        text.0 = msg;
    }
}

/// 底部历史状态："Undo: 游标/最大" + 当前动作 + 未提交的变更数。
pub fn update_history_status(
    session: Option<Res<EditorSession>>,
    mut status_q: Query<&mut Text, With<HistoryStatusText>>,
) {
    let Ok(mut text) = status_q.single_mut() else {
        return;
    };
    let Some(session) = session else {
        return;
    };

    let history = session.history();
    let mut msg = match (history.cursor(), history.current()) {
        (Some(cursor), Some(entry)) => {
            format!(
                "Undo: {}/{} ({})",
                cursor,
                history.len().saturating_sub(1),
                entry.action
            )
        }
        _ => "Undo: -".to_string(),
    };
    let pending = session.pending().len();
    if pending > 0 {
        msg.push_str(&format!(" | pending: {pending}"));
    }
    let hints = match (session.can_undo(), session.can_redo()) {
        (true, true) => "Ctrl+Z undo | Ctrl+Y redo",
        (true, false) => "Ctrl+Z undo",
        (false, true) => "Ctrl+Y redo",
        (false, false) => "-",
    };
    msg.push_str(&format!(" | {hints}"));
    if text.0 != msg {
        text.0 = msg;
    }
}
