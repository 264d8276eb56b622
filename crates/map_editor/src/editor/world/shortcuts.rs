use bevy::prelude::*;

use map_core::{EditorSession, EMPTY_CELL, MAX_TILES};

use crate::editor::types::{EditorConfig, EditorState, ToolKind, ToolState};

/// 键盘快捷键：选择 tile（[ / ]）、橡皮（Delete）、网格开关（G）、清空地图（R）。
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    tools: Res<ToolState>,
    mut state: ResMut<EditorState>,
    mut config: ResMut<EditorConfig>,
    session: Option<ResMut<EditorSession>>,
) {
    if keys.just_pressed(KeyCode::BracketLeft) {
        state.selected_tile = (state.selected_tile - 1).max(0);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        state.selected_tile = (state.selected_tile + 1).min(MAX_TILES - 1);
    }

    // 放置模式下 Delete 切到橡皮（选区清空在 Select 模式下处理）
    if tools.tool == ToolKind::Place
        && (keys.just_pressed(KeyCode::Delete) || keys.just_pressed(KeyCode::Backspace))
    {
        state.selected_tile = EMPTY_CELL;
    }

    if keys.just_pressed(KeyCode::KeyG) {
        config.show_grid = !config.show_grid;
    }

    // 清空地图（做成可 Undo 的一条历史）。
    if keys.just_pressed(KeyCode::KeyR) {
        let Some(mut session) = session else {
            return;
        };
        let (cols, rows) = (session.grid().cols(), session.grid().rows());
        for y in 0..rows {
            for x in 0..cols {
                session.set_cell(x, y, EMPTY_CELL);
            }
        }
        if session.commit("Clear Map") {
            info!("cleared map");
        }
    }
}

/// 工具快捷键：1/2 切换（放置/框选）。
pub fn tool_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut tools: ResMut<ToolState>) {
    if keys.just_pressed(KeyCode::Digit1) || keys.just_pressed(KeyCode::Numpad1) {
        tools.tool = ToolKind::Place;
    } else if keys.just_pressed(KeyCode::Digit2) || keys.just_pressed(KeyCode::Numpad2) {
        tools.tool = ToolKind::Select;
    }
}
