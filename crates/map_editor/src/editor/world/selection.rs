use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use map_core::{EditorSession, EMPTY_CELL};

use crate::editor::types::{EditorConfig, SelectionState, ToolKind, ToolState, WorldCamera};

use super::{cursor_tile_pos, rect_from_two};

/// 框选：左键拖出一个格子对齐的矩形。Esc 取消选区。
pub fn select_with_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    tools: Res<ToolState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<WorldCamera>>,
    config: Res<EditorConfig>,
    mut selection: ResMut<SelectionState>,
) {
    if tools.tool != ToolKind::Select {
        selection.dragging = false;
        return;
    }

    if keys.just_pressed(KeyCode::Escape) {
        selection.dragging = false;
        selection.rect = None;
        return;
    }

    if keys.pressed(KeyCode::Space) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_q.single() else {
        return;
    };
    let pos = cursor_tile_pos(
        window,
        camera,
        camera_transform,
        &config,
        config.map_size.x,
        config.map_size.y,
    );

    if buttons.just_released(MouseButton::Left) {
        selection.dragging = false;
        return;
    }

    let Some(pos) = pos else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        selection.dragging = true;
        selection.start = pos;
        selection.current = pos;
        selection.rect = Some(rect_from_two(pos, pos));
        return;
    }

    if selection.dragging && buttons.pressed(MouseButton::Left) && selection.current != pos {
        selection.current = pos;
        selection.rect = Some(rect_from_two(selection.start, pos));
    }
}

/// Delete/Backspace 清空选区：逐格走 set_cell，整个区域一条历史。
pub fn clear_selected_area(
    keys: Res<ButtonInput<KeyCode>>,
    tools: Res<ToolState>,
    selection: Res<SelectionState>,
    session: Option<ResMut<EditorSession>>,
) {
    if tools.tool != ToolKind::Select {
        return;
    }
    if !(keys.just_pressed(KeyCode::Delete) || keys.just_pressed(KeyCode::Backspace)) {
        return;
    }
    let Some(rect) = selection.rect else {
        return;
    };
    let Some(mut session) = session else {
        return;
    };

    for y in rect.min.y..=rect.max.y {
        for x in rect.min.x..=rect.max.x {
            session.set_cell(x, y, EMPTY_CELL);
        }
    }
    // 选区内本来就全空时，commit 是安全 no-op，不会留下空历史
    if session.commit("Clear Area") {
        info!("cleared {}x{} area", rect.width(), rect.height());
    }
}
