use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use map_core::EditorSession;

use crate::editor::types::{EditorConfig, EditorState, ToolKind, ToolState, WorldCamera};

use super::cursor_tile_pos;

/// 短于这个时长的手势按"单击"处理，只影响提交时的动作标签。
const CLICK_THRESHOLD_SECS: f64 = 0.2;

/// 一次绘制手势（按下 → 拖动 → 松开/离开画布）的局部状态。
/// 逐格变更记在 session 的 pending 缓冲里，这里只管手势边界。
pub struct StrokeGesture {
    pub active: bool,
    started_at: f64,
    last_cell: Option<UVec2>,
}

impl Default for StrokeGesture {
    fn default() -> Self {
        Self {
            active: false,
            started_at: 0.0,
            last_cell: None,
        }
    }
}

/// 鼠标绘制：左键放置当前笔刷（橡皮 = 画空）。
///
/// 手势内重复经过同一格不重复写；松开或光标离开画布时把
/// 全部 pending 合并提交为一条历史（离开画布提交而非丢弃，
/// 拖到一半出界也不丢进度）。
pub fn paint_with_mouse(
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    tools: Res<ToolState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<WorldCamera>>,
    config: Res<EditorConfig>,
    state: Res<EditorState>,
    time: Res<Time>,
    session: Option<ResMut<EditorSession>>,
    mut stroke: Local<StrokeGesture>,
) {
    if tools.tool != ToolKind::Place {
        // 切走工具等于手势结束，积累的 pending 照常提交
        if stroke.active {
            stroke.active = false;
            stroke.last_cell = None;
            if let Some(mut session) = session {
                session.commit("Paint");
            }
        }
        return;
    }

    // Space 用于平移（Space + 左键拖拽），避免与绘制冲突。
    if keys.pressed(KeyCode::Space) {
        return;
    }

    let Some(mut session) = session else {
        return;
    };
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
        session.grid().cols(),
        session.grid().rows(),
    );

    let left_down = buttons.pressed(MouseButton::Left);
    let left_start = buttons.just_pressed(MouseButton::Left);
    let left_end = buttons.just_released(MouseButton::Left);

    // 手势结束：松开、或拖动中离开画布。整次手势 → 一条历史。
    if stroke.active && (left_end || !left_down || pos.is_none()) {
        let elapsed = time.elapsed_secs_f64() - stroke.started_at;
        let label = if elapsed < CLICK_THRESHOLD_SECS {
            "Place Tile"
        } else {
            "Paint"
        };
        session.commit(label);
        stroke.active = false;
        stroke.last_cell = None;
        return;
    }

    let Some(pos) = pos else {
        return;
    };

    // 手势开始：必须在画布区域内按下
    if !stroke.active && left_start {
        stroke.active = true;
        stroke.started_at = time.elapsed_secs_f64();
        stroke.last_cell = None;
    }

    if !stroke.active || !left_down {
        return;
    }

    // 同一格内小幅移动不重复写；回头再经过时照常记录
    if stroke.last_cell == Some(pos) {
        return;
    }
    session.set_cell(pos.x, pos.y, state.selected_tile);
    stroke.last_cell = Some(pos);
}
