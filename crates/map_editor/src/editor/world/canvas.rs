use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::editor::types::{EditorConfig, SelectionState, ToolKind, ToolState, WorldCamera};

use super::cursor_tile_pos;

/// 在画布上绘制辅助线（网格 + 边界 + hover 高亮 + 选区框）。
pub fn draw_canvas_helpers(
    mut gizmos: Gizmos,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<WorldCamera>>,
    config: Res<EditorConfig>,
    tools: Res<ToolState>,
    selection: Res<SelectionState>,
) {
    let tile_w = config.tile_size.x as f32;
    let tile_h = config.tile_size.y as f32;
    if tile_w <= 0.0 || tile_h <= 0.0 {
        return;
    }

    let (map_w, map_h) = (config.map_size.x, config.map_size.y);
    if map_w == 0 || map_h == 0 {
        return;
    }

    let width_px = map_w as f32 * tile_w;
    let height_px = map_h as f32 * tile_h;

    let grid_color = Color::srgba(1.0, 1.0, 1.0, 0.12);
    let border_color = Color::srgba(1.0, 1.0, 1.0, 0.30);

    if config.show_grid {
        // 网格线
        for x in 0..=map_w {
            let x_pos = x as f32 * tile_w;
            gizmos.line_2d(Vec2::new(x_pos, 0.0), Vec2::new(x_pos, height_px), grid_color);
        }
        for y in 0..=map_h {
            let y_pos = y as f32 * tile_h;
            gizmos.line_2d(Vec2::new(0.0, y_pos), Vec2::new(width_px, y_pos), grid_color);
        }
    }

    // 边界加粗（用更亮的颜色再画一遍）
    gizmos.line_2d(Vec2::new(0.0, 0.0), Vec2::new(width_px, 0.0), border_color);
    gizmos.line_2d(
        Vec2::new(0.0, height_px),
        Vec2::new(width_px, height_px),
        border_color,
    );
    gizmos.line_2d(Vec2::new(0.0, 0.0), Vec2::new(0.0, height_px), border_color);
    gizmos.line_2d(
        Vec2::new(width_px, 0.0),
        Vec2::new(width_px, height_px),
        border_color,
    );

    // 选区框
    if tools.tool == ToolKind::Select {
        if let Some(rect) = selection.rect {
            let sx0 = rect.min.x as f32 * tile_w;
            let sy0 = rect.min.y as f32 * tile_h;
            let sx1 = (rect.max.x as f32 + 1.0) * tile_w;
            let sy1 = (rect.max.y as f32 + 1.0) * tile_h;
            let c = Color::srgba(1.0, 1.0, 0.0, 0.85);
            gizmos.line_2d(Vec2::new(sx0, sy0), Vec2::new(sx1, sy0), c);
            gizmos.line_2d(Vec2::new(sx1, sy0), Vec2::new(sx1, sy1), c);
            gizmos.line_2d(Vec2::new(sx1, sy1), Vec2::new(sx0, sy1), c);
            gizmos.line_2d(Vec2::new(sx0, sy1), Vec2::new(sx0, sy0), c);
        }
    }

    // hover 高亮
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_q.single() else {
        return;
    };
    if let Some(pos) = cursor_tile_pos(window, camera, camera_transform, &config, map_w, map_h) {
        let hx = pos.x as f32 * tile_w;
        let hy = pos.y as f32 * tile_h;
        let c = Color::srgba(0.39, 0.70, 0.93, 0.9);
        gizmos.line_2d(Vec2::new(hx, hy), Vec2::new(hx + tile_w, hy), c);
        gizmos.line_2d(Vec2::new(hx + tile_w, hy), Vec2::new(hx + tile_w, hy + tile_h), c);
        gizmos.line_2d(Vec2::new(hx + tile_w, hy + tile_h), Vec2::new(hx, hy + tile_h), c);
        gizmos.line_2d(Vec2::new(hx, hy + tile_h), Vec2::new(hx, hy), c);
    }
}
