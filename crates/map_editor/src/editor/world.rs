//! 世界（World）侧逻辑：相机、手势绘制、快捷键、数据 ↔ 渲染同步。
//!
//! 关键点：
//! - 鼠标绘制必须把屏幕坐标转换为世界坐标，需要一个明确的"世界相机"。
//! - 所有网格写入都走 `EditorSession::set_cell`，手势结束统一 `commit`。

use bevy::prelude::*;

use super::types::{EditorConfig, SelectionRect};
use super::UI_TOP_RESERVED_PX;

mod camera;
mod canvas;
mod paint;
mod render_sync;
mod save_load;
mod selection;
mod shortcuts;
mod undo;

pub use camera::{camera_pan, camera_zoom, setup_world};
pub use canvas::draw_canvas_helpers;
pub use paint::paint_with_mouse;
pub use render_sync::{setup_cell_entities, sync_cells_on_change};
pub use save_load::{import_export_shortcuts, save_load_shortcuts, setup_session};
pub use selection::{clear_selected_area, select_with_mouse};
pub use shortcuts::{keyboard_shortcuts, tool_shortcuts};
pub use undo::undo_redo_shortcuts;

/// 光标所在的格子坐标。光标在 HUD 区域或地图范围外时返回 None
/// （越界钳制是 UI 的事，这里直接拒绝，核心永远收到合法坐标）。
pub(crate) fn cursor_tile_pos(
    window: &Window,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    config: &EditorConfig,
    map_w: u32,
    map_h: u32,
) -> Option<UVec2> {
    let cursor_pos = window.cursor_position()?;
    if cursor_pos.y <= UI_TOP_RESERVED_PX {
        return None;
    }

    let world_pos = camera
        .viewport_to_world_2d(camera_transform, cursor_pos)
        .ok()?;

    let tile_w = config.tile_size.x as f32;
    let tile_h = config.tile_size.y as f32;
    if tile_w <= 0.0 || tile_h <= 0.0 {
        return None;
    }

    let x = (world_pos.x / tile_w).floor() as i32;
    let y = (world_pos.y / tile_h).floor() as i32;
    if x < 0 || y < 0 {
        return None;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= map_w || y >= map_h {
        return None;
    }
    Some(UVec2::new(x, y))
}

fn rect_from_two(a: UVec2, b: UVec2) -> SelectionRect {
    SelectionRect {
        min: UVec2::new(a.x.min(b.x), a.y.min(b.y)),
        max: UVec2::new(a.x.max(b.x), a.y.max(b.y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_two_normalizes_corners() {
        let r = rect_from_two(UVec2::new(4, 1), UVec2::new(2, 3));
        assert_eq!(r.min, UVec2::new(2, 1));
        assert_eq!(r.max, UVec2::new(4, 3));
        assert_eq!(r.width(), 3);
        assert_eq!(r.height(), 3);
    }
}
