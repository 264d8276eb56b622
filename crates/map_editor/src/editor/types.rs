//! 资源（Resource）与组件（Component）的集中定义。

use bevy::prelude::*;

use map_core::{DEFAULT_MAP_COLS, DEFAULT_MAP_ROWS};

use super::paths::workspace_assets_dir;

pub const DEFAULT_SAVE_PATH: &str = "maps/session.ron";

/// 标记"世界相机"（用于世界坐标拾取/绘制）。
///
/// 注意：UI 可能会创建/使用自己的相机。若鼠标拾取系统用
/// `Query<(&Camera, &GlobalTransform)>` 并 `single()`，当场景存在多相机时
/// 会直接失败，从而导致画布无法绘制。
#[derive(Component)]
pub struct WorldCamera;

/// 编辑器配置。
///
/// - `save_path`：会话文件的绝对路径（默认 workspace/assets/maps/session.ron）
#[derive(Resource)]
pub struct EditorConfig {
    pub tile_size: UVec2,
    pub map_size: UVec2,
    pub save_path: String,
    pub show_grid: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_size: UVec2::new(32, 32),
            map_size: UVec2::new(DEFAULT_MAP_COLS, DEFAULT_MAP_ROWS),
            save_path: workspace_assets_dir()
                .join(DEFAULT_SAVE_PATH)
                .to_string_lossy()
                .to_string(),
            show_grid: true,
        }
    }
}

/// 当前笔刷：调色板序号，-1 表示橡皮（画空）。
#[derive(Resource)]
pub struct EditorState {
    pub selected_tile: i32,
}

impl Default for EditorState {
    fn default() -> Self {
        Self { selected_tile: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
    Place,
    Select,
}

impl Default for ToolKind {
    fn default() -> Self {
        Self::Place
    }
}

#[derive(Resource, Default)]
pub struct ToolState {
    pub tool: ToolKind,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionRect {
    pub min: UVec2,
    pub max: UVec2,
}

impl SelectionRect {
    pub fn width(&self) -> u32 {
        self.max.x.saturating_sub(self.min.x) + 1
    }

    pub fn height(&self) -> u32 {
        self.max.y.saturating_sub(self.min.y) + 1
    }
}

#[derive(Resource, Default)]
pub struct SelectionState {
    pub dragging: bool,
    pub start: UVec2,
    pub current: UVec2,
    pub rect: Option<SelectionRect>,
}

/// 画布平移（拖拽）状态。
#[derive(Resource, Default)]
pub struct PanState {
    pub active: bool,
    pub last_world: Option<Vec2>,
}

/// 每个格子一个 sprite 实体，按 y*cols+x 排列。
#[derive(Resource)]
pub struct CellEntities {
    pub cols: u32,
    pub rows: u32,
    pub entities: Vec<Entity>,
}

impl CellEntities {
    pub fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.cols + x) as usize
    }
}

#[derive(Component)]
pub struct CellSprite;

#[derive(Component)]
pub struct HudText;

#[derive(Component)]
pub struct HistoryStatusText;
