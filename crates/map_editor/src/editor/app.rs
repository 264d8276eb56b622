//! 编辑器应用装配（Bevy App 构建与系统注册）。

use bevy::prelude::*;

use super::{
    types::{EditorConfig, EditorState, PanState, SelectionState, ToolState},
    ui, world, UI_BG,
};

/// 运行编辑器。
pub fn run() {
    App::new()
        // 用 ClearColor 控制背景色，画布区域就是世界本身。
        .insert_resource(ClearColor(UI_BG))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pixel Studio - Map Editor".to_string(),
                ..default()
            }),
            ..default()
        }))
        // --- Resources ---
        .init_resource::<EditorConfig>()
        .init_resource::<EditorState>()
        .init_resource::<ToolState>()
        .init_resource::<SelectionState>()
        .init_resource::<PanState>()
        .add_systems(
            Startup,
            (
                world::setup_world,
                world::setup_session,
                world::setup_cell_entities,
                ui::setup_ui,
            ),
        )
        .add_systems(
            Update,
            (
                // --- 视图 ---
                (world::camera_pan, world::camera_zoom, world::draw_canvas_helpers),
                // --- 编辑：固定顺序，同一帧内快捷键先于手势 ---
                (
                    world::tool_shortcuts,
                    world::keyboard_shortcuts,
                    world::undo_redo_shortcuts,
                    world::save_load_shortcuts,
                    world::import_export_shortcuts,
                    world::paint_with_mouse,
                    world::select_with_mouse,
                    world::clear_selected_area,
                )
                    .chain(),
                // --- 渲染同步与 HUD ---
                (
                    world::sync_cells_on_change,
                    ui::update_hud_text,
                    ui::update_history_status,
                ),
            ),
        )
        .run();
}
