//! 地图编辑器：50×50 网格上放置/擦除 tile，带两档撤销/重做与会话保存。
//!
//! 交互：
//! - 左键点击/拖拽绘制，松开或离开画布时把整次手势提交为一条历史
//! - 1/2 切换放置/框选工具，框选后 Delete 清空选区
//! - Ctrl+Z / Ctrl+Y 撤销/重做；S / L 保存/读取会话（RON）
//! - Ctrl+I / Ctrl+E 导入/导出 TXT 地图
//!
//! 说明：
//! - 本 crate 使用 Bevy 0.18。
//! - 网格数据与历史都在 map_core::EditorSession 里，渲染侧只读。

mod app;
mod palette;
mod paths;
mod persistence;
mod types;
mod ui;
mod world;

use bevy::prelude::Color;

/// 顶部 HUD 预留高度（这片区域内不触发绘制/缩放/平移）。
pub const UI_TOP_RESERVED_PX: f32 = 40.0;

pub const UI_BG: Color = Color::srgb(0.13, 0.13, 0.13);

pub use app::run;
