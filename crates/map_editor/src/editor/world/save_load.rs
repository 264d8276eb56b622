use bevy::prelude::*;

use map_core::EditorSession;

use crate::editor::persistence::{
    load_map_txt_from_file, load_session_from_file, save_map_txt_to_file, save_session_to_file,
};
use crate::editor::types::EditorConfig;

/// 启动时恢复上次会话（撤销历史一起回来）；没有或尺寸对不上就新开。
pub fn setup_session(mut commands: Commands, config: Res<EditorConfig>) {
    let session = match load_session_from_file(&config.save_path) {
        Ok(s) if s.grid().cols() == config.map_size.x && s.grid().rows() == config.map_size.y => {
            info!("restored session: {}", config.save_path);
            s
        }
        Ok(_) => {
            warn!("session size mismatch, starting fresh");
            fresh_session(&config)
        }
        Err(_) => fresh_session(&config),
    };
    commands.insert_resource(session);
}

fn fresh_session(config: &EditorConfig) -> EditorSession {
    let mut session = EditorSession::new(config.map_size.x, config.map_size.y);
    session.record_initial_state();
    session
}

/// 保存/读取快捷键：S / L。
pub fn save_load_shortcuts(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<EditorConfig>,
    session: Option<Res<EditorSession>>,
) {
    // Ctrl 组合键留给导入/导出
    if keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight) {
        return;
    }

    if keys.just_pressed(KeyCode::KeyS) {
        let Some(session) = session.as_deref() else {
            return;
        };
        if let Err(err) = save_session_to_file(session, &config.save_path) {
            warn!("save failed: {err}");
        } else {
            info!("saved session: {}", config.save_path);
        }
        return;
    }

    if keys.just_pressed(KeyCode::KeyL) {
        let loaded = match load_session_from_file(&config.save_path) {
            Ok(s) => s,
            Err(err) => {
                warn!("load failed: {err}");
                return;
            }
        };
        // 会话尺寸在一次编辑期内固定；文件里的尺寸不一致就拒绝
        if loaded.grid().cols() != config.map_size.x || loaded.grid().rows() != config.map_size.y {
            warn!(
                "load rejected: map is {}x{}, session is {}x{}",
                config.map_size.x,
                config.map_size.y,
                loaded.grid().cols(),
                loaded.grid().rows()
            );
            return;
        }
        commands.insert_resource(loaded);
        info!("loaded session: {}", config.save_path);
    }
}

/// TXT 地图导入/导出：Ctrl+I / Ctrl+E（文件选择器）。
///
/// 导入逐格走 set_cell 再一次 commit，因此是一条可撤销的 "Import Map"。
pub fn import_export_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    session: Option<ResMut<EditorSession>>,
) {
    let ctrl = keys.pressed(KeyCode::ControlLeft) || keys.pressed(KeyCode::ControlRight);
    if !ctrl {
        return;
    }
    let Some(mut session) = session else {
        return;
    };

    if keys.just_pressed(KeyCode::KeyI) {
        let Some(path) = rfd::FileDialog::new().add_filter("TXT", &["txt"]).pick_file() else {
            return;
        };
        let (cols, rows) = (session.grid().cols(), session.grid().rows());
        let cells = match load_map_txt_from_file(path.to_string_lossy().as_ref(), cols, rows) {
            Ok(cells) => cells,
            Err(err) => {
                warn!("import failed: {err}");
                return;
            }
        };
        for y in 0..rows {
            for x in 0..cols {
                session.set_cell(x, y, cells[(y * cols + x) as usize]);
            }
        }
        if session.commit("Import Map") {
            info!("imported map: {}", path.to_string_lossy());
        }
        return;
    }

    if keys.just_pressed(KeyCode::KeyE) {
        let (cols, rows) = (session.grid().cols(), session.grid().rows());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TXT", &["txt"])
            .set_file_name(format!("map_{cols}x{rows}.txt"))
            .save_file()
        else {
            return;
        };
        if let Err(err) = save_map_txt_to_file(session.grid(), path.to_string_lossy().as_ref()) {
            warn!("export failed: {err}");
        } else {
            info!("exported map: {}", path.to_string_lossy());
        }
    }
}
