//! 会话/地图文件的保存与读取（文件 IO；编码解码在 map_format）。

use std::path::PathBuf;

use map_core::{EditorSession, MapGrid};

pub fn save_session_to_file(session: &EditorSession, path: &str) -> Result<(), String> {
    let path = PathBuf::from(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let text = map_format::encode_session_ron(session)?;
    std::fs::write(path, text).map_err(|e| e.to_string())?;
    Ok(())
}

pub fn load_session_from_file(path: &str) -> Result<EditorSession, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    map_format::decode_session_ron(&text)
}

pub fn save_map_txt_to_file(grid: &MapGrid, path: &str) -> Result<(), String> {
    let path = PathBuf::from(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    std::fs::write(path, map_format::encode_map_txt(grid)).map_err(|e| e.to_string())?;
    Ok(())
}

pub fn load_map_txt_from_file(path: &str, cols: u32, rows: u32) -> Result<Vec<i32>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    map_format::decode_map_txt(&text, cols, rows)
}
