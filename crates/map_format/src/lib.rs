#![forbid(unsafe_code)]

//! 会话与地图的编码/解码（不做文件 IO，只做字符串 ↔ 数据）。
//!
//! - RON 会话文件：网格 + 历史 + 游标 + 未提交变更，重载后撤销能力不丢
//! - TXT 地图交换格式：空格分隔的 tile 序号，`.` 表示空

use serde::{Deserialize, Serialize};

use map_core::{
    EditorSession, HistoryEntry, HistoryStore, MapGrid, PendingBuffer, PendingChange, EMPTY_CELL,
    MAX_HISTORY, MAX_TILES,
};

/// V1：只有网格（早期格式，现在只在解码时兼容）。
#[derive(Serialize, Deserialize)]
struct MapFileV1 {
    cols: u32,
    rows: u32,
    cells: Vec<i32>,
}

/// V2：完整会话。
#[derive(Serialize, Deserialize)]
struct SessionFileV2 {
    cols: u32,
    rows: u32,
    cells: Vec<i32>,
    history: Vec<HistoryEntry>,
    cursor: Option<usize>,
    pending: Vec<PendingChange>,
}

pub fn encode_session_ron(session: &EditorSession) -> Result<String, String> {
    let v2 = SessionFileV2 {
        cols: session.grid().cols(),
        rows: session.grid().rows(),
        cells: session.grid().snapshot(),
        history: session.history().entries().to_vec(),
        cursor: session.history().cursor(),
        pending: session.pending().changes().to_vec(),
    };
    ron::ser::to_string_pretty(&v2, ron::ser::PrettyConfig::default()).map_err(|e| e.to_string())
}

pub fn decode_session_ron(text: &str) -> Result<EditorSession, String> {
    // 最新版本：V2（含历史与 pending）
    if let Ok(v2) = ron::from_str::<SessionFileV2>(text) {
        let want_len = (v2.cols * v2.rows) as usize;
        let grid = MapGrid::from_cells(v2.cols, v2.rows, v2.cells)
            .ok_or_else(|| "cell count does not match map size".to_string())?;

        // 快照长度不对的历史条目直接丢弃（文件被手改/损坏时尽量恢复其余部分）
        let history: Vec<HistoryEntry> = v2
            .history
            .into_iter()
            .filter(|e| e.cells.len() == want_len)
            .collect();
        let history = HistoryStore::from_parts(history, v2.cursor, MAX_HISTORY);

        let pending: Vec<PendingChange> = v2
            .pending
            .into_iter()
            .filter(|c| c.x < v2.cols && c.y < v2.rows)
            .collect();

        return Ok(EditorSession::from_parts(
            grid,
            PendingBuffer::from_changes(pending),
            history,
        ));
    }

    // 兼容 V1：只有网格，历史从空开始
    let v1 = ron::from_str::<MapFileV1>(text).map_err(|e| e.to_string())?;
    let grid = MapGrid::from_cells(v1.cols, v1.rows, v1.cells)
        .ok_or_else(|| "cell count does not match map size".to_string())?;
    Ok(EditorSession::from_parts(
        grid,
        PendingBuffer::new(),
        HistoryStore::new(MAX_HISTORY),
    ))
}

/// 网格 → TXT：每行一排，空格分隔，空格子写 `.`。
pub fn encode_map_txt(grid: &MapGrid) -> String {
    let mut out = String::new();
    for y in 0..grid.rows() {
        let mut row: Vec<String> = Vec::with_capacity(grid.cols() as usize);
        for x in 0..grid.cols() {
            let v = grid.get(x, y).unwrap_or(EMPTY_CELL);
            row.push(if v >= 0 { v.to_string() } else { ".".to_string() });
        }
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// TXT → 格子数组（cols*rows，缺的补空）。
///
/// 容错：空行和 `#` 注释行跳过；`.` 和 `-1` 为空；解析失败或
/// 超出 `0..MAX_TILES` 的序号当作空；多余的行/列忽略。
pub fn decode_map_txt(text: &str, cols: u32, rows: u32) -> Result<Vec<i32>, String> {
    if cols == 0 || rows == 0 {
        return Err("map size must be non-zero".to_string());
    }
    let mut cells = vec![EMPTY_CELL; (cols * rows) as usize];
    let mut row = 0u32;
    for line in text.lines() {
        if row >= rows {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for (x, token) in trimmed.split_whitespace().enumerate() {
            if x as u32 >= cols {
                break;
            }
            let v = match token {
                "." | "-1" => EMPTY_CELL,
                t => match t.parse::<i32>() {
                    Ok(n) if (0..MAX_TILES).contains(&n) => n,
                    _ => EMPTY_CELL,
                },
            };
            cells[(row * cols) as usize + x] = v;
        }
        row += 1;
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with_history() -> EditorSession {
        let mut s = EditorSession::new(4, 4);
        s.record_initial_state();
        s.set_cell(1, 1, 3);
        s.commit("Place Tile");
        s.set_cell(2, 2, 7);
        s.set_cell(3, 3, 7);
        s.commit("Paint");
        s.undo();
        // 留一条未提交变更
        s.set_cell(0, 0, 5);
        s
    }

    #[test]
    fn session_roundtrip_preserves_undo_capability() {
        let before = session_with_history();
        let text = encode_session_ron(&before).unwrap();
        let after = decode_session_ron(&text).unwrap();

        assert_eq!(after.grid(), before.grid());
        assert_eq!(after.history().len(), before.history().len());
        assert_eq!(after.history().cursor(), before.history().cursor());
        assert_eq!(after.pending().len(), 1);

        // 重载后第一档撤销还是细粒度的
        let mut after = after;
        assert!(after.undo());
        assert_eq!(after.grid().get(0, 0), Some(EMPTY_CELL));
        assert_eq!(after.grid().get(1, 1), Some(3));
    }

    #[test]
    fn decode_v1_fallback() {
        let text = r#"(cols: 2, rows: 2, cells: [0, -1, 3, -1])"#;
        let s = decode_session_ron(text).unwrap();
        assert_eq!(s.grid().get(0, 0), Some(0));
        assert_eq!(s.grid().get(0, 1), Some(3));
        assert!(s.history().is_empty());
    }

    #[test]
    fn decode_rejects_bad_cell_count() {
        let text = r#"(cols: 2, rows: 2, cells: [0, 1, 2])"#;
        assert!(decode_session_ron(text).is_err());
    }

    #[test]
    fn decode_drops_corrupt_history_entries() {
        // 一条快照长度被改坏的条目：丢弃它，其余照常恢复，游标钳回范围内
        let text = r#"(
            cols: 2, rows: 2,
            cells: [0, -1, -1, -1],
            history: [
                (cells: [-1, -1, -1, -1], action: "Initial State", at_ms: 0, batch: false, change_count: 0),
                (cells: [0, -1, -1], action: "Place Tile", at_ms: 0, batch: false, change_count: 1),
            ],
            cursor: Some(1),
            pending: [],
        )"#;
        let restored = decode_session_ron(text).unwrap();
        assert_eq!(restored.history().len(), 1);
        assert_eq!(restored.history().cursor(), Some(0));
        assert_eq!(restored.grid().get(0, 0), Some(0));
    }

    #[test]
    fn txt_roundtrip() {
        let mut grid = MapGrid::new(3, 2);
        grid.set(0, 0, 12);
        grid.set(2, 1, 0);
        let text = encode_map_txt(&grid);
        assert_eq!(text, "12 . .\n. . 0\n");

        let cells = decode_map_txt(&text, 3, 2).unwrap();
        assert_eq!(cells, grid.snapshot());
    }

    #[test]
    fn txt_decode_is_tolerant() {
        let text = "# exported map\n\n1 9999 bogus extra\n. -1 3\n0 0 0\n";
        let cells = decode_map_txt(text, 3, 2).unwrap();
        // 9999 超出调色板、bogus 解析失败：都按空处理；多余的列/行忽略
        assert_eq!(cells, vec![1, EMPTY_CELL, EMPTY_CELL, EMPTY_CELL, EMPTY_CELL, 3]);
    }

    #[test]
    fn txt_decode_short_input_pads_empty() {
        let cells = decode_map_txt("5\n", 2, 2).unwrap();
        assert_eq!(cells, vec![5, EMPTY_CELL, EMPTY_CELL, EMPTY_CELL]);
    }
}
