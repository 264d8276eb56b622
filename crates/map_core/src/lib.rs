#![forbid(unsafe_code)]

// 纯逻辑 crate：地图网格数据 + 撤销/重做引擎。
//
// 不依赖渲染与输入；编辑器侧（map_editor）只通过 `EditorSession` 改格子：
// - MapGrid：cols×rows 的 i32 网格（-1 = 空）
// - PendingBuffer：一次手势内的逐格变更记录（未提交）
// - HistoryStore：有界线性历史（整图快照 + 游标）
// - EditorSession：set_cell / commit / undo / redo 状态机

mod grid;
mod history;
mod pending;
mod session;

pub use grid::MapGrid;
pub use history::{HistoryEntry, HistoryStore};
pub use pending::{PendingBuffer, PendingChange};
pub use session::{EditorSession, SessionPhase};

/// 空格子的哨兵值。
pub const EMPTY_CELL: i32 = -1;

/// 参考工具的地图尺寸（一次会话内不变）。
pub const DEFAULT_MAP_COLS: u32 = 50;
pub const DEFAULT_MAP_ROWS: u32 = 50;

/// 历史条目上限：超出后从最旧的开始丢弃。
pub const MAX_HISTORY: usize = 100;

/// 调色板容量上限（tile 序号 000-1999）。
pub const MAX_TILES: i32 = 2000;

/// 当前 Unix 毫秒时间戳。只用于给变更/历史条目打标，不参与任何判定。
pub(crate) fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
