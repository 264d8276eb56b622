#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{now_ms, HistoryEntry, HistoryStore, MapGrid, PendingBuffer, MAX_HISTORY};

/// 会话所处阶段。显式状态替代布尔重入保护：
/// 所有相变都走 set_cell / commit 两个入口，一目了然。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// 手势进行中：pending 缓冲非空。
    Recording,
    /// commit 执行中（同步瞬态，对外可观察到的时间极短）。
    Committing,
}

/// 一次编辑会话：网格 + 未提交变更 + 历史，单实例持有，无全局状态。
///
/// 并发模型：单线程事件驱动。所有方法同步完成、无内部锁；
/// 若外层要做异步落盘，由调用方自行串行化访问。
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Clone, Debug)]
pub struct EditorSession {
    grid: MapGrid,
    pending: PendingBuffer,
    history: HistoryStore,
    phase: SessionPhase,
    /// 每次网格内容变化（写入/撤销/重做）递增。渲染侧据此刷新。
    revision: u64,
}

impl EditorSession {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            grid: MapGrid::new(cols, rows),
            pending: PendingBuffer::new(),
            history: HistoryStore::new(MAX_HISTORY),
            phase: SessionPhase::Idle,
            revision: 0,
        }
    }

    /// 反序列化恢复（map_format 用）。
    pub fn from_parts(grid: MapGrid, pending: PendingBuffer, history: HistoryStore) -> Self {
        let phase = if pending.is_empty() {
            SessionPhase::Idle
        } else {
            SessionPhase::Recording
        };
        Self {
            grid,
            pending,
            history,
            phase,
            revision: 0,
        }
    }

    /// 历史为空时落一条合成的 "Initial State"，给撤销一个确定的底。
    /// 已有历史时不重复落（返回 false）。
    pub fn record_initial_state(&mut self) -> bool {
        if !self.history.is_empty() {
            return false;
        }
        self.history.push(HistoryEntry {
            cells: self.grid.snapshot(),
            action: "Initial State".to_string(),
            at_ms: now_ms(),
            batch: false,
            change_count: 0,
        });
        true
    }

    /// 网格写入的唯一入口：先以写入前的真实值记 pending，再改格子。
    ///
    /// 越界或值未变化都是无效果的合法调用（返回 false），
    /// 调用方据此区分"改了"与"没改"。
    pub fn set_cell(&mut self, x: u32, y: u32, value: i32) -> bool {
        let Some(before) = self.grid.get(x, y) else {
            return false;
        };
        if before == value {
            return false;
        }
        self.pending.record_if_changed(x, y, before, value);
        self.grid.set(x, y, value);
        self.phase = SessionPhase::Recording;
        self.revision += 1;
        true
    }

    /// 把本次手势积累的全部 pending 合并为一条历史。
    ///
    /// pending 为空时是安全 no-op（许多 UI 路径会防御性地调 commit）。
    /// 快照取的是"变更之后"的网格，撤销时回到上一条的快照即可。
    pub fn commit(&mut self, action: &str) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        self.phase = SessionPhase::Committing;
        let count = self.pending.len();
        self.history.push(HistoryEntry {
            cells: self.grid.snapshot(),
            action: action.to_string(),
            at_ms: now_ms(),
            batch: count > 1,
            change_count: count,
        });
        self.pending.clear();
        self.phase = SessionPhase::Idle;
        true
    }

    /// 两档撤销：
    /// 1. 手势未提交：只弹最近一条 pending，恢复那一个格子（历史不动）；
    /// 2. 否则游标后退一格，整图恢复到上一条快照。
    /// 都退不动时返回 false（不是错误）。
    pub fn undo(&mut self) -> bool {
        if let Some(ch) = self.pending.pop() {
            self.grid.set(ch.x, ch.y, ch.before);
            if self.pending.is_empty() {
                self.phase = SessionPhase::Idle;
            }
            self.revision += 1;
            return true;
        }
        let Some(cells) = self.history.step_back().map(|e| e.cells.clone()) else {
            return false;
        };
        self.grid.restore(&cells);
        self.revision += 1;
        true
    }

    /// 重做。手势未提交且游标已在最后一条上时拒绝：
    /// 进行中的手势在历史里没有对应的"前方"条目可恢复，
    /// 直接返回 false，pending 原样保留（不会先替用户提交）。
    pub fn redo(&mut self) -> bool {
        if !self.pending.is_empty() && self.history.cursor() == self.history.len().checked_sub(1) {
            return false;
        }
        let Some(cells) = self.history.step_forward().map(|e| e.cells.clone()) else {
            return false;
        };
        self.grid.restore(&cells);
        self.revision += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.pending.is_empty() || self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        if !self.pending.is_empty() && self.history.cursor() == self.history.len().checked_sub(1) {
            return false;
        }
        self.history.can_redo()
    }

    pub fn grid(&self) -> &MapGrid {
        &self.grid
    }

    pub fn pending(&self) -> &PendingBuffer {
        &self.pending
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EMPTY_CELL;

    fn session_5x5() -> EditorSession {
        let mut s = EditorSession::new(5, 5);
        s.record_initial_state();
        s
    }

    #[test]
    fn undo_on_fresh_session_without_entries_is_noop() {
        let mut s = EditorSession::new(5, 5);
        assert!(!s.undo());
        assert!(!s.redo());
        assert!(s.grid().cells().iter().all(|&c| c == EMPTY_CELL));
    }

    #[test]
    fn commit_then_undo_restores_pre_commit_state() {
        let mut s = session_5x5();
        s.set_cell(1, 2, 3);
        s.set_cell(4, 4, 8);
        assert!(s.commit("Paint"));
        assert!(s.undo());
        assert!(s.grid().cells().iter().all(|&c| c == EMPTY_CELL));
    }

    #[test]
    fn commit_is_idempotent_without_new_edits() {
        let mut s = session_5x5();
        s.set_cell(0, 0, 1);
        assert!(s.commit("Place Tile"));
        let len = s.history().len();
        assert!(!s.commit("Place Tile"));
        assert_eq!(s.history().len(), len);
    }

    #[test]
    fn set_cell_rejects_out_of_bounds_and_no_change() {
        let mut s = session_5x5();
        assert!(!s.set_cell(5, 0, 1));
        assert!(!s.set_cell(0, 9, 1));
        s.set_cell(1, 1, 4);
        assert!(!s.set_cell(1, 1, 4));
        assert_eq!(s.pending().len(), 1);
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut s = session_5x5();
        // Initial State 占 1 条，再推 MAX_HISTORY + 4 条提交
        for i in 0..(MAX_HISTORY + 4) {
            let v = (i % 7) as i32; // 连续两轮的值必不相同
            assert!(s.set_cell(0, 0, v));
            assert!(s.commit("Place Tile"));
        }
        assert_eq!(s.history().len(), MAX_HISTORY);
        assert_eq!(s.history().cursor(), Some(MAX_HISTORY - 1));
        // 最旧的 Initial State 已被淘汰
        assert_ne!(s.history().entries()[0].action, "Initial State");
    }

    #[test]
    fn new_commit_after_undo_truncates_redo() {
        let mut s = session_5x5();
        s.set_cell(0, 0, 1);
        s.commit("Place Tile");
        s.set_cell(0, 1, 2);
        s.commit("Place Tile");
        assert!(s.undo());
        assert!(s.can_redo());

        s.set_cell(0, 2, 3);
        s.commit("Place Tile");
        // 旧的 redo 分支不可达
        assert!(!s.can_redo());
        assert!(!s.redo());
        assert_eq!(s.grid().get(0, 2), Some(3));
        assert_eq!(s.grid().get(0, 1), Some(EMPTY_CELL));
    }

    #[test]
    fn fine_grained_undo_precedes_coarse() {
        let mut s = session_5x5();
        s.set_cell(0, 0, 5);
        s.commit("Place Tile");

        // 未提交手势：两格
        s.set_cell(1, 1, 3);
        s.set_cell(2, 2, 3);

        // 第一次 undo 只回退 (2,2)
        assert!(s.undo());
        assert_eq!(s.grid().get(2, 2), Some(EMPTY_CELL));
        assert_eq!(s.grid().get(1, 1), Some(3));
        assert_eq!(s.history().cursor(), Some(1));

        // 第二次 undo 只回退 (1,1)
        assert!(s.undo());
        assert_eq!(s.grid().get(1, 1), Some(EMPTY_CELL));
        assert_eq!(s.grid().get(0, 0), Some(5));

        // 第三次 undo 整图回到上一条提交前
        assert!(s.undo());
        assert_eq!(s.grid().get(0, 0), Some(EMPTY_CELL));
    }

    #[test]
    fn redo_refused_while_gesture_pending() {
        let mut s = session_5x5();
        s.set_cell(0, 0, 1);
        s.commit("Place Tile");
        s.undo();
        s.redo();
        assert_eq!(s.grid().get(0, 0), Some(1));

        // 游标在最后一条上、pending 非空：拒绝且 pending 原样保留
        s.set_cell(3, 3, 2);
        assert!(!s.redo());
        assert!(!s.can_redo());
        assert_eq!(s.pending().len(), 1);
        assert_eq!(s.grid().get(3, 3), Some(2));
    }

    #[test]
    fn place_undo_redo_scenario() {
        // 5×5 上两次放置，undo 后 redo，逐步核对游标与格子
        let mut s = session_5x5();

        assert!(s.set_cell(2, 2, 7));
        assert_eq!(
            s.pending().changes().first().map(|c| (c.x, c.y, c.before, c.after)),
            Some((2, 2, EMPTY_CELL, 7))
        );
        assert!(s.commit("Place"));
        assert_eq!(s.history().len(), 2); // Initial State + Place
        assert_eq!(s.history().cursor(), Some(1));
        assert!(!s.history().entries()[1].batch);

        s.set_cell(3, 3, 9);
        s.commit("Place");
        assert_eq!(s.history().len(), 3);
        assert_eq!(s.history().cursor(), Some(2));

        assert!(s.undo());
        assert_eq!(s.grid().get(2, 2), Some(7));
        assert_eq!(s.grid().get(3, 3), Some(EMPTY_CELL));
        assert_eq!(s.history().cursor(), Some(1));

        assert!(s.redo());
        assert_eq!(s.grid().get(3, 3), Some(9));
        assert_eq!(s.history().cursor(), Some(2));
    }

    #[test]
    fn batch_flag_reflects_change_count() {
        let mut s = session_5x5();
        s.set_cell(0, 0, 1);
        s.commit("Place Tile");
        let e = s.history().current().cloned();
        assert_eq!(e.as_ref().map(|e| (e.batch, e.change_count)), Some((false, 1)));

        s.set_cell(1, 0, 1);
        s.set_cell(2, 0, 1);
        s.set_cell(3, 0, 1);
        s.commit("Paint");
        let e = s.history().current().cloned();
        assert_eq!(e.as_ref().map(|e| (e.batch, e.change_count)), Some((true, 3)));
    }

    #[test]
    fn revision_bumps_on_every_grid_change() {
        let mut s = session_5x5();
        let r0 = s.revision();
        s.set_cell(0, 0, 1);
        let r1 = s.revision();
        assert!(r1 > r0);
        s.commit("Place Tile");
        assert_eq!(s.revision(), r1); // commit 不改网格内容
        s.undo();
        assert!(s.revision() > r1);
    }

    #[test]
    fn phase_transitions() {
        let mut s = session_5x5();
        assert_eq!(s.phase(), SessionPhase::Idle);
        s.set_cell(0, 0, 1);
        assert_eq!(s.phase(), SessionPhase::Recording);
        s.commit("Place Tile");
        assert_eq!(s.phase(), SessionPhase::Idle);

        // 手势中逐条撤到空，回到 Idle
        s.set_cell(1, 1, 2);
        s.undo();
        assert_eq!(s.phase(), SessionPhase::Idle);
    }

    #[test]
    fn initial_state_recorded_once() {
        let mut s = EditorSession::new(5, 5);
        assert!(s.record_initial_state());
        assert!(!s.record_initial_state());
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.history().entries()[0].action, "Initial State");
        // 只有底时撤不动
        assert!(!s.undo());
    }
}
