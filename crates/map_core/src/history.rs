#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MAX_HISTORY;

/// 一条已提交的历史：提交后的整图快照 + 动作标签。
///
/// 入栈后不再修改；只会被淘汰（超出上限）或被截断（撤销后新提交）。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub cells: Vec<i32>,
    pub action: String,
    pub at_ms: u64,
    /// 本条是否由多于一个格子变更合并而来。
    pub batch: bool,
    pub change_count: usize,
}

/// 有界线性历史。
///
/// 不变量：
/// - `cursor` 为 None 当且仅当 entries 为空，否则 `cursor < entries.len()`
/// - 提交总是先丢弃 cursor 之后的条目（不保留 redo 分支）
/// - `entries.len() <= max_len`，超限从最旧的淘汰，游标随之左移
#[derive(Clone, Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
    max_len: usize,
}

impl HistoryStore {
    /// `max_len == 0` 时使用默认上限。
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_len,
        }
    }

    /// 反序列化恢复：重建全部不变量（超限先丢最旧，游标钳回范围内）。
    pub fn from_parts(
        mut entries: Vec<HistoryEntry>,
        cursor: Option<usize>,
        max_len: usize,
    ) -> Self {
        let cap = if max_len == 0 { MAX_HISTORY } else { max_len };
        let dropped = entries.len().saturating_sub(cap);
        if dropped > 0 {
            entries.drain(0..dropped);
        }
        let cursor = if entries.is_empty() {
            None
        } else {
            let last = entries.len() - 1;
            Some(cursor.map_or(last, |c| c.saturating_sub(dropped).min(last)))
        };
        Self {
            entries,
            cursor,
            max_len,
        }
    }

    fn cap(&self) -> usize {
        if self.max_len == 0 { MAX_HISTORY } else { self.max_len }
    }

    /// 提交一条新历史：截断 redo 尾巴，入栈，淘汰超限的最旧条目。
    /// 结束后游标落在新条目上。
    pub fn push(&mut self, entry: HistoryEntry) {
        match self.cursor {
            Some(c) => self.entries.truncate(c + 1),
            None => self.entries.clear(),
        }
        self.entries.push(entry);
        let cap = self.cap();
        if self.entries.len() > cap {
            let drain = self.entries.len() - cap;
            self.entries.drain(0..drain);
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// 游标后退一格，返回要恢复的条目。已在最底（或为空）时返回 None。
    pub fn step_back(&mut self) -> Option<&HistoryEntry> {
        let c = self.cursor?;
        if c == 0 {
            return None;
        }
        self.cursor = Some(c - 1);
        self.entries.get(c - 1)
    }

    /// 游标前进一格，返回要恢复的条目。已在最顶时返回 None。
    pub fn step_forward(&mut self) -> Option<&HistoryEntry> {
        let c = self.cursor?;
        if c + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(c + 1);
        self.entries.get(c + 1)
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor?)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}
