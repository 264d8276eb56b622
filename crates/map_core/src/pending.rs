#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::now_ms;

/// 一次未提交的单格变更。
///
/// `before` 必须是写入前网格里的真实值（拖动中可能重复经过同一格，
/// 调用方不能用猜的）。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingChange {
    pub x: u32,
    pub y: u32,
    pub before: i32,
    pub after: i32,
    pub at_ms: u64,
}

/// 手势进行中的变更缓冲：只追加，提交或逐条撤销时清空。
///
/// 同一格子被多次经过时全部保留（不按格子去重），完整因果链
/// 可用于回放排查；最终网格状态只取决于每格最后一次写入。
#[derive(Clone, Debug, Default)]
pub struct PendingBuffer {
    changes: Vec<PendingChange>,
}

impl PendingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 反序列化恢复用。
    pub fn from_changes(changes: Vec<PendingChange>) -> Self {
        Self { changes }
    }

    /// 仅当值真的变了才记录。"用户到底改没改"在这一处判定。
    pub fn record_if_changed(&mut self, x: u32, y: u32, before: i32, after: i32) -> bool {
        if before == after {
            return false;
        }
        self.changes.push(PendingChange {
            x,
            y,
            before,
            after,
            at_ms: now_ms(),
        });
        true
    }

    /// 弹出最近一条（手势中细粒度撤销）。
    pub fn pop(&mut self) -> Option<PendingChange> {
        self.changes.pop()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn clear(&mut self) {
        self.changes.clear();
    }

    pub fn changes(&self) -> &[PendingChange] {
        &self.changes
    }
}
