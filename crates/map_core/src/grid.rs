#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::EMPTY_CELL;

/// cols×rows 的格子矩阵，按行扁平存储。
///
/// 值约定：`-1` 为空，`0..N-1` 为外部调色板序号（这里不校验上限，
/// 调色板归编辑器侧管）。越界坐标一律拒绝，不做环绕/钳制。
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapGrid {
    cols: u32,
    rows: u32,
    cells: Vec<i32>,
}

impl MapGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY_CELL; (cols * rows) as usize],
        }
    }

    /// 从已有格子数据重建（反序列化用）。长度不匹配返回 None。
    pub fn from_cells(cols: u32, rows: u32, cells: Vec<i32>) -> Option<Self> {
        if cells.len() != (cols * rows) as usize {
            return None;
        }
        Some(Self { cols, rows, cells })
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.cols && y < self.rows
    }

    #[inline]
    fn idx(&self, x: u32, y: u32) -> usize {
        (y * self.cols + x) as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[self.idx(x, y)])
    }

    /// 写入单格。越界时拒绝（返回 false），不影响其他格子。
    pub fn set(&mut self, x: u32, y: u32, value: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.idx(x, y);
        self.cells[idx] = value;
        true
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// 整图深拷贝（历史条目用）。
    pub fn snapshot(&self) -> Vec<i32> {
        self.cells.clone()
    }

    /// 从快照整图恢复。长度不匹配时拒绝。
    pub fn restore(&mut self, cells: &[i32]) -> bool {
        if cells.len() != self.cells.len() {
            return false;
        }
        self.cells.copy_from_slice(cells);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty() {
        let grid = MapGrid::new(5, 5);
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(grid.get(x, y), Some(EMPTY_CELL));
            }
        }
    }

    #[test]
    fn set_get_roundtrip() {
        let mut grid = MapGrid::new(5, 5);
        assert!(grid.set(2, 3, 7));
        assert_eq!(grid.get(2, 3), Some(7));
        assert_eq!(grid.get(3, 2), Some(EMPTY_CELL));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = MapGrid::new(5, 5);
        assert_eq!(grid.get(5, 0), None);
        assert_eq!(grid.get(0, 5), None);
        assert!(!grid.set(5, 5, 1));
        // 越界写入不得污染任何格子
        assert!(grid.cells().iter().all(|&c| c == EMPTY_CELL));
    }

    #[test]
    fn snapshot_restore() {
        let mut grid = MapGrid::new(3, 3);
        grid.set(1, 1, 4);
        let snap = grid.snapshot();
        grid.set(1, 1, 9);
        grid.set(0, 0, 2);
        assert!(grid.restore(&snap));
        assert_eq!(grid.get(1, 1), Some(4));
        assert_eq!(grid.get(0, 0), Some(EMPTY_CELL));
    }

    #[test]
    fn restore_rejects_wrong_len() {
        let mut grid = MapGrid::new(3, 3);
        assert!(!grid.restore(&[0; 8]));
    }

    #[test]
    fn from_cells_checks_len() {
        assert!(MapGrid::from_cells(2, 2, vec![0, 1, 2]).is_none());
        let grid = MapGrid::from_cells(2, 2, vec![0, 1, 2, 3]);
        assert_eq!(grid.and_then(|g| g.get(1, 1)), Some(3));
    }
}
