//! 棋盘状态

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, CELL_COUNT, KEY_WORDS};
use crate::error::RuleError;
use crate::stone::{Position, Stone};

/// 棋盘指纹
///
/// 每格 2 bit（0 空，1 黑，2 白）紧凑排列，能唯一确定整个棋盘，
/// 用作搜索缓存的键。随落子/提子增量维护。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoardKey([u64; KEY_WORDS]);

impl BoardKey {
    #[inline]
    fn set(&mut self, index: usize, code: u8) {
        let bit = index * 2;
        let word = &mut self.0[bit / 64];
        let shift = bit % 64;
        *word = (*word & !(0b11 << shift)) | ((code as u64) << shift);
    }
}

/// 棋盘
///
/// 15x15 网格，索引为 row * 15 + col。序列化为嵌套的整数数组
/// （`[[0, 1, 2, ...], ...]`），与联机层传输格式一致。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    cells: Vec<Option<Stone>>,
    key: BoardKey,
    stone_count: usize,
}

impl Board {
    /// 创建空棋盘
    pub fn new() -> Self {
        Self {
            cells: vec![None; CELL_COUNT],
            key: BoardKey::default(),
            stone_count: 0,
        }
    }

    /// 检查坐标是否在棋盘内
    #[inline]
    pub fn in_bounds(row: i32, col: i32) -> bool {
        row >= 0 && (row as usize) < BOARD_SIZE && col >= 0 && (col as usize) < BOARD_SIZE
    }

    /// 获取指定位置的棋子
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Stone> {
        if pos.is_valid() {
            self.cells[pos.to_index()]
        } else {
            None
        }
    }

    /// 检查位置是否为空
    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        pos.is_valid() && self.cells[pos.to_index()].is_none()
    }

    /// 落子
    ///
    /// 越界或该位置已有棋子时返回错误，棋盘保持不变。
    pub fn place(&mut self, pos: Position, stone: Stone) -> Result<(), RuleError> {
        if !pos.is_valid() {
            return Err(RuleError::OutOfBounds {
                row: pos.row as i32,
                col: pos.col as i32,
            });
        }
        let index = pos.to_index();
        if self.cells[index].is_some() {
            return Err(RuleError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[index] = Some(stone);
        self.key.set(index, stone.code());
        self.stone_count += 1;
        Ok(())
    }

    /// 按有符号坐标落子（用于外部输入）
    pub fn place_at(&mut self, row: i32, col: i32, stone: Stone) -> Result<Position, RuleError> {
        if !Self::in_bounds(row, col) {
            return Err(RuleError::OutOfBounds { row, col });
        }
        let pos = Position::new_unchecked(row as u8, col as u8);
        self.place(pos, stone)?;
        Ok(pos)
    }

    /// 提子（仅用于搜索回溯和悔棋），返回被移除的棋子
    pub fn remove(&mut self, pos: Position) -> Option<Stone> {
        if !pos.is_valid() {
            return None;
        }
        let index = pos.to_index();
        let removed = self.cells[index].take();
        if removed.is_some() {
            self.key.set(index, 0);
            self.stone_count -= 1;
        }
        removed
    }

    /// 试落子：返回守卫，守卫释放时自动提子
    pub fn trial(&mut self, pos: Position, stone: Stone) -> Result<TrialMove<'_>, RuleError> {
        self.place(pos, stone)?;
        Ok(TrialMove { board: self, pos })
    }

    /// 棋盘是否已满
    #[inline]
    pub fn is_full(&self) -> bool {
        self.stone_count == CELL_COUNT
    }

    /// 棋盘是否没有任何棋子
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stone_count == 0
    }

    /// 棋子总数
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stone_count
    }

    /// 当前棋盘指纹
    #[inline]
    pub fn fingerprint(&self) -> BoardKey {
        self.key
    }

    /// 指定颜色的所有棋子位置（行优先）
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == Some(stone))
            .filter_map(|(index, _)| Position::from_index(index))
    }

    /// 所有棋子（行优先）
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Stone)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            let stone = (*cell)?;
            Position::from_index(index).map(|pos| (pos, stone))
        })
    }

    /// 所有空位（行优先）
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .filter_map(|(index, _)| Position::from_index(index))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = RuleError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        if rows.len() != BOARD_SIZE {
            return Err(RuleError::InvalidSnapshot {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut board = Board::new();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != BOARD_SIZE {
                return Err(RuleError::InvalidSnapshot {
                    reason: format!(
                        "Row {} has {} columns, expected {}",
                        row,
                        cells.len(),
                        BOARD_SIZE
                    ),
                });
            }
            for (col, &code) in cells.iter().enumerate() {
                let cell = Stone::from_code(code).ok_or_else(|| RuleError::InvalidSnapshot {
                    reason: format!("Invalid cell code {} at ({}, {})", code, row, col),
                })?;
                if let Some(stone) = cell {
                    board.place(Position::new_unchecked(row as u8, col as u8), stone)?;
                }
            }
        }
        Ok(board)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board
            .cells
            .chunks(BOARD_SIZE)
            .map(|row| row.iter().map(|cell| cell.map_or(0, Stone::code)).collect())
            .collect()
    }
}

/// 试落子守卫
///
/// 创建时已落子，`Drop` 时提子。搜索中每个试探走法都经由它进行，
/// 即使因剪枝提前 `break`/`return`，棋盘也会按后进先出的顺序复原。
pub struct TrialMove<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl TrialMove<'_> {
    /// 试落子的位置
    pub fn position(&self) -> Position {
        self.pos
    }
}

impl Deref for TrialMove<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for TrialMove<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        self.board.remove(self.pos);
    }
}
