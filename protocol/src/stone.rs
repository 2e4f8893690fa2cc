//! 棋子与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, CELL_COUNT};

/// 棋子颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    /// 黑方（先手）
    Black,
    /// 白方（后手）
    White,
}

impl Stone {
    /// 获取对方颜色
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// 传输用编码（0 表示空位，1 黑，2 白）
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Stone::Black => 1,
            Stone::White => 2,
        }
    }

    /// 从传输编码解析（0 解析为空位）
    pub fn from_code(code: u8) -> Option<Option<Stone>> {
        match code {
            0 => Some(None),
            1 => Some(Some(Stone::Black)),
            2 => Some(Some(Stone::White)),
            _ => None,
        }
    }

    /// 棋盘图字符
    pub fn to_char(self) -> char {
        match self {
            Stone::Black => 'X',
            Stone::White => 'O',
        }
    }

    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Stone::Black => "黑方",
            Stone::White => "白方",
        }
    }
}

impl std::fmt::Display for Stone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-14)
    pub row: u8,
    /// 列 (0-14)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 棋盘中心（天元）
    pub const fn center() -> Self {
        Self::new_unchecked((BOARD_SIZE / 2) as u8, (BOARD_SIZE / 2) as u8)
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// 获取偏移后的位置
    #[inline]
    pub fn offset(&self, dr: i8, dc: i8) -> Option<Position> {
        let row = self.row as i32 + dr as i32;
        let col = self.col as i32 + dc as i32;
        if row >= 0 && (row as usize) < BOARD_SIZE && col >= 0 && (col as usize) < BOARD_SIZE {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引（行优先）
    #[inline]
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Position {
                row: (index / BOARD_SIZE) as u8,
                col: (index % BOARD_SIZE) as u8,
            })
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stone_opponent() {
        assert_eq!(Stone::Black.opponent(), Stone::White);
        assert_eq!(Stone::White.opponent(), Stone::Black);
    }

    #[test]
    fn test_stone_codes() {
        assert_eq!(Stone::Black.code(), 1);
        assert_eq!(Stone::White.code(), 2);
        assert_eq!(Stone::from_code(0), Some(None));
        assert_eq!(Stone::from_code(2), Some(Some(Stone::White)));
        assert_eq!(Stone::from_code(3), None);
    }

    #[test]
    fn test_position_valid() {
        assert!(Position::new(0, 0).is_some());
        assert!(Position::new(14, 14).is_some());
        assert!(Position::new(15, 0).is_none());
        assert!(Position::new(0, 15).is_none());
    }

    #[test]
    fn test_position_center() {
        assert_eq!(Position::center(), Position::new_unchecked(7, 7));
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new_unchecked(0, 14);
        assert_eq!(pos.offset(1, -1), Some(Position::new_unchecked(1, 13)));
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(0, 1), None);
    }

    #[test]
    fn test_position_index() {
        let pos = Position::new_unchecked(3, 11);
        assert_eq!(Position::from_index(pos.to_index()), Some(pos));
        assert_eq!(Position::from_index(CELL_COUNT), None);
    }
}
