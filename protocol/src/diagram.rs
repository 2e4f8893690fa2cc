//! 棋盘图格式解析和生成
//!
//! 每行一个字符串，从第 0 行到第 14 行，行之间用 `/` 或换行分隔：
//! `.` 空位，`X` 黑子，`O` 白子（大小写均可）。
//!
//! 示例（前两行）：
//! `.......X......./......O........`

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::RuleError;
use crate::stone::{Position, Stone};

/// 空棋盘的棋盘图
pub const EMPTY_DIAGRAM: &str = "\
...............
...............
...............
...............
...............
...............
...............
...............
...............
...............
...............
...............
...............
...............
...............";

/// 棋盘图格式处理
pub struct Diagram;

impl Diagram {
    /// 解析棋盘图
    pub fn parse(diagram: &str) -> Result<Board, RuleError> {
        let rows: Vec<&str> = diagram
            .split(|c| c == '/' || c == '\n')
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(RuleError::InvalidDiagram {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        let mut board = Board::new();
        for (row_idx, row) in rows.iter().enumerate() {
            let mut col = 0usize;
            for c in row.chars() {
                if col >= BOARD_SIZE {
                    return Err(RuleError::InvalidDiagram {
                        reason: format!("Row {} has too many columns", row_idx),
                    });
                }

                let stone = match c {
                    '.' => None,
                    'X' | 'x' => Some(Stone::Black),
                    'O' | 'o' => Some(Stone::White),
                    _ => {
                        return Err(RuleError::InvalidDiagram {
                            reason: format!("Invalid cell character: {}", c),
                        })
                    }
                };
                if let Some(stone) = stone {
                    board.place(Position::new_unchecked(row_idx as u8, col as u8), stone)?;
                }
                col += 1;
            }

            if col != BOARD_SIZE {
                return Err(RuleError::InvalidDiagram {
                    reason: format!("Row {} has {} columns, expected {}", row_idx, col, BOARD_SIZE),
                });
            }
        }

        Ok(board)
    }

    /// 生成多行棋盘图
    pub fn render(board: &Board) -> String {
        Self::rows(board).join("\n")
    }

    /// 生成单行棋盘图（`/` 分隔）
    pub fn render_compact(board: &Board) -> String {
        Self::rows(board).join("/")
    }

    fn rows(board: &Board) -> Vec<String> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .map(|col| {
                        board
                            .get(Position::new_unchecked(row as u8, col as u8))
                            .map_or('.', Stone::to_char)
                    })
                    .collect()
            })
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&Diagram::render(self))
    }
}
