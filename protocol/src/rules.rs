//! 胜负判定
//!
//! 对局层和 AI 搜索共用同一套连线扫描，保证两边的终局条件完全一致。

use crate::board::Board;
use crate::constants::{DIRECTIONS, WIN_LENGTH};
use crate::stone::{Position, Stone};

/// 单方向连线扫描结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// 连续同色棋子数（含起点）
    pub count: usize,
    /// 被堵住的端数（对方棋子或棋盘边缘），0-2
    pub blocked: u8,
}

/// 沿 `(dr, dc)` 扫描经过 `pos` 的连线
///
/// 起点视为 `stone`，向正反两个方向各最多走 4 步，遇到非同色格子即停止。
/// 停在对方棋子或棋盘边缘记为堵住，停在空位记为开放；走满 4 步时该端不计。
pub fn scan_line(board: &Board, pos: Position, dr: i8, dc: i8, stone: Stone) -> LineScan {
    let mut count = 1;
    let mut blocked = 0;

    for (sr, sc) in [(dr, dc), (-dr, -dc)] {
        let mut current = pos;
        for _ in 1..WIN_LENGTH {
            match current.offset(sr, sc) {
                None => {
                    blocked += 1;
                    break;
                }
                Some(next) => match board.get(next) {
                    Some(s) if s == stone => {
                        count += 1;
                        current = next;
                    }
                    Some(_) => {
                        blocked += 1;
                        break;
                    }
                    None => break,
                },
            }
        }
    }

    LineScan { count, blocked }
}

/// 检查在 `pos` 落下 `stone` 后是否形成五连（长连同样获胜）
pub fn check_win(board: &Board, pos: Position, stone: Stone) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| scan_line(board, pos, dr, dc, stone).count >= WIN_LENGTH)
}

/// 获取获胜连线（按方向从反向端到正向端排列，至少 5 个位置）
pub fn winning_line(board: &Board, pos: Position, stone: Stone) -> Option<Vec<Position>> {
    for &(dr, dc) in &DIRECTIONS {
        let mut line = vec![pos];

        let mut current = pos;
        for _ in 1..WIN_LENGTH {
            match current.offset(dr, dc) {
                Some(next) if board.get(next) == Some(stone) => {
                    line.push(next);
                    current = next;
                }
                _ => break,
            }
        }

        current = pos;
        for _ in 1..WIN_LENGTH {
            match current.offset(-dr, -dc) {
                Some(prev) if board.get(prev) == Some(stone) => {
                    line.insert(0, prev);
                    current = prev;
                }
                _ => break,
            }
        }

        if line.len() >= WIN_LENGTH {
            return Some(line);
        }
    }

    None
}

/// 扫描整个棋盘，返回第一个（行优先）已形成五连的一方
pub fn find_winner(board: &Board) -> Option<Stone> {
    board
        .occupied()
        .find(|&(pos, stone)| check_win(board, pos, stone))
        .map(|(_, stone)| stone)
}
