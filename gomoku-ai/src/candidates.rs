//! 候选走法生成
//!
//! 只考虑已有棋子附近的空位，按攻守启发分排序后截断，限制搜索分支数。

use protocol::{Board, Position, Stone, BOARD_SIZE};

use crate::evaluate::Evaluator;

/// 邻域半径（切比雪夫距离）
pub const NEIGHBOR_RADIUS: i32 = 2;

/// 进攻权重（2.0，以半分计）
const ATTACK_WEIGHT: i64 = 4;

/// 防守权重（1.5，以半分计）
const DEFENSE_WEIGHT: i64 = 3;

/// 候选走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成排序后的候选落子位置
    ///
    /// 空棋盘只返回天元。试落子均经由守卫完成，返回时棋盘与调用前一致。
    pub fn candidates(board: &mut Board, player: Stone, limit: usize) -> Vec<Position> {
        if board.is_board_empty() {
            return vec![Position::center()];
        }

        let cells: Vec<Position> = board
            .empty_cells()
            .filter(|&pos| Self::has_neighbor(board, pos, NEIGHBOR_RADIUS))
            .collect();

        let mut scored: Vec<(Position, i64)> = cells
            .into_iter()
            .map(|pos| (pos, Self::move_score(board, pos, player)))
            .collect();

        // 稳定排序：同分保持行优先顺序
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);
        scored.into_iter().map(|(pos, _)| pos).collect()
    }

    /// 空位的攻守启发分（半分）
    ///
    /// 进攻：己方落在此处后的棋型分 ×2；防守：对方落在此处后的棋型分 ×1.5。
    pub fn move_score(board: &mut Board, pos: Position, player: Stone) -> i64 {
        let opponent = player.opponent();

        let attack = match board.trial(pos, player) {
            Ok(trial) => Evaluator::pattern_score(&trial, player) as i64,
            Err(_) => return i64::MIN,
        };
        let defense = match board.trial(pos, opponent) {
            Ok(trial) => Evaluator::pattern_score(&trial, opponent) as i64,
            Err(_) => return i64::MIN,
        };

        ATTACK_WEIGHT * attack + DEFENSE_WEIGHT * defense
    }

    /// 检查 `radius` 范围内是否有任意棋子
    pub fn has_neighbor(board: &Board, pos: Position, radius: i32) -> bool {
        let (row, col) = (pos.row as i32, pos.col as i32);
        let max = BOARD_SIZE as i32 - 1;

        for r in (row - radius).max(0)..=(row + radius).min(max) {
            for c in (col - radius).max(0)..=(col + radius).min(max) {
                if board.get(Position::new_unchecked(r as u8, c as u8)).is_some() {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(row, col, stone) in stones {
            board.place(Position::new_unchecked(row, col), stone).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_center() {
        let mut board = Board::new();
        assert_eq!(
            MoveGenerator::candidates(&mut board, Stone::Black, 20),
            vec![Position::new_unchecked(7, 7)]
        );
    }

    #[test]
    fn test_candidates_near_stones() {
        let mut board = board_with(&[(7, 7, Stone::Black)]);
        let moves = MoveGenerator::candidates(&mut board, Stone::White, usize::MAX);

        // 5x5 邻域减去中心
        assert_eq!(moves.len(), 24);
        for pos in &moves {
            assert!(board.is_empty(*pos));
            assert!((pos.row as i32 - 7).abs() <= 2 && (pos.col as i32 - 7).abs() <= 2);
        }
    }

    #[test]
    fn test_candidates_clipped_at_corner() {
        let mut board = board_with(&[(0, 0, Stone::Black)]);
        let moves = MoveGenerator::candidates(&mut board, Stone::White, usize::MAX);
        assert_eq!(moves.len(), 8);
    }

    #[test]
    fn test_candidates_truncated() {
        let mut board = board_with(&[(7, 7, Stone::Black), (7, 8, Stone::White)]);
        for limit in [10, 20, 30] {
            let moves = MoveGenerator::candidates(&mut board, Stone::Black, limit);
            assert_eq!(moves.len(), limit.min(28));
        }
    }

    #[test]
    fn test_candidates_restore_board() {
        let mut board = board_with(&[
            (7, 7, Stone::Black),
            (7, 8, Stone::White),
            (8, 8, Stone::Black),
        ]);
        let before = board.clone();
        MoveGenerator::candidates(&mut board, Stone::White, 30);
        assert_eq!(board, before, "候选生成后棋盘应复原");
    }

    #[test]
    fn test_winning_cell_ranked_first() {
        // 黑方四连，唯一的五连点应排第一
        let mut board = board_with(&[
            (7, 0, Stone::Black),
            (7, 1, Stone::Black),
            (7, 2, Stone::Black),
            (7, 3, Stone::Black),
            (6, 0, Stone::White),
            (6, 1, Stone::White),
            (6, 2, Stone::White),
            (8, 3, Stone::White),
        ]);
        let moves = MoveGenerator::candidates(&mut board, Stone::Black, 10);
        assert_eq!(moves[0], Position::new_unchecked(7, 4));
    }

    #[test]
    fn test_defensive_cell_ranked_high() {
        // 白方活四，黑方的候选中两个堵点应排在最前
        let mut board = board_with(&[
            (7, 4, Stone::White),
            (7, 5, Stone::White),
            (7, 6, Stone::White),
            (7, 7, Stone::White),
            (2, 2, Stone::Black),
            (2, 12, Stone::Black),
            (12, 2, Stone::Black),
            (12, 12, Stone::Black),
        ]);
        let moves = MoveGenerator::candidates(&mut board, Stone::Black, 10);
        let blocks = [Position::new_unchecked(7, 3), Position::new_unchecked(7, 8)];
        assert!(blocks.contains(&moves[0]));
        assert!(blocks.contains(&moves[1]));
    }

    #[test]
    fn test_ties_keep_row_major_order() {
        // 单子四周的对称位置同分，按行优先排列
        let mut board = board_with(&[(7, 7, Stone::Black)]);
        let moves = MoveGenerator::candidates(&mut board, Stone::White, usize::MAX);
        let scores: Vec<i64> = moves
            .iter()
            .map(|&pos| MoveGenerator::move_score(&mut board, pos, Stone::White))
            .collect();

        for window in moves.windows(2).zip(scores.windows(2)) {
            let (pos_pair, score_pair) = window;
            assert!(score_pair[0] >= score_pair[1]);
            if score_pair[0] == score_pair[1] {
                assert!(pos_pair[0].to_index() < pos_pair[1].to_index());
            }
        }
    }
}
