//! 棋局评估函数
//!
//! 按连子长度和两端是否被堵给每条线打分，双方得分之差即局面分。

use protocol::{scan_line, Board, LineScan, Stone, DIRECTIONS};

/// 棋型分值表
///
/// 可以调参，但必须保持 活四 > 冲四 > 活三 > 眠三 > 活二 > 眠二 的顺序。
pub struct PatternScore;

impl PatternScore {
    /// 五连（含长连）
    pub const FIVE: i32 = 10_000;
    /// 活四：两端皆空
    pub const OPEN_FOUR: i32 = 1_000;
    /// 冲四：一端被堵
    pub const CLOSED_FOUR: i32 = 500;
    /// 活三
    pub const OPEN_THREE: i32 = 200;
    /// 眠三
    pub const CLOSED_THREE: i32 = 100;
    /// 活二
    pub const OPEN_TWO: i32 = 50;
    /// 眠二
    pub const CLOSED_TWO: i32 = 20;
}

/// 局面分中每方棋型分的权重
const PATTERN_WEIGHT: i32 = 10;

/// 单条线的得分
#[inline]
pub fn line_score(scan: LineScan) -> i32 {
    match (scan.count, scan.blocked) {
        (count, _) if count >= 5 => PatternScore::FIVE,
        (4, 0) => PatternScore::OPEN_FOUR,
        (4, 1) => PatternScore::CLOSED_FOUR,
        (3, 0) => PatternScore::OPEN_THREE,
        (3, 1) => PatternScore::CLOSED_THREE,
        (2, 0) => PatternScore::OPEN_TWO,
        (2, 1) => PatternScore::CLOSED_TWO,
        _ => 0,
    }
}

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 评估棋局（`player` 视角，正值对 `player` 有利）
    pub fn evaluate(board: &Board, player: Stone) -> i32 {
        PATTERN_WEIGHT * Self::pattern_score(board, player)
            - PATTERN_WEIGHT * Self::pattern_score(board, player.opponent())
    }

    /// 一方的棋型总分
    ///
    /// 对该方每个棋子、每个方向各计一次，同一条连线会按棋子数重复计分。
    pub fn pattern_score(board: &Board, player: Stone) -> i32 {
        board
            .stones(player)
            .map(|pos| {
                DIRECTIONS
                    .iter()
                    .map(|&(dr, dc)| line_score(scan_line(board, pos, dr, dc, player)))
                    .sum::<i32>()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{find_winner, Position};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn board_with(stones: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(row, col, stone) in stones {
            board.place(Position::new_unchecked(row, col), stone).unwrap();
        }
        board
    }

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::FIVE > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::CLOSED_FOUR);
        assert!(PatternScore::CLOSED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::CLOSED_THREE);
        assert!(PatternScore::CLOSED_THREE > PatternScore::OPEN_TWO);
        assert!(PatternScore::OPEN_TWO > PatternScore::CLOSED_TWO);
    }

    #[test]
    fn test_line_score_table() {
        let score = |count, blocked| line_score(LineScan { count, blocked });
        assert_eq!(score(6, 2), 10_000);
        assert_eq!(score(5, 0), 10_000);
        assert_eq!(score(4, 0), 1_000);
        assert_eq!(score(4, 1), 500);
        assert_eq!(score(4, 2), 0, "两端皆堵不计分");
        assert_eq!(score(3, 0), 200);
        assert_eq!(score(3, 1), 100);
        assert_eq!(score(2, 0), 50);
        assert_eq!(score(2, 1), 20);
        assert_eq!(score(1, 0), 0);
    }

    #[test]
    fn test_empty_board_is_zero() {
        let board = Board::new();
        assert_eq!(Evaluator::evaluate(&board, Stone::Black), 0);
        assert_eq!(Evaluator::pattern_score(&board, Stone::White), 0);
    }

    #[test]
    fn test_open_two_pattern() {
        // 中央活二：两个棋子各在横向计一次活二
        let board = board_with(&[(7, 7, Stone::Black), (7, 8, Stone::Black)]);
        assert_eq!(
            Evaluator::pattern_score(&board, Stone::Black),
            2 * PatternScore::OPEN_TWO
        );
        assert_eq!(
            Evaluator::evaluate(&board, Stone::Black),
            10 * 2 * PatternScore::OPEN_TWO
        );
    }

    #[test]
    fn test_edge_blocks_run() {
        // 靠边的三连只有一端开放
        let board = board_with(&[
            (0, 5, Stone::White),
            (1, 5, Stone::White),
            (2, 5, Stone::White),
        ]);
        assert_eq!(
            Evaluator::pattern_score(&board, Stone::White),
            3 * PatternScore::CLOSED_THREE
        );
    }

    #[test]
    fn test_opponent_block_lowers_score() {
        let open = board_with(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (7, 7, Stone::Black),
        ]);
        let mut blocked = open.clone();
        blocked.place(Position::new_unchecked(7, 8), Stone::White).unwrap();

        assert!(
            Evaluator::evaluate(&open, Stone::Black) > Evaluator::evaluate(&blocked, Stone::Black),
            "被堵的三连应低于活三"
        );
    }

    #[test]
    fn test_antisymmetry() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xE7A1_0002);
        let mut checked = 0;

        while checked < 40 {
            let mut board = Board::new();
            let mut stone = Stone::Black;
            let target = rng.gen_range(2..40);
            while board.stone_count() < target {
                let pos = Position::new_unchecked(rng.gen_range(3..12), rng.gen_range(3..12));
                if board.place(pos, stone).is_ok() {
                    stone = stone.opponent();
                }
            }
            if find_winner(&board).is_some() {
                continue;
            }

            assert_eq!(
                Evaluator::evaluate(&board, Stone::Black),
                -Evaluator::evaluate(&board, Stone::White),
                "评估函数应满足反对称性"
            );
            checked += 1;
        }
    }
}
