//! 对局快照
//!
//! 用于在进程或网络边界交换对局状态（JSON），以及从快照恢复对局。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{Result, RuleError};
use crate::game::{GameState, GameStatus, Move};
use crate::rules::{check_win, find_winner};
use crate::stone::Stone;

/// 快照版本号
pub const SNAPSHOT_VERSION: &str = "1.0";

/// 对局快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// 版本号
    pub version: String,
    /// 棋盘（嵌套整数数组）
    pub board: Board,
    /// 当前走子方
    pub current_turn: Stone,
    /// 对局状态
    pub status: GameStatus,
    /// 胜者
    pub winner: Option<Stone>,
    /// 棋谱
    pub history: Vec<Move>,
}

impl GameSnapshot {
    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 校验快照与规则不变量是否一致
    pub fn validate(&self) -> std::result::Result<(), RuleError> {
        let invalid = |reason: String| Err(RuleError::InvalidSnapshot { reason });

        if self.history.len() != self.board.stone_count() {
            return invalid(format!(
                "History has {} moves but board has {} stones",
                self.history.len(),
                self.board.stone_count()
            ));
        }

        for (i, mv) in self.history.iter().enumerate() {
            let expected = if i % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            if mv.stone != expected || mv.index as usize != i {
                return invalid(format!("Move {} breaks turn order", i));
            }
            if self.board.get(mv.position) != Some(mv.stone) {
                return invalid(format!("Move {} does not match board at {}", i, mv.position));
            }
        }

        let actual_winner = find_winner(&self.board);
        if actual_winner != self.winner {
            return invalid(format!(
                "Winner {:?} does not match board ({:?})",
                self.winner, actual_winner
            ));
        }

        // 胜者的五连必须由最后一手完成
        if let Some(winner) = self.winner {
            let decided_last = self
                .history
                .last()
                .is_some_and(|last| last.stone == winner && check_win(&self.board, last.position, winner));
            if !decided_last {
                return invalid(format!("Moves recorded after {:?} won", winner));
            }
        }

        let finished = self.winner.is_some() || self.board.is_full();
        match (self.status, finished) {
            (GameStatus::Playing, true) => return invalid("Finished game marked as playing".into()),
            (GameStatus::Finished, false) => return invalid("Unfinished game marked as finished".into()),
            _ => {}
        }

        if self.status == GameStatus::Playing {
            let expected = if self.history.len() % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            if self.current_turn != expected {
                return invalid(format!("Expected {:?} to move", expected));
            }
        }

        Ok(())
    }
}

impl GameState {
    /// 生成快照
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: SNAPSHOT_VERSION.to_string(),
            board: self.board().clone(),
            current_turn: self.current_turn(),
            status: self.status(),
            winner: self.winner(),
            history: self.history().to_vec(),
        }
    }

    /// 从快照恢复
    pub fn restore(snapshot: GameSnapshot) -> std::result::Result<Self, RuleError> {
        snapshot.validate()?;
        Ok(GameState::from_parts(
            snapshot.board,
            snapshot.current_turn,
            snapshot.status,
            snapshot.winner,
            snapshot.history,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stone::Position;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut game = GameState::new();
        game.make_move(pos(7, 7)).unwrap();
        game.make_move(pos(7, 8)).unwrap();
        game.make_move(pos(8, 8)).unwrap();

        let json = game.snapshot().to_json().unwrap();
        let snapshot = GameSnapshot::from_json(&json).unwrap();
        let restored = GameState::restore(snapshot).unwrap();

        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.history(), game.history());
        assert_eq!(restored.current_turn(), Stone::White);
    }

    #[test]
    fn test_restore_finished_game() {
        let mut game = GameState::new();
        for col in 0..4 {
            game.make_move(pos(0, col)).unwrap();
            game.make_move(pos(1, col)).unwrap();
        }
        game.make_move(pos(0, 4)).unwrap();

        let restored = GameState::restore(game.snapshot()).unwrap();
        assert!(restored.is_finished());
        assert_eq!(restored.winner(), Some(Stone::Black));
        assert_eq!(restored.winning_line().map(|line| line.len()), Some(5));
    }

    #[test]
    fn test_restore_rejects_mismatched_history() {
        let mut game = GameState::new();
        game.make_move(pos(7, 7)).unwrap();
        let mut snapshot = game.snapshot();
        snapshot.history.clear();

        assert!(matches!(
            GameState::restore(snapshot),
            Err(RuleError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_restore_rejects_wrong_turn() {
        let mut game = GameState::new();
        game.make_move(pos(7, 7)).unwrap();
        let mut snapshot = game.snapshot();
        snapshot.current_turn = Stone::Black;

        assert!(GameState::restore(snapshot).is_err());
    }

    #[test]
    fn test_restore_rejects_bad_winner() {
        let mut game = GameState::new();
        game.make_move(pos(7, 7)).unwrap();
        let mut snapshot = game.snapshot();
        snapshot.winner = Some(Stone::Black);
        snapshot.status = GameStatus::Finished;

        assert!(GameState::restore(snapshot).is_err());
    }

    #[test]
    fn test_restore_rejects_moves_after_win() {
        let mut game = GameState::new();
        for col in 0..4 {
            game.make_move(pos(0, col)).unwrap();
            game.make_move(pos(1, col)).unwrap();
        }
        game.make_move(pos(0, 4)).unwrap();

        // 在胜局之后补记白、黑各一手
        let mut snapshot = game.snapshot();
        for (index, (p, stone)) in [(pos(5, 5), Stone::White), (pos(6, 6), Stone::Black)]
            .into_iter()
            .enumerate()
        {
            snapshot.board.place(p, stone).unwrap();
            snapshot.history.push(Move::new(p, stone, 9 + index as u32));
        }

        assert!(matches!(
            GameState::restore(snapshot),
            Err(RuleError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GameSnapshot::from_json("{\"board\": 3}").is_err());
    }
}
