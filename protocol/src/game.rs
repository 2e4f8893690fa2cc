//! 对局状态
//!
//! 棋盘 + 当前走子方 + 对局状态 + 胜者 + 棋谱，负责落子校验、
//! 胜负/平局判定以及悔棋。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::RuleError;
use crate::rules::{check_win, winning_line};
use crate::stone::{Position, Stone};

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=2，候选 10
    Easy,
    /// 中等：depth=4，候选 20
    Medium,
    /// 困难：depth=6，候选 30
    Hard,
}

impl Difficulty {
    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "简单",
            Difficulty::Medium => "中等",
            Difficulty::Hard => "困难",
        }
    }

    /// 所有选项
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// 进行中
    Playing,
    /// 已结束
    Finished,
}

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// 一方五连获胜
    Win(Stone),
    /// 棋盘下满
    Draw,
}

/// 走法记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// 落子位置
    pub position: Position,
    /// 落子方
    pub stone: Stone,
    /// 手数（从 0 开始）
    pub index: u32,
    /// 落子时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_at: Option<DateTime<Utc>>,
}

impl Move {
    /// 创建新走法
    pub fn new(position: Position, stone: Stone, index: u32) -> Self {
        Self {
            position,
            stone,
            index,
            played_at: None,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {} {}", self.index + 1, self.stone, self.position)
    }
}

/// 落子结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// 对局继续，轮到 `next`
    Continue { next: Stone },
    /// 落子方获胜
    Win { winner: Stone, line: Vec<Position> },
    /// 平局（棋盘已满）
    Draw,
}

/// 对局统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_moves: usize,
    pub winner: Option<Stone>,
    pub status: GameStatus,
    /// 对局时长（毫秒），未开始计时则为 None
    pub duration_ms: Option<i64>,
}

/// 完整的对局状态
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    current_turn: Stone,
    status: GameStatus,
    winner: Option<Stone>,
    winning_line: Option<Vec<Position>>,
    history: Vec<Move>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl GameState {
    /// 创建新对局（黑方先行）
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_turn: Stone::Black,
            status: GameStatus::Playing,
            winner: None,
            winning_line: None,
            history: Vec::new(),
            started_at: Some(Utc::now()),
            finished_at: None,
        }
    }

    /// 由已校验的部件组装（快照恢复使用）
    pub(crate) fn from_parts(
        board: Board,
        current_turn: Stone,
        status: GameStatus,
        winner: Option<Stone>,
        history: Vec<Move>,
    ) -> Self {
        let winning_line = match (winner, history.last()) {
            (Some(stone), Some(last)) => winning_line(&board, last.position, stone),
            _ => None,
        };
        let started_at = history.first().and_then(|mv| mv.played_at);
        Self {
            board,
            current_turn,
            status,
            winner,
            winning_line,
            history,
            started_at,
            finished_at: None,
        }
    }

    /// 以当前走子方落子
    pub fn make_move(&mut self, pos: Position) -> Result<MoveOutcome, RuleError> {
        if self.status == GameStatus::Finished {
            return Err(RuleError::GameOver);
        }

        let stone = self.current_turn;
        self.board.place(pos, stone)?;
        self.history.push(Move {
            position: pos,
            stone,
            index: self.history.len() as u32,
            played_at: Some(Utc::now()),
        });

        if check_win(&self.board, pos, stone) {
            let line = winning_line(&self.board, pos, stone).unwrap_or_default();
            self.finish(Some(stone));
            self.winning_line = Some(line.clone());
            tracing::debug!("{} 在 {} 五连获胜", stone, pos);
            return Ok(MoveOutcome::Win { winner: stone, line });
        }

        if self.board.is_full() {
            self.finish(None);
            tracing::debug!("棋盘已满，平局");
            return Ok(MoveOutcome::Draw);
        }

        self.current_turn = stone.opponent();
        Ok(MoveOutcome::Continue {
            next: self.current_turn,
        })
    }

    /// 以指定一方落子（校验回合）
    pub fn make_move_as(&mut self, pos: Position, stone: Stone) -> Result<MoveOutcome, RuleError> {
        if self.status == GameStatus::Finished {
            return Err(RuleError::GameOver);
        }
        if stone != self.current_turn {
            return Err(RuleError::NotYourTurn);
        }
        self.make_move(pos)
    }

    /// 悔一步棋
    pub fn undo_move(&mut self) -> Option<Move> {
        let last = self.history.pop()?;
        self.board.remove(last.position);
        self.current_turn = last.stone;
        self.status = GameStatus::Playing;
        self.winner = None;
        self.winning_line = None;
        self.finished_at = None;
        Some(last)
    }

    /// 悔多步棋（人机对战一次悔两步），步数不足时不做任何修改
    pub fn undo_moves(&mut self, count: usize) -> Result<Vec<Move>, RuleError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if self.history.len() < count {
            return Err(RuleError::NothingToUndo);
        }
        Ok((0..count).filter_map(|_| self.undo_move()).collect())
    }

    fn finish(&mut self, winner: Option<Stone>) {
        self.status = GameStatus::Finished;
        self.winner = winner;
        self.finished_at = Some(Utc::now());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Stone {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    /// 获胜连线（用于界面高亮）
    pub fn winning_line(&self) -> Option<&[Position]> {
        self.winning_line.as_deref()
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// 对局结果（进行中返回 None）
    pub fn result(&self) -> Option<GameResult> {
        match (self.status, self.winner) {
            (GameStatus::Playing, _) => None,
            (GameStatus::Finished, Some(stone)) => Some(GameResult::Win(stone)),
            (GameStatus::Finished, None) => Some(GameResult::Draw),
        }
    }

    /// 对局统计
    pub fn stats(&self) -> GameStats {
        let end = self.finished_at.unwrap_or_else(Utc::now);
        GameStats {
            total_moves: self.history.len(),
            winner: self.winner,
            status: self.status,
            duration_ms: self
                .started_at
                .map(|start| (end - start).num_milliseconds().max(0)),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
