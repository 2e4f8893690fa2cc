//! 五子棋共享协议库
//!
//! 包含:
//! - 棋子、坐标、棋盘等核心数据结构
//! - 五连判定（对局层与 AI 共用）
//! - 对局状态、悔棋与统计
//! - 棋盘图格式与 JSON 快照

mod board;
mod constants;
mod diagram;
mod error;
mod game;
mod record;
mod rules;
mod stone;

pub use board::{Board, BoardKey, TrialMove};
pub use constants::*;
pub use diagram::{Diagram, EMPTY_DIAGRAM};
pub use error::{ProtocolError, Result, RuleError};
pub use game::{Difficulty, GameResult, GameState, GameStats, GameStatus, Move, MoveOutcome};
pub use record::{GameSnapshot, SNAPSHOT_VERSION};
pub use rules::{check_win, find_winner, scan_line, winning_line, LineScan};
pub use stone::{Position, Stone};
