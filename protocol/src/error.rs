//! 错误类型定义

use thiserror::Error;

/// 五子棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// 坐标超出棋盘范围
    #[error("Position out of bounds: ({row}, {col})")]
    OutOfBounds { row: i32, col: i32 },

    /// 该位置已有棋子
    #[error("Position already occupied: ({row}, {col})")]
    Occupied { row: u8, col: u8 },

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 没有可悔棋的步骤
    #[error("Nothing to undo")]
    NothingToUndo,

    /// 无效的棋盘图
    #[error("Invalid board diagram: {reason}")]
    InvalidDiagram { reason: String },

    /// 无效的对局快照
    #[error("Invalid game snapshot: {reason}")]
    InvalidSnapshot { reason: String },
}

/// 协议错误类型
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 规则错误
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),
}

/// 协议操作结果类型
pub type Result<T> = std::result::Result<T, ProtocolError>;
