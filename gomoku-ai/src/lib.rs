//! 五子棋 AI 引擎
//!
//! 包含:
//! - 棋型评估函数
//! - 邻域候选生成与启发排序
//! - Minimax + Alpha-Beta 搜索
//! - 置换表

mod candidates;
mod engine;
mod evaluate;
mod search;
mod transposition;

pub use candidates::{MoveGenerator, NEIGHBOR_RADIUS};
pub use engine::{AiConfig, AiEngine, ConfigError, Difficulty, SearchReport};
pub use evaluate::{line_score, Evaluator, PatternScore};
pub use search::{SearchContext, SearchStats, INF, WIN_SCORE};
pub use transposition::{CacheKey, CachePolicy, EntryType, TTEntry, TTStats, TranspositionTable};
