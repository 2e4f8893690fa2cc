//! AI 引擎
//!
//! 对外的唯一入口：给定棋盘和执子方，返回推荐落子。

use std::time::{Duration, Instant};

use protocol::{find_winner, Board, GameState, Position, Stone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::candidates::MoveGenerator;
use crate::evaluate::Evaluator;
use crate::search::{SearchContext, SearchStats, INF};
use crate::transposition::{CachePolicy, TTStats, TranspositionTable};

// 重导出 Difficulty 以便外部使用
pub use protocol::Difficulty;

/// 提示功能使用的最大深度
const HINT_DEPTH: u8 = 3;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Search depth must be at least 1")]
    InvalidDepth,

    #[error("Candidate limit must be at least 1")]
    InvalidCandidateLimit,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// 搜索深度（层）
    pub max_depth: u8,
    /// 每层候选数上限
    pub candidate_limit: usize,
    #[serde(default)]
    pub cache_policy: CachePolicy,
    /// 单次搜索时间上限，`None` 不限
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
    /// 单次搜索节点上限，`None` 不限
    #[serde(default)]
    pub node_limit: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let (max_depth, candidate_limit) = match difficulty {
            Difficulty::Easy => (2, 10),
            Difficulty::Medium => (4, 20),
            Difficulty::Hard => (6, 30),
        };
        Self {
            difficulty,
            max_depth,
            candidate_limit,
            cache_policy: CachePolicy::default(),
            time_limit_ms: None,
            node_limit: None,
        }
    }

    /// 从 JSON 解析并校验
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidDepth);
        }
        if self.candidate_limit == 0 {
            return Err(ConfigError::InvalidCandidateLimit);
        }
        Ok(())
    }

    pub fn with_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn with_time_limit(mut self, time_limit_ms: Option<u64>) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    pub fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.node_limit = node_limit;
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 一次根搜索的结果
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    /// 推荐落子，棋局已结束时为 `None`
    pub best: Option<Position>,
    /// 推荐落子的分数（AI 视角）
    pub score: i32,
    /// 已完成搜索的根候选及其分数，按搜索顺序
    pub scores: Vec<(Position, i32)>,
    pub stats: SearchStats,
    /// 是否因时间或节点上限提前结束
    pub aborted: bool,
    pub elapsed_ms: u64,
}

impl SearchReport {
    fn immediate(best: Option<Position>) -> Self {
        Self {
            best,
            score: 0,
            scores: Vec::new(),
            stats: SearchStats::default(),
            aborted: false,
            elapsed_ms: 0,
        }
    }
}

/// AI 引擎
///
/// 每个引擎实例独占自己的置换表，可以整体移交给其他线程。
pub struct AiEngine {
    config: AiConfig,
    table: TranspositionTable,
    stats: SearchStats,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            table: TranspositionTable::new(),
            stats: SearchStats::default(),
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    /// 搜索最佳落子
    ///
    /// 空棋盘直接返回天元；棋盘已满或已有五连时返回 `None`。
    /// 不会修改传入的棋盘。
    pub fn best_move(&mut self, board: &Board, player: Stone) -> Option<Position> {
        self.analyze(board, player).best
    }

    /// 为对局当前走子方搜索
    pub fn best_move_for(&mut self, state: &GameState) -> Option<Position> {
        if state.is_finished() {
            return None;
        }
        self.best_move(state.board(), state.current_turn())
    }

    /// 提示：用较浅的深度给出建议落子
    pub fn hint(&mut self, board: &Board, player: Stone) -> Option<Position> {
        let depth = self.config.max_depth.min(HINT_DEPTH);
        self.search_root(board, player, depth).best
    }

    /// 搜索并返回完整报告
    pub fn analyze(&mut self, board: &Board, player: Stone) -> SearchReport {
        self.search_root(board, player, self.config.max_depth)
    }

    fn search_root(&mut self, board: &Board, player: Stone, depth: u8) -> SearchReport {
        if board.is_board_empty() {
            return SearchReport::immediate(Some(Position::center()));
        }
        if board.is_full() || find_winner(board).is_some() {
            return SearchReport::immediate(None);
        }

        let started = Instant::now();
        self.table.prepare(player);

        let mut work = board.clone();
        let limit = self.config.candidate_limit;
        let candidates = MoveGenerator::candidates(&mut work, player, limit);
        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| started + Duration::from_millis(ms));

        let mut ctx = SearchContext::new(player, limit, self.config.cache_policy, &mut self.table)
            .with_deadline(deadline)
            .with_node_limit(self.config.node_limit);

        let child_depth = depth.max(1) - 1;
        let mut best: Option<(Position, i32)> = None;
        let mut scores = Vec::with_capacity(candidates.len());

        for &pos in &candidates {
            let score = match work.trial(pos, player) {
                Ok(mut trial) => {
                    ctx.alpha_beta(&mut trial, Some((pos, player)), child_depth, -INF, INF, false)
                }
                Err(_) => continue,
            };
            if ctx.aborted() {
                break;
            }

            scores.push((pos, score));
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        let aborted = ctx.aborted();
        let stats = *ctx.stats();
        self.stats = stats;

        if aborted {
            tracing::warn!(
                "Search limit reached after {} nodes, {}/{} root moves completed",
                stats.nodes,
                scores.len(),
                candidates.len()
            );
        }

        let (best, score) = match best {
            Some((pos, score)) => (Some(pos), score),
            None => (
                candidates.first().copied(),
                Evaluator::evaluate(board, player),
            ),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(
            "Search depth {}: {} nodes, {}/{} cache hits, {} cutoffs, {} ms",
            depth,
            stats.nodes,
            stats.cache_hits,
            stats.cache_probes,
            stats.cutoffs,
            elapsed_ms
        );
        if let Some(pos) = best {
            tracing::info!("{} plays {} (score {})", player, pos, score);
        }

        SearchReport {
            best,
            score,
            scores,
            stats,
            aborted,
            elapsed_ms,
        }
    }

    /// 清空置换表
    pub fn clear_cache(&mut self) {
        self.table.clear();
    }

    /// 获取最近一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.stats.nodes
    }

    /// 最近一次搜索的统计
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// 置换表统计
    pub fn cache_stats(&self) -> TTStats {
        self.table.stats()
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}
