//! 搜索
//!
//! Minimax + Alpha-Beta 剪枝（fail-soft）+ 置换表。
//! 分数始终以 AI 执子方为正：极大层是 AI 落子，极小层是对手落子。

use std::time::Instant;

use protocol::{check_win, Board, Position, Stone};

use crate::candidates::MoveGenerator;
use crate::evaluate::Evaluator;
use crate::transposition::{CacheKey, CachePolicy, EntryType, TranspositionTable};

/// 五连得分
pub const WIN_SCORE: i32 = 1_000_000;

/// 窗口上限（下限取其相反数）
pub const INF: i32 = i32::MAX;

/// 每隔多少个节点检查一次时间
const TIME_CHECK_INTERVAL: u64 = 1024;

/// 搜索统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// 访问的节点数
    pub nodes: u64,
    /// 置换表查询次数
    pub cache_probes: u64,
    /// 置换表命中并直接返回的次数
    pub cache_hits: u64,
    /// Alpha-Beta 截断次数
    pub cutoffs: u64,
}

impl SearchStats {
    /// 累加另一次搜索的统计
    pub fn merge(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.cache_probes += other.cache_probes;
        self.cache_hits += other.cache_hits;
        self.cutoffs += other.cutoffs;
    }
}

/// 搜索上下文
///
/// 持有一次根搜索期间不变的参数，以及节点计数和中止标志。
pub struct SearchContext<'t> {
    ai_player: Stone,
    opponent: Stone,
    candidate_limit: usize,
    policy: CachePolicy,
    table: &'t mut TranspositionTable,
    deadline: Option<Instant>,
    /// 下一次检查时间的节点数
    next_time_check: u64,
    node_limit: Option<u64>,
    aborted: bool,
    stats: SearchStats,
}

impl<'t> SearchContext<'t> {
    pub fn new(
        ai_player: Stone,
        candidate_limit: usize,
        policy: CachePolicy,
        table: &'t mut TranspositionTable,
    ) -> Self {
        Self {
            ai_player,
            opponent: ai_player.opponent(),
            candidate_limit,
            policy,
            table,
            deadline: None,
            next_time_check: TIME_CHECK_INTERVAL,
            node_limit: None,
            aborted: false,
            stats: SearchStats::default(),
        }
    }

    /// 设置截止时间
    pub fn with_deadline(mut self, deadline: Option<Instant>) -> Self {
        self.deadline = deadline;
        self
    }

    /// 设置节点上限
    pub fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// 是否因时间或节点上限而中止
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Alpha-Beta 搜索
    ///
    /// `last` 是父节点刚落下的棋子，只有它可能构成五连。
    /// 返回的分数在窗口外时为对应方向的界（fail-soft）。
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        last: Option<(Position, Stone)>,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.stats.nodes += 1;

        let key = CacheKey::new(board.fingerprint(), depth, maximizing);
        if let Some(score) = self.probe(&key, alpha, beta) {
            return score;
        }

        if let Some((pos, stone)) = last {
            if check_win(board, pos, stone) {
                return if stone == self.ai_player {
                    WIN_SCORE
                } else {
                    -WIN_SCORE
                };
            }
        }

        if self.limit_reached() {
            return Evaluator::evaluate(board, self.ai_player);
        }

        if depth == 0 || board.is_full() {
            let score = Evaluator::evaluate(board, self.ai_player);
            self.store(key, score, EntryType::Exact);
            return score;
        }

        let (original_alpha, original_beta) = (alpha, beta);
        let mover = if maximizing {
            self.ai_player
        } else {
            self.opponent
        };
        let moves = MoveGenerator::candidates(board, mover, self.candidate_limit);

        let mut best = if maximizing { -INF } else { INF };
        for pos in moves {
            let score = match board.trial(pos, mover) {
                Ok(mut trial) => {
                    self.alpha_beta(&mut trial, Some((pos, mover)), depth - 1, alpha, beta, !maximizing)
                }
                Err(_) => continue,
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.aborted {
                break;
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if !self.aborted {
            let entry_type = EntryType::classify(best, original_alpha, original_beta);
            self.store(key, best, entry_type);
        }
        best
    }

    fn probe(&mut self, key: &CacheKey, alpha: i32, beta: i32) -> Option<i32> {
        if self.policy == CachePolicy::Disabled {
            return None;
        }
        self.stats.cache_probes += 1;

        let entry = self.table.probe(key)?;
        let usable = match self.policy {
            CachePolicy::Bounded => entry.usable(alpha, beta),
            _ => true,
        };
        if usable {
            self.stats.cache_hits += 1;
            Some(entry.score)
        } else {
            None
        }
    }

    fn store(&mut self, key: CacheKey, score: i32, entry_type: EntryType) {
        match self.policy {
            CachePolicy::Bounded => self.table.store(key, score, entry_type),
            CachePolicy::Legacy => self.table.store(key, score, EntryType::Exact),
            CachePolicy::Disabled => {}
        }
    }

    fn limit_reached(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if let Some(limit) = self.node_limit {
            if self.stats.nodes > limit {
                self.aborted = true;
            }
        }
        if let Some(deadline) = self.deadline {
            // 命中缓存的节点不经过这里，按阈值而不是整除判断
            if self.stats.nodes >= self.next_time_check {
                self.next_time_check = self.stats.nodes + TIME_CHECK_INTERVAL;
                if Instant::now() >= deadline {
                    self.aborted = true;
                }
            }
        }
        self.aborted
    }
}
