//! 置换表
//!
//! 缓存已搜索过的局面，键为 (棋盘指纹, 剩余深度, 是否极大层)。
//! 表属于单个引擎实例，根节点执子方变化时整表清空。

use std::collections::HashMap;

use protocol::{BoardKey, Stone};
use serde::{Deserialize, Serialize};

/// 缓存策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// 记录窗口边界类型，只在边界仍能决定当前窗口时复用
    #[default]
    Bounded,
    /// 不区分边界，命中即复用（与旧版行为一致）
    Legacy,
    /// 不缓存
    Disabled,
}

/// 置换表条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// 精确值
    Exact,
    /// 下界（Beta 截断）
    LowerBound,
    /// 上界（Alpha 未被抬高）
    UpperBound,
}

impl EntryType {
    /// 按产生该分数的原始窗口分类
    #[inline]
    pub fn classify(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            EntryType::UpperBound
        } else if score >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        }
    }
}

/// 置换表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// 评估分数
    pub score: i32,
    /// 条目类型
    pub entry_type: EntryType,
}

impl TTEntry {
    /// 该条目在窗口 `(alpha, beta)` 下能否直接作为结果
    #[inline]
    pub fn usable(&self, alpha: i32, beta: i32) -> bool {
        match self.entry_type {
            EntryType::Exact => true,
            EntryType::LowerBound => self.score >= beta,
            EntryType::UpperBound => self.score <= alpha,
        }
    }
}

/// 缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub key: BoardKey,
    pub depth: u8,
    pub maximizing: bool,
}

impl CacheKey {
    pub fn new(key: BoardKey, depth: u8, maximizing: bool) -> Self {
        Self {
            key,
            depth,
            maximizing,
        }
    }
}

/// 置换表
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<CacheKey, TTEntry>,
    /// 表中分数所属的根节点执子方
    owner: Option<Stone>,
    hits: u64,
    probes: u64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为 `player` 的一次搜索做准备
    ///
    /// 分数总是以根节点执子方为正，换边后旧条目失效。
    pub fn prepare(&mut self, player: Stone) {
        if self.owner != Some(player) {
            if self.owner.is_some() {
                tracing::debug!(
                    "Root player changed to {}, dropping {} cached entries",
                    player,
                    self.entries.len()
                );
            }
            self.clear();
            self.owner = Some(player);
        }
    }

    /// 查询条目
    pub fn probe(&mut self, key: &CacheKey) -> Option<TTEntry> {
        self.probes += 1;
        let entry = self.entries.get(key).copied();
        if entry.is_some() {
            self.hits += 1;
        }
        entry
    }

    /// 存储条目（覆盖同键旧条目）
    pub fn store(&mut self, key: CacheKey, score: i32, entry_type: EntryType) {
        self.entries.insert(key, TTEntry { score, entry_type });
    }

    /// 清空表
    pub fn clear(&mut self) {
        self.entries.clear();
        self.owner = None;
        self.hits = 0;
        self.probes = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 当前表所属的执子方
    pub fn owner(&self) -> Option<Stone> {
        self.owner
    }

    /// 获取统计信息
    pub fn stats(&self) -> TTStats {
        TTStats {
            entries: self.entries.len(),
            hits: self.hits,
            probes: self.probes,
        }
    }
}

/// 置换表统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TTStats {
    pub entries: usize,
    pub hits: u64,
    pub probes: u64,
}

impl TTStats {
    pub fn hit_rate(&self) -> f64 {
        if self.probes == 0 {
            0.0
        } else {
            self.hits as f64 / self.probes as f64
        }
    }
}
