//! 自对弈与局面分析

use anyhow::{Context, Result};
use gomoku_ai::{AiConfig, AiEngine, SearchReport};
use protocol::{Board, Diagram, GameState, Stone};

/// 两个引擎之间的对局
pub struct SelfPlay {
    black: AiEngine,
    white: AiEngine,
}

impl SelfPlay {
    /// 双方使用相同配置
    pub fn new(config: AiConfig) -> Self {
        Self {
            black: AiEngine::new(config.clone()),
            white: AiEngine::new(config),
        }
    }

    /// 从空棋盘开始下，最多 `max_moves` 手
    pub fn run(&mut self, max_moves: usize, on_move: impl FnMut(&GameState)) -> Result<GameState> {
        self.run_from(GameState::new(), max_moves, on_move)
    }

    /// 从给定对局继续下，最多再下 `max_moves` 手
    pub fn run_from(
        &mut self,
        mut game: GameState,
        max_moves: usize,
        mut on_move: impl FnMut(&GameState),
    ) -> Result<GameState> {
        let mut played = 0;
        while !game.is_finished() && played < max_moves {
            let engine = match game.current_turn() {
                Stone::Black => &mut self.black,
                Stone::White => &mut self.white,
            };
            let pos = engine
                .best_move_for(&game)
                .context("引擎没有给出落子")?;
            game.make_move(pos)
                .with_context(|| format!("引擎落子不合法: {}", pos))?;
            played += 1;
            on_move(&game);
        }

        if let Some(result) = game.result() {
            tracing::info!("Self-play finished after {} moves: {:?}", game.move_count(), result);
        }
        Ok(game)
    }
}

/// 解析棋盘图并为 `player` 搜索
///
/// 棋盘已满或已有五连时报告中的 `best` 为 `None`。
pub fn analyze_diagram(
    diagram: &str,
    player: Stone,
    engine: &mut AiEngine,
) -> Result<(Board, SearchReport)> {
    let board = Diagram::parse(diagram).context("棋盘图解析失败")?;
    let report = engine.analyze(&board, player);
    Ok((board, report))
}
