use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gomoku_ai::{AiEngine, Difficulty};
use gomoku_cli::{analyze_diagram, load_config, SelfPlay};
use protocol::{Diagram, Stone};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "gomoku", version, about = "五子棋 AI 引擎命令行工具")]
struct Cli {
    /// 难度（决定搜索深度和候选数）
    #[arg(short, long, value_enum, default_value_t = DifficultyArg::Medium, global = true)]
    difficulty: DifficultyArg,

    /// 覆盖搜索深度
    #[arg(long, global = true)]
    depth: Option<u8>,

    /// JSON 配置文件（AiConfig）
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 两个引擎从空棋盘开始对弈
    Selfplay {
        /// 最多下多少手
        #[arg(long, default_value_t = 225)]
        moves: usize,
        /// 对局结束后保存 JSON 快照
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },
    /// 分析棋盘图，给出推荐落子
    Analyze {
        /// 棋盘图（行用 `/` 或换行分隔），`-` 从标准输入读取
        diagram: String,
        /// 执子方
        #[arg(short, long, value_enum, default_value_t = PlayerArg::Black)]
        player: PlayerArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerArg {
    Black,
    White,
}

impl From<PlayerArg> for Stone {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::Black => Stone::Black,
            PlayerArg::White => Stone::White,
        }
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gomoku_ai=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.difficulty.into(), cli.depth)?;
    info!(
        "难度 {}，深度 {}，候选 {}",
        config.difficulty.display_name(),
        config.max_depth,
        config.candidate_limit
    );

    match cli.cmd {
        Command::Selfplay { moves, save } => {
            let mut session = SelfPlay::new(config);
            let game = session.run(moves, |game| {
                if let Some(mv) = game.last_move() {
                    println!("{}", mv);
                }
                println!("{}\n", game.board());
            })?;

            match game.result() {
                Some(result) => println!("结果: {:?}，共 {} 手", result, game.move_count()),
                None => println!("达到手数上限，共 {} 手", game.move_count()),
            }

            if let Some(path) = save {
                let json = game.snapshot().to_json()?;
                fs::write(&path, json).with_context(|| format!("无法写入快照: {:?}", path))?;
                info!("快照已保存到 {:?}", path);
            }
        }
        Command::Analyze { diagram, player } => {
            let diagram = if diagram == "-" {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("无法读取标准输入")?;
                input
            } else {
                diagram
            };

            let mut engine = AiEngine::new(config);
            let player = Stone::from(player);
            let (board, report) = analyze_diagram(&diagram, player, &mut engine)?;

            println!("{}\n", Diagram::render(&board));
            match report.best {
                Some(pos) => println!("{} 推荐落子: {} (分数 {})", player, pos, report.score),
                None => println!("棋局已结束，没有可下的位置"),
            }
            println!(
                "节点 {}，缓存命中 {}/{}，剪枝 {}，用时 {} ms{}",
                report.stats.nodes,
                report.stats.cache_hits,
                report.stats.cache_probes,
                report.stats.cutoffs,
                report.elapsed_ms,
                if report.aborted { "（已截断）" } else { "" }
            );
        }
    }

    Ok(())
}
