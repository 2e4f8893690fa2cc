//! 引擎配置加载
//!
//! 配置文件是 `AiConfig` 的 JSON 形式；命令行的难度和深度参数覆盖文件内容。

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gomoku_ai::{AiConfig, Difficulty};

/// 组装引擎配置
///
/// 优先级：`depth` > 配置文件 > `difficulty` 对应的默认表。
pub fn load_config(
    path: Option<&Path>,
    difficulty: Difficulty,
    depth: Option<u8>,
) -> Result<AiConfig> {
    let mut config = match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("无法读取配置文件: {:?}", path))?;
            AiConfig::from_json(&json)
                .with_context(|| format!("配置文件格式错误: {:?}", path))?
        }
        None => AiConfig::from_difficulty(difficulty),
    };

    if let Some(depth) = depth {
        config = config.with_depth(depth);
        config.validate().context("搜索深度无效")?;
    }

    tracing::debug!("Engine config: {:?}", config);
    Ok(config)
}
