//! 五子棋命令行工具
//!
//! 包含:
//! - 引擎配置加载
//! - 引擎自对弈
//! - 局面分析

pub mod config;
pub mod session;

pub use config::load_config;
pub use session::{analyze_diagram, SelfPlay};
