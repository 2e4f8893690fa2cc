//! 协议常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 15;

/// 棋盘格子总数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 获胜所需连子数（长连同样获胜）
pub const WIN_LENGTH: usize = 5;

/// 四个无向连线方向：横、竖、主对角线、副对角线
pub const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 棋盘指纹所需的 u64 字数（每格 2 bit）
pub const KEY_WORDS: usize = (CELL_COUNT * 2 + 63) / 64;
