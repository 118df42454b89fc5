//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 王的初始列（e 线）
pub const KING_HOME_COL: u8 = 4;

/// 王翼易位后王所在列（g 线）
pub const KINGSIDE_KING_COL: u8 = 6;

/// 后翼易位后王所在列（c 线）
pub const QUEENSIDE_KING_COL: u8 = 2;

/// 王翼车的初始列（h 线）
pub const KINGSIDE_ROOK_COL: u8 = 7;

/// 后翼车的初始列（a 线）
pub const QUEENSIDE_ROOK_COL: u8 = 0;

/// 王翼易位后车所在列（f 线）
pub const KINGSIDE_ROOK_TARGET_COL: u8 = 5;

/// 后翼易位后车所在列（d 线）
pub const QUEENSIDE_ROOK_TARGET_COL: u8 = 3;

/// 存档格式版本
pub const SAVE_FORMAT_VERSION: &str = "1.0";
