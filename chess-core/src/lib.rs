//! 同屏双人国际象棋规则库
//!
//! 包含:
//! - 棋子、棋盘、坐标等核心数据结构
//! - 走法规则验证（含吃过路兵、易位）
//! - 走子执行（升变、吃王判胜）与悔棋
//! - 存档格式 (JSON) 与基于重放的读档
//!
//! 不做将军检测：吃掉对方的王即获胜。

mod board;
mod constants;
mod error;
mod executor;
mod piece;
mod record;
mod rules;
mod session;
mod undo;

pub use board::Board;
pub use constants::*;
pub use error::{ChessError, RecordError, Result};
pub use piece::{Color, Piece, PieceKind, Square};
pub use record::{load_session, MoveRecord, SavedGame};
pub use rules::MoveValidator;
pub use session::GameSession;
