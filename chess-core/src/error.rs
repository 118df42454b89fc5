//! 错误类型定义

use thiserror::Error;

use crate::piece::Square;

/// 走子被拒绝的原因
///
/// 全部可恢复：返回任一错误时对局状态保持不变。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 坐标越界
    #[error("Invalid square: ({row}, {col})")]
    InvalidSquare { row: u8, col: u8 },

    /// 起点没有棋子
    #[error("No piece at {square}")]
    NoPiece { square: Square },

    /// 不是该方的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 目标格是己方棋子
    #[error("Cannot capture own piece at {square}")]
    FriendlyCapture { square: Square },

    /// 不符合棋子走法规则
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    /// 对局已结束
    #[error("Game is already over")]
    GameOver,
}

/// 棋谱存档错误
#[derive(Error, Debug)]
pub enum RecordError {
    /// JSON 序列化错误
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 存档中没有任何走法
    #[error("No saved game")]
    NoSavedGame,

    /// 存档内容无法通过重放还原
    #[error("Corrupt save data at move {index}: {reason}")]
    CorruptSaveData { index: usize, reason: String },
}

/// 存档操作结果类型
pub type Result<T> = std::result::Result<T, RecordError>;
