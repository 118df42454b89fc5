//! 棋谱记录与存档格式
//!
//! 存档为 JSON：`{"moveHistory": [...], "isWhiteTurn": true}`。
//! 读档时从初始局面逐步重放走法，而不是直接信任序列化的棋盘。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::SAVE_FORMAT_VERSION;
use crate::error::{RecordError, Result};
use crate::piece::{Color, Piece, PieceKind, Square};
use crate::session::GameSession;

/// 走法记录
///
/// 由走子执行器一次性生成，之后不再修改；
/// 悔棋只依赖记录本身，不需要再查看已经变化的棋盘。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
    /// 走动的棋子（升变时为原来的兵）
    pub moved_piece: Piece,
    /// 被吃的棋子
    pub captured_piece: Option<Piece>,
    /// 是否升变
    #[serde(default)]
    pub is_promotion: bool,
    /// 升变前的棋子类型（总是兵）
    #[serde(default)]
    pub pawn_original_kind: Option<PieceKind>,
    /// 是否易位
    #[serde(default)]
    pub is_castling: bool,
    /// 易位时车的起始列
    #[serde(default)]
    pub rook_from: Option<u8>,
    /// 易位时车的目标列
    #[serde(default)]
    pub rook_to: Option<u8>,
    /// 是否吃过路兵
    #[serde(default)]
    pub is_en_passant: bool,
}

impl MoveRecord {
    /// 被吃棋子原本所在的格子
    ///
    /// 吃过路兵时被吃的兵在起始行、目标列，而不是目标格。
    pub fn captured_square(&self) -> Square {
        if self.is_en_passant {
            Square::new_unchecked(self.from.row, self.to.col)
        } else {
            self.to
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    /// 这一步是否吃掉了王
    pub fn captured_king(&self) -> bool {
        self.captured_piece.is_some_and(|p| p.is_king())
    }

    /// 长代数记号，如 `e2-e4`、`Ng1-f3`、`e4xd5`、`e7-e8=Q`、`O-O`
    pub fn notation(&self) -> String {
        if self.is_castling {
            return match self.rook_from {
                Some(0) => "O-O-O".to_string(),
                _ => "O-O".to_string(),
            };
        }

        let mut s = String::new();
        if !self.moved_piece.is_pawn() {
            s.push(self.moved_piece.kind.to_fen_char(Color::White));
        }
        s.push_str(&self.from.to_string());
        s.push(if self.is_capture() { 'x' } else { '-' });
        s.push_str(&self.to.to_string());
        if self.is_promotion {
            s.push_str("=Q");
        }
        if self.is_en_passant {
            s.push_str(" e.p.");
        }
        s
    }
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.notation())
    }
}

fn default_version() -> String {
    SAVE_FORMAT_VERSION.to_string()
}

fn default_white_turn() -> bool {
    true
}

/// 存档
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    /// 格式版本号
    #[serde(default = "default_version")]
    pub version: String,
    /// 走法列表（按先后顺序）
    #[serde(default)]
    pub move_history: Vec<MoveRecord>,
    /// 是否轮到白方
    #[serde(default = "default_white_turn")]
    pub is_white_turn: bool,
    /// 保存时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SavedGame {
    /// 从对局生成存档；没有任何走法时返回 None
    pub fn from_session(session: &GameSession) -> Option<Self> {
        if session.history().is_empty() {
            debug!("No moves to save");
            return None;
        }

        Some(Self {
            version: default_version(),
            move_history: session.history().to_vec(),
            is_white_turn: session.current_turn() == Color::White,
            saved_at: Some(Utc::now()),
        })
    }

    /// 当前走子方
    pub fn turn(&self) -> Color {
        if self.is_white_turn {
            Color::White
        } else {
            Color::Black
        }
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从初始局面重放全部走法，还原对局
    ///
    /// 每一步都重新验证并执行；任一步不合法、重放结果与记录不一致，
    /// 或最终走子方与存档标记不符，都视为存档损坏。
    pub fn restore(&self) -> Result<GameSession> {
        if self.move_history.is_empty() {
            return Err(RecordError::NoSavedGame);
        }

        let mut session = GameSession::new();
        for (index, stored) in self.move_history.iter().enumerate() {
            let replayed = session.try_move(stored.from, stored.to).map_err(|e| {
                RecordError::CorruptSaveData {
                    index,
                    reason: e.to_string(),
                }
            })?;

            if replayed != *stored {
                return Err(RecordError::CorruptSaveData {
                    index,
                    reason: format!("stored move {} does not match replayed move {}", stored, replayed),
                });
            }
        }

        if session.current_turn() != self.turn() {
            return Err(RecordError::CorruptSaveData {
                index: self.move_history.len(),
                reason: format!(
                    "turn flag says {} but replay ends with {} to move",
                    self.turn(),
                    session.current_turn()
                ),
            });
        }

        info!(
            moves = self.move_history.len(),
            turn = %session.current_turn(),
            "Game restored"
        );
        Ok(session)
    }
}

/// 解析并还原存档；没有存档或存档损坏时返回 None，从不部分还原
pub fn load_session(json: &str) -> Option<GameSession> {
    match SavedGame::from_json(json).and_then(|saved| saved.restore()) {
        Ok(session) => Some(session),
        Err(RecordError::NoSavedGame) => {
            debug!("No saved game found");
            None
        }
        Err(e) => {
            warn!("Discarding saved game: {}", e);
            None
        }
    }
}
