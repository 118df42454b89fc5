//! 对局状态

use tracing::debug;

use crate::board::Board;
use crate::error::ChessError;
use crate::piece::{Color, Piece, Square};
use crate::record::MoveRecord;
use crate::rules::MoveValidator;

/// 一局棋的全部状态
///
/// 棋盘和走法历史只归对局所有；修改只能通过 [`GameSession::try_move`]
/// （验证后执行）和 [`GameSession::undo`]（撤销最后一步）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// 棋盘
    pub(crate) board: Board,
    /// 走法历史（栈）
    pub(crate) history: Vec<MoveRecord>,
    /// 当前走子方
    pub(crate) turn: Color,
    /// 胜方（吃掉对方王后设置）
    pub(crate) outcome: Option<Color>,
}

impl GameSession {
    /// 创建新对局：标准初始局面，白方先走
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::White)
    }

    /// 从任意棋盘创建对局（历史为空）
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            history: Vec::new(),
            turn,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// 最后一步走法
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    /// 胜方
    pub fn outcome(&self) -> Option<Color> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// 获取指定格子的棋子
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// 以当前走子方验证走法
    pub fn validate(&self, from: Square, to: Square) -> Result<(), ChessError> {
        if self.is_game_over() {
            return Err(ChessError::GameOver);
        }
        MoveValidator::validate(&self.board, &self.history, from, to, self.turn)
    }

    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        self.validate(from, to).is_ok()
    }

    /// 当前走子方某个棋子的全部合法目标格
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        match self.piece_at(from) {
            Some(piece) if piece.color == self.turn && !self.is_game_over() => {
                MoveValidator::legal_destinations(&self.board, &self.history, from)
            }
            _ => Vec::new(),
        }
    }

    /// 尝试走子：验证通过后执行，并返回生成的走法记录
    ///
    /// 验证失败时对局状态不变。
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, ChessError> {
        if let Err(e) = self.validate(from, to) {
            debug!(%from, %to, "Move rejected: {}", e);
            return Err(e);
        }

        let record = self
            .commit(from, to)
            .ok_or(ChessError::NoPiece { square: from })?;
        debug!(
            notation = %record,
            turn = %self.turn,
            "Move committed"
        );
        Ok(record)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
