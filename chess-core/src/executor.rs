//! 走子执行
//!
//! 只在验证通过后调用，本身不再检查合法性。

use tracing::info;

use crate::piece::{Piece, PieceKind, Square};
use crate::record::MoveRecord;
use crate::rules::castle_rook_cols;
use crate::session::GameSession;

impl GameSession {
    /// 执行走法，生成并压入走法记录，切换走子方
    ///
    /// 起点没有棋子时返回 None，棋盘不变。
    pub(crate) fn commit(&mut self, from: Square, to: Square) -> Option<MoveRecord> {
        let moved_piece = self.board.piece_at(from)?;
        let color = moved_piece.color;

        // 易位：车随王一起移动
        let castle = if moved_piece.is_king() {
            castle_rook_cols(from, to)
        } else {
            None
        };
        if let Some((rook_from, rook_to)) = castle {
            self.board.move_piece(
                Square::new_unchecked(from.row, rook_from),
                Square::new_unchecked(from.row, rook_to),
            );
        }

        let is_promotion = moved_piece.is_pawn() && to.row == color.promotion_row();
        let is_en_passant = moved_piece.is_pawn()
            && !is_promotion
            && (to.col as i8 - from.col as i8).abs() == 1
            && (to.row as i8 - from.row as i8).abs() == 1
            && self.board.piece_at(to).is_none();

        let captured_piece = if is_promotion {
            // 升变总是变后，不再走吃过路兵和普通移动的流程
            let captured = self.board.remove(to);
            self.board.remove(from);
            self.board.place(to, Piece::new(PieceKind::Queen, color));
            captured
        } else if is_en_passant {
            let captured = self.board.remove(Square::new_unchecked(from.row, to.col));
            self.board.move_piece(from, to);
            captured
        } else {
            self.board.move_piece(from, to)
        };

        let record = MoveRecord {
            from,
            to,
            moved_piece,
            captured_piece,
            is_promotion,
            pawn_original_kind: is_promotion.then_some(PieceKind::Pawn),
            is_castling: castle.is_some(),
            rook_from: castle.map(|(rook_from, _)| rook_from),
            rook_to: castle.map(|(_, rook_to)| rook_to),
            is_en_passant,
        };

        // 吃王即胜
        if let Some(king) = captured_piece.filter(|p| p.is_king()) {
            self.outcome = Some(king.color.opponent());
            info!(winner = %color, "King captured, game over");
        }

        self.history.push(record);
        self.turn = self.turn.opponent();
        Some(record)
    }
}
