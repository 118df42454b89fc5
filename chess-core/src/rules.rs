//! 走法合法性验证
//!
//! 只判断单步走法是否符合棋子规则，不做将军检测：
//! 本规则以吃掉对方王作为胜负条件。

use crate::board::Board;
use crate::constants::{
    KINGSIDE_KING_COL, KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TARGET_COL, KING_HOME_COL,
    QUEENSIDE_KING_COL, QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_TARGET_COL,
};
use crate::error::ChessError;
use crate::piece::{Color, Piece, PieceKind, Square};
use crate::record::MoveRecord;

/// 走法验证器
pub struct MoveValidator;

impl MoveValidator {
    /// 检查走法是否合法（任何异常输入都返回 false）
    pub fn is_legal(
        board: &Board,
        history: &[MoveRecord],
        from: Square,
        to: Square,
        color: Color,
    ) -> bool {
        Self::validate(board, history, from, to, color).is_ok()
    }

    /// 验证走法，不合法时返回拒绝原因
    pub fn validate(
        board: &Board,
        history: &[MoveRecord],
        from: Square,
        to: Square,
        color: Color,
    ) -> Result<(), ChessError> {
        for square in [from, to] {
            if !square.is_valid() {
                return Err(ChessError::InvalidSquare {
                    row: square.row,
                    col: square.col,
                });
            }
        }

        let piece = board
            .piece_at(from)
            .ok_or(ChessError::NoPiece { square: from })?;
        if piece.color != color {
            return Err(ChessError::NotYourTurn);
        }

        // 不能吃己方棋子
        if let Some(target) = board.piece_at(to) {
            if target.color == color {
                return Err(ChessError::FriendlyCapture { square: to });
            }
        }

        let legal = match piece.kind {
            PieceKind::Pawn => Self::is_valid_pawn_move(board, history, from, to, color),
            PieceKind::Rook => Self::is_valid_rook_move(board, from, to),
            PieceKind::Knight => Self::is_valid_knight_move(from, to),
            PieceKind::Bishop => Self::is_valid_bishop_move(board, from, to),
            PieceKind::Queen => Self::is_valid_queen_move(board, from, to),
            PieceKind::King => Self::is_valid_king_move(board, history, from, to, color),
        };

        if legal {
            Ok(())
        } else {
            Err(ChessError::IllegalMove { from, to })
        }
    }

    /// 列出起点棋子所有合法的目标格（用于提示可走位置）
    pub fn legal_destinations(board: &Board, history: &[MoveRecord], from: Square) -> Vec<Square> {
        let Some(piece) = board.piece_at(from) else {
            return Vec::new();
        };

        Square::all()
            .filter(|&to| Self::is_legal(board, history, from, to, piece.color))
            .collect()
    }

    /// 兵：前进一格；初始行可前进两格；斜前方一格只能吃子或吃过路兵
    fn is_valid_pawn_move(
        board: &Board,
        history: &[MoveRecord],
        from: Square,
        to: Square,
        color: Color,
    ) -> bool {
        let direction = color.pawn_direction();
        let (dr, dc) = delta(from, to);
        let target = board.piece_at(to);

        if dc.abs() == 1 {
            if dr != direction {
                return false;
            }
            return target.is_some() || Self::is_en_passant(history, from, to, color);
        }

        // 直走不能吃子
        if dc != 0 || target.is_some() {
            return false;
        }

        if dr == direction {
            return true;
        }

        if dr == 2 * direction && from.row == color.pawn_start_row() {
            return from
                .offset(direction, 0)
                .is_some_and(|middle| board.piece_at(middle).is_none());
        }

        false
    }

    /// 吃过路兵：上一步必须是对方兵从初始行前进两格，且停在我方兵旁边
    fn is_en_passant(history: &[MoveRecord], from: Square, to: Square, color: Color) -> bool {
        let Some(last) = history.last() else {
            return false;
        };

        let moved = last.moved_piece;
        if !moved.is_pawn() || moved.color != color.opponent() {
            return false;
        }

        let advanced = (last.to.row as i8 - last.from.row as i8).abs();
        if last.from.row != moved.color.pawn_start_row() || advanced != 2 {
            return false;
        }

        if from.row != last.to.row || (from.col as i8 - last.to.col as i8).abs() != 1 {
            return false;
        }

        // 目标格是对方兵身后的那一格
        last.to.offset(color.pawn_direction(), 0) == Some(to)
    }

    fn is_valid_rook_move(board: &Board, from: Square, to: Square) -> bool {
        let (dr, dc) = delta(from, to);
        if (dr == 0) == (dc == 0) {
            return false;
        }
        board.is_path_clear(from, to)
    }

    fn is_valid_knight_move(from: Square, to: Square) -> bool {
        let (dr, dc) = delta(from, to);
        matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
    }

    fn is_valid_bishop_move(board: &Board, from: Square, to: Square) -> bool {
        let (dr, dc) = delta(from, to);
        if dr == 0 || dr.abs() != dc.abs() {
            return false;
        }
        board.is_path_clear(from, to)
    }

    fn is_valid_queen_move(board: &Board, from: Square, to: Square) -> bool {
        Self::is_valid_rook_move(board, from, to) || Self::is_valid_bishop_move(board, from, to)
    }

    /// 王：任意方向一格，或易位
    fn is_valid_king_move(
        board: &Board,
        history: &[MoveRecord],
        from: Square,
        to: Square,
        color: Color,
    ) -> bool {
        if castle_rook_cols(from, to).is_some() {
            return Self::is_valid_castle(board, history, from, to, color);
        }

        let (dr, dc) = delta(from, to);
        dr.abs() <= 1 && dc.abs() <= 1 && (dr != 0 || dc != 0)
    }

    /// 易位条件：王和车都在原位且从未走动，中间格子全空（不检查是否被攻击）
    fn is_valid_castle(
        board: &Board,
        history: &[MoveRecord],
        from: Square,
        to: Square,
        color: Color,
    ) -> bool {
        if from != Square::new_unchecked(color.home_row(), KING_HOME_COL) {
            return false;
        }

        let Some((rook_col, _)) = castle_rook_cols(from, to) else {
            return false;
        };
        let rook_square = Square::new_unchecked(from.row, rook_col);
        if board.piece_at(rook_square) != Some(Piece::new(PieceKind::Rook, color)) {
            return false;
        }

        if has_moved(history, from) || has_moved(history, rook_square) {
            return false;
        }

        board.is_path_clear(from, rook_square)
    }
}

/// 行列增量 (dr, dc)
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row as i8 - from.row as i8,
        to.col as i8 - from.col as i8,
    )
}

/// 若走法形如易位（王从 e 线横走到 g 或 c 线），返回车的 (起始列, 目标列)
pub(crate) fn castle_rook_cols(from: Square, to: Square) -> Option<(u8, u8)> {
    if from.row != to.row || from.col != KING_HOME_COL {
        return None;
    }
    match to.col {
        KINGSIDE_KING_COL => Some((KINGSIDE_ROOK_COL, KINGSIDE_ROOK_TARGET_COL)),
        QUEENSIDE_KING_COL => Some((QUEENSIDE_ROOK_COL, QUEENSIDE_ROOK_TARGET_COL)),
        _ => None,
    }
}

/// 历史中是否有从该格出发的走法（即该格的原始棋子已经动过）
fn has_moved(history: &[MoveRecord], square: Square) -> bool {
    history.iter().any(|record| record.from == square)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new_unchecked(row, col)
    }

    fn board_with(pieces: &[(Square, Piece)]) -> Board {
        let mut board = Board::empty();
        for (square, piece) in pieces {
            board.place(*square, *piece);
        }
        board
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Black)
    }

    /// 构造一条普通的历史记录
    fn plain_record(from: Square, to: Square, moved_piece: Piece) -> MoveRecord {
        MoveRecord {
            from,
            to,
            moved_piece,
            captured_piece: None,
            is_promotion: false,
            pawn_original_kind: None,
            is_castling: false,
            rook_from: None,
            rook_to: None,
            is_en_passant: false,
        }
    }

    #[test]
    fn test_rejects_out_of_range_and_empty() {
        let board = Board::initial();
        assert_eq!(
            MoveValidator::validate(&board, &[], sq(8, 0), sq(5, 0), Color::White),
            Err(ChessError::InvalidSquare { row: 8, col: 0 })
        );
        assert_eq!(
            MoveValidator::validate(&board, &[], sq(4, 4), sq(3, 4), Color::White),
            Err(ChessError::NoPiece { square: sq(4, 4) })
        );
        assert_eq!(
            MoveValidator::validate(&board, &[], sq(1, 4), sq(2, 4), Color::White),
            Err(ChessError::NotYourTurn)
        );
        assert_eq!(
            MoveValidator::validate(&board, &[], sq(7, 0), sq(6, 0), Color::White),
            Err(ChessError::FriendlyCapture { square: sq(6, 0) })
        );
    }

    #[test]
    fn test_pawn_advances() {
        let board = Board::initial();
        assert!(MoveValidator::is_legal(&board, &[], sq(6, 4), sq(5, 4), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(6, 4), sq(4, 4), Color::White));
        assert!(!MoveValidator::is_legal(&board, &[], sq(6, 4), sq(3, 4), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(1, 3), sq(3, 3), Color::Black));
        // 不能后退或横走
        assert!(!MoveValidator::is_legal(&board, &[], sq(6, 4), sq(7, 4), Color::White));
        assert!(!MoveValidator::is_legal(&board, &[], sq(1, 3), sq(1, 4), Color::Black));
    }

    #[test]
    fn test_pawn_double_step_only_from_start_rank() {
        let board = board_with(&[(sq(5, 4), white(PieceKind::Pawn))]);
        assert!(!MoveValidator::is_legal(&board, &[], sq(5, 4), sq(3, 4), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(5, 4), sq(4, 4), Color::White));

        let board = board_with(&[(sq(2, 2), black(PieceKind::Pawn))]);
        assert!(!MoveValidator::is_legal(&board, &[], sq(2, 2), sq(4, 2), Color::Black));
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        let board = board_with(&[
            (sq(6, 4), white(PieceKind::Pawn)),
            (sq(5, 4), black(PieceKind::Knight)),
        ]);
        assert!(!MoveValidator::is_legal(&board, &[], sq(6, 4), sq(4, 4), Color::White));

        let board = board_with(&[
            (sq(6, 4), white(PieceKind::Pawn)),
            (sq(4, 4), black(PieceKind::Knight)),
        ]);
        assert!(!MoveValidator::is_legal(&board, &[], sq(6, 4), sq(4, 4), Color::White));
    }

    #[test]
    fn test_pawn_captures() {
        let board = board_with(&[
            (sq(4, 4), white(PieceKind::Pawn)),
            (sq(3, 3), black(PieceKind::Pawn)),
            (sq(3, 4), black(PieceKind::Rook)),
        ]);
        assert!(MoveValidator::is_legal(&board, &[], sq(4, 4), sq(3, 3), Color::White));
        // 不能直吃
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(3, 4), Color::White));
        // 斜走空格且不满足吃过路兵
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(3, 5), Color::White));
        // 斜后方不行
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(5, 3), Color::White));
    }

    #[test]
    fn test_en_passant_eligibility() {
        let board = board_with(&[
            (sq(3, 4), white(PieceKind::Pawn)),
            (sq(3, 3), black(PieceKind::Pawn)),
        ]);
        let history = [plain_record(sq(1, 3), sq(3, 3), black(PieceKind::Pawn))];
        assert!(MoveValidator::is_legal(&board, &history, sq(3, 4), sq(2, 3), Color::White));
        // 目标必须是对方兵身后
        assert!(!MoveValidator::is_legal(&board, &history, sq(3, 4), sq(2, 5), Color::White));

        // 上一步只走了一格
        let history = [plain_record(sq(2, 3), sq(3, 3), black(PieceKind::Pawn))];
        assert!(!MoveValidator::is_legal(&board, &history, sq(3, 4), sq(2, 3), Color::White));

        // 上一步不是兵
        let history = [plain_record(sq(1, 3), sq(3, 3), black(PieceKind::Rook))];
        assert!(!MoveValidator::is_legal(&board, &history, sq(3, 4), sq(2, 3), Color::White));

        // 没有历史
        assert!(!MoveValidator::is_legal(&board, &[], sq(3, 4), sq(2, 3), Color::White));
    }

    #[test]
    fn test_en_passant_must_be_adjacent() {
        let board = board_with(&[
            (sq(3, 5), white(PieceKind::Pawn)),
            (sq(3, 3), black(PieceKind::Pawn)),
        ]);
        let history = [plain_record(sq(1, 3), sq(3, 3), black(PieceKind::Pawn))];
        assert!(!MoveValidator::is_legal(&board, &history, sq(3, 5), sq(2, 4), Color::White));
    }

    #[test]
    fn test_rook_moves() {
        let board = board_with(&[
            (sq(4, 4), white(PieceKind::Rook)),
            (sq(4, 6), black(PieceKind::Pawn)),
        ]);
        assert!(MoveValidator::is_legal(&board, &[], sq(4, 4), sq(0, 4), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(4, 4), sq(4, 6), Color::White));
        // 被挡住
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(4, 7), Color::White));
        // 斜走
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(5, 5), Color::White));
    }

    #[test]
    fn test_knight_moves() {
        let board = Board::initial();
        assert!(MoveValidator::is_legal(&board, &[], sq(7, 6), sq(5, 5), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(7, 6), sq(5, 7), Color::White));
        assert!(!MoveValidator::is_legal(&board, &[], sq(7, 6), sq(5, 6), Color::White));
        // 目标是己方兵
        assert!(!MoveValidator::is_legal(&board, &[], sq(7, 6), sq(6, 4), Color::White));
    }

    #[test]
    fn test_bishop_and_queen_moves() {
        let board = board_with(&[
            (sq(4, 4), white(PieceKind::Bishop)),
            (sq(4, 0), white(PieceKind::Queen)),
            (sq(2, 2), black(PieceKind::Pawn)),
        ]);
        assert!(MoveValidator::is_legal(&board, &[], sq(4, 4), sq(7, 7), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(4, 4), sq(2, 2), Color::White));
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(1, 1), Color::White));
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(4, 5), Color::White));

        assert!(MoveValidator::is_legal(&board, &[], sq(4, 0), sq(0, 0), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(4, 0), sq(2, 2), Color::White));
        assert!(MoveValidator::is_legal(&board, &[], sq(4, 0), sq(4, 3), Color::White));
        // 越过己方象
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 0), sq(4, 6), Color::White));
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 0), sq(2, 1), Color::White));
    }

    #[test]
    fn test_king_single_steps() {
        let board = board_with(&[(sq(4, 4), white(PieceKind::King))]);
        let destinations = MoveValidator::legal_destinations(&board, &[], sq(4, 4));
        assert_eq!(destinations.len(), 8);
        assert!(!MoveValidator::is_legal(&board, &[], sq(4, 4), sq(4, 6), Color::White));
    }

    #[test]
    fn test_castle_eligibility() {
        let board = board_with(&[
            (sq(7, 4), white(PieceKind::King)),
            (sq(7, 7), white(PieceKind::Rook)),
            (sq(7, 0), white(PieceKind::Rook)),
            (sq(7, 1), white(PieceKind::Knight)),
        ]);
        assert!(MoveValidator::is_legal(&board, &[], sq(7, 4), sq(7, 6), Color::White));
        // 后翼被马挡住
        assert!(!MoveValidator::is_legal(&board, &[], sq(7, 4), sq(7, 2), Color::White));
    }

    #[test]
    fn test_castle_requires_matching_rook() {
        let board = board_with(&[
            (sq(7, 4), white(PieceKind::King)),
            (sq(7, 7), black(PieceKind::Rook)),
        ]);
        assert!(!MoveValidator::is_legal(&board, &[], sq(7, 4), sq(7, 6), Color::White));

        let board = board_with(&[
            (sq(7, 4), white(PieceKind::King)),
            (sq(7, 7), white(PieceKind::Queen)),
        ]);
        assert!(!MoveValidator::is_legal(&board, &[], sq(7, 4), sq(7, 6), Color::White));
    }

    #[test]
    fn test_castle_rejected_after_rook_returned() {
        let board = board_with(&[
            (sq(0, 4), black(PieceKind::King)),
            (sq(0, 0), black(PieceKind::Rook)),
        ]);
        let history = [
            plain_record(sq(0, 0), sq(1, 0), black(PieceKind::Rook)),
            plain_record(sq(1, 0), sq(0, 0), black(PieceKind::Rook)),
        ];
        assert!(MoveValidator::is_legal(&board, &[], sq(0, 4), sq(0, 2), Color::Black));
        assert!(!MoveValidator::is_legal(&board, &history, sq(0, 4), sq(0, 2), Color::Black));
    }

    #[test]
    fn test_castle_rejected_off_home_square() {
        // 白王在黑方底线不能易位
        let board = board_with(&[
            (sq(0, 4), white(PieceKind::King)),
            (sq(0, 7), white(PieceKind::Rook)),
        ]);
        assert!(!MoveValidator::is_legal(&board, &[], sq(0, 4), sq(0, 6), Color::White));
    }

    #[test]
    fn test_legal_destinations_initial() {
        let board = Board::initial();
        let mut pawn = MoveValidator::legal_destinations(&board, &[], sq(6, 4));
        pawn.sort_by_key(|s| s.to_index());
        assert_eq!(pawn, vec![sq(4, 4), sq(5, 4)]);

        assert!(MoveValidator::legal_destinations(&board, &[], sq(7, 0)).is_empty());
        assert!(MoveValidator::legal_destinations(&board, &[], sq(4, 4)).is_empty());
    }
}
