//! 悔棋
//!
//! 只撤销最后一步，完全依据走法记录还原，不重新推导棋盘。

use tracing::debug;

use crate::piece::{Piece, PieceKind, Square};
use crate::session::GameSession;

impl GameSession {
    /// 撤销最后一步；没有历史时返回 false 且不做任何修改
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            debug!("Nothing to undo");
            return false;
        };

        // 车回到易位前的位置
        if record.is_castling {
            if let (Some(rook_from), Some(rook_to)) = (record.rook_from, record.rook_to) {
                self.board.move_piece(
                    Square::new_unchecked(record.from.row, rook_to),
                    Square::new_unchecked(record.from.row, rook_from),
                );
            }
        }

        self.board.remove(record.to);
        if record.is_promotion {
            // 升变的后被换回兵
            let kind = record.pawn_original_kind.unwrap_or(PieceKind::Pawn);
            self.board
                .place(record.from, Piece::new(kind, record.moved_piece.color));
        } else {
            self.board.place(record.from, record.moved_piece);
        }

        if let Some(captured) = record.captured_piece {
            self.board.place(record.captured_square(), captured);
        }

        if record.captured_king() {
            self.outcome = None;
        }

        self.turn = self.turn.opponent();
        debug!(notation = %record, turn = %self.turn, "Move undone");
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::piece::{Color, Piece, PieceKind, Square};
    use crate::session::GameSession;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Black)
    }

    #[test]
    fn test_undo_empty_history() {
        let mut session = GameSession::new();
        let before = session.clone();
        assert!(!session.undo());
        assert_eq!(session, before);
    }

    #[test]
    fn test_commit_then_undo_round_trip() {
        let mut session = GameSession::new();
        let openings = [
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
            ("f3", "e5"),
            ("c6", "e5"),
        ];

        for (from, to) in openings {
            let board = session.board().clone();
            let turn = session.current_turn();

            session.try_move(sq(from), sq(to)).unwrap();
            assert!(session.undo());
            assert_eq!(session.board(), &board);
            assert_eq!(session.current_turn(), turn);

            // 重新走一遍以继续下一步
            session.try_move(sq(from), sq(to)).unwrap();
        }
    }

    #[test]
    fn test_undo_restores_capture() {
        let mut session = GameSession::new();
        session.try_move(sq("e2"), sq("e4")).unwrap();
        session.try_move(sq("d7"), sq("d5")).unwrap();
        session.try_move(sq("e4"), sq("d5")).unwrap();

        assert!(session.undo());
        assert_eq!(session.piece_at(sq("d5")), Some(black(PieceKind::Pawn)));
        assert_eq!(session.piece_at(sq("e4")), Some(white(PieceKind::Pawn)));
        assert_eq!(session.current_turn(), Color::White);
    }

    #[test]
    fn test_undo_en_passant_restores_passed_pawn() {
        let mut session = GameSession::new();
        for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("f7", "f5")] {
            session.try_move(sq(from), sq(to)).unwrap();
        }
        let before = session.board().clone();

        session.try_move(sq("e5"), sq("f6")).unwrap();
        assert_eq!(session.piece_at(sq("f5")), None);

        assert!(session.undo());
        assert_eq!(session.piece_at(sq("f5")), Some(black(PieceKind::Pawn)));
        assert_eq!(session.piece_at(sq("f6")), None);
        assert_eq!(session.piece_at(sq("e5")), Some(white(PieceKind::Pawn)));
        assert_eq!(session.board(), &before);

        // 撤销后仍可再次吃过路兵
        assert!(session.is_legal(sq("e5"), sq("f6")));
    }

    #[test]
    fn test_undo_castle_restores_king_and_rook() {
        let mut board = Board::empty();
        board.place(Square::new_unchecked(7, 4), white(PieceKind::King));
        board.place(Square::new_unchecked(7, 7), white(PieceKind::Rook));
        let mut session = GameSession::from_board(board.clone(), Color::White);

        session
            .try_move(Square::new_unchecked(7, 4), Square::new_unchecked(7, 6))
            .unwrap();
        assert_eq!(
            session.piece_at(Square::new_unchecked(7, 5)),
            Some(white(PieceKind::Rook))
        );

        assert!(session.undo());
        assert_eq!(
            session.piece_at(Square::new_unchecked(7, 4)),
            Some(white(PieceKind::King))
        );
        assert_eq!(
            session.piece_at(Square::new_unchecked(7, 7)),
            Some(white(PieceKind::Rook))
        );
        assert_eq!(session.board(), &board);
        assert_eq!(session.current_turn(), Color::White);
    }

    #[test]
    fn test_undo_promotion_restores_pawn() {
        let mut board = Board::empty();
        board.place(sq("a7"), white(PieceKind::Pawn));
        board.place(sq("b8"), black(PieceKind::Knight));
        let mut session = GameSession::from_board(board.clone(), Color::White);

        session.try_move(sq("a7"), sq("b8")).unwrap();
        assert_eq!(session.piece_at(sq("b8")), Some(white(PieceKind::Queen)));

        assert!(session.undo());
        assert_eq!(session.piece_at(sq("a7")), Some(white(PieceKind::Pawn)));
        assert_eq!(session.piece_at(sq("b8")), Some(black(PieceKind::Knight)));
        assert_eq!(session.board(), &board);
    }

    #[test]
    fn test_undo_clears_outcome() {
        let mut board = Board::empty();
        board.place(sq("d1"), white(PieceKind::Queen));
        board.place(sq("d8"), black(PieceKind::King));
        let mut session = GameSession::from_board(board, Color::White);

        session.try_move(sq("d1"), sq("d8")).unwrap();
        assert_eq!(session.outcome(), Some(Color::White));

        assert!(session.undo());
        assert_eq!(session.outcome(), None);
        assert_eq!(session.piece_at(sq("d8")), Some(black(PieceKind::King)));
        assert!(session.is_legal(sq("d1"), sq("d8")));
    }

    #[test]
    fn test_castle_rejected_after_king_moved_and_returned() {
        let mut board = Board::empty();
        board.place(sq("e1"), white(PieceKind::King));
        board.place(sq("h1"), white(PieceKind::Rook));
        board.place(sq("e8"), black(PieceKind::King));
        let mut session = GameSession::from_board(board, Color::White);

        for (from, to) in [("e1", "e2"), ("e8", "d8"), ("e2", "e1"), ("d8", "e8")] {
            session.try_move(sq(from), sq(to)).unwrap();
        }
        // 王已回到原位，但历史中出现过从 e1 出发的走法
        assert!(!session.is_legal(sq("e1"), sq("g1")));

        // 悔棋到最初，易位重新合法
        while session.undo() {}
        assert!(session.is_legal(sq("e1"), sq("g1")));
    }

    #[test]
    fn test_multiple_undos_are_stack_ordered() {
        let mut session = GameSession::new();
        let initial = session.clone();
        for (from, to) in [("d2", "d4"), ("d7", "d5"), ("c1", "f4")] {
            session.try_move(sq(from), sq(to)).unwrap();
        }

        assert!(session.undo());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.piece_at(sq("c1")), Some(white(PieceKind::Bishop)));
        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.undo());
        assert_eq!(session, initial);
    }
}
