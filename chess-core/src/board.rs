//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, SQUARE_COUNT};
use crate::piece::{Color, Piece, PieceKind, Square};

/// 底线棋子排列（a 线到 h 线）
const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 棋盘
///
/// 纯数据层：只负责摆放和移动，从不拒绝任何操作，合法性由规则层判断。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，使用 Vec 以支持 serde
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for color in [Color::White, Color::Black] {
            let home = color.home_row();
            let pawns = color.pawn_start_row();
            for (col, kind) in BACK_RANK.iter().enumerate() {
                let col = col as u8;
                board.place(Square::new_unchecked(home, col), Piece::new(*kind, color));
                board.place(
                    Square::new_unchecked(pawns, col),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }

        board
    }

    /// 获取指定格子的棋子
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.squares[square.to_index()]
        } else {
            None
        }
    }

    /// 放置棋子（覆盖原有棋子）
    pub fn place(&mut self, square: Square, piece: Piece) {
        if square.is_valid() {
            self.squares[square.to_index()] = Some(piece);
        }
    }

    /// 移除棋子，返回被移除的棋子
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.squares[square.to_index()].take()
        } else {
            None
        }
    }

    /// 移动棋子（不检查规则），返回目标格原有的棋子
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.remove(from);
        let captured = self.remove(to);
        if let Some(piece) = piece {
            self.place(to, piece);
        }
        captured
    }

    /// 查找指定阵营的王
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .into_iter()
            .find(|(_, piece)| piece.is_king())
            .map(|(square, _)| square)
    }

    /// 获取指定阵营的所有棋子
    pub fn pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// 获取所有棋子
    pub fn all_pieces(&self) -> Vec<(Square, Piece)> {
        Square::all()
            .filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
            .collect()
    }

    /// 检查两格之间（不含两端）是否全部为空
    ///
    /// 两格必须在同一直线或斜线上，否则返回 false。
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        let dr = to.row as i8 - from.row as i8;
        let dc = to.col as i8 - from.col as i8;
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return false;
        }

        let (step_r, step_c) = (dr.signum(), dc.signum());
        let mut current = from;
        while let Some(next) = current.offset(step_r, step_c) {
            if next == to {
                return true;
            }
            if self.piece_at(next).is_some() {
                return false;
            }
            current = next;
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    /// 文本棋盘：第 8 横线在上，空格用 `.` 表示
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..BOARD_SIZE as u8 {
                let c = self
                    .piece_at(Square::new_unchecked(row, col))
                    .map(|p| p.to_fen_char())
                    .unwrap_or('.');
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
