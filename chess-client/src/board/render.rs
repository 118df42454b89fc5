//! 文本棋盘绘制
//!
//! 每个格子占三个字符：
//! - ` p ` 普通格子（空格为 `.`）
//! - `[p]` 选中的棋子
//! - ` * ` / `<p>` 可走的空格 / 可吃的棋子
//! - `(p)` 最后一步的起点和终点

use chess_core::{Piece, Square, BOARD_SIZE};

use super::{highlight_at, HighlightType, RenderOptions};
use crate::game::ClientGame;

/// 棋子字符
pub fn piece_glyph(piece: Piece, options: &RenderOptions) -> char {
    if options.unicode_pieces {
        piece.display_char()
    } else {
        piece.to_fen_char()
    }
}

/// 绘制单个格子
fn render_cell(piece: Option<Piece>, highlight: Option<HighlightType>, options: &RenderOptions) -> String {
    let glyph = piece.map(|p| piece_glyph(p, options));

    match (highlight, glyph) {
        (Some(HighlightType::Selected), Some(c)) => format!("[{}]", c),
        (Some(HighlightType::ValidMove), Some(c)) => format!("<{}>", c),
        (Some(HighlightType::ValidMove), None) => " * ".to_string(),
        (Some(HighlightType::LastMove), Some(c)) => format!("({})", c),
        (Some(HighlightType::LastMove), None) => "( )".to_string(),
        (_, Some(c)) => format!(" {} ", c),
        (_, None) => " . ".to_string(),
    }
}

/// 绘制整个棋盘，第 8 横线在上
pub fn render_board(game: &ClientGame, options: &RenderOptions) -> String {
    let board = game.session.board();
    let mut out = String::new();

    for row in 0..BOARD_SIZE as u8 {
        if options.show_coordinates {
            out.push_str(&format!("{} ", 8 - row));
        }
        for col in 0..BOARD_SIZE as u8 {
            let square = Square::new_unchecked(row, col);
            let highlight = highlight_at(game, square, options);
            out.push_str(&render_cell(board.piece_at(square), highlight, options));
        }
        out.push('\n');
    }

    if options.show_coordinates {
        out.push_str("  ");
        for col in 0..BOARD_SIZE as u8 {
            out.push_str(&format!(" {} ", Square::new_unchecked(0, col).file_char()));
        }
        out.push('\n');
    }

    out
}
