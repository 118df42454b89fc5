//! 棋盘渲染模块
//!
//! 把棋盘画成终端文本

mod render;

pub use render::*;

use chess_core::Square;

use crate::game::ClientGame;
use crate::settings::ClientSettings;

/// 渲染选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// 使用 Unicode 棋子符号
    pub unicode_pieces: bool,
    /// 显示横线和直线坐标
    pub show_coordinates: bool,
    /// 显示选中棋子的可走位置
    pub show_move_hints: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            unicode_pieces: false,
            show_coordinates: true,
            show_move_hints: true,
        }
    }
}

impl From<&ClientSettings> for RenderOptions {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            unicode_pieces: settings.unicode_pieces,
            show_coordinates: settings.show_coordinates,
            show_move_hints: settings.show_move_hints,
        }
    }
}

/// 高亮类型
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightType {
    Selected,
    ValidMove,
    LastMove,
}

/// 计算某个格子的高亮；选中优先于可走位置，可走位置优先于最后一步
pub fn highlight_at(game: &ClientGame, square: Square, options: &RenderOptions) -> Option<HighlightType> {
    if game.selected_piece == Some(square) {
        return Some(HighlightType::Selected);
    }
    if options.show_move_hints && game.valid_moves.contains(&square) {
        return Some(HighlightType::ValidMove);
    }
    match game.last_move {
        Some((from, to)) if from == square || to == square => Some(HighlightType::LastMove),
        _ => None,
    }
}
