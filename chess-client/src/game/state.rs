//! 客户端游戏状态

use chess_core::{ChessError, Color, GameSession, MoveRecord, Square};

/// 客户端游戏状态
///
/// 在规则层的 `GameSession` 之上记录界面需要的选中和高亮信息
#[derive(Debug, Clone, Default)]
pub struct ClientGame {
    /// 当前对局
    pub session: GameSession,
    /// 选中的棋子位置
    pub selected_piece: Option<Square>,
    /// 合法走法目标位置
    pub valid_moves: Vec<Square>,
    /// 最后一步走法 (from, to)
    pub last_move: Option<(Square, Square)>,
}

impl ClientGame {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有对局（例如读档）创建
    pub fn from_session(session: GameSession) -> Self {
        let last_move = session.last_move().map(|m| (m.from, m.to));
        Self {
            session,
            selected_piece: None,
            valid_moves: Vec::new(),
            last_move,
        }
    }

    /// 状态栏文字
    pub fn status_text(&self) -> String {
        match self.session.outcome() {
            Some(winner) => format!("{} won!", winner),
            None => format!("{} to move!", self.session.current_turn()),
        }
    }

    pub fn current_turn(&self) -> Color {
        self.session.current_turn()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// 选中棋子并计算可走位置；不是当前方的棋子时返回 false
    pub fn select_piece(&mut self, square: Square) -> bool {
        let owned = self
            .session
            .piece_at(square)
            .is_some_and(|p| p.color == self.session.current_turn());

        if !owned || self.session.is_game_over() {
            self.clear_selection();
            return false;
        }

        self.selected_piece = Some(square);
        self.valid_moves = self.session.legal_destinations(square);
        true
    }

    /// 清除选择
    pub fn clear_selection(&mut self) {
        self.selected_piece = None;
        self.valid_moves.clear();
    }

    /// 走子；成功时更新最后一步高亮
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveRecord, ChessError> {
        let record = self.session.try_move(from, to)?;
        self.last_move = Some((record.from, record.to));
        self.clear_selection();
        Ok(record)
    }

    /// 悔棋
    pub fn undo(&mut self) -> bool {
        if !self.session.undo() {
            return false;
        }
        self.last_move = self.session.last_move().map(|m| (m.from, m.to));
        self.clear_selection();
        true
    }

    /// 重新开始
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 按回合编号排列的棋谱，如 `1. e2-e4 e7-e5`
    pub fn history_lines(&self) -> Vec<String> {
        self.session
            .history()
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let moves: Vec<String> = pair.iter().map(MoveRecord::notation).collect();
                format!("{}. {}", i + 1, moves.join(" "))
            })
            .collect()
    }
}
