//! 输入处理
//!
//! 把一行文本解析成命令。坐标使用代数记号（`e2`），走法可以写成
//! `e2 e4`、`e2e4`、`e2-e4` 或 `move e2 e4`。

use chess_core::Square;
use thiserror::Error;

/// 玩家命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 移动棋子
    Move { from: Square, to: Square },
    /// 查看某个棋子的可走位置
    Hints(Square),
    /// 悔棋
    Undo,
    /// 查看棋谱
    History,
    /// 重新显示棋盘
    Board,
    /// 立即保存
    Save,
    /// 开始新对局
    New,
    /// 帮助
    Help,
    /// 退出
    Quit,
}

/// 输入解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Missing argument for `{0}`")]
    MissingArgument(&'static str),
}

/// 帮助文本
pub const HELP_TEXT: &str = "\
Commands:
  e2 e4 | e2e4 | e2-e4   move a piece
  show e2                list legal destinations of a piece
  undo                   take back the last move
  history                print the move list
  board                  redraw the board
  save                   save the game now
  new                    start a new game
  help                   show this text
  quit                   leave (autosaves when enabled)";

/// 解析一行输入
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let line = line.trim().to_ascii_lowercase();
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let Some((&head, rest)) = tokens.split_first() else {
        return Err(InputError::Empty);
    };

    match head {
        "undo" | "u" => Ok(Command::Undo),
        "history" | "h" => Ok(Command::History),
        "board" | "b" => Ok(Command::Board),
        "save" => Ok(Command::Save),
        "new" => Ok(Command::New),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "show" | "moves" => {
            let arg = rest.first().ok_or(InputError::MissingArgument("show"))?;
            Ok(Command::Hints(parse_square(arg)?))
        }
        "move" | "m" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("move"));
            }
            parse_move(rest)
        }
        _ => parse_move(&tokens),
    }
}

/// 解析走法：两个坐标，或一个连写的四字符/五字符记号
fn parse_move(tokens: &[&str]) -> Result<Command, InputError> {
    match tokens {
        [from, to] => Ok(Command::Move {
            from: parse_square(from)?,
            to: parse_square(to)?,
        }),
        [joined] => {
            let compact: String = joined.chars().filter(|c| *c != '-').collect();
            if compact.len() != 4 || !compact.is_ascii() {
                return Err(InputError::UnknownCommand(joined.to_string()));
            }
            let (from, to) = compact.split_at(2);
            Ok(Command::Move {
                from: parse_square(from)?,
                to: parse_square(to)?,
            })
        }
        _ => Err(InputError::UnknownCommand(tokens.join(" "))),
    }
}

fn parse_square(s: &str) -> Result<Square, InputError> {
    Square::from_algebraic(s).ok_or_else(|| InputError::InvalidSquare(s.to_string()))
}
