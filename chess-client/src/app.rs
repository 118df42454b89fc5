//! 终端对局循环
//!
//! 读取一行命令、修改对局、输出棋盘和状态，直到退出或输入结束

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::board::{render_board, RenderOptions};
use crate::game::{parse_command, ClientGame, Command, InputError, HELP_TEXT};
use crate::settings::ClientSettings;
use crate::storage::StorageManager;

/// 命令执行后的流程
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 客户端应用
pub struct App {
    game: ClientGame,
    settings: ClientSettings,
    /// 存储不可用时为 None，此时不保存
    storage: Option<StorageManager>,
}

impl App {
    pub fn new(settings: ClientSettings, storage: Option<StorageManager>) -> Self {
        Self {
            game: ClientGame::new(),
            settings,
            storage,
        }
    }

    pub fn game(&self) -> &ClientGame {
        &self.game
    }

    /// 读取存档继续对局；没有可用存档时返回 false
    pub fn resume(&mut self) -> bool {
        let Some(session) = self.storage.as_ref().and_then(StorageManager::load_game) else {
            return false;
        };
        self.game = ClientGame::from_session(session);
        true
    }

    /// 主循环
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        self.print_board(&mut out)?;

        let mut lines = input.lines();
        loop {
            write!(out, "> ").context("写入输出失败")?;
            out.flush().context("写入输出失败")?;

            let Some(line) = lines.next() else {
                // 输入结束视同退出
                writeln!(out)?;
                self.on_quit(&mut out)?;
                break;
            };
            let line = line.context("读取输入失败")?;

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(InputError::Empty) => continue,
                Err(e) => {
                    writeln!(out, "{} (type `help` for commands)", e)?;
                    continue;
                }
            };

            if self.handle(command, &mut out)? == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// 执行一条命令
    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        debug!(?command, "Handling command");

        match command {
            Command::Move { from, to } => match self.game.apply_move(from, to) {
                Ok(record) => {
                    writeln!(out, "{}", record)?;
                    self.print_board(out)?;
                }
                Err(e) => writeln!(out, "{}", e)?,
            },
            Command::Hints(square) => {
                if self.game.select_piece(square) {
                    let targets: Vec<String> =
                        self.game.valid_moves.iter().map(|s| s.to_string()).collect();
                    self.print_board(out)?;
                    if targets.is_empty() {
                        writeln!(out, "No legal moves from {}", square)?;
                    } else {
                        writeln!(out, "{}: {}", square, targets.join(" "))?;
                    }
                } else {
                    writeln!(out, "No {} piece at {}", self.game.current_turn(), square)?;
                }
            }
            Command::Undo => {
                if self.game.undo() {
                    self.print_board(out)?;
                } else {
                    writeln!(out, "Nothing to undo")?;
                }
            }
            Command::History => {
                let lines = self.game.history_lines();
                if lines.is_empty() {
                    writeln!(out, "No moves yet")?;
                }
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            }
            Command::Board => {
                self.game.clear_selection();
                self.print_board(out)?;
            }
            Command::Save => match self.save() {
                Ok(true) => writeln!(out, "Game saved")?,
                Ok(false) => writeln!(out, "Nothing to save")?,
                Err(e) => {
                    warn!("保存失败: {:#}", e);
                    writeln!(out, "Save failed: {:#}", e)?;
                }
            },
            Command::New => {
                self.game.reset();
                if let Some(storage) = &self.storage {
                    if let Err(e) = storage.clear_saved_game() {
                        warn!("删除存档失败: {:#}", e);
                    }
                }
                info!("开始新对局");
                self.print_board(out)?;
            }
            Command::Help => writeln!(out, "{}", HELP_TEXT)?,
            Command::Quit => {
                self.on_quit(out)?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    fn on_quit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if !self.settings.autosave {
            return Ok(());
        }
        match self.save() {
            Ok(true) => writeln!(out, "Game saved")?,
            Ok(false) => {}
            Err(e) => {
                warn!("自动保存失败: {:#}", e);
                writeln!(out, "Autosave failed: {:#}", e)?;
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<bool> {
        let storage = self.storage.as_ref().context("存储不可用")?;
        storage.save_game(&self.game.session)
    }

    fn print_board<W: Write>(&self, out: &mut W) -> Result<()> {
        let options = RenderOptions::from(&self.settings);
        write!(out, "{}", render_board(&self.game, &options))?;
        writeln!(out, "{}", self.game.status_text())?;
        Ok(())
    }
}
