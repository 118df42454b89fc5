//! 本地棋局存储
//!
//! 单个存档位：退出时保存当前对局，启动时可选择继续

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::{load_session, GameSession, SavedGame};
use chrono::{DateTime, Utc};

use crate::settings::APP_DIR_NAME;

/// 存档文件名
const SAVE_FILE_NAME: &str = "saved_game.json";

/// 存储管理器
pub struct StorageManager {
    saves_dir: PathBuf,
}

impl StorageManager {
    /// 使用系统数据目录创建存储管理器
    pub fn new() -> Result<Self> {
        Self::with_dir(get_saves_directory()?)
    }

    /// 使用指定目录创建存储管理器
    pub fn with_dir(saves_dir: impl Into<PathBuf>) -> Result<Self> {
        let saves_dir = saves_dir.into();

        // 确保目录存在
        if !saves_dir.exists() {
            fs::create_dir_all(&saves_dir)
                .with_context(|| format!("无法创建存储目录: {:?}", saves_dir))?;
        }

        Ok(Self { saves_dir })
    }

    /// 保存对局；没有走法时不写文件并返回 false
    pub fn save_game(&self, session: &GameSession) -> Result<bool> {
        let Some(saved) = SavedGame::from_session(session) else {
            tracing::debug!("没有走法，跳过保存");
            return Ok(false);
        };

        let json_content = saved.to_json().context("序列化棋谱失败")?;
        let filepath = self.save_path();
        fs::write(&filepath, json_content)
            .with_context(|| format!("写入文件失败: {:?}", filepath))?;

        tracing::info!(
            "棋局已保存: {} 步, 轮到{}",
            saved.move_history.len(),
            saved.turn()
        );
        Ok(true)
    }

    /// 是否存在可继续的存档
    pub fn has_saved_game(&self) -> bool {
        self.read_saved_game()
            .is_some_and(|saved| !saved.move_history.is_empty())
    }

    /// 加载存档并重放；不存在或已损坏时返回 None
    pub fn load_game(&self) -> Option<GameSession> {
        let filepath = self.save_path();
        let content = match fs::read_to_string(&filepath) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("无法读取存档 {:?}: {}", filepath, e);
                return None;
            }
        };

        let session = load_session(&content)?;
        tracing::info!("棋局已加载: {} 步", session.history().len());
        Some(session)
    }

    /// 存档摘要
    pub fn saved_game_info(&self) -> Option<SavedGameInfo> {
        let saved = self.read_saved_game()?;
        if saved.move_history.is_empty() {
            return None;
        }

        let saved_at = saved.saved_at.unwrap_or_else(|| {
            // 使用文件修改时间作为后备
            fs::metadata(self.save_path())
                .and_then(|m| m.modified())
                .map(DateTime::from)
                .unwrap_or_else(|_| Utc::now())
        });

        Some(SavedGameInfo {
            saved_at,
            move_count: saved.move_history.len(),
            is_white_turn: saved.is_white_turn,
        })
    }

    /// 删除存档
    pub fn clear_saved_game(&self) -> Result<()> {
        let filepath = self.save_path();

        if filepath.exists() {
            fs::remove_file(&filepath).with_context(|| format!("删除文件失败: {:?}", filepath))?;
            tracing::info!("存档已删除");
        }

        Ok(())
    }

    /// 获取存储目录路径
    pub fn saves_directory(&self) -> &Path {
        &self.saves_dir
    }

    /// 存档文件完整路径
    pub fn save_path(&self) -> PathBuf {
        self.saves_dir.join(SAVE_FILE_NAME)
    }

    fn read_saved_game(&self) -> Option<SavedGame> {
        let content = fs::read_to_string(self.save_path()).ok()?;
        match SavedGame::from_json(&content) {
            Ok(saved) => Some(saved),
            Err(e) => {
                tracing::warn!("存档格式无效: {}", e);
                None
            }
        }
    }
}

/// 存档摘要信息
#[derive(Debug, Clone)]
pub struct SavedGameInfo {
    /// 保存时间
    pub saved_at: DateTime<Utc>,
    /// 走法数量
    pub move_count: usize,
    /// 是否轮到白方
    pub is_white_turn: bool,
}

impl SavedGameInfo {
    /// 格式化保存时间
    pub fn formatted_time(&self) -> String {
        self.saved_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// 获取跨平台存储目录
fn get_saves_directory() -> Result<PathBuf> {
    let app_data_dir = dirs::data_dir().context("无法获取应用数据目录")?;

    Ok(app_data_dir.join(APP_DIR_NAME).join("saves"))
}
