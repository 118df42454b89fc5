//! 同屏双人国际象棋终端客户端
//!
//! 两名玩家在同一终端轮流输入走法，规则由 `chess-core` 负责

pub mod app;
pub mod board;
pub mod game;
pub mod settings;
pub mod storage;

pub use app::{App, Flow};
