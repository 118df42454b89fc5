//! 游戏逻辑模块
//!
//! 命令解析和客户端对局状态

mod input;
mod state;

pub use input::*;
pub use state::*;
