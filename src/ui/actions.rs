//! 事件、按键、Action 与 Effect 定义
//!
//! - Event: 进入 dispatcher 的一切输入（按键、网络结果、尺寸变化）
//! - Action: 按键在当前模式下的语义化意图
//! - Effect: dispatcher 请求执行的异步网络操作

use crate::models::{PALETTE_SIZE, Rgb};

/// 生成请求编号，用于丢弃过期响应
pub type RequestId = u64;

/// 与终端无关的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Esc,
    CtrlC,
    Char(char),
}

/// 输入事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ModelsLoaded(Vec<String>),
    ColorsGenerated {
        request: RequestId,
        colors: [Rgb; PALETTE_SIZE],
    },
    /// `request` 为 None 表示模型列表请求失败
    NetworkFailed {
        request: Option<RequestId>,
        error: String,
    },
    Resize(u16, u16),
    KeyPressed(Key),
    Quit,
}

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // 选择模型
    ConfirmModel,

    // 浏览
    ToggleLock,
    RotateLeft,
    RotateRight,
    StartEdit,
    ChooseModel,
    Generate,

    // 编辑
    Input(char),
    DeleteChar,
    Submit,
    CancelEdit,
}

/// 异步网络请求
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ListModels,
    GenerateColors {
        request: RequestId,
        model: String,
        colors: [Rgb; PALETTE_SIZE],
        locks: [bool; PALETTE_SIZE],
    },
}
