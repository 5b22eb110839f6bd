//! Session 状态定义 (Model)
//!
//! 所有可变数据集中在 Session 中，只允许通过 dispatcher 修改

use crate::models::{Palette, PaletteSlot};

use super::actions::RequestId;

/// 交互模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SelectingModel,
    Browsing,
    Editing,
}

/// 模型列表，启动请求返回前为空
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCatalog {
    pub names: Vec<String>,
    pub cursor: usize,
}

impl ModelCatalog {
    pub fn selected(&self) -> Option<&str> {
        self.names.get(self.cursor).map(String::as_str)
    }
}

/// 编辑缓冲区，仅在 Editing 模式下存在
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBuffer {
    pub fields: [String; 3],
    pub focused_field: usize,
}

/// 终端尺寸，仅供渲染使用
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub width: u16,
    pub height: u16,
}

/// 应用状态
#[derive(Debug, Clone)]
pub struct Session {
    pub palette: Palette,
    pub active_slot: usize,
    pub mode: Mode,
    pub catalog: ModelCatalog,
    pub edit: Option<EditBuffer>,
    pub view: ViewState,
    pub selected_model: String,
    pub last_error: Option<String>,
    pub quitting: bool,
    /// 最近一次生成请求的编号
    pub generation: RequestId,
}

impl Session {
    /// 创建新的会话
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
            active_slot: 0,
            mode: Mode::SelectingModel,
            catalog: ModelCatalog::default(),
            edit: None,
            view: ViewState::default(),
            selected_model: String::new(),
            last_error: None,
            quitting: false,
            generation: 0,
        }
    }

    /// 当前选中的槽位
    pub fn active(&self) -> &PaletteSlot {
        &self.palette.slots[self.active_slot]
    }

    /// 事件循环是否应当结束
    pub fn is_finished(&self) -> bool {
        self.quitting || self.last_error.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
