//! 业务逻辑处理 (Update/Dispatch)
//!
//! `update` 是唯一修改 Session 的入口：(Session, Event) -> (Session, Effect?)

use tracing::{debug, info, warn};

use super::actions::{Action, Effect, Event};
use super::input::get_action;
use super::state::{EditBuffer, Mode, Session};
use crate::models::{PALETTE_SIZE, get_color, wrap_move};

impl Session {
    /// 启动时的初始 Effect
    pub fn init(&self) -> Effect {
        Effect::ListModels
    }

    /// 处理一个事件，返回需要执行的 Effect
    pub fn update(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::KeyPressed(key) => {
                let action = get_action(self.mode, key)?;
                self.dispatch(action)
            }
            Event::Resize(width, height) => {
                self.view.width = width;
                self.view.height = height;
                None
            }
            Event::ModelsLoaded(names) => {
                if self.mode == Mode::SelectingModel {
                    info!(count = names.len(), "models loaded");
                    self.catalog.names = names;
                    self.catalog.cursor = 0;
                }
                None
            }
            Event::ColorsGenerated { request, colors } => {
                if self.mode == Mode::SelectingModel {
                    return None;
                }
                if request != self.generation {
                    debug!(request, latest = self.generation, "discarding stale colors");
                    return None;
                }
                self.palette.overwrite_colors(colors);
                None
            }
            Event::NetworkFailed { request, error } => {
                if let Some(request) = request
                    && request != self.generation
                {
                    debug!(request, latest = self.generation, "discarding stale failure");
                    return None;
                }
                warn!(%error, "network request failed");
                self.last_error = Some(error);
                None
            }
            Event::Quit => {
                self.quitting = true;
                None
            }
        }
    }

    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Quit => self.quitting = true,
            Action::MoveUp => self.move_vertical(false),
            Action::MoveDown => self.move_vertical(true),
            Action::MoveLeft => {
                self.active_slot = wrap_move(self.active_slot, false, PALETTE_SIZE);
            }
            Action::MoveRight => {
                self.active_slot = wrap_move(self.active_slot, true, PALETTE_SIZE);
            }

            Action::ConfirmModel => self.confirm_model(),

            Action::ToggleLock => self.palette.toggle_lock(self.active_slot),
            Action::RotateLeft => self.rotate(false),
            Action::RotateRight => self.rotate(true),
            Action::StartEdit => self.start_edit(),
            Action::ChooseModel => {
                // 保留已选模型，重新进入选择列表
                self.mode = Mode::SelectingModel;
            }
            Action::Generate => return Some(self.request_colors()),

            Action::Input(c) => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.fields[edit.focused_field].push(c);
                }
            }
            Action::DeleteChar => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.fields[edit.focused_field].pop();
                }
            }
            Action::Submit => self.submit_edit(),
            Action::CancelEdit => {
                self.edit = None;
                self.mode = Mode::Browsing;
            }
        }
        None
    }

    // ============ 导航相关 ============

    fn move_vertical(&mut self, forward: bool) {
        match self.mode {
            Mode::SelectingModel => {
                let catalog = &mut self.catalog;
                catalog.cursor = wrap_move(catalog.cursor, forward, catalog.names.len());
            }
            Mode::Editing => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.focused_field = wrap_move(edit.focused_field, forward, 3);
                }
            }
            Mode::Browsing => {}
        }
    }

    /// 确认模型选择
    fn confirm_model(&mut self) {
        let Some(name) = self.catalog.selected() else {
            return;
        };
        self.selected_model = name.to_string();
        self.mode = Mode::Browsing;
        info!(model = %self.selected_model, "model selected");
    }

    // ============ 浏览相关 ============

    /// 与左右相邻槽位交换颜色，选中位置不变
    fn rotate(&mut self, forward: bool) {
        let neighbor = wrap_move(self.active_slot, forward, PALETTE_SIZE);
        self.palette.swap_colors(self.active_slot, neighbor);
    }

    fn request_colors(&mut self) -> Effect {
        self.generation += 1;
        debug!(request = self.generation, model = %self.selected_model, "requesting colors");
        Effect::GenerateColors {
            request: self.generation,
            model: self.selected_model.clone(),
            colors: self.palette.colors(),
            locks: self.palette.locks(),
        }
    }

    // ============ 编辑相关 ============

    /// 开始编辑当前槽位
    fn start_edit(&mut self) {
        self.edit = Some(EditBuffer {
            fields: self.active().color.channel_strings(),
            focused_field: 0,
        });
        self.mode = Mode::Editing;
    }

    /// 提交编辑；无效输入时保持原样
    fn submit_edit(&mut self) {
        let Some(edit) = self.edit.as_ref() else {
            return;
        };
        match get_color(&edit.fields) {
            Ok(color) => {
                self.palette.slots[self.active_slot].color = color;
                self.edit = None;
                self.mode = Mode::Browsing;
            }
            Err(err) => debug!(%err, "rejected edit"),
        }
    }
}
