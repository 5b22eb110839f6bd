//! 键盘事件映射 (Input -> Action)
//!
//! 终端按键先转换为 Key，再根据当前模式转换为 Action

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::actions::{Action, Key};
use super::state::Mode;

/// 将 crossterm 按键事件转换为 Key，只处理按下事件
pub fn key_from_event(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let key = match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Key::CtrlC,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };
    Some(key)
}

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: Mode, key: Key) -> Option<Action> {
    // 所有模式下的退出键
    if matches!(key, Key::CtrlC | Key::Esc | Key::Char('q')) {
        return Some(Action::Quit);
    }
    match mode {
        Mode::SelectingModel => match key {
            Key::Up | Key::Char('w') => Some(Action::MoveUp),
            Key::Down | Key::Char('s') => Some(Action::MoveDown),
            Key::Enter => Some(Action::ConfirmModel),
            _ => None,
        },
        Mode::Browsing => match key {
            Key::Left | Key::Char('a') => Some(Action::MoveLeft),
            Key::Right | Key::Char('d') => Some(Action::MoveRight),
            Key::Enter | Key::Char(' ') => Some(Action::ToggleLock),
            Key::Char('<' | ',') => Some(Action::RotateLeft),
            Key::Char('>' | '.') => Some(Action::RotateRight),
            Key::Char('e') => Some(Action::StartEdit),
            Key::Char('m') => Some(Action::ChooseModel),
            Key::Char('r') => Some(Action::Generate),
            _ => None,
        },
        Mode::Editing => match key {
            Key::Up | Key::Char('w') => Some(Action::MoveUp),
            Key::Down | Key::Char('s') => Some(Action::MoveDown),
            Key::Char(c) if c.is_ascii_digit() => Some(Action::Input(c)),
            Key::Backspace => Some(Action::DeleteChar),
            Key::Enter => Some(Action::Submit),
            Key::Char('e') => Some(Action::CancelEdit),
            _ => None,
        },
    }
}
