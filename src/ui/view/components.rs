//! 通用 UI 组件
//!
//! 边框字形集合、着色单元格等

use ratatui::{style::Style, text::Span};

use super::theme::Theme;
use crate::models::Rgb;

/// 一种边框的三行字形：上、中、下，每行为 (左, 填充, 右)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGlyphs {
    pub top: [&'static str; 3],
    pub middle: [&'static str; 3],
    pub bottom: [&'static str; 3],
}

/// 选中且锁定
pub const DOUBLE: BoxGlyphs = BoxGlyphs {
    top: ["╔", "═", "╗"],
    middle: ["║", " ", "║"],
    bottom: ["╚", "═", "╝"],
};

/// 仅锁定
pub const THIN: BoxGlyphs = BoxGlyphs {
    top: ["┌", "─", "┐"],
    middle: ["│", " ", "│"],
    bottom: ["└", "─", "┘"],
};

/// 仅选中
pub const HEAVY: BoxGlyphs = BoxGlyphs {
    top: ["┏", "━", "┓"],
    middle: ["┃", " ", "┃"],
    bottom: ["┗", "━", "┛"],
};

/// 高度为 1 时退化成的竖线
pub const FLAT: &str = "│";

/// [组件] 背景为 `background`、前景为 `foreground` 的文本片段
pub fn color_span(text: String, background: Rgb, foreground: Rgb, theme: &Theme) -> Span<'static> {
    Span::styled(
        text,
        Style::default()
            .bg(theme.color(background))
            .fg(theme.color(foreground)),
    )
}

/// [组件] 强调色文本
pub fn accent_span(text: String, theme: &Theme) -> Span<'static> {
    Span::styled(text, Style::default().fg(theme.accent()))
}
