//! 调色板色条布局
//!
//! 五列等宽，余数全部加到中间一列；边框样式由“选中/锁定”组合决定

use ratatui::text::Line;

use super::components::{BoxGlyphs, DOUBLE, FLAT, HEAVY, THIN, color_span};
use super::theme::Theme;
use crate::models::{PALETTE_SIZE, PaletteSlot};

/// 列边框样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// 无边框，整列填充背景色
    None,
    Glyphs(BoxGlyphs),
}

impl Border {
    pub fn for_slot(active: bool, locked: bool) -> Self {
        match (active, locked) {
            (true, true) => Border::Glyphs(DOUBLE),
            (false, true) => Border::Glyphs(THIN),
            (true, false) => Border::Glyphs(HEAVY),
            (false, false) => Border::None,
        }
    }
}

/// 计算每列宽度：基础宽度为 width/5，余数加到中间列
pub fn column_widths(width: u16) -> [u16; PALETTE_SIZE] {
    let width = width.max(PALETTE_SIZE as u16);
    let base = width / PALETTE_SIZE as u16;
    let remainder = width % PALETTE_SIZE as u16;
    let mut widths = [base; PALETTE_SIZE];
    widths[PALETTE_SIZE / 2] += remainder;
    widths
}

/// 单列在某一行的文本
fn column_row(border: Border, width: usize, row: usize, height: usize) -> String {
    let glyphs = match border {
        Border::None => return " ".repeat(width),
        Border::Glyphs(glyphs) => glyphs,
    };
    if height == 1 {
        return format!("{FLAT}{}", " ".repeat(width.saturating_sub(1)));
    }
    let [left, fill, right] = if row == 0 {
        glyphs.top
    } else if row + 1 == height {
        glyphs.bottom
    } else {
        glyphs.middle
    };
    if width == 1 {
        return left.to_string();
    }
    format!("{left}{}{right}", fill.repeat(width - 2))
}

/// 生成色条的全部行
pub fn palette_lines(
    slots: &[PaletteSlot; PALETTE_SIZE],
    active: usize,
    width: u16,
    height: u16,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let widths = column_widths(width);
    let height = usize::from(height.max(1));
    (0..height)
        .map(|row| {
            let spans: Vec<_> = slots
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (slot, column_width))| {
                    let border = Border::for_slot(i == active, slot.locked);
                    let text = column_row(border, usize::from(column_width), row, height);
                    color_span(text, slot.color, slot.color.inverted(), theme)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
