//! 视图层模块
//!
//! 纯函数：Session -> 终端帧，不修改任何状态

pub mod components;
pub mod palette;
pub mod theme;

use ratatui::{
    Frame,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::state::{EditBuffer, Mode, ModelCatalog, Session};
use crate::models::{Palette, Rgb, get_color};
use components::{accent_span, color_span};
use palette::palette_lines;
use theme::Theme;

/// 列表项前缀
const MARKER: &str = " > ";

/// 渲染 UI
pub fn render(frame: &mut Frame, session: &Session, theme: &Theme) {
    let lines = frame_lines(session, theme);
    frame.render_widget(Paragraph::new(lines), frame.area());
}

/// 当前模式下的整帧内容
pub fn frame_lines(session: &Session, theme: &Theme) -> Vec<Line<'static>> {
    match (session.mode, session.edit.as_ref()) {
        (Mode::SelectingModel, _) => selection_lines(&session.catalog, theme),
        (Mode::Editing, Some(edit)) => edit_lines(edit, theme),
        _ => palette_lines(
            &session.palette.slots,
            session.active_slot,
            session.view.width,
            session.view.height,
            theme,
        ),
    }
}

/// 模型选择列表
pub fn selection_lines(catalog: &ModelCatalog, theme: &Theme) -> Vec<Line<'static>> {
    if catalog.names.is_empty() {
        return vec![Line::from("Loading models...")];
    }
    let mut lines: Vec<Line> = catalog
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let text = format!("{MARKER}{name}");
            if i == catalog.cursor {
                Line::from(accent_span(text, theme))
            } else {
                Line::from(text)
            }
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::styled(
        "[↑/↓] select  [Enter] confirm  [q] quit",
        Style::default().fg(Color::Gray),
    ));
    lines
}

/// 编辑模式：三行通道文本，聚焦行带预览或拒绝标记
pub fn edit_lines(edit: &EditBuffer, theme: &Theme) -> Vec<Line<'static>> {
    let preview = get_color(&edit.fields).ok();
    edit.fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let text = format!("{MARKER}{field}");
            if i != edit.focused_field {
                return Line::from(text);
            }
            let marker = match preview {
                Some(color) => color_span(" ".to_string(), color, color, theme),
                None => Span::raw("x"),
            };
            Line::from(vec![accent_span(text, theme), Span::raw(" "), marker])
        })
        .collect()
}

/// 退出时的紧凑输出：色块行与文本行逐字符对齐
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub bar: Line<'static>,
    pub text: String,
}

/// 生成退出摘要，每段色块宽度等于该段文本（含分隔逗号）新增的字符数
pub fn summary(palette: &Palette, theme: &Theme) -> Summary {
    let mut text = String::new();
    let mut spans = Vec::with_capacity(palette.slots.len());
    let last = palette.slots.len() - 1;
    for (i, slot) in palette.slots.iter().enumerate() {
        let before = text.len();
        text.push_str(&slot.color.to_string());
        if i != last {
            text.push(',');
        }
        let segment = " ".repeat(text.len() - before);
        spans.push(color_span(segment, slot.color, Rgb::BLACK, theme));
    }
    Summary {
        bar: Line::from(spans),
        text,
    }
}

/// 致命错误时的输出
pub fn error_text(error: &str) -> String {
    format!("An error occurred:\n{error}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::actions::{Event, Key};
    use ratatui::{Terminal, backend::TestBackend};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_loading_placeholder() {
        let lines = selection_lines(&ModelCatalog::default(), &Theme::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "Loading models...");
    }

    #[test]
    fn test_selection_highlights_cursor() {
        let catalog = ModelCatalog {
            names: vec!["default".into(), "ui".into()],
            cursor: 1,
        };
        let theme = Theme::default();
        let lines = selection_lines(&catalog, &theme);
        assert_eq!(line_text(&lines[0]), " > default");
        assert_eq!(line_text(&lines[1]), " > ui");
        assert_eq!(lines[1].spans[0].style.fg, Some(theme.accent()));
        assert_eq!(lines[0].spans[0].style.fg, None);
    }

    #[test]
    fn test_edit_preview_and_rejection() {
        let theme = Theme::default();
        let mut edit = EditBuffer {
            fields: ["12".into(), "200".into(), "7".into()],
            focused_field: 1,
        };
        let lines = edit_lines(&edit, &theme);
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), " > 12");
        assert_eq!(line_text(&lines[1]), " > 200  ");
        assert_eq!(lines[1].spans[2].style.bg, Some(Color::Rgb(12, 200, 7)));

        edit.fields[2] = "300".into();
        let lines = edit_lines(&edit, &theme);
        assert_eq!(line_text(&lines[1]), " > 200 x");
    }

    #[test]
    fn test_summary_alignment() {
        let mut palette = Palette::new();
        let colors = [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
        ];
        palette.overwrite_colors(colors);
        let summary = summary(&palette, &Theme::default());
        assert_eq!(
            summary.text,
            "[255,0,0],[0,255,0],[0,0,255],[0,0,0],[255,255,255]"
        );
        assert_eq!(summary.bar.spans[0].content.len(), "[255,0,0],".len());
        assert_eq!(summary.bar.spans[4].content.len(), "[255,255,255]".len());
        assert_eq!(summary.bar.width(), summary.text.len());
        assert_eq!(summary.bar.spans[0].style.bg, Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn test_error_text() {
        assert_eq!(error_text("boom"), "An error occurred:\nboom\n");
    }

    #[test]
    fn test_render_browsing_frame() {
        let mut session = Session::new();
        session.update(Event::ModelsLoaded(vec!["default".into()]));
        session.update(Event::KeyPressed(Key::Enter));
        session.update(Event::Resize(10, 3));
        session.update(Event::KeyPressed(Key::Char(' ')));

        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal
            .draw(|frame| render(frame, &session, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), "╔");
        assert_eq!(buffer[(1, 0)].symbol(), "╗");
        assert_eq!(buffer[(0, 1)].symbol(), "║");
        assert_eq!(buffer[(1, 2)].symbol(), "╝");
        assert_eq!(buffer[(2, 0)].symbol(), " ");
        assert_eq!(buffer[(2, 0)].bg, Color::Rgb(0, 0, 0));
        assert_eq!(buffer[(0, 0)].fg, Color::Rgb(255, 255, 255));
    }
}
