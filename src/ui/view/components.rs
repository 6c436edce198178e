//! 通用 UI 组件
//!
//! 弹窗、输入框等通用组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthChar;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的单行输入框，聚焦时显示光标
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    is_focused: bool,
    active_color: Color,
) {
    let style = if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);

    // 留一列给光标
    let max_width = inner.width.saturating_sub(1);
    let (tail, tail_width) = visible_tail(value, max_width);

    let input = if value.is_empty() {
        Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(tail).style(style)
    };
    frame.render_widget(input.block(block), area);

    if is_focused {
        frame.set_cursor_position((inner.x + tail_width, inner.y));
    }
}

/// 超出宽度时只保留末尾，按显示宽度计算（CJK/emoji 占两列）
///
/// 返回可见部分及其显示宽度
pub fn visible_tail(value: &str, max_width: u16) -> (&str, u16) {
    let mut width: u16 = 0;
    let mut start = value.len();
    for (i, c) in value.char_indices().rev() {
        let w = c.width().unwrap_or(0) as u16;
        if width + w > max_width {
            break;
        }
        width += w;
        start = i;
    }
    (&value[start..], width)
}

/// [组件] 居中的灰色提示
pub fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let widget = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .centered()
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}
