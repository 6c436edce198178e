//! 饼图：除热量外的五项营养素占比
//!
//! 用 Canvas + Braille 点阵绘制，从 12 点方向顺时针排列

use std::f64::consts::TAU;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph,
        canvas::{Canvas, Points},
    },
};

use super::components::render_placeholder;
use crate::models::Totals;
use crate::nutrients::CALORIES_LABEL;

/// 紫红色系
const PALETTE: [Color; 5] = [
    Color::Rgb(0xfa, 0x9f, 0xb5),
    Color::Rgb(0xf7, 0x68, 0xa1),
    Color::Rgb(0xdd, 0x34, 0x97),
    Color::Rgb(0xae, 0x01, 0x7e),
    Color::Rgb(0x7a, 0x01, 0x77),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: f64,
    pub fraction: f64,
    pub start: f64, // 弧度，[start, end)
    pub end: f64,
    pub color: Color,
}

/// 计算扇区；值为 0 的项不出现，全为 0 时返回空
pub fn pie_slices(totals: &Totals) -> Vec<PieSlice> {
    let entries: Vec<(usize, &'static str, f64)> = totals
        .iter()
        .filter(|(label, _)| *label != CALORIES_LABEL)
        .enumerate()
        .filter(|(_, (_, value))| *value > 0.0)
        .map(|(i, (label, value))| (i, label, value))
        .collect();

    let sum: f64 = entries.iter().map(|(_, _, v)| v).sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    let mut start = 0.0;
    let count = entries.len();
    entries
        .into_iter()
        .enumerate()
        .map(|(n, (i, label, value))| {
            let fraction = value / sum;
            // 最后一块补齐到整圆，避免浮点缝隙
            let end = if n + 1 == count { TAU } else { start + fraction * TAU };
            let slice = PieSlice {
                label,
                value,
                fraction,
                start,
                end,
                color: PALETTE[i % PALETTE.len()],
            };
            start = end;
            slice
        })
        .collect()
}

/// 角度所在的扇区
pub fn slice_at(slices: &[PieSlice], angle: f64) -> Option<usize> {
    slices
        .iter()
        .position(|s| angle >= s.start && angle < s.end)
}

/// 点 (x, y) 相对圆心的角度：12 点方向为 0，顺时针增加
fn clockwise_angle(x: f64, y: f64) -> f64 {
    x.atan2(y).rem_euclid(TAU)
}

/// 单位圆内的采样点，按扇区分组
fn sample_points(slices: &[PieSlice], step: f64) -> Vec<Vec<(f64, f64)>> {
    let mut groups = vec![Vec::new(); slices.len()];
    let steps = (2.0 / step).ceil() as i64;
    for yi in 0..=steps {
        let y = -1.0 + yi as f64 * step;
        for xi in 0..=steps {
            let x = -1.0 + xi as f64 * step;
            if x * x + y * y > 1.0 {
                continue;
            }
            if let Some(i) = slice_at(slices, clockwise_angle(x, y)) {
                groups[i].push((x, y));
            }
        }
    }
    groups
}

pub fn render_pie_chart(frame: &mut Frame, area: Rect, totals: &Totals) {
    let title = "Macronutrient + Sugar/Fiber Breakdown";
    let slices = pie_slices(totals);
    if slices.is_empty() {
        render_placeholder(frame, area, title, "No macronutrient data");
        return;
    }

    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    // Braille 每格 2x4 点，按点阵比例保持圆形
    let dots_x = f64::from(chunks[0].width.max(1)) * 2.0;
    let dots_y = f64::from(chunks[0].height.max(1)) * 4.0;
    let ratio = dots_x / dots_y;
    let step = 2.2 / dots_y;
    let groups = sample_points(&slices, step);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.1 * ratio, 1.1 * ratio])
        .y_bounds([-1.1, 1.1])
        .paint(|ctx| {
            for (slice, coords) in slices.iter().zip(&groups) {
                ctx.draw(&Points {
                    coords,
                    color: slice.color,
                });
            }
        });
    frame.render_widget(canvas, chunks[0]);

    let legend: Vec<Line> = slices
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(s.color)),
                Span::raw(format!("{} {:.1}%", s.label, s.fraction * 100.0)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), chunks[1]);
}
