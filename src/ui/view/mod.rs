//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod chart;
pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use super::state::{App, AppMode, MessageLevel};
use crate::models::Analysis;
use crate::report::format_amount;
use chart::render_pie_chart;
use components::{render_dialog_framework, render_input_widget, render_placeholder};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Length(3), // 输入
            Constraint::Min(12),   // 结果
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    render_input_widget(
        frame,
        chunks[1],
        "Enter food items (comma-separated)",
        &app.input_buffer,
        "e.g., apple, bread, paneer",
        app.mode == AppMode::Editing,
        Color::Yellow,
    );

    match &app.analysis {
        Some(analysis) => render_analysis(frame, app, analysis, chunks[2]),
        None => render_placeholder(
            frame,
            chunks[2],
            "Nutritional Summary",
            "Type some foods and press Enter to analyze",
        ),
    }

    render_help(frame, app, chunks[3]);

    if app.mode == AppMode::Fetching {
        render_fetching_dialog(frame);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🥗 NutriTrack: Smart Nutrition Explorer")
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_analysis(frame: &mut Frame, app: &App, analysis: &Analysis, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(8)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(6)])
        .split(columns[1]);

    render_results(frame, app, analysis, left[0]);
    render_details(frame, app, left[1]);
    render_totals(frame, analysis, right[0]);
    render_pie_chart(frame, right[1], &analysis.totals);
}

fn render_results(frame: &mut Frame, app: &App, analysis: &Analysis, area: Rect) {
    let items: Vec<ListItem> = analysis
        .results
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == app.selected_index && app.mode == AppMode::Browsing {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Green)
            };
            ListItem::new(Line::from(vec![Span::styled(
                format!("✔ {}", record.description),
                style,
            )]))
        })
        .collect();

    let title = format!(
        "Nutritional Summary ({})",
        analysis.analyzed_at.format("%H:%M:%S")
    );
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_record() {
        Some(record) if record.field_count() > 0 => record
            .fields()
            .map(|(label, value)| format!("{label}: {}", format_amount(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        Some(_) => "(no tracked nutrients)".to_string(),
        None => String::new(),
    };

    let details = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(details, area);
}

fn render_totals(frame: &mut Frame, analysis: &Analysis, area: Rect) {
    let rows: Vec<Row> = analysis
        .totals
        .iter()
        .map(|(label, value)| Row::new(vec![Cell::from(label), Cell::from(format_amount(value))]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(12)])
        .header(
            Row::new(vec!["Nutrient", "Total"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title("Total Combined Nutrition")
                .borders(Borders::ALL),
        );

    frame.render_widget(table, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Editing => "[Enter] Analyze  [Ctrl-U] Clear  [Tab] Results  [Ctrl-C] Quit",
        AppMode::Browsing => "[j/k] Select  [i] Edit input  [q] Quit",
        AppMode::Fetching => "Please wait...",
    };

    let (text, color) = match &app.message {
        Some(message) => {
            let color = match message.level {
                MessageLevel::Info => Color::Gray,
                MessageLevel::Warning => Color::Yellow,
                MessageLevel::Error => Color::Red,
            };
            (format!("{}  |  {}", help_text, message.text), color)
        }
        None => (help_text.to_string(), Color::Gray),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_fetching_dialog(frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "NutriTrack");
    frame.render_widget(
        Paragraph::new("Fetching nutrition data...").centered(),
        inner,
    );
}
