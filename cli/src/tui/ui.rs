use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;
use gradebook_core::{calculate_grade, AssignmentField, GradeBookRepository, CLEAR_ALL_PROMPT};

use crate::tui::app::{App, InputMode};

pub fn draw<R: GradeBookRepository>(f: &mut Frame, app: &mut App<R>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Class tabs
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("GRADE CALCULATOR")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    draw_tabs(f, app, main_chunks[1]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .split(main_chunks[2]);

    draw_assignments(f, app, content_chunks[0]);
    draw_planning(f, app, content_chunks[1]);
    draw_footer(f, app, main_chunks[3]);
}

fn draw_tabs<R: GradeBookRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let titles: Vec<Line> = app
        .service
        .classes()
        .iter()
        .map(|c| {
            let name = if c.name.is_empty() { "(unnamed)" } else { c.name.as_str() };
            Line::from(name.to_string())
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.active_index())
        .block(Block::default().title(" Classes ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_assignments<R: GradeBookRepository>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let selected = app.state.selected();
    let column = app.column;

    let rows: Vec<Row> = match app.active_class() {
        Some(class) => class
            .assignments
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let cell = |field: AssignmentField| {
                    let style = if selected == Some(i) && column == field {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    Cell::from(a.field(field).to_string()).style(style)
                };
                Row::new(vec![
                    cell(AssignmentField::Name),
                    cell(AssignmentField::Grade),
                    cell(AssignmentField::Weight),
                ])
            })
            .collect(),
        None => Vec::new(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),    // Name
            Constraint::Length(8),  // Grade
            Constraint::Length(8),  // Weight
        ]
    )
    .header(Row::new(vec!["Assignment/Exam", "Grade", "Weight %"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Assignments ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_planning<R: GradeBookRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let block = Block::default().title(" Final Grade Planning ").borders(Borders::ALL).border_type(BorderType::Rounded);

    let Some(class) = app.active_class() else {
        f.render_widget(block, area);
        return;
    };
    let summary = calculate_grade(class);
    let shown = summary.rounded();
    let goal = if class.final_goal.is_empty() { "-" } else { class.final_goal.as_str() };

    let mut text = vec![
        Line::from(vec![
            Span::styled("Final Goal: ", Style::default().fg(Color::Blue)),
            Span::raw(format!("{}%", goal)),
        ]),
        Line::from(vec![
            Span::styled("Remaining Weight: ", Style::default().fg(Color::Blue)),
            Span::raw(format!("{:.1}%", summary.remaining_weight)),
        ]),
        Line::from(""),
    ];

    if summary.has_results() {
        text.push(Line::from(Span::styled("Current Results:", Style::default().add_modifier(Modifier::BOLD))));
        text.push(Line::from(format!("Current Grade: {}%", shown.current_grade)));
        text.push(Line::from(format!("Total Weight: {}%", shown.total_weight)));
        text.push(Line::from(format!("Remaining Weight: {:.1}%", summary.remaining_weight)));
        if summary.shows_needed_grade() {
            let style = if shown.needed_grade > 100.0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };
            text.push(Line::from(Span::styled(format!("Needed Grade: {}%", shown.needed_grade), style)));
        }
    } else {
        text.push(Line::from(Span::styled(
            "Enter grades and weights to see results.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    if let Some(status) = &app.status {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(status.as_str(), Style::default().fg(Color::Cyan))));
    }

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_footer<R: GradeBookRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    match app.input_mode {
        InputMode::Normal => {
            let delete_hint = if app.can_delete_row() { "d: Del row" } else { "d: (last row)" };
            let help = format!(
                "j/k h/l: Move | Tab: Class | e: Edit | a: Add row | {} | g: Goal | r: Rename | n/x: New/Del class | c: Clear | X: Clear all | q: Quit",
                delete_hint
            );
            let footer = Paragraph::new(help)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(footer, area);
        }
        InputMode::Editing(target) => {
            let prefix = format!("{}: ", target.label());
            let line = Line::from(vec![
                Span::styled(prefix.clone(), Style::default().fg(Color::Yellow)),
                Span::raw(app.input.as_str()),
            ]);
            f.render_widget(Paragraph::new(line), area);

            let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
            let x = area.x + (prefix.width() + before_cursor.width()) as u16;
            f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        }
        InputMode::ConfirmClearAll => {
            let prompt = Paragraph::new(format!("{} (y/N)", CLEAR_ALL_PROMPT))
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center);
            f.render_widget(prompt, area);
        }
    }
}
