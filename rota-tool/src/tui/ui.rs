use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use rota_core::{Banner, DAY_OFF, DayColumn, FormField, LoadStatus};

use super::app::{AppMode, RotaApp, SUBMIT_INDEX, Screen};

pub fn render(frame: &mut Frame, app: &RotaApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Screen
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.screen {
        Screen::Form => render_form(frame, app, chunks[1]),
        Screen::Week => render_week(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    if app.mode == AppMode::SelectOption {
        render_option_popup(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &RotaApp, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::Cyan))
        }
    };

    let header = Line::from(vec![
        Span::styled("rota ", Style::default().add_modifier(Modifier::BOLD)),
        tab(" F1 Duty Form ", app.screen == Screen::Form),
        Span::raw(" "),
        tab(" F2 Duty Management ", app.screen == Screen::Week),
        Span::styled(
            format!("  {}", app.client.base_url()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(header), area);
}

fn render_form(frame: &mut Frame, app: &RotaApp, area: Rect) {
    let mut constraints = vec![Constraint::Length(1)]; // Banner
    constraints.extend(FormField::ALL.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Length(1)); // Submit
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let banner = match app.form.banner() {
        Some(Banner::Success(msg)) => {
            Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Green))
        }
        Some(Banner::Error(msg)) => {
            Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Red))
        }
        None if app.form.is_pending() => Paragraph::new("Submitting...")
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC)),
        None => Paragraph::new(""),
    };
    frame.render_widget(banner, chunks[0]);

    for (i, field) in FormField::ALL.iter().copied().enumerate() {
        render_field(frame, app, field, i == app.focus, chunks[i + 1]);
    }

    let submit_style = if app.focus == SUBMIT_INDEX {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    frame.render_widget(
        Paragraph::new(Span::styled("[ Submit ]", submit_style)),
        chunks[SUBMIT_INDEX + 1],
    );
}

fn render_field(frame: &mut Frame, app: &RotaApp, field: FormField, focused: bool, area: Rect) {
    let value = app.form.get(field);
    let error = app.form.error(field);

    let border_style = match (error, focused) {
        (Some(_), _) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Yellow),
        (None, false) => Style::default(),
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(field.label());
    if let Some(message) = error {
        block = block.title_bottom(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red),
        )));
    }

    let (text, style) = if value.is_empty() {
        let placeholder = if field.is_selection() && app.reference_loading() {
            "Loading options..."
        } else {
            field.placeholder()
        };
        (placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else if field.is_selection() {
        let label = app
            .reference
            .label_for(field, value)
            .unwrap_or_else(|| value.to_string());
        (label, Style::default())
    } else {
        (value.to_string(), Style::default())
    };

    frame.render_widget(Paragraph::new(text).style(style).block(block), area);

    if focused && app.mode == AppMode::Normal && !field.is_selection() {
        let cursor_x = area.x + 1 + value.chars().count() as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_week(frame: &mut Frame, app: &RotaApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let title = format!(
        "Week {}   selected: {}",
        app.week.week(),
        app.week.selected().format("%d/%m/%Y")
    );
    frame.render_widget(
        Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    match app.week.status() {
        LoadStatus::Loading => {
            let loading = Paragraph::new("Loading duties...")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC));
            frame.render_widget(loading, chunks[1]);
        }
        LoadStatus::Failed(error) => {
            let failed = Paragraph::new(format!("Failed to load duties: {}  (r: retry)", error))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false });
            frame.render_widget(failed, chunks[1]);
        }
        LoadStatus::Loaded(_) => {
            let columns = app.week.columns();
            let areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(columns.iter().map(|_| Constraint::Ratio(1, columns.len() as u32)))
                .split(chunks[1]);

            for (column, area) in columns.iter().zip(areas.iter()) {
                render_day(frame, column, *area);
            }
        }
    }
}

fn render_day(frame: &mut Frame, column: &DayColumn, area: Rect) {
    let border_style = if column.is_selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("{} {}", column.weekday_name(), column.date.format("%d/%m")));

    let mut lines: Vec<Line> = Vec::new();
    if column.is_day_off() {
        lines.push(Line::from(Span::styled(
            DAY_OFF,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    for duty in &column.duties {
        let label = Style::default().fg(Color::Cyan);
        lines.push(Line::from(vec![
            Span::styled("Vehicle: ", label),
            Span::raw(duty.vehicle.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Driver: ", label),
            Span::raw(duty.driver.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Conductor: ", label),
            Span::raw(duty.conductor.clone()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Time: ", label),
            Span::raw(duty.time_range()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Duration: ", label),
            Span::raw(duty.duration_label()),
        ]));
        lines.push(Line::from("")); // Gap between cards
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &RotaApp, area: Rect) {
    let status = match (app.mode, app.screen) {
        (AppMode::SelectOption, _) => "↑/↓: Navigate  Enter: Select  Esc: Cancel",
        (AppMode::Normal, Screen::Form) => {
            "Tab/↑/↓: Field  Enter: Pick/Submit  Ctrl+S: Submit  F2: Week  Esc: Quit"
        }
        (AppMode::Normal, Screen::Week) => {
            "←/→: Day  ↑/↓: Week  t: Today  r: Refresh  F1: Form  Esc: Quit"
        }
    };

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}

fn render_option_popup(frame: &mut Frame, app: &RotaApp) {
    let title = app
        .focused_field()
        .map(|f| f.placeholder())
        .unwrap_or("Select");

    let current = app
        .focused_field()
        .map(|f| app.form.get(f))
        .unwrap_or_default();

    let options = app.popup_options();
    let items: Vec<ListItem> = if options.is_empty() {
        vec![ListItem::new("(no options loaded)").style(Style::default().fg(Color::DarkGray))]
    } else {
        options
            .iter()
            .map(|option| {
                let is_current = option.value == current;
                let style = if is_current {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                let marker = if is_current { " ✓" } else { "" };
                ListItem::new(format!("{}{}", option.label, marker)).style(style)
            })
            .collect()
    };

    let area = popup_area(frame.area(), 40, 50);
    frame.render_widget(Clear, area);

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.popup_selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Area of the given percentage size in the middle of `area`.
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
