//! UI rendering

use cartlist_core::ListStore;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::app::{App, InputMode};

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App, store: &ListStore) {
    let banner_height = if app.ads_removed { 0 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(banner_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);
    draw_list_bar(frame, store, chunks[1]);
    draw_input(frame, app, store, chunks[2]);
    draw_items(frame, app, store, chunks[3]);
    if !app.ads_removed {
        draw_ad_banner(frame, chunks[4]);
    }
    draw_status_bar(frame, app, chunks[5]);

    match app.input_mode {
        InputMode::NewListPrompt => draw_prompt(frame, " New list ", "Create a new list? (y/n)"),
        InputMode::ConfirmDeleteList => {
            let name = store.active_list_name().unwrap_or_default();
            draw_prompt(frame, " Delete list ", &format!("Delete '{}'? (y/n)", name));
        }
        InputMode::Share => draw_prompt(
            frame,
            " Share ",
            "w: WhatsApp   m: Messenger   s: SMS   Esc: cancel",
        ),
        _ => {}
    }

    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the title line with the save indicator on the right
fn draw_title(frame: &mut Frame, app: &App, area: Rect) {
    let title = Paragraph::new(Span::styled(
        "Shopping Lists",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, area);

    if app.save_failures > 0 && area.width > 14 {
        let indicator = Paragraph::new(Span::styled(
            "✗ save failed",
            Style::default().fg(Color::Red),
        ));
        let indicator_area = Rect::new(area.x + area.width - 14, area.y, 14, 1);
        frame.render_widget(indicator, indicator_area);
    }
}

/// Draw the horizontal bar of list names
fn draw_list_bar(frame: &mut Frame, store: &ListStore, area: Rect) {
    let active = store.active_list_name();

    let mut spans = Vec::new();
    for name in store.lists().names() {
        let style = if Some(name) == active {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", name), style));
        spans.push(Span::raw(" "));
    }
    if spans.is_empty() {
        spans.push(Span::styled(
            "No lists yet. Add an item to start one.",
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let block = Block::default().title(" Lists ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the item input line, or the rename input while renaming
fn draw_input(frame: &mut Frame, app: &App, store: &ListStore, area: Rect) {
    let session = store.session();

    let (title, text, active) = match app.input_mode {
        InputMode::Rename => (" Rename list ", session.rename_buffer.as_str(), true),
        mode => {
            let editing = store
                .active_list_name()
                .is_some_and(|name| session.is_editing(name));
            let title = if editing { " Edit item " } else { " Add item " };
            (title, session.pending_text.as_str(), mode == InputMode::Item)
        }
    };

    let border_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let content = if text.is_empty() && !active {
        Line::from(Span::styled(
            "Press a to add an item",
            Style::default().add_modifier(Modifier::DIM),
        ))
    } else {
        Line::from(text)
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if active {
        let typed = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let last_column = area.x.saturating_add(area.width.saturating_sub(2));
        let cursor_x = area.x.saturating_add(1).saturating_add(typed).min(last_column);
        frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
    }
}

/// Draw the items of the active list
fn draw_items(frame: &mut Frame, app: &App, store: &ListStore, area: Rect) {
    let session = store.session();
    let cursor = store
        .active_list_name()
        .and_then(|name| session.cursor_for(name));

    let items: Vec<ListItem> = store
        .active_items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let (mark, style) = if item.bought {
                (
                    "[x] ",
                    Style::default()
                        .add_modifier(Modifier::CROSSED_OUT)
                        .add_modifier(Modifier::DIM),
                )
            } else {
                ("[ ] ", Style::default())
            };

            let mut spans = vec![Span::raw(mark), Span::styled(item.name.as_str(), style)];
            if cursor == Some(i) {
                spans.push(Span::styled(
                    "  (editing)",
                    Style::default().fg(Color::Yellow),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = match store.active_list_name() {
        Some(name) => format!(" {} ({}) ", name, items.len()),
        None => " No list selected ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    if items.is_empty() {
        let hint = if store.active_list_name().is_some() {
            "This list is empty"
        } else {
            "Tab to pick a list, n for a new one"
        };
        let paragraph = Paragraph::new(Span::styled(
            hint,
            Style::default().add_modifier(Modifier::DIM),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = ListState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the ad banner with its remove action
fn draw_ad_banner(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("Ad ", Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::raw(" Your favourite store has fresh deals this week!  "),
        Span::styled("p: remove ads", Style::default().add_modifier(Modifier::DIM)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        match app.input_mode {
            InputMode::Item => "Enter:save  Esc:done".to_string(),
            InputMode::Rename => "Enter:rename  Esc:cancel".to_string(),
            _ => "a:add  e:edit  space:toggle  d:del  n:new  r:rename  s:share  ?:help  q:quit"
                .to_string(),
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Centered rectangle of at most `width` x `height`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Draw a small modal with one line of text
fn draw_prompt(frame: &mut Frame, title: &str, text: &str) {
    let width = (text.chars().count() as u16).saturating_add(4).max(30);
    let popup_area = centered(frame.area(), width, 3);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));
    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let popup_area = centered(frame.area(), 46, 22);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Items:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  a, i        Type a new item"),
        Line::from("  e           Edit selected item"),
        Line::from("  Space       Mark bought / not bought"),
        Line::from("  d           Delete selected item"),
        Line::from(""),
        Line::from("Lists:"),
        Line::from("  Tab, l/h    Next / previous list"),
        Line::from("  n           New list"),
        Line::from("  r           Rename list"),
        Line::from("  D           Delete list"),
        Line::from("  s           Share list"),
        Line::from(""),
        Line::from("  p           Remove ads"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}
