//! UI rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{ActivePane, App, InputMode};
use crate::format;
use crate::forms::FormState;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    // Create vertical layout for the status bar at the bottom
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    // Split the main area into three panes
    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22),
            Constraint::Percentage(38),
            Constraint::Percentage(40),
        ])
        .split(outer_chunks[0]);

    draw_sidebar(frame, app, pane_chunks[0]);
    draw_words_pane(frame, app, pane_chunks[1]);
    draw_detail_pane(frame, app, pane_chunks[2]);

    match app.input_mode {
        InputMode::Normal => draw_status_bar(frame, app, outer_chunks[1]),
        InputMode::Search => draw_search_input(frame, app, outer_chunks[1]),
    }

    if let Some(form) = &app.form {
        draw_form_overlay(frame, form);
    }

    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn pane_border_style(active: bool) -> Style {
    if active {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn pane_highlight_style(active: bool) -> Style {
    if active {
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

/// Draw the collections sidebar (left)
fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_pane == ActivePane::Sidebar;

    let items: Vec<ListItem> = app
        .collections
        .iter()
        .map(|collection| {
            let label = format!(
                "{} {} ({})",
                collection.emoji,
                collection.name,
                app.count_for(&collection.id)
            );
            // The collection currently filtering the word list stands out
            let style = if collection.id == app.active_collection {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let block = Block::default()
        .title(" Collections ")
        .borders(Borders::ALL)
        .border_style(pane_border_style(is_active));

    let list = List::new(items)
        .block(block)
        .highlight_style(pane_highlight_style(is_active));

    let mut state = ListState::default();
    state.select(Some(app.sidebar_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the word list pane (middle)
fn draw_words_pane(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_pane == ActivePane::Words;

    let items: Vec<ListItem> = app
        .words
        .iter()
        .map(|word| {
            let star = if word.favorite { "★ " } else { "  " };
            let term_line = Line::from(vec![
                Span::styled(star, Style::default().fg(Color::Yellow)),
                Span::raw(word.term.as_str()),
            ]);
            let definition_line = Line::from(Span::styled(
                truncate(&word.definition, area.width.saturating_sub(4) as usize),
                Style::default().add_modifier(Modifier::DIM),
            ));
            ListItem::new(vec![term_line, definition_line])
        })
        .collect();

    let title = if app.search_input.is_empty() {
        format!(" Words ({}) ", app.words.len())
    } else {
        format!(" Words ({}) /{} ", app.words.len(), app.search_input)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(pane_border_style(is_active));

    let list = List::new(items)
        .block(block)
        .highlight_style(pane_highlight_style(is_active));

    let mut state = ListState::default();
    if !app.words.is_empty() {
        state.select(Some(app.word_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the detail pane (right)
fn draw_detail_pane(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = app.active_pane == ActivePane::Detail;

    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_style(pane_border_style(is_active));

    let bold = Style::default().add_modifier(Modifier::BOLD);

    let content = if let Some(word) = app.current_word() {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Term: ", bold),
                Span::raw(word.term.as_str()),
                Span::raw(if word.favorite { "  ★" } else { "" }),
            ]),
            Line::from(""),
            Line::from(vec![Span::styled("Definition:", bold)]),
        ];
        for def_line in word.definition.lines() {
            lines.push(Line::from(format!("  {}", def_line)));
        }

        lines.push(Line::from(""));
        if word.notes.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                "── No notes ──",
                Style::default().add_modifier(Modifier::DIM),
            )]));
        } else {
            lines.push(Line::from(vec![Span::styled("Notes:", bold)]));
            for note_line in word.notes.lines() {
                lines.push(Line::from(format!("  {}", note_line)));
            }
        }

        lines.push(Line::from(""));
        let tags_str = if word.tags.is_empty() {
            "-".to_string()
        } else {
            word.tags.join(", ")
        };
        lines.push(Line::from(vec![
            Span::styled("Tags: ", bold),
            Span::raw(tags_str),
        ]));

        let collections_str = word
            .collections
            .iter()
            .map(|id| {
                app.collections
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| id.clone())
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::from(vec![
            Span::styled("Collections: ", bold),
            Span::raw(collections_str),
        ]));

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Added: ", bold),
            Span::raw(format::format_date(word.added_at)),
        ]));

        lines
    } else {
        vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Select a word to view details",
                Style::default().add_modifier(Modifier::DIM),
            )]),
        ]
    };

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "a:add  e:edit  d:del  f:fav  c:new-col  r:rename-col  x:del-col  /:search  ?:help  q:quit"
            .to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Draw search input at the bottom
fn draw_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let prefix = "/";
    let line = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::Cyan)),
        Span::raw(app.search_input.as_str()),
        Span::styled(
            format!("  ({} matches)", app.words.len()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area.x + prefix.len() as u16 + cursor_col(&app.search_input, app.search_cursor);
    frame.set_cursor_position((cursor_x, area.y));
}

/// Draw the active modal form as a centered overlay
fn draw_form_overlay(frame: &mut Frame, form: &FormState) {
    let area = frame.area();

    let popup_height = (form.fields.len() as u16
        + u16::from(form.favorite.is_some())
        + 4)
    .min(area.height.saturating_sub(2));
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let mut lines = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>11}: ", field.label), label_style),
            Span::raw(field.value.as_str()),
        ]));
    }

    if let Some(favorite) = form.favorite {
        let marker = if favorite { "[x]" } else { "[ ]" };
        let style = if form.favorite_focused() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{:>11}  Favorite (space to toggle)", marker),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab: next field   Enter: save   Esc: cancel",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(form.title())
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);

    // Place the terminal cursor inside the focused text field
    if let Some(field) = form.fields.get(form.focus) {
        // "{:>11}: " makes the value start at column 13 inside the border
        let cursor_x = popup_area.x + 1 + 13 + cursor_col(&field.value, field.cursor);
        let cursor_y = popup_area.y + 1 + form.focus as u16;
        if cursor_x < popup_area.right() && cursor_y < popup_area.bottom() {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let popup_height = 22.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  j/k, ↑/↓    Move up/down"),
        Line::from("  gg          Jump to first item"),
        Line::from("  G           Jump to last item"),
        Line::from("  h/l, ←/→    Switch panes"),
        Line::from("  Tab         Cycle panes"),
        Line::from("  Enter       Pick collection / Focus detail"),
        Line::from(""),
        Line::from("Words:"),
        Line::from("  a           Add word"),
        Line::from("  e           Edit word"),
        Line::from("  d           Delete word"),
        Line::from("  f           Toggle favorite"),
        Line::from(""),
        Line::from("Collections:"),
        Line::from("  c           Add collection"),
        Line::from("  r           Rename collection"),
        Line::from("  x           Delete collection"),
        Line::from(""),
        Line::from("  /           Search    q  Quit"),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
}

/// Terminal column for a byte cursor into an input string
///
/// The input cursors index bytes; columns are characters.
fn cursor_col(s: &str, byte_cursor: usize) -> u16 {
    s[..byte_cursor.min(s.len())].chars().count() as u16
}

/// Truncate a string to `max` characters, appending an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
