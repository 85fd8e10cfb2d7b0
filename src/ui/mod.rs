//! Terminal rendering.
//!
//! Top to bottom: title bar with the sound toggle, the conversation, the
//! input bar with its send and skip buttons, a hint line and the status bar.

mod messages;
mod theme;
mod wrap;

pub use messages::{conversation_lines, message_lines, TYPING_CURSOR};
pub use theme::{COLOR_ACCENT, COLOR_BG, COLOR_DIM, COLOR_ERROR, COLOR_FG, COLOR_USER};
pub use wrap::wrap_text;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use messages::render_messages;

pub const TITLE: &str = "AI CHAT";
pub const INPUT_PLACEHOLDER: &str = "Start typing…";
pub const HINT: &str = "Tip: The agent answers using your indexed PDFs.";
pub const SEND_LABEL: &str = "[ SEND ]";
pub const BUSY_LABEL: &str = "[ … ]";
pub const SKIP_LABEL: &str = "[ ⏩ skip ]";

/// Draw the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(COLOR_BG)), area);

    let [header, body, input, hint, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, app);
    render_messages(frame, body, app);
    render_input(frame, input, app);
    frame.render_widget(
        Paragraph::new(Span::styled(HINT, Style::default().fg(COLOR_DIM))),
        hint,
    );
    render_status(frame, status, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_FG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sfx = app.sfx.label();
    let [title, toggle] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(sfx.width() as u16 + 4),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", TITLE),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )),
        title,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("[{}]", sfx),
            Style::default().fg(COLOR_FG),
        )),
        toggle,
    );
}

/// Buttons shown at the right of the input bar.
pub fn input_buttons(app: &App) -> String {
    let send = if app.busy { BUSY_LABEL } else { SEND_LABEL };
    if app.can_skip() {
        format!("{} {}", SKIP_LABEL, send)
    } else {
        send.to_string()
    }
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.busy { COLOR_DIM } else { COLOR_FG };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buttons = input_buttons(app);
    let [field, button_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(buttons.width() as u16 + 1),
    ])
    .areas(inner);

    let prompt = Span::styled("> ", Style::default().fg(COLOR_ACCENT));
    let line = if app.input.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(COLOR_DIM)),
        ])
    } else {
        // Keep the end of long input visible.
        let room = (field.width as usize).saturating_sub(3);
        let mut shown = app.input.as_str();
        while shown.width() > room {
            let mut chars = shown.chars();
            chars.next();
            shown = chars.as_str();
        }
        Line::from(vec![
            prompt,
            Span::styled(shown.to_string(), Style::default().fg(COLOR_FG)),
        ])
    };
    frame.render_widget(Paragraph::new(line), field);
    frame.render_widget(
        Paragraph::new(Span::styled(
            buttons,
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )),
        button_area,
    );

    if !app.busy {
        let typed = if app.input.is_empty() {
            0
        } else {
            app.input.width().min(field.width.saturating_sub(3) as usize)
        };
        let x = field.x + 2 + typed as u16;
        frame.set_cursor_position((x.min(field.right().saturating_sub(1)), field.y));
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let keys = if app.can_skip() {
        "Tab skip · F2 sound · Ctrl+C quit"
    } else {
        "Enter send · F2 sound · Ctrl+C quit"
    };
    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(keys.width() as u16),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("Status: {}", app.status_label()),
            Style::default().fg(COLOR_FG),
        )),
        left,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(keys, Style::default().fg(COLOR_DIM))),
        right,
    );
}
