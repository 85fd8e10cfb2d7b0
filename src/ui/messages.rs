//! Conversation area.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Message, Who};

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_FG, COLOR_USER};
use super::wrap::wrap_text;

/// Block cursor drawn after the text being typed.
pub const TYPING_CURSOR: &str = "█";

fn prefix(who: Who) -> &'static str {
    match who {
        Who::User => "> ",
        Who::Bot => "◆ ",
        Who::System => "! ",
    }
}

fn style(who: Who) -> Style {
    match who {
        Who::User => Style::default().fg(COLOR_USER),
        Who::Bot => Style::default().fg(COLOR_FG),
        Who::System => Style::default().fg(COLOR_ERROR),
    }
}

/// Lines for one message at `width` columns. Continuation lines are
/// indented under the prefix.
pub fn message_lines(message: &Message, width: usize, typing: bool) -> Vec<Line<'static>> {
    let prefix = prefix(message.who);
    let indent = " ".repeat(prefix.chars().count());
    let text_style = style(message.who);
    let wrapped = wrap_text(&message.text, width.saturating_sub(indent.len()));
    let last = wrapped.len().saturating_sub(1);

    wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let lead = if i == 0 {
                Span::styled(prefix, text_style.add_modifier(Modifier::BOLD))
            } else {
                Span::raw(indent.clone())
            };
            let mut spans = vec![lead, Span::styled(text, text_style)];
            if typing && i == last {
                spans.push(Span::styled(TYPING_CURSOR, Style::default().fg(COLOR_ACCENT)));
            }
            Line::from(spans)
        })
        .collect()
}

/// Every message with a blank line between them.
pub fn conversation_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, message) in app.messages.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(message_lines(message, width, app.typing_index() == Some(i)));
    }
    lines
}

/// Render the conversation, scrolled so the newest line is visible.
pub fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_DIM));
    let inner = block.inner(area);

    let lines = conversation_lines(app, inner.width as usize);
    let scroll = lines.len().saturating_sub(inner.height as usize);
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_prefixes() {
        let user = message_lines(&Message::user("hi"), 20, false);
        let bot = message_lines(&Message::bot("hello"), 20, false);
        let sys = message_lines(&Message::system("Error: HTTP 500"), 20, false);
        assert_eq!(text_of(&user[0]), "> hi");
        assert_eq!(text_of(&bot[0]), "◆ hello");
        assert_eq!(text_of(&sys[0]), "! Error: HTTP 500");
    }

    #[test]
    fn test_continuation_is_indented() {
        let lines = message_lines(&Message::bot("aaaa bbbb cccc"), 11, false);
        assert_eq!(lines.len(), 2);
        assert_eq!(text_of(&lines[0]), "◆ aaaa bbbb");
        assert_eq!(text_of(&lines[1]), "  cccc");
    }

    #[test]
    fn test_cursor_on_last_line_only_while_typing() {
        let typing = message_lines(&Message::bot("one\ntwo"), 20, true);
        assert_eq!(text_of(&typing[1]), format!("  two{}", TYPING_CURSOR));
        assert!(!text_of(&typing[0]).contains(TYPING_CURSOR));

        let done = message_lines(&Message::bot("one\ntwo"), 20, false);
        assert!(done.iter().all(|l| !text_of(l).contains(TYPING_CURSOR)));
    }

    #[test]
    fn test_empty_placeholder_shows_cursor() {
        let lines = message_lines(&Message::bot(""), 20, true);
        assert_eq!(text_of(&lines[0]), format!("◆ {}", TYPING_CURSOR));
    }
}
