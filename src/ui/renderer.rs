use crate::form::FieldName;
use crate::state::{FormView, StatusKind};
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::span::{Span, SpanLine, line_width};
use crate::ui::style::{Color, Style};
use crate::widgets::traits::RenderContext;

const HINT: &str = "Tab/Shift+Tab move · Ctrl+S submit · Ctrl+R reset · Esc quit";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Columns between a field label and its input.
    pub indent: u16,
    pub show_hint: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            indent: 4,
            show_hint: true,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, view: &FormView, terminal_size: TerminalSize) -> RenderFrame {
        let mut frame = RenderFrame::default();
        let ctx = RenderContext {
            focused_id: view.focused_id().map(ToOwned::to_owned),
            terminal_size,
        };
        let indent = " ".repeat(self.config.indent as usize);

        frame.lines.push(vec![Span::styled(
            view.title().to_string(),
            Style::new().color(Color::Cyan).bold(),
        )]);
        if self.config.show_hint {
            frame.lines.push(vec![Span::styled(
                HINT,
                Style::new().color(Color::DarkGrey),
            )]);
        }
        frame.lines.push(Vec::new());

        let mut buttons: SpanLine = vec![Span::new(indent.clone())];
        for node in view.nodes() {
            let focused = ctx.is_focused(node.id());
            let out = node.draw(&ctx);

            if node.is_button() {
                if line_width(&buttons) > indent.len() {
                    buttons.push(Span::new("  "));
                }
                buttons.extend(out.lines.into_iter().flatten());
                continue;
            }

            let required = node.target().is_some_and(FieldName::is_required);
            frame.lines.push(field_header(node.label(), focused, required));
            let top = frame.lines.len() as u16;
            if focused && let Some(local) = node.cursor_pos() {
                frame.cursor = Some(CursorPos {
                    col: self.config.indent.saturating_add(local.col),
                    row: top.saturating_add(local.row),
                });
            }
            for line in out.lines {
                let mut indented = vec![Span::new(indent.clone())];
                indented.extend(line);
                frame.lines.push(indented);
            }

            if let Some(error) = node.target().and_then(|field| view.error_for(field)) {
                frame.lines.push(vec![Span::styled(
                    format!("{indent}! {error}"),
                    Style::new().color(Color::Red),
                )]);
            }
        }

        frame.lines.push(Vec::new());
        frame.lines.push(buttons);

        if let Some(status) = view.status() {
            let color = match status.kind {
                StatusKind::Info => Color::Green,
                StatusKind::Error => Color::Red,
            };
            frame.lines.push(Vec::new());
            frame.lines.push(vec![Span::styled(
                status.message.clone(),
                Style::new().color(color),
            )]);
        }

        frame
    }
}

fn field_header(label: &str, focused: bool, required: bool) -> SpanLine {
    let (marker, label_style) = if focused {
        ("> ", Style::new().color(Color::Cyan).bold())
    } else {
        ("  ", Style::default())
    };
    let mut line = vec![
        Span::styled(marker, Style::new().color(Color::Cyan)),
        Span::styled(label.to_string(), label_style),
    ];
    if required {
        line.push(Span::styled(" *", Style::new().color(Color::Red)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::{Renderer, RendererConfig};
    use crate::form::FieldName;
    use crate::form::sink::MemorySink;
    use crate::state::FormView;
    use crate::terminal::{CursorPos, KeyCode, KeyEvent, TerminalSize};
    use crate::ui::span::line_text;

    const SIZE: TerminalSize = TerminalSize {
        width: 80,
        height: 40,
    };

    fn texts(view: &FormView) -> Vec<String> {
        Renderer::default()
            .render(view, SIZE)
            .lines
            .iter()
            .map(line_text)
            .collect()
    }

    #[test]
    fn draws_every_field_under_its_label() {
        let view = FormView::new(Box::new(MemorySink::new()));
        let lines = texts(&view);

        assert_eq!(lines[0], view.title());
        assert!(lines.contains(&"> First Name *".to_string()));
        assert!(lines.contains(&"  Country".to_string()));
        for field in FieldName::ALL.into_iter().skip(1).filter(|f| f.is_required()) {
            let header = format!("  {} *", field.label());
            assert!(lines.contains(&header), "missing {header}");
        }
        assert!(lines.iter().any(|line| line.contains("Select a country")));
        assert!(lines.iter().any(|line| line.contains("[ Submit ]") && line.contains("[ Reset ]")));
    }

    #[test]
    fn cursor_follows_the_focused_input() {
        let mut view = FormView::new(Box::new(MemorySink::new()));
        let result = view.dispatch_key_to_focused(KeyEvent::plain(KeyCode::Char('A')));
        for action in result.actions {
            view.handle_action(action);
        }

        let frame = Renderer::default().render(&view, SIZE);
        assert_eq!(frame.cursor, Some(CursorPos { col: 5, row: 4 }));
        assert_eq!(line_text(&frame.lines[4]), "    A");
    }

    #[test]
    fn buttons_take_no_cursor() {
        let mut view = FormView::new(Box::new(MemorySink::new()));
        view.focus_id("submit");
        assert_eq!(Renderer::default().render(&view, SIZE).cursor, None);
    }

    #[test]
    fn shows_errors_and_status_after_failed_submit() {
        let mut view = FormView::new(Box::new(MemorySink::new()));
        view.submit();
        let lines = texts(&view);

        assert!(lines.contains(&"    ! Please fill out this field".to_string()));
        assert!(lines.contains(&"    ! Please select a file".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("8 invalid fields"));
    }

    #[test]
    fn hint_can_be_hidden() {
        let view = FormView::new(Box::new(MemorySink::new()));
        let renderer = Renderer::new(RendererConfig {
            indent: 2,
            show_hint: false,
        });
        let frame = renderer.render(&view, SIZE);
        assert!(line_text(&frame.lines[1]).is_empty());
        assert_eq!(frame.cursor.map(|c| c.row), Some(3));
    }
}
