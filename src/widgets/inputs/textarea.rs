use super::text_edit;
use crate::core::value::Value;
use crate::form::FieldName;
use crate::terminal::{CursorPos, KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};
use unicode_width::UnicodeWidthChar;

const GUTTER: &str = "│ ";

pub struct TextAreaInput {
    base: WidgetBase,
    /// Invariant: always at least one element.
    lines: Vec<String>,
    row: usize,
    col: usize,
    offset: usize,
    min_height: usize,
    max_height: usize,
    placeholder: Option<String>,
}

impl TextAreaInput {
    pub fn for_field(field: FieldName) -> Self {
        let mut input = Self::from_base(WidgetBase::for_field(field));
        input.placeholder = field.placeholder().map(str::to_string);
        input
    }

    fn from_base(base: WidgetBase) -> Self {
        Self {
            base,
            lines: vec![String::new()],
            row: 0,
            col: 0,
            offset: 0,
            min_height: 3,
            max_height: 5,
            placeholder: None,
        }
    }

    pub fn with_height(mut self, min: usize, max: usize) -> Self {
        self.min_height = min.max(1);
        self.max_height = max.max(self.min_height);
        self
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn visible_height(&self) -> usize {
        self.lines.len().clamp(self.min_height, self.max_height)
    }

    fn ensure_visible(&mut self) {
        let height = self.max_height;
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + height {
            self.offset = self.row + 1 - height;
        }
        let max_offset = self.lines.len().saturating_sub(height);
        self.offset = self.offset.min(max_offset);
    }

    fn current_line_len(&self) -> usize {
        text_edit::char_count(&self.lines[self.row])
    }

    fn split_line(&mut self) {
        let col = self.col.min(self.current_line_len());
        let byte = text_edit::byte_index_at_char(&self.lines[self.row], col);
        let right = self.lines[self.row].split_off(byte);
        self.row += 1;
        self.col = 0;
        self.lines.insert(self.row, right);
    }

    fn merge_with_prev(&mut self) -> bool {
        if self.row == 0 {
            return false;
        }
        let current = self.lines.remove(self.row);
        self.row -= 1;
        self.col = self.current_line_len();
        self.lines[self.row].push_str(&current);
        true
    }

    fn merge_with_next(&mut self) -> bool {
        if self.row + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(self.row + 1);
        self.lines[self.row].push_str(&next);
        true
    }

    fn edited(&mut self) -> InteractionResult {
        self.ensure_visible();
        InteractionResult::changed(self.base.target(), Value::Text(self.text()))
    }

    fn moved(&mut self) -> InteractionResult {
        self.ensure_visible();
        InteractionResult::handled()
    }
}

impl Drawable for TextAreaInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let gutter_style = Style::new().color(Color::DarkGrey);
        let is_blank = self.lines.len() == 1 && self.lines[0].is_empty();

        let mut lines = Vec::with_capacity(self.visible_height() + 1);
        for i in 0..self.visible_height() {
            let idx = self.offset + i;
            let mut line = vec![Span::styled(GUTTER, gutter_style)];
            match (&self.placeholder, self.lines.get(idx)) {
                (Some(placeholder), _) if is_blank && idx == 0 => {
                    line.push(Span::styled(placeholder.clone(), gutter_style));
                }
                (_, Some(text)) => line.push(Span::new(text.clone())),
                (_, None) => {}
            }
            lines.push(line);
        }

        let hidden = self.lines.len().saturating_sub(self.max_height);
        if hidden > 0 {
            lines.push(vec![Span::styled(
                format!("  {}-{} of {} lines", self.offset + 1, self.offset + self.max_height, self.lines.len()),
                gutter_style,
            )]);
        }

        DrawOutput { lines }
    }
}

impl Interactive for TextAreaInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            // Consumed so Esc leaves the textarea rather than the form.
            KeyCode::Esc => InteractionResult::handled(),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InteractionResult::input_done()
            }
            // Legacy terminals send Ctrl+Enter as a line feed.
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InteractionResult::input_done()
            }
            KeyCode::Enter => {
                self.split_line();
                self.edited()
            }
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.lines[self.row], &mut self.col, ch);
                self.edited()
            }
            KeyCode::Backspace => {
                let changed = if self.col > 0 {
                    text_edit::backspace_char(&mut self.lines[self.row], &mut self.col)
                } else {
                    self.merge_with_prev()
                };
                if changed { self.edited() } else { InteractionResult::ignored() }
            }
            KeyCode::Delete => {
                let changed = if self.col < self.current_line_len() {
                    text_edit::delete_char(&mut self.lines[self.row], &mut self.col)
                } else {
                    self.merge_with_next()
                };
                if changed { self.edited() } else { InteractionResult::ignored() }
            }
            KeyCode::Left => {
                if self.col > 0 {
                    self.col = self.col.min(self.current_line_len()) - 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = self.current_line_len();
                }
                self.moved()
            }
            KeyCode::Right => {
                if self.col < self.current_line_len() {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                self.moved()
            }
            KeyCode::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(self.current_line_len());
                }
                self.moved()
            }
            KeyCode::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = self.col.min(self.current_line_len());
                }
                self.moved()
            }
            KeyCode::Home => {
                self.col = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.col = self.current_line_len();
                InteractionResult::handled()
            }
            _ => InteractionResult::ignored(),
        }
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let width: usize = self.lines[self.row]
            .chars()
            .take(self.col)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
            .sum();
        Some(CursorPos {
            col: (GUTTER.chars().count() + width) as u16,
            row: self.row.saturating_sub(self.offset) as u16,
        })
    }

    fn target(&self) -> Option<FieldName> {
        self.base.target()
    }

    fn value(&self) -> Option<Value> {
        Some(Value::Text(self.text()))
    }

    fn set_value(&mut self, value: Value) {
        let Some(text) = value.to_text_scalar() else {
            return;
        };
        self.lines = text.split('\n').map(str::to_string).collect();
        self.row = self.lines.len() - 1;
        self.col = self.current_line_len();
        self.offset = 0;
        self.ensure_visible();
    }
}
