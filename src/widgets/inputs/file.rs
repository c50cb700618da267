use super::text_edit;
use crate::core::value::Value;
use crate::form::FieldName;
use crate::form::constraints::has_accepted_extension;
use crate::form::field::RESUME_EXTENSIONS;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextEditState,
};
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthChar;

/// File picker entered as a path. A non-empty path is reported as
/// `Value::File`, an empty one as `Value::None`.
pub struct FileInput {
    base: WidgetBase,
    path: String,
    cursor: usize,
    placeholder: Option<String>,
    accept: Vec<String>,
}

impl FileInput {
    pub fn for_field(field: FieldName) -> Self {
        let mut input = Self::from_base(WidgetBase::for_field(field));
        input.placeholder = field.placeholder().map(str::to_string);
        input
    }

    fn from_base(base: WidgetBase) -> Self {
        Self {
            base,
            path: String::new(),
            cursor: 0,
            placeholder: None,
            accept: RESUME_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        let trimmed = self.path.trim();
        (!trimmed.is_empty()).then(|| Path::new(trimmed))
    }

    fn current_value(&self) -> Value {
        match self.path() {
            Some(path) => Value::File(expand_home(path)),
            None => Value::None,
        }
    }

    fn edited_result(&self) -> InteractionResult {
        InteractionResult::changed(self.base.target(), self.current_value())
    }

    fn status_span(&self) -> Span {
        let muted = Style::new().color(Color::DarkGrey);
        let Some(path) = self.path() else {
            return Span::styled(format!("accepts .{}", self.accept.join(", .")), muted);
        };
        let path = expand_home(path);
        if !has_accepted_extension(&path) {
            Span::styled("unsupported file type", Style::new().color(Color::Yellow))
        } else if path.is_file() {
            Span::styled("✓ found", Style::new().color(Color::Green))
        } else {
            Span::styled("not found", Style::new().color(Color::Yellow))
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

impl Drawable for FileInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let body = match &self.placeholder {
            Some(placeholder) if self.path.is_empty() => {
                Span::styled(placeholder.clone(), Style::new().color(Color::DarkGrey))
            }
            _ => Span::new(self.path.clone()),
        };
        DrawOutput::line(vec![body, Span::new("  "), self.status_span()])
    }
}

impl Interactive for FileInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.path, &mut self.cursor, ch);
                self.edited_result()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.path, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.path, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                text_edit::move_left(&mut self.cursor, &self.path);
                InteractionResult::handled()
            }
            KeyCode::Right => {
                text_edit::move_right(&mut self.cursor, &self.path);
                InteractionResult::handled()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.path);
                InteractionResult::handled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        Some(TextEditState {
            value: &mut self.path,
            cursor: &mut self.cursor,
        })
    }

    fn after_text_edit(&mut self) -> InteractionResult {
        self.edited_result()
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let col: usize = self
            .path
            .chars()
            .take(text_edit::clamp_cursor(self.cursor, &self.path))
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum();
        Some(CursorPos {
            col: col as u16,
            row: 0,
        })
    }

    fn target(&self) -> Option<FieldName> {
        self.base.target()
    }

    fn value(&self) -> Option<Value> {
        Some(self.current_value())
    }

    fn set_value(&mut self, value: Value) {
        self.path = value
            .as_file()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        self.cursor = text_edit::char_count(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::FileInput;
    use crate::core::value::Value;
    use crate::form::FieldName;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    fn changes(input: &mut FileInput, keys: &[KeyCode]) -> Vec<Value> {
        keys.iter()
            .flat_map(|code| input.on_key(KeyEvent::plain(*code)).actions)
            .filter_map(|action| match action {
                WidgetAction::ValueChanged { change } => Some(change.value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn typed_path_becomes_file_value() {
        let mut resume = FileInput::for_field(FieldName::Resume);
        let keys: Vec<_> = "cv.pdf".chars().map(KeyCode::Char).collect();
        let values = changes(&mut resume, &keys);
        assert_eq!(values.last(), Some(&Value::file("cv.pdf")));
    }

    #[test]
    fn clearing_path_reports_none() {
        let mut resume = FileInput::for_field(FieldName::Resume);
        let values = changes(&mut resume, &[KeyCode::Char('a'), KeyCode::Backspace]);
        assert_eq!(values, vec![Value::file("a"), Value::None]);
    }

    #[test]
    fn set_value_round_trips_path() {
        let mut resume = FileInput::for_field(FieldName::Resume);
        resume.set_value(Value::file("/srv/cv.docx").wrapped());
        assert_eq!(resume.value(), Some(Value::file("/srv/cv.docx")));
        resume.set_value(Value::None);
        assert_eq!(resume.value(), Some(Value::None));
    }
}
