use super::text_edit;
use crate::core::value::Value;
use crate::form::FieldName;
use crate::terminal::{CursorPos, KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, InteractionResult, Interactive, RenderContext, TextEditState,
};
use unicode_width::UnicodeWidthChar;

/// Single-line text entry. Email, URL and plain text fields all use it; their
/// shapes are checked by the form constraints on submit.
pub struct TextInput {
    base: WidgetBase,
    value: String,
    cursor: usize,
    placeholder: Option<String>,
}

impl TextInput {
    pub fn for_field(field: FieldName) -> Self {
        let input = Self::from_base(WidgetBase::for_field(field));
        match field.placeholder() {
            Some(placeholder) => input.with_placeholder(placeholder),
            None => input,
        }
    }

    fn from_base(base: WidgetBase) -> Self {
        Self {
            base,
            value: String::new(),
            cursor: 0,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    fn edited_result(&self) -> InteractionResult {
        InteractionResult::changed(self.base.target(), Value::Text(self.value.clone()))
    }
}

impl Drawable for TextInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let span = match &self.placeholder {
            Some(placeholder) if self.value.is_empty() => {
                Span::styled(placeholder.clone(), Style::new().color(Color::DarkGrey))
            }
            _ => Span::new(self.value.clone()),
        };
        DrawOutput::line(vec![span])
    }
}

impl Interactive for TextInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Char(ch) => {
                text_edit::insert_char(&mut self.value, &mut self.cursor, ch);
                self.edited_result()
            }
            KeyCode::Backspace => {
                if text_edit::backspace_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Delete => {
                if text_edit::delete_char(&mut self.value, &mut self.cursor) {
                    return self.edited_result();
                }
                InteractionResult::ignored()
            }
            KeyCode::Left => {
                if text_edit::move_left(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Right => {
                if text_edit::move_right(&mut self.cursor, &self.value) {
                    return InteractionResult::handled();
                }
                InteractionResult::ignored()
            }
            KeyCode::Home => {
                self.cursor = 0;
                InteractionResult::handled()
            }
            KeyCode::End => {
                self.cursor = text_edit::char_count(&self.value);
                InteractionResult::handled()
            }
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn text_editing(&mut self) -> Option<TextEditState<'_>> {
        Some(TextEditState {
            value: &mut self.value,
            cursor: &mut self.cursor,
        })
    }

    fn after_text_edit(&mut self) -> InteractionResult {
        self.edited_result()
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        let col: usize = self
            .value
            .chars()
            .take(text_edit::clamp_cursor(self.cursor, &self.value))
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
        Some(Value::Text(self.value.clone()))
    }

    fn set_value(&mut self, value: Value) {
        if let Some(text) = value.to_text_scalar() {
            self.value = text;
            self.cursor = text_edit::char_count(&self.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TextInput;
    use crate::core::value::Value;
    use crate::form::FieldName;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::{Interactive, TextAction};

    fn type_str(input: &mut TextInput, text: &str) -> Vec<WidgetAction> {
        text.chars()
            .flat_map(|ch| input.on_key(KeyEvent::plain(KeyCode::Char(ch))).actions)
            .collect()
    }

    #[test]
    fn typing_reports_full_buffer() {
        let mut input = TextInput::for_field(FieldName::FirstName);
        let actions = type_str(&mut input, "Ada");
        let Some(WidgetAction::ValueChanged { change }) = actions.last() else {
            panic!("expected value change");
        };
        assert_eq!(change.target, FieldName::FirstName);
        assert_eq!(change.value, Value::text("Ada"));
    }

    #[test]
    fn cursor_movement_does_not_report_change() {
        let mut input = TextInput::for_field(FieldName::LastName);
        type_str(&mut input, "Byron");
        let result = input.on_key(KeyEvent::plain(KeyCode::Left));
        assert!(result.handled);
        assert!(result.actions.is_empty());
    }

    #[test]
    fn enter_finishes_input() {
        let mut input = TextInput::for_field(FieldName::Contact);
        let result = input.on_key(KeyEvent::plain(KeyCode::Enter));
        assert!(matches!(result.actions.as_slice(), [WidgetAction::InputDone]));
    }

    #[test]
    fn word_delete_reports_change() {
        let mut input = TextInput::for_field(FieldName::Email);
        input.set_value(Value::text("ada@example.com"));
        let result = input.on_text_action(TextAction::DeleteWordLeft);
        assert_eq!(input.text(), "ada@example.");
        assert!(matches!(
            result.actions.as_slice(),
            [WidgetAction::ValueChanged { .. }]
        ));
    }

    #[test]
    fn set_value_unwraps_single_element_list() {
        let mut input = TextInput::for_field(FieldName::Url);
        input.set_value(Value::text("https://a.io").wrapped());
        assert_eq!(input.text(), "https://a.io");
    }
}
