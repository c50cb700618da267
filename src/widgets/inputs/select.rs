use super::choice::{display_option, owned_options, step_selection};
use crate::core::value::Value;
use crate::form::FieldName;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

/// Drop-down style picker showing one option at a time. An unselected select
/// shows its placeholder and reports `Value::None`.
pub struct SelectInput {
    base: WidgetBase,
    options: Vec<String>,
    selected: Option<usize>,
    placeholder: String,
}

impl SelectInput {
    pub fn for_field(field: FieldName) -> Self {
        Self {
            base: WidgetBase::for_field(field),
            options: owned_options(field),
            selected: None,
            placeholder: field.placeholder().unwrap_or("Select…").to_string(),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    fn selected_value(&self) -> Value {
        match self.selected() {
            Some(option) => Value::text(option),
            None => Value::None,
        }
    }

    fn move_selection(&mut self, forward: bool) -> InteractionResult {
        let next = step_selection(self.selected, self.options.len(), forward);
        if next.is_none() {
            return InteractionResult::ignored();
        }
        self.selected = next;
        InteractionResult::changed(self.base.target(), self.selected_value())
    }
}

impl Drawable for SelectInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let focused = self.base.is_focused(ctx);
        let body = match self.selected() {
            Some(option) => Span::new(display_option(option)),
            None => Span::styled(self.placeholder.clone(), Style::new().color(Color::DarkGrey)),
        };
        let arrow_style = if focused {
            Style::new().color(Color::Cyan)
        } else {
            Style::new().color(Color::DarkGrey)
        };
        DrawOutput::line(vec![
            Span::styled("‹ ", arrow_style),
            body,
            Span::styled(" ›", arrow_style),
        ])
    }
}

impl Interactive for SelectInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Left | KeyCode::Up => self.move_selection(false),
            KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => self.move_selection(true),
            KeyCode::Enter => InteractionResult::input_done(),
            _ => InteractionResult::ignored(),
        }
    }

    fn target(&self) -> Option<FieldName> {
        self.base.target()
    }

    fn value(&self) -> Option<Value> {
        Some(self.selected_value())
    }

    fn set_value(&mut self, value: Value) {
        self.selected = value
            .as_text()
            .and_then(|text| self.options.iter().position(|opt| opt == text));
    }
}
