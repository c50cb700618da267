use crate::core::value::Value;
use crate::form::FieldName;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

/// Mutually exclusive options, shown side by side as radio buttons.
/// Starts with nothing selected.
pub struct ChoiceInput {
    base: WidgetBase,
    options: Vec<String>,
    selected: Option<usize>,
}

impl ChoiceInput {
    pub fn for_field(field: FieldName) -> Self {
        Self {
            base: WidgetBase::for_field(field),
            options: owned_options(field),
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    fn select(&mut self, next: Option<usize>) -> InteractionResult {
        if next == self.selected || next.is_none() {
            return InteractionResult::ignored();
        }
        self.selected = next;
        InteractionResult::changed(self.base.target(), self.selected_value())
    }

    fn select_by_letter(&mut self, ch: char) -> Option<usize> {
        let needle = ch.to_ascii_lowercase();
        self.options.iter().position(|opt| {
            opt.chars()
                .next()
                .is_some_and(|c| c.to_ascii_lowercase() == needle)
        })
    }

    fn selected_value(&self) -> Value {
        Value::Text(self.selected().unwrap_or("").to_string())
    }
}

/// Moves a selection one step through `len` options, wrapping. With nothing
/// selected, forward lands on the first option and backward on the last.
pub(crate) fn step_selection(selected: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (selected, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(index), true) => (index + 1) % len,
        (Some(index), false) => (index + len - 1) % len,
    })
}

pub(crate) fn owned_options(field: FieldName) -> Vec<String> {
    field
        .options()
        .unwrap_or_default()
        .iter()
        .map(|option| option.to_string())
        .collect()
}

pub(crate) fn display_option(option: &str) -> String {
    if option.len() <= 3 {
        return option.to_ascii_uppercase();
    }
    let mut chars = option.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Drawable for ChoiceInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, _ctx: &RenderContext) -> DrawOutput {
        let active_style = Style::new().color(Color::Cyan).bold();
        let inactive_style = Style::new().color(Color::DarkGrey);

        let mut spans = Vec::new();
        for (index, option) in self.options.iter().enumerate() {
            if index > 0 {
                spans.push(Span::new("   "));
            }
            let is_selected = self.selected == Some(index);
            if is_selected {
                spans.push(Span::styled("●", Style::new().color(Color::Green).bold()));
            } else {
                spans.push(Span::styled("○", inactive_style));
            }
            spans.push(Span::new(" "));
            let style = if is_selected { active_style } else { inactive_style };
            spans.push(Span::styled(display_option(option), style));
        }

        DrawOutput::line(spans)
    }
}

impl Interactive for ChoiceInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        let len = self.options.len();
        match key.code {
            KeyCode::Left | KeyCode::Up => self.select(step_selection(self.selected, len, false)),
            KeyCode::Right | KeyCode::Down => self.select(step_selection(self.selected, len, true)),
            KeyCode::Char(' ') if self.selected.is_none() => self.select(step_selection(None, len, true)),
            KeyCode::Char(ch) => {
                let next = self.select_by_letter(ch);
                self.select(next)
            }
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

#[cfg(test)]
mod tests {
    use super::{ChoiceInput, display_option, step_selection};
    use crate::core::value::Value;
    use crate::form::FieldName;
    use crate::runtime::event::WidgetAction;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::Interactive;

    fn last_value(actions: &[WidgetAction]) -> Option<Value> {
        actions.iter().rev().find_map(|action| match action {
            WidgetAction::ValueChanged { change } => Some(change.value.clone()),
            _ => None,
        })
    }

    #[test]
    fn starts_unselected() {
        let gender = ChoiceInput::for_field(FieldName::Gender);
        assert_eq!(gender.selected(), None);
        assert_eq!(gender.value(), Some(Value::text("")));
    }

    #[test]
    fn selecting_another_option_replaces_the_first() {
        let mut gender = ChoiceInput::for_field(FieldName::Gender);
        let first = gender.on_key(KeyEvent::plain(KeyCode::Char('m')));
        assert_eq!(last_value(&first.actions), Some(Value::text("male")));

        let second = gender.on_key(KeyEvent::plain(KeyCode::Char('o')));
        assert_eq!(last_value(&second.actions), Some(Value::text("other")));
        assert_eq!(gender.selected(), Some("other"));
    }

    #[test]
    fn reselecting_same_option_reports_nothing() {
        let mut gender = ChoiceInput::for_field(FieldName::Gender);
        gender.on_key(KeyEvent::plain(KeyCode::Char('f')));
        let again = gender.on_key(KeyEvent::plain(KeyCode::Char('f')));
        assert!(again.actions.is_empty());
    }

    #[test]
    fn arrows_wrap_and_set_value_clears_unknown() {
        assert_eq!(step_selection(None, 3, false), Some(2));
        assert_eq!(step_selection(Some(2), 3, true), Some(0));
        assert_eq!(step_selection(None, 0, true), None);

        let mut gender = ChoiceInput::for_field(FieldName::Gender);
        gender.set_value(Value::text("female"));
        assert_eq!(gender.selected(), Some("female"));
        gender.set_value(Value::text(""));
        assert_eq!(gender.selected(), None);
    }

    #[test]
    fn option_labels() {
        assert_eq!(display_option("usa"), "USA");
        assert_eq!(display_option("india"), "India");
    }
}
