use crate::runtime::event::WidgetAction;
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::Span;
use crate::ui::style::{Color, Style};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{DrawOutput, Drawable, InteractionResult, Interactive, RenderContext};

pub struct ButtonInput {
    base: WidgetBase,
    action: WidgetAction,
}

impl ButtonInput {
    pub fn new(id: impl Into<String>, label: impl Into<String>, action: WidgetAction) -> Self {
        Self {
            base: WidgetBase::new(id, label),
            action,
        }
    }

    pub fn submit() -> Self {
        Self::new("submit", "Submit", WidgetAction::SubmitRequested)
    }

    pub fn reset() -> Self {
        Self::new("reset", "Reset", WidgetAction::ResetRequested)
    }
}

impl Drawable for ButtonInput {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        let style = if self.base.is_focused(ctx) {
            Style::new().color(Color::White).background(Color::Blue).bold()
        } else {
            Style::new().color(Color::DarkGrey)
        };
        DrawOutput::line(vec![Span::styled(format!("[ {} ]", self.base.label()), style)])
    }
}

impl Interactive for ButtonInput {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => InteractionResult::with_action(self.action.clone()),
            _ => InteractionResult::ignored(),
        }
    }
}
