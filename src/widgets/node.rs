use crate::core::value::Value;
use crate::form::{FieldKind, FieldName};
use crate::terminal::{CursorPos, KeyEvent};
use crate::widgets::inputs::button::ButtonInput;
use crate::widgets::inputs::choice::ChoiceInput;
use crate::widgets::inputs::file::FileInput;
use crate::widgets::inputs::select::SelectInput;
use crate::widgets::inputs::text::TextInput;
use crate::widgets::inputs::textarea::TextAreaInput;
use crate::widgets::traits::{
    DrawOutput, InteractionResult, InteractiveNode, RenderContext, TextAction,
};

pub enum Node {
    /// An input bound to a form field; drawn under its label.
    Field(Box<dyn InteractiveNode>),
    /// An action button; buttons share one row.
    Button(Box<dyn InteractiveNode>),
}

impl Node {
    /// Builds the widget matching `field`'s kind.
    pub fn for_field(field: FieldName) -> Self {
        let widget: Box<dyn InteractiveNode> = match field.kind() {
            FieldKind::Text | FieldKind::Email | FieldKind::Url => {
                Box::new(TextInput::for_field(field))
            }
            FieldKind::Radio => Box::new(ChoiceInput::for_field(field)),
            FieldKind::Select => Box::new(SelectInput::for_field(field)),
            FieldKind::File => Box::new(FileInput::for_field(field)),
            FieldKind::TextArea => Box::new(TextAreaInput::for_field(field)),
        };
        Self::Field(widget)
    }

    pub fn button(button: ButtonInput) -> Self {
        Self::Button(Box::new(button))
    }

    fn widget(&self) -> &Box<dyn InteractiveNode> {
        match self {
            Self::Field(w) | Self::Button(w) => w,
        }
    }

    fn widget_mut(&mut self) -> &mut Box<dyn InteractiveNode> {
        match self {
            Self::Field(w) | Self::Button(w) => w,
        }
    }

    pub fn id(&self) -> &str {
        self.widget().id()
    }

    pub fn label(&self) -> &str {
        self.widget().label()
    }

    pub fn is_button(&self) -> bool {
        matches!(self, Self::Button(_))
    }

    pub fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        self.widget().draw(ctx)
    }

    pub fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        self.widget_mut().on_key(key)
    }

    pub fn on_text_action(&mut self, action: TextAction) -> InteractionResult {
        self.widget_mut().on_text_action(action)
    }

    pub fn cursor_pos(&self) -> Option<CursorPos> {
        self.widget().cursor_pos()
    }

    pub fn target(&self) -> Option<FieldName> {
        self.widget().target()
    }

    pub fn value(&self) -> Option<Value> {
        self.widget().value()
    }

    pub fn set_value(&mut self, value: Value) {
        self.widget_mut().set_value(value);
    }
}
