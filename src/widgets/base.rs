use crate::form::FieldName;
use crate::widgets::traits::RenderContext;

#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: String,
    label: String,
    target: Option<FieldName>,
}

impl WidgetBase {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            target: None,
        }
    }

    /// A widget bound to `field`, using the field's name and label.
    pub fn for_field(field: FieldName) -> Self {
        Self {
            id: field.as_str().to_string(),
            label: field.label().to_string(),
            target: Some(field),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn target(&self) -> Option<FieldName> {
        self.target
    }

    pub fn is_focused(&self, ctx: &RenderContext) -> bool {
        ctx.is_focused(&self.id)
    }
}
