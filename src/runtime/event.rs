use crate::core::value::Value;
use crate::form::FieldName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub target: FieldName,
    pub value: Value,
}

impl ValueChange {
    pub fn new(target: FieldName, value: Value) -> Self {
        Self { target, value }
    }
}

/// Actions emitted by widgets in `InteractionResult`. These flow upward from
/// widgets to the form view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    ValueChanged { change: ValueChange },
    /// Widget is done with its value; focus moves on, or the form submits
    /// when this was the last input.
    InputDone,
    SubmitRequested,
    ResetRequested,
}
