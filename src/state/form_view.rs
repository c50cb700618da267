use crate::core::value::Value;
use crate::form::constraints::{self, ConstraintOptions, Violation};
use crate::form::{FieldName, FormState, ReportSink, UpdateShape, reset, update};
use crate::runtime::event::{ValueChange, WidgetAction};
use crate::state::focus::FocusState;
use crate::terminal::{KeyCode, KeyEvent};
use crate::widgets::inputs::button::ButtonInput;
use crate::widgets::node::Node;
use crate::widgets::traits::{InteractionResult, TextAction};
use std::collections::HashMap;

pub const DEFAULT_TITLE: &str = "Application form";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    Invalid(Vec<Violation>),
    SinkFailed(String),
}

/// Owns the form record and the widgets editing it. Widgets report edits as
/// actions; every edit goes through [`update`] so the record stays the single
/// source of truth.
pub struct FormView {
    title: String,
    state: FormState,
    nodes: Vec<Node>,
    focus: FocusState,
    shape: UpdateShape,
    constraints: ConstraintOptions,
    sink: Box<dyn ReportSink>,
    errors: HashMap<FieldName, String>,
    status: Option<Status>,
    should_exit: bool,
}

impl FormView {
    pub fn new(sink: Box<dyn ReportSink>) -> Self {
        let mut nodes: Vec<Node> = FieldName::ALL.into_iter().map(Node::for_field).collect();
        nodes.push(Node::button(ButtonInput::submit()));
        nodes.push(Node::button(ButtonInput::reset()));
        let focus = FocusState::from_nodes(&nodes);

        let mut view = Self {
            title: DEFAULT_TITLE.to_string(),
            state: reset(),
            nodes,
            focus,
            shape: UpdateShape::default(),
            constraints: ConstraintOptions::default(),
            sink,
            errors: HashMap::new(),
            status: None,
            should_exit: false,
        };
        view.hydrate_nodes();
        view
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_shape(mut self, shape: UpdateShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintOptions) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.current_id()
    }

    pub fn error_for(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn request_exit(&mut self) {
        self.should_exit = true;
    }

    pub fn focus_next(&mut self) {
        self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus.prev();
    }

    pub fn focus_field(&mut self, field: FieldName) {
        self.focus.set_focus_by_id(field.as_str());
    }

    pub fn focus_id(&mut self, id: &str) {
        self.focus.set_focus_by_id(id);
    }

    fn focused_node_mut(&mut self) -> Option<&mut Node> {
        let index = self.focus.current_index()?;
        self.nodes.get_mut(index)
    }

    pub fn dispatch_key_to_focused(&mut self, key: KeyEvent) -> InteractionResult {
        match self.focused_node_mut() {
            Some(node) => node.on_key(key),
            None => InteractionResult::ignored(),
        }
    }

    pub fn dispatch_text_action_to_focused(&mut self, action: TextAction) -> InteractionResult {
        match self.focused_node_mut() {
            Some(node) => node.on_text_action(action),
            None => InteractionResult::ignored(),
        }
    }

    /// Esc goes to the focused widget first. A widget that consumes it gives
    /// up focus; otherwise Esc leaves the form.
    pub fn cancel(&mut self) -> InteractionResult {
        let result = self.dispatch_key_to_focused(KeyEvent::plain(KeyCode::Esc));
        if result.handled {
            self.focus_next();
        } else {
            self.request_exit();
        }
        result
    }

    /// Applies one widget action. Returns whether the view needs a re-render.
    pub fn handle_action(&mut self, action: WidgetAction) -> bool {
        match action {
            WidgetAction::ValueChanged { change } => self.apply_value_change(change),
            WidgetAction::InputDone => {
                if self.focused_is_last_field() {
                    self.submit();
                } else {
                    self.focus_next();
                }
                true
            }
            WidgetAction::SubmitRequested => {
                self.submit();
                true
            }
            WidgetAction::ResetRequested => {
                self.reset_form();
                true
            }
        }
    }

    fn apply_value_change(&mut self, change: ValueChange) -> bool {
        let ValueChange { target, value } = change;
        tracing::trace!(field = %target, value = ?value, "field updated");
        self.state = update(&self.state, target, value, self.shape);
        self.errors.remove(&target);
        true
    }

    fn focused_is_last_field(&self) -> bool {
        let last_field = self.nodes.iter().rposition(|node| !node.is_button());
        last_field.is_some() && self.focus.current_index() == last_field
    }

    /// Checks every constraint and, when all hold, hands the record to the
    /// sink. The record itself is never changed by a submission.
    pub fn submit(&mut self) -> SubmitOutcome {
        let violations = constraints::check(&self.state, self.constraints);
        self.errors = violations
            .iter()
            .map(|violation| (violation.field, violation.to_string()))
            .collect();

        if let Some(first) = violations.first() {
            tracing::debug!(invalid = violations.len(), "submission blocked");
            self.focus_field(first.field);
            let noun = if violations.len() == 1 { "field" } else { "fields" };
            self.status = Some(Status::error(format!(
                "{} invalid {noun}",
                violations.len()
            )));
            return SubmitOutcome::Invalid(violations);
        }

        match self.sink.report(&self.state) {
            Ok(()) => {
                tracing::info!(sink = self.sink.name(), "form submitted");
                self.status = Some(Status::info("Submitted"));
                SubmitOutcome::Delivered
            }
            Err(err) => {
                tracing::warn!(sink = self.sink.name(), error = %err, "submission failed");
                let message = err.to_string();
                self.status = Some(Status::error(format!("Submission failed: {message}")));
                SubmitOutcome::SinkFailed(message)
            }
        }
    }

    /// Returns the record to its defaults and re-seeds every widget.
    pub fn reset_form(&mut self) {
        tracing::info!("form reset");
        self.state = reset();
        self.hydrate_nodes();
        self.errors.clear();
        self.status = Some(Status::info("Form reset"));
    }

    fn hydrate_nodes(&mut self) {
        for node in &mut self.nodes {
            if let Some(field) = node.target() {
                node.set_value(self.state.get(field).clone());
            }
        }
    }

    /// Value shown by the widget bound to `field`.
    pub fn widget_value(&self, field: FieldName) -> Option<Value> {
        self.nodes
            .iter()
            .find(|node| node.target() == Some(field))
            .and_then(Node::value)
    }
}
