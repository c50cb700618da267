use crate::widgets::node::Node;

#[derive(Debug, Default, Clone)]
pub struct FocusState {
    targets: Vec<String>,
    index: Option<usize>,
}

impl FocusState {
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut state = Self::default();
        state.rebuild(nodes);
        state
    }

    pub fn rebuild(&mut self, nodes: &[Node]) {
        self.targets = nodes.iter().map(|node| node.id().to_string()).collect();
        self.index = if self.targets.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    pub fn current_id(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.targets.get(i))
            .map(String::as_str)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    /// Unknown ids leave the focus where it was.
    pub fn set_focus_by_id(&mut self, id: &str) {
        if let Some(index) = self.targets.iter().position(|target| target == id) {
            self.index = Some(index);
        }
    }

    pub fn next(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        if self.targets.is_empty() {
            self.index = None;
            return;
        }
        self.index = Some((current + 1) % self.targets.len());
    }

    pub fn prev(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        if self.targets.is_empty() {
            self.index = None;
            return;
        }
        self.index = Some((current + self.targets.len() - 1) % self.targets.len());
    }
}

#[cfg(test)]
mod tests {
    use super::FocusState;
    use crate::form::FieldName;
    use crate::widgets::inputs::button::ButtonInput;
    use crate::widgets::node::Node;

    fn nodes() -> Vec<Node> {
        vec![
            Node::for_field(FieldName::FirstName),
            Node::for_field(FieldName::LastName),
            Node::button(ButtonInput::submit()),
        ]
    }

    #[test]
    fn cycles_forward_and_backward() {
        let mut focus = FocusState::from_nodes(&nodes());
        assert_eq!(focus.current_id(), Some("firstname"));

        focus.prev();
        assert_eq!(focus.current_id(), Some("submit"));

        focus.next();
        focus.next();
        assert_eq!(focus.current_id(), Some("lastname"));
    }

    #[test]
    fn unknown_id_keeps_focus() {
        let mut focus = FocusState::from_nodes(&nodes());
        focus.set_focus_by_id("lastname");
        focus.set_focus_by_id("missing");
        assert_eq!(focus.current_index(), Some(1));
    }

    #[test]
    fn empty_node_list_has_no_focus() {
        let mut focus = FocusState::from_nodes(&[]);
        focus.next();
        assert_eq!(focus.current_id(), None);
    }
}
