use crate::runtime::effect::Effect;
use crate::runtime::intent::Intent;
use crate::state::FormView;
use crate::widgets::traits::InteractionResult;

pub struct Reducer;

impl Reducer {
    pub fn reduce(view: &mut FormView, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Exit => {
                view.request_exit();
                vec![Effect::RequestRender]
            }
            Intent::Cancel => {
                view.cancel();
                vec![Effect::RequestRender]
            }
            Intent::Submit => {
                view.submit();
                vec![Effect::RequestRender]
            }
            Intent::Reset => {
                view.reset_form();
                vec![Effect::RequestRender]
            }
            Intent::NextFocus => {
                view.focus_next();
                vec![Effect::RequestRender]
            }
            Intent::PrevFocus => {
                view.focus_prev();
                vec![Effect::RequestRender]
            }
            Intent::InputKey(key) => collect_effects(view.dispatch_key_to_focused(key)),
            Intent::TextAction(action) => {
                collect_effects(view.dispatch_text_action_to_focused(action))
            }
            Intent::Tick => vec![],
        }
    }
}

fn collect_effects(result: InteractionResult) -> Vec<Effect> {
    let mut effects: Vec<Effect> = result.actions.into_iter().map(Effect::Action).collect();
    if result.request_render {
        effects.push(Effect::RequestRender);
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::Reducer;
    use crate::core::value::Value;
    use crate::form::sink::MemorySink;
    use crate::form::{FieldName, reset};
    use crate::runtime::effect::Effect;
    use crate::runtime::event::{ValueChange, WidgetAction};
    use crate::runtime::intent::Intent;
    use crate::state::FormView;
    use crate::terminal::{KeyCode, KeyEvent};
    use crate::widgets::traits::TextAction;

    fn new_view() -> FormView {
        FormView::new(Box::new(MemorySink::new()))
    }

    #[test]
    fn input_key_turns_widget_actions_into_effects() {
        let mut view = new_view();
        let effects = Reducer::reduce(&mut view, Intent::InputKey(KeyEvent::plain(KeyCode::Char('A'))));
        assert_eq!(
            effects,
            vec![
                Effect::Action(WidgetAction::ValueChanged {
                    change: ValueChange::new(FieldName::FirstName, Value::text("A")),
                }),
                Effect::RequestRender,
            ]
        );
        // The reducer only reports; applying is the runtime's job.
        assert_eq!(view.state(), &reset());
    }

    #[test]
    fn text_action_on_button_is_ignored() {
        let mut view = new_view();
        view.focus_id("submit");
        let effects = Reducer::reduce(&mut view, Intent::TextAction(TextAction::DeleteWordLeft));
        assert!(effects.is_empty());
    }

    #[test]
    fn focus_intents_move_focus() {
        let mut view = new_view();
        Reducer::reduce(&mut view, Intent::NextFocus);
        assert_eq!(view.focused_id(), Some("lastname"));
        Reducer::reduce(&mut view, Intent::PrevFocus);
        Reducer::reduce(&mut view, Intent::PrevFocus);
        assert_eq!(view.focused_id(), Some("reset"));
    }

    #[test]
    fn exit_and_cancel_request_exit() {
        let mut view = new_view();
        Reducer::reduce(&mut view, Intent::Cancel);
        assert!(view.should_exit());

        let mut view = new_view();
        Reducer::reduce(&mut view, Intent::Exit);
        assert!(view.should_exit());
    }

    #[test]
    fn tick_is_a_no_op() {
        let mut view = new_view();
        assert!(Reducer::reduce(&mut view, Intent::Tick).is_empty());
    }
}
