use crate::runtime::effect::Effect;
use crate::runtime::event::WidgetAction;
use crate::runtime::intent::Intent;
use crate::runtime::key_bindings::KeyBindings;
use crate::runtime::reducer::Reducer;
use crate::state::FormView;
use crate::terminal::{Terminal, TerminalEvent};
use crate::ui::renderer::Renderer;
use std::io;
use std::time::Duration;

const POLL_TIMEOUT: Duration = Duration::from_millis(120);

pub struct Runtime {
    view: FormView,
    terminal: Terminal,
    key_bindings: KeyBindings,
    renderer: Renderer,
}

impl Runtime {
    pub fn new(view: FormView, terminal: Terminal) -> Self {
        Self::with_key_bindings(view, terminal, KeyBindings::new())
    }

    pub fn with_key_bindings(view: FormView, terminal: Terminal, key_bindings: KeyBindings) -> Self {
        Self {
            view,
            terminal,
            key_bindings,
            renderer: Renderer::default(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.render()?;

            while !self.view.should_exit() {
                let event = self.terminal.poll_event(POLL_TIMEOUT)?;
                self.dispatch_terminal_event(event)?;
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn dispatch_terminal_event(&mut self, event: TerminalEvent) -> io::Result<()> {
        match event {
            TerminalEvent::Resize(size) => {
                self.terminal.set_size(size);
                self.render()
            }
            TerminalEvent::Key(key) => {
                let intent = self.key_bindings.resolve_or_input(key);
                self.process_intent(intent)
            }
            TerminalEvent::Tick => self.process_intent(Intent::Tick),
        }
    }

    fn process_intent(&mut self, intent: Intent) -> io::Result<()> {
        let effects = Reducer::reduce(&mut self.view, intent);
        self.apply_effects(effects)
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) -> io::Result<()> {
        let mut render_requested = false;

        for effect in effects {
            match effect {
                Effect::Action(action) => {
                    render_requested |= self.apply_action(action);
                }
                Effect::RequestRender => {
                    render_requested = true;
                }
            }
        }

        if render_requested {
            self.render()?;
        }

        Ok(())
    }

    fn apply_action(&mut self, action: WidgetAction) -> bool {
        self.view.handle_action(action)
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.view, self.terminal.size());
        self.terminal.render_frame(&frame)
    }
}
