pub mod backend;
pub mod event;

pub use backend::{RenderMode, Terminal};
pub use event::{CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
