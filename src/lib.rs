pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod form;
pub mod logging;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use error::{FormError, Result};
pub use form::{DEFAULT_RECORD, FieldName, FormState, UpdateShape, reset, update};
