pub mod constraints;
pub mod field;
pub mod sink;
pub mod state;

pub use field::{FieldKind, FieldName};
pub use sink::ReportSink;
pub use state::{DEFAULT_RECORD, FormState, UpdateShape, reset, update};
