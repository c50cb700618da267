pub mod base;
pub mod inputs;
pub mod node;
pub mod traits;
