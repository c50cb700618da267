pub mod button;
pub mod choice;
pub mod file;
pub mod select;
pub mod text;
pub mod text_edit;
pub mod textarea;
