pub mod tag_input;
pub mod text_area;
pub mod tool_select;

pub use tag_input::TagInput;
pub use text_area::TextArea;
pub use tool_select::ToolSelect;
