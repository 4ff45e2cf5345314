pub mod document;
pub mod spinner;

pub use document::{DocumentView, wrap_lines, wrapped_editor_lines};
pub use spinner::{Spinner, SpinnerWidget};
