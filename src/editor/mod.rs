pub mod buffer;
pub mod document;
pub mod surface;

pub use buffer::{EditorBuffer, Position};
pub use document::{Block, BlockKind, EditorDocument, InlineStyle, StyledChar};
pub use surface::{ChangeListener, FormatCommand, RichTextSurface};
