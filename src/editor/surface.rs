use strum::{Display, EnumString};

/// Inline or block formatting a surface can apply to its live content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    BulletList,
}

pub type ChangeListener = Box<dyn FnMut(&str) + Send>;

/// An editable rich-text region whose serialized markup is the current draft.
///
/// The controller only ever talks to this capability; concrete surfaces
/// (the terminal editor, test doubles) decide how edits happen.
pub trait RichTextSurface {
    /// Current content as markup.
    fn content(&self) -> &str;

    /// Overwrite the content. Listeners are not notified.
    fn set_content(&mut self, markup: &str);

    /// Apply `command` to the selection (or the pending typing style when
    /// nothing is selected).
    fn apply_format(&mut self, command: FormatCommand);

    /// Register a listener called with the new markup after every edit.
    fn on_change(&mut self, listener: ChangeListener);
}
