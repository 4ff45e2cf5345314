//! Cursor-and-selection editing surface over an [`EditorDocument`].

use super::document::{Block, BlockKind, EditorDocument, InlineStyle, StyledChar};
use super::surface::{ChangeListener, FormatCommand, RichTextSurface};

/// Location between characters: `col` is the insertion index in `block`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub block: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(block: usize, col: usize) -> Self {
        Self { block, col }
    }
}

pub struct EditorBuffer {
    doc: EditorDocument,
    markup: String,
    cursor: Position,
    anchor: Option<Position>,
    /// Style override for the next typed characters, set by formatting
    /// commands issued without a selection.
    typing_style: Option<InlineStyle>,
    listeners: Vec<ChangeListener>,
}

impl Default for EditorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("markup", &self.markup)
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self {
            doc: EditorDocument::new(),
            markup: String::new(),
            cursor: Position::default(),
            anchor: None,
            typing_style: None,
            listeners: Vec::new(),
        }
    }

    pub fn from_markup(markup: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_content(markup);
        buffer
    }

    pub fn document(&self) -> &EditorDocument {
        &self.doc
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Ordered selection bounds, `None` when nothing is selected.
    pub fn selection(&self) -> Option<(Position, Position)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn is_selected(&self, block: usize, col: usize) -> bool {
        self.selection().is_some_and(|(start, end)| {
            let pos = Position::new(block, col);
            pos >= start && pos < end
        })
    }

    /// Style the next typed character will get.
    pub fn typing_style(&self) -> InlineStyle {
        self.typing_style.unwrap_or_else(|| self.style_before_cursor())
    }

    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }

    // ── Editing ──────────────────────────────────────────────────────────

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.newline();
            return;
        }
        self.delete_selection();
        let style = self.typing_style();
        let Position { block, col } = self.cursor;
        self.doc.blocks_mut()[block]
            .chars
            .insert(col, StyledChar { ch, style });
        self.cursor.col += 1;
        self.changed();
    }

    /// Insert pasted text; newlines start new blocks. Notifies once.
    pub fn insert_str(&mut self, text: &str) {
        self.delete_selection();
        let style = self.typing_style();
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' => self.split_block(),
                _ => {
                    let Position { block, col } = self.cursor;
                    self.doc.blocks_mut()[block]
                        .chars
                        .insert(col, StyledChar { ch, style });
                    self.cursor.col += 1;
                }
            }
        }
        self.changed();
    }

    /// Enter: split the block; on an empty bullet, leave the list instead.
    pub fn newline(&mut self) {
        self.delete_selection();
        let current = &mut self.doc.blocks_mut()[self.cursor.block];
        if current.kind == BlockKind::Bullet && current.is_empty() {
            current.kind = BlockKind::Paragraph;
        } else {
            self.split_block();
        }
        self.changed();
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            self.changed();
            return;
        }
        let Position { block, col } = self.cursor;
        if col > 0 {
            self.doc.blocks_mut()[block].chars.remove(col - 1);
            self.cursor.col -= 1;
        } else if self.doc.blocks()[block].kind == BlockKind::Bullet {
            self.doc.blocks_mut()[block].kind = BlockKind::Paragraph;
        } else if block > 0 {
            let blocks = self.doc.blocks_mut();
            let removed = blocks.remove(block);
            let prev = &mut blocks[block - 1];
            let join_at = prev.len();
            prev.chars.extend(removed.chars);
            self.cursor = Position::new(block - 1, join_at);
        } else {
            return;
        }
        self.changed();
    }

    pub fn delete(&mut self) {
        if self.delete_selection() {
            self.changed();
            return;
        }
        let Position { block, col } = self.cursor;
        let blocks = self.doc.blocks_mut();
        if col < blocks[block].len() {
            blocks[block].chars.remove(col);
        } else if block + 1 < blocks.len() {
            let next = blocks.remove(block + 1);
            blocks[block].chars.extend(next.chars);
        } else {
            return;
        }
        self.changed();
    }

    pub fn select_all(&mut self) {
        self.anchor = Some(Position::default());
        let last = self.doc.blocks().len() - 1;
        self.cursor = Position::new(last, self.doc.blocks()[last].len());
    }

    // ── Movement ─────────────────────────────────────────────────────────

    pub fn move_left(&mut self, extend: bool) {
        self.begin_move(extend);
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.block > 0 {
            self.cursor.block -= 1;
            self.cursor.col = self.block_len(self.cursor.block);
        }
    }

    pub fn move_right(&mut self, extend: bool) {
        self.begin_move(extend);
        if self.cursor.col < self.block_len(self.cursor.block) {
            self.cursor.col += 1;
        } else if self.cursor.block + 1 < self.doc.blocks().len() {
            self.cursor.block += 1;
            self.cursor.col = 0;
        }
    }

    pub fn move_up(&mut self, extend: bool) {
        self.begin_move(extend);
        if self.cursor.block > 0 {
            self.cursor.block -= 1;
            self.cursor.col = self.cursor.col.min(self.block_len(self.cursor.block));
        } else {
            self.cursor.col = 0;
        }
    }

    pub fn move_down(&mut self, extend: bool) {
        self.begin_move(extend);
        if self.cursor.block + 1 < self.doc.blocks().len() {
            self.cursor.block += 1;
            self.cursor.col = self.cursor.col.min(self.block_len(self.cursor.block));
        } else {
            self.cursor.col = self.block_len(self.cursor.block);
        }
    }

    pub fn move_home(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor.col = 0;
    }

    pub fn move_end(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor.col = self.block_len(self.cursor.block);
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn block_len(&self, block: usize) -> usize {
        self.doc.blocks()[block].len()
    }

    fn begin_move(&mut self, extend: bool) {
        self.typing_style = None;
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
    }

    fn style_before_cursor(&self) -> InlineStyle {
        let Position { block, col } = self.cursor;
        if col > 0 {
            self.doc.blocks()[block].chars[col - 1].style
        } else {
            InlineStyle::PLAIN
        }
    }

    fn split_block(&mut self) {
        let Position { block, col } = self.cursor;
        let blocks = self.doc.blocks_mut();
        let tail = blocks[block].chars.split_off(col);
        let kind = blocks[block].kind;
        blocks.insert(block + 1, Block { kind, chars: tail });
        self.cursor = Position::new(block + 1, 0);
    }

    /// Remove the selected range. Returns whether anything was removed.
    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        let blocks = self.doc.blocks_mut();
        if start.block == end.block {
            blocks[start.block].chars.drain(start.col..end.col);
        } else {
            let tail = blocks[end.block].chars.split_off(end.col);
            blocks[start.block].chars.truncate(start.col);
            blocks[start.block].chars.extend(tail);
            blocks.drain(start.block + 1..=end.block);
        }
        self.cursor = start;
        self.anchor = None;
        true
    }

    /// Blocks touched by the selection, or the cursor block.
    fn touched_blocks(&self) -> std::ops::RangeInclusive<usize> {
        match self.selection() {
            Some((start, end)) => start.block..=end.block,
            None => self.cursor.block..=self.cursor.block,
        }
    }

    fn toggle_inline(&mut self, flag: fn(&mut InlineStyle) -> &mut bool) {
        let Some((start, end)) = self.selection() else {
            let mut style = self.typing_style();
            let value = flag(&mut style);
            *value = !*value;
            self.typing_style = Some(style);
            return;
        };

        let mut selected = Vec::new();
        for (b, block) in self.doc.blocks().iter().enumerate() {
            for col in 0..block.len() {
                let pos = Position::new(b, col);
                if pos >= start && pos < end {
                    selected.push(pos);
                }
            }
        }
        if selected.is_empty() {
            return;
        }

        let all_set = selected.iter().all(|p| {
            let mut style = self.doc.blocks()[p.block].chars[p.col].style;
            *flag(&mut style)
        });
        let blocks = self.doc.blocks_mut();
        for p in selected {
            *flag(&mut blocks[p.block].chars[p.col].style) = !all_set;
        }
        self.changed();
    }

    fn toggle_bullets(&mut self) {
        let range = self.touched_blocks();
        let all_bullets = self.doc.blocks()[range.clone()]
            .iter()
            .all(|b| b.kind == BlockKind::Bullet);
        let kind = if all_bullets {
            BlockKind::Paragraph
        } else {
            BlockKind::Bullet
        };
        for block in &mut self.doc.blocks_mut()[range] {
            block.kind = kind;
        }
        self.changed();
    }

    fn changed(&mut self) {
        self.markup = self.doc.to_markup();
        for listener in &mut self.listeners {
            listener(&self.markup);
        }
    }
}

impl RichTextSurface for EditorBuffer {
    fn content(&self) -> &str {
        &self.markup
    }

    fn set_content(&mut self, markup: &str) {
        self.doc = EditorDocument::parse(markup);
        self.markup = self.doc.to_markup();
        let last = self.doc.blocks().len() - 1;
        self.cursor = Position::new(last, self.doc.blocks()[last].len());
        self.anchor = None;
        self.typing_style = None;
    }

    fn apply_format(&mut self, command: FormatCommand) {
        match command {
            FormatCommand::Bold => self.toggle_inline(|s| &mut s.bold),
            FormatCommand::Italic => self.toggle_inline(|s| &mut s.italic),
            FormatCommand::Underline => self.toggle_inline(|s| &mut s.underline),
            FormatCommand::BulletList => self.toggle_bullets(),
        }
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }
}
