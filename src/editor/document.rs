//! Block model behind the terminal editing surface.
//!
//! A document is a list of blocks (paragraphs or bullet items), each a run of
//! characters carrying inline style flags. It converts to and from the markup
//! form stored in drafts and history.

use scraper::{ElementRef, Html};

use crate::domain::markup::escape_html;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl InlineStyle {
    pub const PLAIN: Self = Self {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn is_plain(self) -> bool {
        self == Self::PLAIN
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledChar {
    pub ch: char,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockKind {
    #[default]
    Paragraph,
    Bullet,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub chars: Vec<StyledChar>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            chars: Vec::new(),
        }
    }

    pub fn plain(kind: BlockKind, text: &str) -> Self {
        Self {
            kind,
            chars: text
                .chars()
                .map(|ch| StyledChar {
                    ch,
                    style: InlineStyle::PLAIN,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn text(&self) -> String {
        self.chars.iter().map(|c| c.ch).collect()
    }
}

/// Never empty: a blank document is one empty paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDocument {
    blocks: Vec<Block>,
}

impl Default for EditorDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorDocument {
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockKind::Paragraph)],
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Self::new()
        } else {
            Self { blocks }
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
            && self.blocks[0].kind == BlockKind::Paragraph
            && self.blocks[0].is_empty()
    }

    /// Parse markup. Known tags: `b`/`strong`, `i`/`em`, `u`, `ul`/`ol`,
    /// `li`, `p`/`div`, `br`. Anything else is transparent.
    pub fn parse(markup: &str) -> Self {
        if markup.trim().is_empty() {
            return Self::new();
        }
        let fragment = Html::parse_fragment(markup);
        let mut parser = MarkupParser::default();
        parser.walk(fragment.root_element(), InlineStyle::PLAIN);
        parser.flush();
        Self::from_blocks(parser.blocks)
    }

    /// One paragraph per line of `text`.
    pub fn from_plain_text(text: &str) -> Self {
        let blocks = text
            .trim_end()
            .lines()
            .map(|line| Block::plain(BlockKind::Paragraph, line.trim_end_matches('\r')))
            .collect();
        Self::from_blocks(blocks)
    }

    pub fn to_markup(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let mut in_list = false;
        for block in &self.blocks {
            match block.kind {
                BlockKind::Bullet => {
                    if !in_list {
                        out.push_str("<ul>");
                        in_list = true;
                    }
                    out.push_str("<li>");
                    write_inline(&mut out, &block.chars);
                    out.push_str("</li>");
                }
                BlockKind::Paragraph => {
                    if in_list {
                        out.push_str("</ul>");
                        in_list = false;
                    }
                    out.push_str("<div>");
                    write_inline(&mut out, &block.chars);
                    out.push_str("</div>");
                }
            }
        }
        if in_list {
            out.push_str("</ul>");
        }
        out
    }
}

fn write_inline(out: &mut String, chars: &[StyledChar]) {
    if chars.is_empty() {
        out.push_str("<br>");
        return;
    }

    // Spaces that HTML would collapse or trim are written as &nbsp;.
    let last = chars.len() - 1;
    let mut offset = 0;
    for run in chars.chunk_by(|a, b| a.style == b.style) {
        let style = run[0].style;
        let text: String = run
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let at = offset + i;
                let keep = c.ch == ' ' && (at == 0 || at == last || chars[at - 1].ch == ' ');
                if keep { '\u{a0}' } else { c.ch }
            })
            .collect();
        offset += run.len();
        if style.bold {
            out.push_str("<b>");
        }
        if style.italic {
            out.push_str("<i>");
        }
        if style.underline {
            out.push_str("<u>");
        }
        out.push_str(&escape_html(&text));
        if style.underline {
            out.push_str("</u>");
        }
        if style.italic {
            out.push_str("</i>");
        }
        if style.bold {
            out.push_str("</b>");
        }
    }
}

#[derive(Default)]
struct MarkupParser {
    blocks: Vec<Block>,
    current: Option<Block>,
    list_depth: usize,
    /// A `<br>` was seen; the next text starts a new block.
    pending_break: bool,
    /// The last character pushed came from collapsed whitespace.
    after_space: bool,
}

impl MarkupParser {
    fn default_kind(&self) -> BlockKind {
        if self.list_depth > 0 {
            BlockKind::Bullet
        } else {
            BlockKind::Paragraph
        }
    }

    fn flush(&mut self) {
        if let Some(mut block) = self.current.take() {
            if self.after_space {
                block.chars.pop();
            }
            self.blocks.push(block);
        }
        self.pending_break = false;
        self.after_space = false;
    }

    fn start_block(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block::new(kind));
    }

    fn line_break(&mut self) {
        let kind = self
            .current
            .as_ref()
            .map_or_else(|| self.default_kind(), |b| b.kind);
        if self.current.is_none() {
            self.current = Some(Block::new(kind));
        } else if self.pending_break {
            self.start_block(kind);
        }
        self.pending_break = true;
    }

    fn text(&mut self, text: &str, style: InlineStyle) {
        let only_space = text.chars().all(|c| c.is_ascii_whitespace());
        if only_space && (self.current.is_none() || self.pending_break) {
            return;
        }
        if self.pending_break {
            let kind = self
                .current
                .as_ref()
                .map_or_else(|| self.default_kind(), |b| b.kind);
            self.start_block(kind);
        }
        let kind = self.default_kind();
        let block = self.current.get_or_insert_with(|| Block::new(kind));
        for ch in text.chars() {
            if ch.is_ascii_whitespace() {
                if block.chars.is_empty() || self.after_space {
                    continue;
                }
                self.after_space = true;
                block.chars.push(StyledChar { ch: ' ', style });
            } else {
                self.after_space = false;
                let ch = if ch.is_whitespace() { ' ' } else { ch };
                block.chars.push(StyledChar { ch, style });
            }
        }
    }

    fn walk(&mut self, element: ElementRef<'_>, style: InlineStyle) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                self.text(text, style);
                continue;
            }
            let Some(child_el) = ElementRef::wrap(child) else {
                continue;
            };

            let name = child_el.value().name();
            match name {
                "br" => self.line_break(),
                "script" | "style" => {}
                "b" | "strong" => self.walk(child_el, InlineStyle { bold: true, ..style }),
                "i" | "em" => self.walk(child_el, InlineStyle { italic: true, ..style }),
                "u" => self.walk(child_el, InlineStyle { underline: true, ..style }),
                "ul" | "ol" => {
                    self.flush();
                    self.list_depth += 1;
                    self.walk(child_el, style);
                    self.list_depth -= 1;
                    self.flush();
                }
                "li" => {
                    self.start_block(BlockKind::Bullet);
                    self.walk(child_el, style);
                    self.flush();
                }
                "p" | "div" => {
                    let kind = self.default_kind();
                    self.start_block(kind);
                    self.walk(child_el, style);
                    self.flush();
                }
                _ => self.walk(child_el, style),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &EditorDocument) -> Vec<(BlockKind, String)> {
        doc.blocks().iter().map(|b| (b.kind, b.text())).collect()
    }

    #[test]
    fn plain_text_becomes_paragraphs() {
        let doc = EditorDocument::from_plain_text("Hi team,\r\n\nSee <this>.\n");
        assert_eq!(
            doc.to_markup(),
            "<div>Hi team,</div><div><br></div><div>See &lt;this&gt;.</div>"
        );
    }

    #[test]
    fn empty_markup_is_empty_document() {
        assert!(EditorDocument::parse("").is_empty());
        assert!(EditorDocument::parse("<br>").is_empty());
        assert_eq!(EditorDocument::new().to_markup(), "");
    }

    #[test]
    fn inline_styles_survive_a_round_trip() {
        let doc = EditorDocument::parse("<b>Hello</b> world");
        assert_eq!(doc.to_markup(), "<div><b>Hello</b> world</div>");
        let again = EditorDocument::parse(&doc.to_markup());
        assert_eq!(again, doc);
    }

    #[test]
    fn nested_styles_serialize_outer_to_inner() {
        let doc = EditorDocument::parse("<u><i><b>x</b></i></u>");
        assert_eq!(doc.to_markup(), "<div><b><i><u>x</u></i></b></div>");
    }

    #[test]
    fn strong_and_em_are_aliases() {
        let doc = EditorDocument::parse("<strong>a</strong><em>b</em>");
        let chars = &doc.blocks()[0].chars;
        assert!(chars[0].style.bold);
        assert!(chars[1].style.italic);
    }

    #[test]
    fn list_items_become_bullets() {
        let doc = EditorDocument::parse("Intro<ul><li>one</li><li>two</li></ul>Outro");
        assert_eq!(
            texts(&doc),
            vec![
                (BlockKind::Paragraph, "Intro".to_string()),
                (BlockKind::Bullet, "one".to_string()),
                (BlockKind::Bullet, "two".to_string()),
                (BlockKind::Paragraph, "Outro".to_string()),
            ]
        );
        assert_eq!(
            doc.to_markup(),
            "<div>Intro</div><ul><li>one</li><li>two</li></ul><div>Outro</div>"
        );
    }

    #[test]
    fn line_breaks_split_blocks() {
        let doc = EditorDocument::parse("a<br>b<br><br>c");
        assert_eq!(
            texts(&doc).into_iter().map(|(_, t)| t).collect::<Vec<_>>(),
            ["a", "b", "", "c"]
        );
    }

    #[test]
    fn empty_paragraph_keeps_placeholder() {
        let doc = EditorDocument::parse("<div>a</div><div><br></div><div>b</div>");
        assert_eq!(doc.blocks().len(), 3);
        assert_eq!(doc.to_markup(), "<div>a</div><div><br></div><div>b</div>");
    }

    #[test]
    fn whitespace_between_blocks_is_ignored() {
        let doc = EditorDocument::parse("<p>one</p>\n  <p>two</p>\n");
        assert_eq!(doc.blocks().len(), 2);
    }

    #[test]
    fn whitespace_runs_collapse_like_rendered_html() {
        let doc = EditorDocument::parse(
            "<p>\n    Dear   team,\n    thanks <b> for</b>\t the notes.\n</p>",
        );
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].text(), "Dear team, thanks for the notes.");
    }

    #[test]
    fn typed_space_runs_survive_a_reload() {
        use crate::editor::{EditorBuffer, RichTextSurface};

        let mut buffer = EditorBuffer::new();
        buffer.insert_str(" a  b ");
        let markup = buffer.content().to_string();
        assert_eq!(markup, "<div>&nbsp;a &nbsp;b&nbsp;</div>");
        assert_eq!(EditorDocument::parse(&markup).blocks()[0].text(), " a  b ");
    }

    #[test]
    fn unknown_tags_are_transparent_and_text_is_escaped() {
        let doc = EditorDocument::parse("<span>Tom &amp; <a href=\"#\">Jerry</a></span>");
        assert_eq!(doc.blocks()[0].text(), "Tom & Jerry");
        assert_eq!(doc.to_markup(), "<div>Tom &amp; Jerry</div>");
    }
}
