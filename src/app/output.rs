//! Plain-terminal rendering for the one-shot commands.

use elite_editor::domain::{HistoryEntry, HistoryList, RewriteResult, Tone, markup};
use elite_editor::editor::{BlockKind, EditorDocument};
use elite_editor::ui::style as ui;

const PREVIEW_CHARS: usize = 60;

/// Markup as indented terminal lines, bullets prefixed with `•`.
pub fn markup_lines(markup: &str) -> Vec<String> {
    EditorDocument::parse(markup)
        .blocks()
        .iter()
        .map(|block| match block.kind {
            BlockKind::Bullet => format!("  • {}", block.text()),
            BlockKind::Paragraph => format!("  {}", block.text()),
        })
        .collect()
}

pub fn render_result(tone: Tone, result: &RewriteResult) -> String {
    let mut lines = vec![
        format!("◆ {}", ui::header(format!("{tone} Polish"))),
        String::new(),
    ];
    lines.extend(markup_lines(&result.polished_text));
    lines.push(String::new());
    lines.push(ui::header("Coach's Improvements"));
    if result.summary_of_changes.is_empty() {
        lines.push(format!("  {}", ui::dim("No changes needed")));
    }
    for change in &result.summary_of_changes {
        lines.push(format!("  {} {change}", ui::accent("✓")));
    }
    lines.join("\n")
}

pub fn render_history_list(history: &HistoryList) -> String {
    if history.is_empty() {
        return ui::dim("No previous drafts");
    }
    let mut lines = vec![format!("◆ {}", ui::header("Recent History")), String::new()];
    for entry in history {
        lines.push(format!(
            "  {}  {}  {}  {}",
            ui::dim(&entry.id),
            ui::cyan(format!("{:<12}", entry.tone)),
            ui::dim(entry.local_time()),
            markup::preview(&entry.original, PREVIEW_CHARS)
        ));
    }
    lines.join("\n")
}

pub fn render_entry(entry: &HistoryEntry) -> String {
    let mut lines = vec![
        format!(
            "◆ {} {}",
            ui::header(format!("{} Polish", entry.tone)),
            ui::dim(format!("({} at {})", entry.id, entry.local_time()))
        ),
        String::new(),
        ui::cyan("Original"),
    ];
    lines.extend(markup_lines(&entry.original));
    lines.push(String::new());
    lines.push(ui::cyan("Polished"));
    lines.extend(markup_lines(&entry.polished));
    lines.push(String::new());
    lines.push(ui::header("Coach's Improvements"));
    for change in &entry.summary {
        lines.push(format!("  {} {change}", ui::accent("✓")));
    }
    lines.join("\n")
}

pub fn render_tones(default_tone: Tone) -> String {
    Tone::ALL
        .iter()
        .map(|&tone| {
            let marker = if tone == default_tone {
                ui::success("●")
            } else {
                ui::dim("○")
            };
            format!(
                "  {marker} {} {}",
                ui::value(format!("{:<12}", tone.label())),
                ui::dim(tone.description())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
