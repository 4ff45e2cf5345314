pub mod history;
pub mod markup;
pub mod result;
pub mod tone;

pub use history::{HistoryEntry, HistoryList, MAX_HISTORY_ENTRIES};
pub use result::RewriteResult;
pub use tone::Tone;
