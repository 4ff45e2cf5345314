pub mod dispatch;
pub mod output;
