//! Full-screen terminal editor.

mod app;
pub mod session;
pub mod state;
pub mod theme;
pub mod widgets;

use anyhow::{Context, Result};

use crate::clipboard::ClipboardSink;
use crate::controller::Controller;
pub use session::Session;

/// Run the editor until the user quits. The terminal loop blocks, so it runs
/// on a blocking thread while rewrites execute on the async runtime.
pub async fn run(controller: Controller, clipboard: Box<dyn ClipboardSink>) -> Result<()> {
    let runtime = tokio::runtime::Handle::current();
    tokio::task::spawn_blocking(move || {
        let session = Session::new(controller, clipboard, runtime);
        session.warmup();
        app::run_app(session)
    })
    .await
    .context("terminal UI thread failed")?
}
