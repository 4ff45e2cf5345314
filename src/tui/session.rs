//! Glue between the terminal, the editing surface and the controller.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::runtime::Handle;

use super::state::UiState;
use crate::clipboard::{ClipboardSink, CopyPayload};
use crate::controller::{self, Action, AppState, Controller, Effect};
use crate::editor::{EditorBuffer, RichTextSurface};

pub struct Session {
    pub(crate) controller: Controller,
    pub(crate) editor: EditorBuffer,
    pub(crate) ui: UiState,
    clipboard: Box<dyn ClipboardSink>,
    /// Markup published by the editor's change listener, not yet dispatched.
    edits: Arc<Mutex<Vec<String>>>,
    results_tx: Sender<Action>,
    results_rx: Receiver<Action>,
    runtime: Handle,
}

impl Session {
    pub fn new(controller: Controller, clipboard: Box<dyn ClipboardSink>, runtime: Handle) -> Self {
        let edits = Arc::new(Mutex::new(Vec::new()));
        let mut editor = EditorBuffer::from_markup(&controller.state().draft);
        let queue = Arc::clone(&edits);
        editor.on_change(Box::new(move |markup: &str| {
            if let Ok(mut pending) = queue.lock() {
                pending.push(markup.to_string());
            }
        }));

        let (results_tx, results_rx) = mpsc::channel();
        Self {
            controller,
            editor,
            ui: UiState::default(),
            clipboard,
            edits,
            results_tx,
            results_rx,
            runtime,
        }
    }

    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    /// Open the backend connection in the background.
    pub fn warmup(&self) {
        let client = self.controller.client();
        self.runtime.spawn(async move { client.warmup().await });
    }

    pub fn dispatch(&mut self, action: Action) {
        if matches!(
            action,
            Action::SubmitSucceeded(_) | Action::HistoryEntryLoaded(_) | Action::Reset
        ) {
            self.ui.result_scroll = 0;
        }
        let effects = self.controller.dispatch(action);
        self.run_effects(effects);
        self.ui.clamp_history_cursor(self.controller.history().len());
    }

    /// Feed pending editor changes and finished rewrites into the controller.
    pub fn pump(&mut self) {
        let latest = self
            .edits
            .lock()
            .ok()
            .and_then(|mut pending| std::mem::take(&mut *pending).pop());
        if let Some(markup) = latest {
            self.dispatch(Action::DraftChanged(markup));
        }

        while let Ok(action) = self.results_rx.try_recv() {
            self.dispatch(action);
        }
    }

    pub fn copy_result(&mut self) {
        let Some(result) = self.state().result.as_ref() else {
            return;
        };
        let payload = CopyPayload::from_markup(&result.polished_text);
        match self.clipboard.write(&payload) {
            Ok(()) => self.ui.copied_at = Some(Instant::now()),
            Err(e) => tracing::warn!(error = %e, "copy failed"),
        }
    }

    /// Id of the history row under the cursor.
    pub fn selected_history_id(&self) -> Option<String> {
        self.controller
            .history()
            .entries()
            .get(self.ui.history_cursor)
            .map(|entry| entry.id.clone())
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        controller::apply_to_surface(&mut self.editor, &effects);
        for effect in effects {
            if let Effect::Rewrite(job) = effect {
                let client = self.controller.client();
                let results = self.results_tx.clone();
                self.runtime.spawn(async move {
                    let action = job.run(client).await;
                    if results.send(action).is_err() {
                        tracing::debug!("rewrite finished after the editor closed");
                    }
                });
            }
        }
    }
}
