use anyhow::{Context, Result, bail};
use dialoguer::Confirm;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use elite_editor::Config;
use elite_editor::clipboard::{self, CopyPayload};
use elite_editor::controller::{Action, Controller, SubmitOutcome};
use elite_editor::domain::Tone;
use elite_editor::editor::EditorDocument;
use elite_editor::error::{HistoryError, RewriteFailure};
use elite_editor::factory;
use elite_editor::ui::style as ui;

use crate::app::output;
use crate::cli::commands::{Cli, Commands, HistoryCommands};

/// Arguments of a one-shot polish.
struct PolishRequest {
    text: Option<String>,
    file: Option<PathBuf>,
    tone: Option<Tone>,
    html: bool,
    copy: bool,
    json: bool,
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(&config).await,

        Commands::Polish {
            text,
            file,
            tone,
            html,
            copy,
            json,
        } => {
            polish(
                &config,
                PolishRequest {
                    text,
                    file,
                    tone,
                    html,
                    copy,
                    json,
                },
            )
            .await
        }

        Commands::History { history_command } => handle_history(&config, history_command),

        Commands::Tones => {
            println!("{}", output::render_tones(config.default_tone));
            Ok(())
        }
    }
}

#[cfg(feature = "tui")]
async fn run_tui(config: &Config) -> Result<()> {
    factory::warn_if_unauthenticated(config);
    let controller = factory::create_controller(config);
    elite_editor::tui::run(controller, clipboard::default_sink()).await
}

#[cfg(not(feature = "tui"))]
async fn run_tui(_config: &Config) -> Result<()> {
    bail!("this build has no terminal UI; rebuild with `--features tui` or use `elite-editor polish`")
}

async fn polish(config: &Config, request: PolishRequest) -> Result<()> {
    if config.api_key.is_none() {
        bail!(
            "No Gemini API key configured. Set ELITE_EDITOR_API_KEY or api_key in {}",
            config.config_path.display()
        );
    }

    let raw = read_draft(request.text, request.file)?;
    let markup = if request.html {
        raw
    } else {
        EditorDocument::from_plain_text(&raw).to_markup()
    };

    let mut controller = factory::create_controller(config);
    controller.dispatch(Action::DraftChanged(markup));
    if let Some(tone) = request.tone {
        controller.dispatch(Action::ToneChanged(tone));
    }

    match controller.submit().await {
        SubmitOutcome::Polished => {}
        SubmitOutcome::Rejected => bail!("The draft is empty; nothing to polish"),
        SubmitOutcome::Failed => bail!(RewriteFailure),
    }

    let state = controller.state();
    let result = state.result.as_ref().context("rewrite finished without a result")?;
    if request.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", output::render_result(state.tone, result));
    }

    // A success can still carry a persistence warning.
    if let Some(warning) = &state.error {
        eprintln!("  {} {}", ui::yellow("!"), warning);
    }

    if request.copy {
        let mut sink = clipboard::default_sink();
        sink.write(&CopyPayload::from_markup(&result.polished_text))?;
        eprintln!("  {} Copied", ui::success("✓"));
    }
    Ok(())
}

fn read_draft(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft from {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No draft given. Pass TEXT, --file PATH, or pipe the draft on stdin");
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("Failed to read draft from stdin")?;
    Ok(buf)
}

fn handle_history(config: &Config, command: HistoryCommands) -> Result<()> {
    let mut controller = factory::create_controller(config);

    match command {
        HistoryCommands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(controller.history())?);
            } else {
                println!("{}", output::render_history_list(controller.history()));
            }
            Ok(())
        }

        HistoryCommands::Show { id } => {
            let entry = controller
                .history()
                .get(&id)
                .ok_or_else(|| HistoryError::NotFound(id.clone()))?;
            println!("{}", output::render_entry(entry));
            Ok(())
        }

        HistoryCommands::Delete { id } => {
            if !controller.history().contains(&id) {
                bail!(HistoryError::NotFound(id));
            }
            controller.dispatch(Action::HistoryEntryDeleted(id.clone()));
            ensure_persisted(&controller)?;
            println!("  {} Deleted {}", ui::success("✓"), ui::value(&id));
            Ok(())
        }

        HistoryCommands::Clear { yes } => {
            if controller.history().is_empty() {
                println!("  {}", ui::dim("No previous drafts"));
                return Ok(());
            }
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("  Clear all history?")
                    .default(false)
                    .interact()?;
            if !confirmed {
                println!("  {}", ui::dim("Cancelled"));
                return Ok(());
            }
            controller.dispatch(Action::HistoryCleared);
            ensure_persisted(&controller)?;
            println!("  {} History cleared", ui::success("✓"));
            Ok(())
        }
    }
}

fn ensure_persisted(controller: &Controller) -> Result<()> {
    match &controller.state().error {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}
