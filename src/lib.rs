#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod domain;
pub mod editor;
pub mod error;
pub mod factory;
pub mod history;
pub mod providers;
pub mod rewrite;
#[cfg(feature = "tui")]
pub mod tui;
pub mod ui;

pub use config::Config;
pub use controller::{Action, Controller, Effect};
pub use error::{EditorError, RewriteFailure};
